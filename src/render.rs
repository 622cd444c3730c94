//! Pure functions from the [`Store`] to markup. Every panel is re-rendered from scratch each time.

use crate::{
    config::DisplayConfig,
    data::{
        course::Course,
        student::{Student, StudentDraft, StudentField},
    },
    maud_conveniences::{
        DANGER_BUTTON, Email, INPUT_CLASSES, PRIMARY_BUTTON, SECONDARY_BUTTON, error_banner,
        form_element, title,
    },
    store::{Section, Store},
};
use maud::{Markup, html};

pub fn panel(store: &Store, display: &DisplayConfig) -> Markup {
    let loading = store.is_loading();

    html! {
        @if let Some(error) = store.error() {
            (error_banner(error))
        }
        @match store.section() {
            Section::StudentList => {
                (student_list(store.students(), display, loading))
            },
            Section::StudentCreate => {
                (student_form(store, display, None))
            },
            Section::StudentEdit(id) => {
                @if let Some(student) = store.student(id) {
                    (student_form(store, display, Some(student)))
                }
            },
            Section::StudentView(id) => {
                @if let Some(student) = store.student(id) {
                    (student_detail(student, display, loading))
                }
            },
            Section::CourseList => {
                (course_list(store.courses(), loading))
            },
            Section::CourseCreate => {
                (course_form(store))
            },
        }
    }
}

pub fn student_list(students: &[Student], display: &DisplayConfig, loading: bool) -> Markup {
    html! {
        div class="container mx-auto" hx-get="/internal/panel" hx-trigger="sse:students_changed" hx-target="#panel" {
            div class="flex flex-row items-center justify-between mb-4" {
                (title(html! {"All Students (" (students.len()) ")"}))
                div class="flex flex-row space-x-2" {
                    button class=(SECONDARY_BUTTON) disabled[loading] hx-post="/internal/refresh" hx-target="#panel" {
                        "Refresh"
                    }
                    button class=(PRIMARY_BUTTON) disabled[loading] hx-post="/internal/section/student_create" hx-target="#panel" {
                        "Add New Student"
                    }
                }
            }
            div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4" {
                @for student in students {
                    (student_card(student, display, loading))
                }
            }
        }
    }
}

fn student_card(student: &Student, display: &DisplayConfig, loading: bool) -> Markup {
    html! {
        div class="student-card rounded-lg shadow-md p-4 text-center bg-gray-700" id={"student-" (student.id)} {
            img class="w-24 h-24 rounded-full mx-auto object-cover mb-2" src=(student.profile_image.display_src(&display.placeholder_image)) alt=(student.name);
            h3 class="text-lg font-semibold" {(student.name)}
            p class="text-gray-300" {(student.email)}
            p class="text-gray-400 italic" {(student.course)}
            div class="flex flex-row justify-center space-x-2 mt-2" {
                button class=(SECONDARY_BUTTON) disabled[loading] hx-get={"/internal/students/" (student.id.url_segment()) "/view"} hx-target="#panel" {"View"}
                button class=(SECONDARY_BUTTON) disabled[loading] hx-get={"/internal/students/" (student.id.url_segment()) "/edit"} hx-target="#panel" {"Edit"}
            }
        }
    }
}

pub fn student_detail(student: &Student, display: &DisplayConfig, loading: bool) -> Markup {
    html! {
        div class="container mx-auto" {
            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md mx-auto p-4" {
                img class="w-40 h-40 rounded-full mx-auto object-cover mb-4" src=(student.profile_image.display_src(&display.placeholder_image)) alt=(student.name);
                (title(&student.name))
                p {(Email(&student.email))}
                p class="text-gray-200 font-semibold" {
                    "Course: "
                    span class="font-medium" {(student.course)}
                }
                br;
                div class="flex flex-row space-x-2" {
                    button class=(PRIMARY_BUTTON) disabled[loading] hx-get={"/internal/students/" (student.id.url_segment()) "/edit"} hx-target="#panel" {
                        "Edit"
                    }
                    button class=(DANGER_BUTTON) disabled[loading] hx-delete={"/students/" (student.id.url_segment())} hx-confirm={"Delete " (student.name) "? This can't be undone."} hx-target="#panel" {
                        "Delete"
                    }
                    button class=(SECONDARY_BUTTON) hx-post="/internal/section/student_list" hx-target="#panel" {
                        "Back"
                    }
                }
            }
        }
    }
}

fn draft_input(field: StudentField, label: &str, input_type: &str, draft: &StudentDraft) -> Markup {
    let name = field.input_name();
    form_element(
        name,
        label,
        html! {
            input required type=(input_type) id=(name) name=(name) value=(draft.get(field)) class=(INPUT_CLASSES)
                hx-post="/internal/students/draft" hx-trigger="input changed delay:250ms" hx-swap="none" hx-params="not profileImage";
        },
    )
}

fn course_select(courses: &[Course], draft: &StudentDraft) -> Markup {
    let chosen = draft.course.as_str();
    let chosen_is_known = courses.iter().any(|course| course.name == chosen);

    form_element(
        "course",
        "Course",
        html! {
            select required id="course" name="course" class=(INPUT_CLASSES)
                hx-post="/internal/students/draft" hx-trigger="change" hx-swap="none" hx-params="not profileImage" {
                option value="" disabled selected[chosen.is_empty()] {"Select a course"}
                @for course in courses {
                    option value=(course.name) selected[course.name == chosen] {(course.name)}
                }
                //keep whatever the record already had, even if that course has since gone
                @if !chosen.is_empty() && !chosen_is_known {
                    option value=(chosen) selected {(chosen)}
                }
            }
        },
    )
}

pub fn student_form(store: &Store, display: &DisplayConfig, editing: Option<&Student>) -> Markup {
    let draft = store.student_draft();
    let loading = store.is_loading();
    let (heading, target, submit_label) = match editing {
        None => (
            "Add New Student".to_string(),
            "/students".to_string(),
            "Create Student",
        ),
        Some(student) => (
            format!("Edit {}", student.name),
            format!("/students/{}", student.id.url_segment()),
            "Save Changes",
        ),
    };

    html! {
        div class="container mx-auto max-w-md" {
            (title(heading))
            form class="student-form p-4 bg-gray-800 rounded shadow-md" hx-put=(target) hx-encoding="multipart/form-data" hx-target="#panel" {
                (draft_input(StudentField::Name, "Name", "text", draft))
                (draft_input(StudentField::Email, "Email", "email", draft))
                @if display.with_courses {
                    (course_select(store.courses(), draft))
                } @else {
                    (draft_input(StudentField::Course, "Course", "text", draft))
                }
                (form_element("profileImage", "Profile Image (optional)", html! {
                    input type="file" id="profileImage" name="profileImage" accept="image/*" class="block w-full text-sm text-gray-300 file:mr-4 file:py-2 file:px-4 file:rounded file:border-0 file:text-sm file:font-semibold file:bg-violet-50 file:text-violet-700 hover:file:bg-violet-100";
                }))
                @if let Some(student) = editing {
                    @if !student.profile_image.is_absent() {
                        p class="text-sm text-gray-400 mb-4" {"Leave empty to keep the current image."}
                    }
                }
                div class="flex items-center justify-between" {
                    button type="submit" class=(PRIMARY_BUTTON) disabled[loading] {(submit_label)}
                    button type="button" class=(SECONDARY_BUTTON) hx-post="/internal/students/cancel" hx-target="#panel" {"Cancel"}
                }
            }
        }
    }
}

pub fn course_list(courses: &[Course], loading: bool) -> Markup {
    html! {
        div class="container mx-auto" hx-get="/internal/panel" hx-trigger="sse:courses_changed" hx-target="#panel" {
            div class="flex flex-row items-center justify-between mb-4" {
                (title(html! {"All Courses (" (courses.len()) ")"}))
                div class="flex flex-row space-x-2" {
                    button class=(SECONDARY_BUTTON) disabled[loading] hx-post="/internal/refresh" hx-target="#panel" {
                        "Refresh"
                    }
                    button class=(PRIMARY_BUTTON) disabled[loading] hx-post="/internal/section/course_create" hx-target="#panel" {
                        "Add New Course"
                    }
                }
            }
            div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4" {
                @for course in courses {
                    div class="course-card rounded-lg shadow-md p-4 text-center bg-gray-700" {
                        h3 class="text-lg font-semibold" {(course.name)}
                    }
                }
            }
        }
    }
}

pub fn course_form(store: &Store) -> Markup {
    let loading = store.is_loading();

    html! {
        div class="container mx-auto max-w-md" {
            (title("Add New Course"))
            form class="p-4 bg-gray-800 rounded shadow-md" hx-put="/courses" hx-target="#panel" {
                (form_element("name", "Course Name", html! {
                    input required type="text" id="name" name="name" value=(store.course_draft().name) class=(INPUT_CLASSES)
                        hx-post="/internal/courses/draft" hx-trigger="input changed delay:250ms" hx-swap="none";
                }))
                div class="flex items-center justify-between" {
                    button type="submit" class=(PRIMARY_BUTTON) disabled[loading] {"Create Course"}
                    button type="button" class=(SECONDARY_BUTTON) hx-post="/internal/courses/cancel" hx-target="#panel" {"Cancel"}
                }
            }
        }
    }
}
