use maud::{Markup, Render, html};

pub const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
pub const PRIMARY_BUTTON: &str = "bg-blue-600 hover:bg-blue-800 disabled:opacity-50 font-bold py-2 px-4 rounded";
pub const SECONDARY_BUTTON: &str = "bg-gray-700 hover:bg-gray-600 disabled:opacity-50 text-gray-300 font-bold py-2 px-4 rounded";
pub const DANGER_BUTTON: &str = "bg-red-600 hover:bg-red-800 disabled:opacity-50 font-bold py-2 px-4 rounded";

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, input: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (input)
        }
    }
}

pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4 flex flex-row justify-between" role="alert" {
            span {(message)}
            button class="font-bold px-2" hx-post="/internal/error/dismiss" hx-target="#panel" {"×"}
        }
    }
}

pub fn render_sidebar(with_courses: bool) -> Markup {
    html! {
        aside class="w-56 bg-gray-800 p-6 flex flex-col space-y-4 shadow-xl" {
            h1 class="text-2xl font-semibold" {"Dashboard"}
            nav class="flex flex-col space-y-2" {
                button class=(SECONDARY_BUTTON) hx-post="/internal/section/student_list" hx-target="#panel" {
                    "👥 Students"
                }
                @if with_courses {
                    button class=(SECONDARY_BUTTON) hx-post="/internal/section/course_list" hx-target="#panel" {
                        "📚 Courses"
                    }
                }
            }
        }
    }
}

pub struct Email<'a>(pub &'a str);

impl Render for Email<'_> {
    fn render(&self) -> Markup {
        html! {
            a href={"mailto:" (self.0)} class="text-blue-400" {(self.0)}
        }
    }
}
