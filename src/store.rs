//! All of the dashboard's state in one place.
//!
//! Nothing in here touches the network - callers [`Store::begin`] a request to get a
//! [`RequestToken`], go and make the request, and then hand whatever came back to
//! [`Store::apply`] as an [`Action::Settle`]. Mutation outcomes always land. A list response
//! is thrown away if a newer list request for that collection has been issued, or if a
//! mutation of that collection landed after the list request went out.

use crate::{
    api::{Operation, Resource},
    data::{
        RecordId,
        course::{Course, CourseDraft},
        image::ImageUpload,
        student::{Student, StudentDraft, StudentField},
    },
    error::{DashboardError, UnknownSectionSnafu},
};
use std::{
    collections::{BTreeSet, HashMap},
    str::FromStr,
};

///which panel is showing - exactly one at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    StudentList,
    StudentCreate,
    StudentEdit(RecordId),
    StudentView(RecordId),
    CourseList,
    CourseCreate,
}

impl Section {
    pub const fn is_course_section(&self) -> bool {
        matches!(self, Self::CourseList | Self::CourseCreate)
    }

    ///the sidebar can always get you back to a list, everything else has to come from the right place
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self, next) {
            (_, Self::StudentList | Self::CourseList) => true,
            (Self::StudentList, Self::StudentCreate | Self::StudentEdit(_) | Self::StudentView(_)) => {
                true
            }
            (Self::StudentView(viewing), Self::StudentEdit(editing)) => viewing == editing,
            (Self::CourseList, Self::CourseCreate) => true,
            _ => false,
        }
    }
}

impl FromStr for Section {
    type Err = DashboardError;

    ///only the sections that don't need an id can be reached by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "student_list" => Self::StudentList,
            "student_create" => Self::StudentCreate,
            "course_list" => Self::CourseList,
            "course_create" => Self::CourseCreate,
            _ => return UnknownSectionSnafu { name: s }.fail(),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken {
    serial: u64,
    operation: Operation,
}

#[derive(Debug, Default)]
struct RequestTracker {
    issued: u64,
    latest_fetch: HashMap<Resource, u64>,
    ///`issued` as it was when a mutation of the resource last succeeded
    mutated_at: HashMap<Resource, u64>,
    outstanding: BTreeSet<RequestToken>,
}

impl RequestTracker {
    fn issue(&mut self, operation: Operation) -> RequestToken {
        self.issued += 1;
        let token = RequestToken {
            serial: self.issued,
            operation,
        };
        if !operation.is_mutation() {
            self.latest_fetch.insert(operation.resource(), token.serial);
        }
        self.outstanding.insert(token);
        token
    }

    ///returns whether what came back for this token should be applied
    fn settle(&mut self, token: RequestToken, succeeded: bool) -> bool {
        if !self.outstanding.remove(&token) {
            return false;
        }

        let resource = token.operation.resource();
        if token.operation.is_mutation() {
            if succeeded {
                self.mutated_at.insert(resource, self.issued);
            }
            return true;
        }

        self.latest_fetch.get(&resource) == Some(&token.serial)
            && self
                .mutated_at
                .get(&resource)
                .is_none_or(|&mutated_at| token.serial > mutated_at)
    }

    fn any_outstanding(&self) -> bool {
        !self.outstanding.is_empty()
    }
}

#[derive(Debug)]
pub enum Action {
    Navigate(Section),
    SetStudentField(StudentField, String),
    SetStudentImage(Option<ImageUpload>),
    SetCourseName(String),
    CancelForm,
    Fail(String),
    DismissError,
    Settle(RequestToken, Settled),
}

///what came back from the api for one request
#[derive(Debug)]
pub enum Settled {
    StudentsLoaded(Vec<Student>),
    StudentCreated(Student),
    StudentUpdated(Student),
    StudentDeleted(RecordId),
    CoursesLoaded(Vec<Course>),
    CourseCreated(Course),
    Failed(Operation),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Applied,
    ///not allowed from where we are, nothing changed
    Rejected,
    ///an out-of-date list response, nothing changed
    Stale,
}

#[derive(Debug)]
pub struct Store {
    students: Vec<Student>,
    courses: Vec<Course>,
    section: Section,
    student_draft: StudentDraft,
    course_draft: CourseDraft,
    error: Option<String>,
    requests: RequestTracker,
    with_courses: bool,
}

impl Store {
    pub fn new(with_courses: bool) -> Self {
        Self {
            students: vec![],
            courses: vec![],
            section: Section::default(),
            student_draft: StudentDraft::default(),
            course_draft: CourseDraft::default(),
            error: None,
            requests: RequestTracker::default(),
            with_courses,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: &RecordId) -> Option<&Student> {
        self.students.iter().find(|student| &student.id == id)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub const fn section(&self) -> &Section {
        &self.section
    }

    pub const fn student_draft(&self) -> &StudentDraft {
        &self.student_draft
    }

    pub const fn course_draft(&self) -> &CourseDraft {
        &self.course_draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.requests.any_outstanding()
    }

    ///`None` means the request mustn't be sent: either it's a mutation and something is
    ///already in flight, or it's for courses and courses are turned off
    pub fn begin(&mut self, operation: Operation) -> Option<RequestToken> {
        if operation.is_mutation() && self.is_loading() {
            return None;
        }
        if operation.resource() == Resource::Courses && !self.with_courses {
            return None;
        }

        self.error = None;
        Some(self.requests.issue(operation))
    }

    pub fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::Navigate(next) => self.navigate(next),
            Action::SetStudentField(field, value) => {
                self.student_draft.set(field, value);
                Transition::Applied
            }
            Action::SetStudentImage(upload) => {
                self.student_draft.profile_image = upload;
                Transition::Applied
            }
            Action::SetCourseName(name) => {
                self.course_draft.name = name;
                Transition::Applied
            }
            Action::CancelForm => match self.section {
                Section::StudentCreate | Section::StudentEdit(_) => {
                    self.student_draft = StudentDraft::default();
                    self.section = Section::StudentList;
                    Transition::Applied
                }
                Section::CourseCreate => {
                    self.course_draft = CourseDraft::default();
                    self.section = Section::CourseList;
                    Transition::Applied
                }
                _ => Transition::Rejected,
            },
            Action::Fail(message) => {
                self.error = Some(message);
                Transition::Applied
            }
            Action::DismissError => {
                self.error = None;
                Transition::Applied
            }
            Action::Settle(token, settled) => {
                let succeeded = !matches!(settled, Settled::Failed(_));
                if !self.requests.settle(token, succeeded) {
                    return Transition::Stale;
                }
                self.settle(settled);
                Transition::Applied
            }
        }
    }

    fn navigate(&mut self, next: Section) -> Transition {
        if next.is_course_section() && !self.with_courses {
            return Transition::Rejected;
        }
        if !self.section.can_transition_to(&next) {
            return Transition::Rejected;
        }

        match &next {
            Section::StudentEdit(id) => {
                let Some(student) = self.student(id) else {
                    return Transition::Rejected;
                };
                self.student_draft = StudentDraft::from_student(student);
            }
            Section::StudentView(id) if self.student(id).is_none() => {
                return Transition::Rejected;
            }
            _ => {
                //a half-finished edit shouldn't leak into the create form
                if matches!(self.section, Section::StudentEdit(_)) {
                    self.student_draft = StudentDraft::default();
                }
            }
        }

        self.section = next;
        Transition::Applied
    }

    fn leave_student(&mut self, id: &RecordId) {
        if matches!(&self.section, Section::StudentEdit(x) | Section::StudentView(x) if x == id) {
            if matches!(self.section, Section::StudentEdit(_)) {
                self.student_draft = StudentDraft::default();
            }
            self.section = Section::StudentList;
        }
    }

    fn upsert_student(&mut self, student: Student) {
        match self.students.iter_mut().find(|s| s.id == student.id) {
            Some(existing) => *existing = student,
            None => self.students.push(student),
        }
    }

    fn settle(&mut self, settled: Settled) {
        match settled {
            Settled::StudentsLoaded(students) => {
                self.students = students;
                if let Section::StudentEdit(id) | Section::StudentView(id) = self.section.clone() {
                    if self.student(&id).is_none() {
                        self.leave_student(&id);
                    }
                }
            }
            Settled::StudentCreated(student) => {
                //a list fetched while the create was in flight may already have it
                self.upsert_student(student);
                self.student_draft = StudentDraft::default();
                if self.section == Section::StudentCreate {
                    self.section = Section::StudentList;
                }
            }
            Settled::StudentUpdated(student) => {
                let id = student.id.clone();
                self.upsert_student(student);
                self.leave_student(&id);
            }
            Settled::StudentDeleted(id) => {
                self.students.retain(|student| student.id != id);
                self.leave_student(&id);
            }
            Settled::CoursesLoaded(courses) => {
                self.courses = courses;
            }
            Settled::CourseCreated(course) => {
                self.courses.push(course);
                self.course_draft = CourseDraft::default();
                if self.section == Section::CourseCreate {
                    self.section = Section::CourseList;
                }
            }
            Settled::Failed(operation) => {
                self.error = Some(operation.failure_message().to_string());
            }
        }
    }
}
