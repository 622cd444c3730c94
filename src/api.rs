//! The remote student/course REST api, and the one seam the dashboard talks to it through.

use crate::{
    config::ApiConfig,
    data::{
        RecordId,
        course::{Course, CourseDraft},
        student::{Student, StudentDraft, StudentField},
    },
    error::{
        ApiDecodeSnafu, ApiRequestSnafu, ApiStatusSnafu, BuildHttpClientSnafu, DashboardResult,
    },
};
use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::{
    fmt::{Debug, Display, Formatter},
    sync::Arc,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Students,
    Courses,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    ListStudents,
    CreateStudent,
    UpdateStudent,
    DeleteStudent,
    ListCourses,
    CreateCourse,
}

impl Operation {
    pub const fn resource(self) -> Resource {
        match self {
            Self::ListStudents | Self::CreateStudent | Self::UpdateStudent | Self::DeleteStudent => {
                Resource::Students
            }
            Self::ListCourses | Self::CreateCourse => Resource::Courses,
        }
    }

    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::ListStudents | Self::ListCourses)
    }

    ///what the user sees, whatever actually went wrong
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::ListStudents => "Failed to fetch students",
            Self::CreateStudent => "Failed to create student",
            Self::UpdateStudent => "Failed to update student",
            Self::DeleteStudent => "Failed to delete student",
            Self::ListCourses => "Failed to fetch courses",
            Self::CreateCourse => "Failed to create course",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ListStudents => "fetch students",
            Self::CreateStudent => "create student",
            Self::UpdateStudent => "update student",
            Self::DeleteStudent => "delete student",
            Self::ListCourses => "fetch courses",
            Self::CreateCourse => "create course",
        })
    }
}

///every method is exactly one request, with no retries
#[async_trait]
pub trait RecordsApi: Send + Sync + Debug {
    async fn list_students(&self) -> DashboardResult<Vec<Student>>;
    async fn create_student(&self, draft: &StudentDraft) -> DashboardResult<Student>;
    async fn update_student(&self, id: &RecordId, draft: &StudentDraft)
    -> DashboardResult<Student>;
    async fn delete_student(&self, id: &RecordId) -> DashboardResult<()>;
    async fn list_courses(&self) -> DashboardResult<Vec<Course>>;
    async fn create_course(&self, draft: &CourseDraft) -> DashboardResult<Course>;
}

#[derive(Debug, Clone)]
pub struct HttpRecordsApi {
    client: Client,
    config: Arc<ApiConfig>,
}

impl HttpRecordsApi {
    pub fn new(config: Arc<ApiConfig>) -> DashboardResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(BuildHttpClientSnafu)?;

        Ok(Self { client, config })
    }

    fn student_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.student_api())
    }

    fn course_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.course_api())
    }

    async fn send(request: RequestBuilder, operation: Operation) -> DashboardResult<Response> {
        let response = request
            .send()
            .await
            .context(ApiRequestSnafu { operation })?;

        let status = response.status();
        snafu::ensure!(status.is_success(), ApiStatusSnafu { status, operation });

        Ok(response)
    }

    async fn send_for_json<T: DeserializeOwned>(
        request: RequestBuilder,
        operation: Operation,
    ) -> DashboardResult<T> {
        Self::send(request, operation)
            .await?
            .json()
            .await
            .context(ApiDecodeSnafu { operation })
    }
}

fn student_form(draft: &StudentDraft, operation: Operation) -> DashboardResult<Form> {
    let mut form = StudentField::ALL
        .into_iter()
        .fold(Form::new(), |form, field| {
            form.text(field.input_name(), draft.get(field).trim().to_string())
        });

    if let Some(upload) = &draft.profile_image {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .context(ApiRequestSnafu { operation })?;
        form = form.part("profileImage", part);
    }

    Ok(form)
}

#[async_trait]
impl RecordsApi for HttpRecordsApi {
    async fn list_students(&self) -> DashboardResult<Vec<Student>> {
        Self::send_for_json(
            self.client.get(self.student_url("getStudent")),
            Operation::ListStudents,
        )
        .await
    }

    async fn create_student(&self, draft: &StudentDraft) -> DashboardResult<Student> {
        let operation = Operation::CreateStudent;
        let form = student_form(draft, operation)?;
        Self::send_for_json(
            self.client
                .post(self.student_url("addStudent"))
                .multipart(form),
            operation,
        )
        .await
    }

    async fn update_student(
        &self,
        id: &RecordId,
        draft: &StudentDraft,
    ) -> DashboardResult<Student> {
        let operation = Operation::UpdateStudent;
        let form = student_form(draft, operation)?;
        let url = self.student_url(&format!("updatedStudentById/{}", id.url_segment()));
        Self::send_for_json(self.client.put(url).multipart(form), operation).await
    }

    async fn delete_student(&self, id: &RecordId) -> DashboardResult<()> {
        let url = self.student_url(&format!("DeleteStudentById/{}", id.url_segment()));
        Self::send(self.client.delete(url), Operation::DeleteStudent).await?;
        Ok(())
    }

    async fn list_courses(&self) -> DashboardResult<Vec<Course>> {
        Self::send_for_json(
            self.client.get(self.course_url("getAllCourses")),
            Operation::ListCourses,
        )
        .await
    }

    async fn create_course(&self, draft: &CourseDraft) -> DashboardResult<Course> {
        Self::send_for_json(
            self.client.post(self.course_url("addCourse")).json(draft),
            Operation::CreateCourse,
        )
        .await
    }
}
