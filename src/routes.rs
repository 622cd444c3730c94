use crate::state::DashboardState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use courses::{internal_post_course_cancel, internal_post_course_draft, put_new_course};
use index::get_index_route;
use sections::{
    internal_get_panel, internal_post_dismiss_error, internal_post_refresh, internal_post_section,
};
use sse::sse_feed;
use students::{
    delete_student, internal_get_student_edit, internal_get_student_view,
    internal_post_student_cancel, internal_post_student_draft, put_new_student, put_student,
};
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

pub mod courses;
pub mod index;
pub mod sections;
pub mod sse;
pub mod students;

pub fn router(state: DashboardState) -> Router {
    //a little headroom for the rest of the multipart body
    let body_limit = state.config().max_upload_bytes() + 64 * 1024;

    Router::new()
        .route("/", get(get_index_route))
        .route("/students", put(put_new_student))
        .route("/students/{id}", put(put_student).delete(delete_student))
        .route("/courses", put(put_new_course))
        .route("/internal/panel", get(internal_get_panel))
        .route("/internal/section/{section}", post(internal_post_section))
        .route("/internal/students/{id}/view", get(internal_get_student_view))
        .route("/internal/students/{id}/edit", get(internal_get_student_edit))
        .route("/internal/students/draft", post(internal_post_student_draft))
        .route("/internal/students/cancel", post(internal_post_student_cancel))
        .route("/internal/courses/draft", post(internal_post_course_draft))
        .route("/internal/courses/cancel", post(internal_post_course_cancel))
        .route("/internal/refresh", post(internal_post_refresh))
        .route("/internal/error/dismiss", post(internal_post_dismiss_error))
        .route("/sse_feed", get(sse_feed))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        actions::tests::state_with,
        api::{
            Operation,
            fake::{FakeRecordsApi, student},
        },
        store::Section,
    };
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header::CONTENT_TYPE},
        response::Response,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "dashboard-test-boundary";

    fn ann_and_bo() -> Arc<FakeRecordsApi> {
        Arc::new(FakeRecordsApi::with_students(vec![
            student("1", "Ann"),
            student("2", "Bo"),
        ]))
    }

    async fn send(state: &DashboardState, request: Request<Body>) -> Response {
        router(state.clone()).oneshot(request).await.unwrap()
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn multipart(method: Method, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        //browsers always send the file input, empty when nothing was picked
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"profileImage\"; filename=\"\"\r\nContent-Type: application/octet-stream\r\n\r\n\r\n--{BOUNDARY}--\r\n"
        ));

        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_fetches_and_renders_the_list() {
        let api = ann_and_bo();
        let state = state_with(api.clone(), false);

        let response = send(&state, request(Method::GET, "/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("All Students (2)"));
        assert!(html.contains("sse-connect=\"/sse_feed\""));
        assert_eq!(api.issued(), [Operation::ListStudents]);
    }

    #[tokio::test]
    async fn delete_removes_the_student_from_the_panel() {
        let api = ann_and_bo();
        let state = state_with(api.clone(), false);
        send(&state, request(Method::GET, "/")).await;

        let response = send(&state, request(Method::DELETE, "/students/2")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("All Students (1)"));
        assert!(!html.contains("bo@example.org"));
        assert_eq!(api.remote_students().len(), 1);
    }

    #[tokio::test]
    async fn submitting_the_create_form_adds_a_student() {
        let api = ann_and_bo();
        let state = state_with(api.clone(), false);
        send(&state, request(Method::GET, "/")).await;
        send(
            &state,
            request(Method::POST, "/internal/section/student_create"),
        )
        .await;

        let response = send(
            &state,
            multipart(
                Method::PUT,
                "/students",
                &[("name", "Cy"), ("email", "cy@example.org"), ("course", "Art")],
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("All Students (3)"));
        assert_eq!(api.count(Operation::CreateStudent), 1);
        assert_eq!(state.store().await.section(), &Section::StudentList);
    }

    #[tokio::test]
    async fn incomplete_create_form_sends_nothing() {
        let api = ann_and_bo();
        let state = state_with(api.clone(), false);
        send(
            &state,
            request(Method::POST, "/internal/section/student_create"),
        )
        .await;

        let response = send(
            &state,
            multipart(Method::PUT, "/students", &[("name", "Cy"), ("course", "Art")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Please fill in: email"));
        assert_eq!(api.count(Operation::CreateStudent), 0);
    }

    #[tokio::test]
    async fn draft_edits_are_kept_without_a_request() {
        let api = ann_and_bo();
        let state = state_with(api.clone(), false);

        let response = send(
            &state,
            multipart(Method::POST, "/internal/students/draft", &[("name", "Cy")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.store().await.student_draft().name, "Cy");
        assert!(api.issued().is_empty());
    }

    #[tokio::test]
    async fn viewing_a_student_shows_their_details() {
        let state = state_with(ann_and_bo(), false);
        send(&state, request(Method::GET, "/")).await;

        let response = send(&state, request(Method::GET, "/internal/students/1/view")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("ann@example.org"));
        assert_eq!(
            state.store().await.section(),
            &Section::StudentView("1".into())
        );
    }

    #[tokio::test]
    async fn escaped_ids_find_their_student() {
        let api = Arc::new(FakeRecordsApi::with_students(vec![student("a/b", "Ann")]));
        let state = state_with(api.clone(), false);
        send(&state, request(Method::GET, "/")).await;

        let response = send(&state, request(Method::GET, "/internal/students/a%2Fb/view")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state.store().await.section(),
            &Section::StudentView("a/b".into())
        );

        let response = send(&state, request(Method::DELETE, "/students/a%2Fb")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(api.remote_students().is_empty());
    }

    #[tokio::test]
    async fn unknown_things_are_not_found() {
        let state = state_with(ann_and_bo(), false);
        send(&state, request(Method::GET, "/")).await;

        let response = send(&state, request(Method::POST, "/internal/section/grades")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&state, request(Method::GET, "/internal/students/9/view")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.store().await.section(), &Section::StudentList);
    }

    #[tokio::test]
    async fn course_form_creates_a_course() {
        let api = Arc::new(FakeRecordsApi::with_students(vec![]).with_courses(&["Maths"]));
        let state = state_with(api.clone(), true);
        send(&state, request(Method::GET, "/")).await;
        send(&state, request(Method::POST, "/internal/section/course_list")).await;
        send(&state, request(Method::POST, "/internal/section/course_create")).await;

        let response = send(
            &state,
            Request::builder()
                .method(Method::PUT)
                .uri("/courses")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=Art"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("All Courses (2)"));
    }
}
