//! User actions that need the api: each one begins a request against the [`Store`], lets go of
//! it while the request is in flight, and then settles whatever came back.

use crate::{
    api::Operation,
    data::RecordId,
    error::DashboardResult,
    routes::sse::SseEvent,
    state::DashboardState,
    store::{Action, RequestToken, Settled, Store, Transition},
};

async fn settle<T>(
    state: &DashboardState,
    token: RequestToken,
    operation: Operation,
    result: DashboardResult<T>,
    on_success: impl FnOnce(T) -> Settled,
) -> Transition {
    let (settled, succeeded) = match result {
        Ok(value) => (on_success(value), true),
        Err(e) => {
            warn!(?e, %operation, "Request to the records api failed");
            (Settled::Failed(operation), false)
        }
    };

    let transition = state.store().await.apply(Action::Settle(token, settled));
    if transition == Transition::Stale {
        debug!(?token, %operation, "Discarding an out-of-date response");
    }

    //the remote changed even if our copy didn't
    if succeeded && operation.is_mutation() {
        state.send_sse_event(SseEvent::changed(operation.resource()));
    }

    transition
}

fn begin(store: &mut Store, operation: Operation) -> Option<RequestToken> {
    let token = store.begin(operation);
    if token.is_none() {
        debug!(%operation, "Not sending request");
    }
    token
}

pub async fn load_students(state: &DashboardState) -> Transition {
    let operation = Operation::ListStudents;
    let Some(token) = begin(&mut *state.store().await, operation) else {
        return Transition::Rejected;
    };

    let result = state.api().list_students().await;
    if let Ok(students) = &result {
        info!(n = students.len(), "Fetched students");
    }
    settle(state, token, operation, result, Settled::StudentsLoaded).await
}

pub async fn load_courses(state: &DashboardState) -> Transition {
    let operation = Operation::ListCourses;
    let Some(token) = begin(&mut *state.store().await, operation) else {
        return Transition::Rejected;
    };

    let result = state.api().list_courses().await;
    settle(state, token, operation, result, Settled::CoursesLoaded).await
}

///what happens on mount, and on the refresh button
pub async fn refresh(state: &DashboardState) {
    load_students(state).await;
    if state.config().display_config().with_courses {
        load_courses(state).await;
    }
}

pub async fn create_student(state: &DashboardState) -> Transition {
    let operation = Operation::CreateStudent;
    let (token, draft) = {
        let mut store = state.store().await;
        if let Err(e) = store.student_draft().validate() {
            store.apply(Action::Fail(e.to_string()));
            return Transition::Rejected;
        }
        let Some(token) = begin(&mut store, operation) else {
            return Transition::Rejected;
        };
        (token, store.student_draft().clone())
    };

    let result = state.api().create_student(&draft).await;
    settle(state, token, operation, result, Settled::StudentCreated).await
}

pub async fn update_student(state: &DashboardState, id: RecordId) -> Transition {
    let operation = Operation::UpdateStudent;
    let (token, draft) = {
        let mut store = state.store().await;
        if let Err(e) = store.student_draft().validate() {
            store.apply(Action::Fail(e.to_string()));
            return Transition::Rejected;
        }
        let Some(token) = begin(&mut store, operation) else {
            return Transition::Rejected;
        };
        (token, store.student_draft().clone())
    };

    let result = state.api().update_student(&id, &draft).await;
    settle(state, token, operation, result, Settled::StudentUpdated).await
}

pub async fn delete_student(state: &DashboardState, id: RecordId) -> Transition {
    let operation = Operation::DeleteStudent;
    let Some(token) = begin(&mut *state.store().await, operation) else {
        return Transition::Rejected;
    };

    let result = state.api().delete_student(&id).await;
    settle(state, token, operation, result, |()| Settled::StudentDeleted(id)).await
}

pub async fn create_course(state: &DashboardState) -> Transition {
    let operation = Operation::CreateCourse;
    let (token, draft) = {
        let mut store = state.store().await;
        if let Err(e) = store.course_draft().validate() {
            store.apply(Action::Fail(e.to_string()));
            return Transition::Rejected;
        }
        let Some(token) = begin(&mut store, operation) else {
            return Transition::Rejected;
        };
        (token, store.course_draft().clone())
    };

    let result = state.api().create_course(&draft).await;
    settle(state, token, operation, result, Settled::CourseCreated).await
}
