use crate::{api::Resource, state::DashboardState};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use std::convert::Infallible;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SseEvent {
    StudentsChanged,
    CoursesChanged,
}

impl SseEvent {
    pub const fn changed(resource: Resource) -> Self {
        match resource {
            Resource::Students => Self::StudentsChanged,
            Resource::Courses => Self::CoursesChanged,
        }
    }

    ///what the list panels listen for, as `sse:<name>`
    pub const fn name(self) -> &'static str {
        match self {
            Self::StudentsChanged => "students_changed",
            Self::CoursesChanged => "courses_changed",
        }
    }
}

pub async fn sse_feed(
    State(state): State<DashboardState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe_to_sse_feed()).filter_map(|event| {
        //lagging just means a tab missed a refresh it'll get on the next change anyway
        event
            .ok()
            .map(|event| Ok(Event::default().event(event.name()).data("")))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
