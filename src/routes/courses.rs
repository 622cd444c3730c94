use crate::{
    actions, data::course::CourseDraft, state::DashboardState, store::Action,
};
use axum::{Form, extract::State, http::StatusCode};
use maud::Markup;

pub async fn internal_post_course_draft(
    State(state): State<DashboardState>,
    Form(draft): Form<CourseDraft>,
) -> StatusCode {
    state.store().await.apply(Action::SetCourseName(draft.name));
    StatusCode::NO_CONTENT
}

pub async fn internal_post_course_cancel(State(state): State<DashboardState>) -> Markup {
    state.store().await.apply(Action::CancelForm);
    state.render_panel().await
}

pub async fn put_new_course(
    State(state): State<DashboardState>,
    Form(draft): Form<CourseDraft>,
) -> Markup {
    state.store().await.apply(Action::SetCourseName(draft.name));
    actions::create_course(&state).await;
    state.render_panel().await
}
