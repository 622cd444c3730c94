use crate::{actions, state::DashboardState};
use axum::extract::State;
use maud::Markup;

///a full page load is the dashboard mounting, so the collections are fetched afresh
pub async fn get_index_route(State(state): State<DashboardState>) -> Markup {
    actions::refresh(&state).await;
    state.render(state.render_panel().await)
}
