use crate::{
    actions,
    error::DashboardResult,
    state::DashboardState,
    store::{Action, Section, Transition},
};
use axum::extract::{Path, State};
use maud::Markup;

pub async fn internal_get_panel(State(state): State<DashboardState>) -> Markup {
    state.render_panel().await
}

pub async fn internal_post_section(
    State(state): State<DashboardState>,
    Path(name): Path<String>,
) -> DashboardResult<Markup> {
    let section: Section = name.parse()?;

    if state.store().await.apply(Action::Navigate(section.clone())) == Transition::Rejected {
        debug!(?section, "Ignoring navigation");
    }

    Ok(state.render_panel().await)
}

pub async fn internal_post_refresh(State(state): State<DashboardState>) -> Markup {
    actions::refresh(&state).await;
    state.render_panel().await
}

pub async fn internal_post_dismiss_error(State(state): State<DashboardState>) -> Markup {
    state.store().await.apply(Action::DismissError);
    state.render_panel().await
}
