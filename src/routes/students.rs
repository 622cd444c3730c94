use crate::{
    actions,
    data::{RecordId, image::ImageUpload, student::StudentField},
    error::{DashboardResult, MissingStudentSnafu, MultipartSnafu},
    state::DashboardState,
    store::{Action, Section, Store, Transition},
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use maud::Markup;
use snafu::{OptionExt, ResultExt};

///everything the student form sent, in the order it was sent
#[derive(Debug, Default)]
pub struct StudentFormInput {
    pub fields: Vec<(StudentField, String)>,
    pub image: Option<ImageUpload>,
}

impl StudentFormInput {
    pub async fn read(mut multipart: Multipart) -> DashboardResult<Self> {
        let mut input = Self::default();

        while let Some(field) = multipart.next_field().await.context(MultipartSnafu)? {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if name == "profileImage" {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.context(MultipartSnafu)?;
                input.image = ImageUpload::from_part(file_name, content_type, bytes.to_vec())?;
            } else if let Ok(student_field) = name.parse::<StudentField>() {
                let value = field.text().await.context(MultipartSnafu)?;
                input.fields.push((student_field, value));
            } else {
                trace!(?name, "Ignoring unknown student form field");
            }
        }

        Ok(input)
    }

    ///last write wins, same as typing into the inputs one at a time
    fn apply_fields(&mut self, store: &mut Store) {
        for (field, value) in self.fields.drain(..) {
            store.apply(Action::SetStudentField(field, value));
        }
    }

    fn apply_all(mut self, store: &mut Store) {
        self.apply_fields(store);
        store.apply(Action::SetStudentImage(self.image));
    }
}

async fn navigate_to_student(state: &DashboardState, section: Section, id: RecordId) -> DashboardResult<Markup> {
    {
        let mut store = state.store().await;
        store.student(&id).context(MissingStudentSnafu { id })?;
        if store.apply(Action::Navigate(section.clone())) == Transition::Rejected {
            debug!(?section, "Ignoring navigation");
        }
    }

    Ok(state.render_panel().await)
}

pub async fn internal_get_student_view(
    State(state): State<DashboardState>,
    Path(id): Path<RecordId>,
) -> DashboardResult<Markup> {
    navigate_to_student(&state, Section::StudentView(id.clone()), id).await
}

pub async fn internal_get_student_edit(
    State(state): State<DashboardState>,
    Path(id): Path<RecordId>,
) -> DashboardResult<Markup> {
    navigate_to_student(&state, Section::StudentEdit(id.clone()), id).await
}

pub async fn internal_post_student_draft(
    State(state): State<DashboardState>,
    multipart: Multipart,
) -> DashboardResult<StatusCode> {
    let mut input = StudentFormInput::read(multipart).await?;
    //images only get picked up on submit
    input.apply_fields(&mut *state.store().await);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn internal_post_student_cancel(State(state): State<DashboardState>) -> Markup {
    state.store().await.apply(Action::CancelForm);
    state.render_panel().await
}

pub async fn put_new_student(
    State(state): State<DashboardState>,
    multipart: Multipart,
) -> DashboardResult<Markup> {
    let input = StudentFormInput::read(multipart).await?;
    input.apply_all(&mut *state.store().await);

    actions::create_student(&state).await;
    Ok(state.render_panel().await)
}

pub async fn put_student(
    State(state): State<DashboardState>,
    Path(id): Path<RecordId>,
    multipart: Multipart,
) -> DashboardResult<Markup> {
    let input = StudentFormInput::read(multipart).await?;
    {
        let mut store = state.store().await;
        store.student(&id).context(MissingStudentSnafu { id: id.clone() })?;
        input.apply_all(&mut *store);
    }

    actions::update_student(&state, id).await;
    Ok(state.render_panel().await)
}

pub async fn delete_student(
    State(state): State<DashboardState>,
    Path(id): Path<RecordId>,
) -> DashboardResult<Markup> {
    state
        .store()
        .await
        .student(&id)
        .context(MissingStudentSnafu { id: id.clone() })?;

    actions::delete_student(&state, id).await;
    Ok(state.render_panel().await)
}
