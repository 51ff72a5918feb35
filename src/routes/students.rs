use crate::{data::student::FormStudent, state::RosterState};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::Markup;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct IdForm {
    pub id: String,
}

#[derive(Deserialize)]
pub struct DeleteForm {
    pub id: String,
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn internal_get_students(State(state): State<RosterState>) -> Markup {
    state.load_list().await
}

pub async fn internal_get_student_in_detail(
    State(state): State<RosterState>,
    Query(IdForm { id }): Query<IdForm>,
) -> Markup {
    state.view(&id).await
}

pub async fn internal_delete_student(
    State(state): State<RosterState>,
    Query(DeleteForm { id, confirmed }): Query<DeleteForm>,
) -> Markup {
    state.delete(&id, confirmed.into()).await
}

pub async fn internal_get_add_student_form(State(state): State<RosterState>) -> Markup {
    state.new_student_form()
}

pub async fn internal_put_new_student(
    State(state): State<RosterState>,
    Form(form): Form<FormStudent>,
) -> Markup {
    state.create(form).await
}
