use crate::{
    crud::{at_most, IntoRecord},
    error::ApiError,
    response::Stamps,
};
use formdesk_db::models;

/// Longest answer the store accepts.
pub const MAX_ANSWER_CHARS: usize = 250;

#[derive(serde::Deserialize, Debug)]
pub struct FormAnswerRequest {
    #[serde(default)]
    form_field_id: Option<i32>,
    answer: String,
    #[serde(default)]
    submission_id: Option<i32>,
}

impl IntoRecord for FormAnswerRequest {
    type Record = models::NewFormAnswer;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewFormAnswer {
            form_field_id: self.form_field_id,
            answer: at_most(self.answer, "answer", MAX_ANSWER_CHARS)?,
            submission_id: self.submission_id,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct FormAnswerResponse {
    id: i32,
    form_field_id: Option<i32>,
    answer: String,
    submission_id: Option<i32>,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::FormAnswer> for FormAnswerResponse {
    fn from(answer: models::FormAnswer) -> Self {
        Self {
            id: answer.id,
            form_field_id: answer.form_field_id,
            answer: answer.answer,
            submission_id: answer.submission_id,
            stamps: Stamps::new(answer.created, answer.updated),
        }
    }
}

crud_handlers! {
    noun: "form answer", request: FormAnswerRequest, response: FormAnswerResponse;
    create => create_form_answer,
    get => load_form_answer,
    list => list_form_answers,
    update => update_form_answer,
    delete => delete_form_answer,
}
