use crate::{
    crud::{at_most, IntoRecord},
    error::ApiError,
    extract::{ApiJson, ApiPath},
    form_answers::{FormAnswerResponse, MAX_ANSWER_CHARS},
    response,
    AppState,
};
use axum::{extract::State, response::Response};
use formdesk_db::models;
use itertools::Itertools;

#[derive(serde::Deserialize, Debug)]
pub struct SubmissionRequest {
    #[serde(default)]
    service_id: Option<i32>,
    #[serde(default)]
    created_by: Option<i32>,
}

impl IntoRecord for SubmissionRequest {
    type Record = models::NewSubmission;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewSubmission {
            service_id: self.service_id,
            created_by: self.created_by,
        })
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct SubmitRequest {
    #[serde(flatten)]
    submission: SubmissionRequest,
    #[serde(default)]
    answers: Vec<AnswerRequest>,
}

#[derive(serde::Deserialize, Debug)]
pub struct AnswerRequest {
    #[serde(default)]
    form_field_id: Option<i32>,
    answer: String,
}

impl AnswerRequest {
    fn into_answer(self) -> Result<models::NewFormAnswer, ApiError> {
        Ok(models::NewFormAnswer {
            form_field_id: self.form_field_id,
            answer: at_most(self.answer, "answer", MAX_ANSWER_CHARS)?,
            submission_id: None,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct SubmissionResponse {
    id: i32,
    service_id: Option<i32>,
    created_by: Option<i32>,
    created_on: jiff::Timestamp,
    updated: jiff::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    answers: Option<Vec<FormAnswerResponse>>,
}

impl SubmissionResponse {
    fn with_answers(submission: models::Submission, answers: Vec<models::FormAnswer>) -> Self {
        Self {
            answers: Some(answers.into_iter().map(FormAnswerResponse::from).collect_vec()),
            ..Self::from(submission)
        }
    }
}

impl From<models::Submission> for SubmissionResponse {
    fn from(submission: models::Submission) -> Self {
        Self {
            id: submission.id,
            service_id: submission.service_id,
            created_by: submission.created_by,
            created_on: submission.created_on.to_jiff(),
            updated: submission.updated.to_jiff(),
            answers: None,
        }
    }
}

crud_handlers! {
    noun: "submission", request: SubmissionRequest, response: SubmissionResponse;
    list => list_submissions,
    update => update_submission,
    delete => delete_submission,
}

/// Stores a submission and every answer in it, or nothing at all.
pub async fn create(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<SubmitRequest>,
) -> Result<Response, ApiError> {
    let submission = request.submission.into_record()?;
    let answers = request
        .answers
        .into_iter()
        .map(AnswerRequest::into_answer)
        .collect::<Result<Vec<_>, _>>()?;
    let (submission, answers) = app_state.store.submit_form(submission, answers).await?;
    Ok(response::created(
        SubmissionResponse::with_answers(submission, answers),
        "form submitted successfully",
    ))
}

pub async fn get(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, ApiError> {
    let (submission, answers) = app_state
        .store
        .load_submission_with_answers(id)
        .await
        .map_err(ApiError::lookup("submission"))?;
    Ok(response::ok(
        SubmissionResponse::with_answers(submission, answers),
        "submission retrieved successfully",
    ))
}

pub async fn by_service(
    State(app_state): State<AppState>,
    ApiPath(service_id): ApiPath<i32>,
) -> Result<Response, ApiError> {
    let submissions = app_state
        .store
        .list_submissions_by_service(service_id)
        .await?;
    Ok(response::ok(
        submissions
            .into_iter()
            .map(|(submission, answers)| SubmissionResponse::with_answers(submission, answers))
            .collect_vec(),
        "submissions retrieved successfully",
    ))
}
