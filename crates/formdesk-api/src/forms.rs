use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    extract::{ApiJson, ApiPath},
    fields::FieldResponse,
    form_fields::{self, FormFieldResponse},
    response::{self, Stamps},
    AppState,
};
use axum::{extract::State, response::Response};
use formdesk_db::models;
use itertools::Itertools;

#[derive(serde::Deserialize, Debug)]
pub struct FormRequest {
    name: String,
    #[serde(default)]
    description: String,
    data_type_id: i32,
    #[serde(default)]
    service_id: Option<i32>,
    #[serde(default)]
    status: Option<bool>,
}

impl IntoRecord for FormRequest {
    type Record = models::NewForm;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewForm {
            name: at_most(required(self.name, "name")?, "name", 150)?,
            description: self.description,
            data_type_id: self.data_type_id,
            service_id: self.service_id,
            status: self.status,
        })
    }
}

/// A form together with the fields to bind to it on creation.
#[derive(serde::Deserialize, Debug)]
pub struct CreateFormRequest {
    #[serde(flatten)]
    form: FormRequest,
    #[serde(default)]
    fields: Vec<FieldPlacement>,
}

#[derive(serde::Deserialize, Debug)]
pub struct FieldPlacement {
    field_id: i32,
    #[serde(default)]
    validation: Option<serde_json::Value>,
    #[serde(default)]
    field_span: i32,
    #[serde(default)]
    field_row: i32,
    #[serde(default)]
    group_id: Option<i32>,
    #[serde(default)]
    form_group_id: Option<i32>,
}

impl FieldPlacement {
    /// The binding's `form_id` is assigned once the form is stored.
    fn into_binding(self) -> Result<models::NewFormField, ApiError> {
        form_fields::layout(self.field_span, self.field_row)?;
        Ok(models::NewFormField {
            form_id: 0,
            field_id: self.field_id,
            validation: self.validation,
            field_span: self.field_span,
            field_row: self.field_row,
            group_id: self.group_id,
            form_group_id: self.form_group_id,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct FormResponse {
    id: i32,
    name: String,
    description: String,
    data_type_id: i32,
    service_id: Option<i32>,
    status: Option<bool>,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::Form> for FormResponse {
    fn from(form: models::Form) -> Self {
        Self {
            id: form.id,
            name: form.name,
            description: form.description,
            data_type_id: form.data_type_id,
            service_id: form.service_id,
            status: form.status,
            stamps: Stamps::new(form.created, form.updated),
        }
    }
}

#[derive(serde::Serialize, Debug)]
pub struct CreatedFormResponse {
    #[serde(flatten)]
    form: FormResponse,
    fields: Vec<FormFieldResponse>,
}

#[derive(serde::Serialize, Debug)]
pub struct BoundField {
    #[serde(flatten)]
    binding: FormFieldResponse,
    field: FieldResponse,
}

#[derive(serde::Serialize, Debug)]
pub struct FormWithFieldsResponse {
    #[serde(flatten)]
    form: FormResponse,
    fields: Vec<BoundField>,
}

crud_handlers! {
    noun: "form", request: FormRequest, response: FormResponse;
    get => load_form,
    list => list_forms,
    update => update_form,
    delete => delete_form,
}

pub async fn create(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<CreateFormRequest>,
) -> Result<Response, ApiError> {
    let form = request.form.into_record()?;
    let bindings = request
        .fields
        .into_iter()
        .map(FieldPlacement::into_binding)
        .collect::<Result<Vec<_>, _>>()?;
    let (form, bindings) = app_state
        .store
        .create_form_with_fields(form, bindings)
        .await?;
    Ok(response::created(
        CreatedFormResponse {
            form: form.into(),
            fields: bindings.into_iter().map(FormFieldResponse::from).collect_vec(),
        },
        "form created successfully",
    ))
}

pub async fn get_with_fields(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, ApiError> {
    let (form, fields) = app_state
        .store
        .load_form_with_fields(id)
        .await
        .map_err(ApiError::lookup("form"))?;
    Ok(response::ok(
        FormWithFieldsResponse {
            form: form.into(),
            fields: fields
                .into_iter()
                .map(|(binding, field)| BoundField {
                    binding: binding.into(),
                    field: field.into(),
                })
                .collect_vec(),
        },
        "form retrieved successfully",
    ))
}

#[derive(serde::Deserialize, Debug)]
pub struct StatusRequest {
    status: Option<bool>,
}

pub async fn set_status(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> Result<Response, ApiError> {
    let form = app_state
        .store
        .set_form_status(id, request.status)
        .await
        .map_err(ApiError::lookup("form"))?;
    Ok(response::ok(
        FormResponse::from(form),
        "form status updated successfully",
    ))
}
