use crate::{
    crud::IntoRecord,
    error::ApiError,
    extract::ApiJson,
    response::{self, Stamps},
    AppState,
};
use axum::{extract::State, response::Response};
use formdesk_db::models;
use itertools::Itertools;

#[derive(serde::Deserialize, Debug)]
pub struct FormFieldRequest {
    form_id: i32,
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

impl IntoRecord for FormFieldRequest {
    type Record = models::NewFormField;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        layout(self.field_span, self.field_row)?;
        Ok(models::NewFormField {
            form_id: self.form_id,
            field_id: self.field_id,
            validation: self.validation,
            field_span: self.field_span,
            field_row: self.field_row,
            group_id: self.group_id,
            form_group_id: self.form_group_id,
        })
    }
}

/// Layout positions are grid coordinates and cannot be negative.
pub fn layout(span: i32, row: i32) -> Result<(), ApiError> {
    if span < 0 || row < 0 {
        return Err(ApiError::BadRequest(
            "span and row must not be negative".to_owned(),
        ));
    }
    Ok(())
}

#[derive(serde::Serialize, Debug)]
pub struct FormFieldResponse {
    id: i32,
    form_id: i32,
    field_id: i32,
    validation: Option<serde_json::Value>,
    field_span: i32,
    field_row: i32,
    group_id: Option<i32>,
    form_group_id: Option<i32>,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::FormField> for FormFieldResponse {
    fn from(binding: models::FormField) -> Self {
        Self {
            id: binding.id,
            form_id: binding.form_id,
            field_id: binding.field_id,
            validation: binding.validation,
            field_span: binding.field_span,
            field_row: binding.field_row,
            group_id: binding.group_id,
            form_group_id: binding.form_group_id,
            stamps: Stamps::new(binding.created, binding.updated),
        }
    }
}

crud_handlers! {
    noun: "form field", request: FormFieldRequest, response: FormFieldResponse;
    create => create_form_field,
    get => load_form_field,
    list => list_form_fields,
    update => update_form_field,
    delete => delete_form_field,
}

/// Binds several fields in one statement; nothing is stored if any fails.
pub async fn create_multiple(
    State(app_state): State<AppState>,
    ApiJson(requests): ApiJson<Vec<FormFieldRequest>>,
) -> Result<Response, ApiError> {
    if requests.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one form field is required".to_owned(),
        ));
    }
    let records = requests
        .into_iter()
        .map(IntoRecord::into_record)
        .collect::<Result<Vec<_>, _>>()?;
    let created = app_state.store.create_form_fields(records).await?;
    Ok(response::created(
        created
            .into_iter()
            .map(FormFieldResponse::from)
            .collect_vec(),
        "form fields created successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_rejects_negative_layout_positions() {
        let request: FormFieldRequest = serde_json::from_value(json!({
            "form_id": 1,
            "field_id": 2,
            "field_row": -1
        }))
        .unwrap();
        assert!(matches!(request.into_record(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn it_keeps_validation_rules_verbatim() {
        let request: FormFieldRequest = serde_json::from_value(json!({
            "form_id": 1,
            "field_id": 2,
            "validation": { "min": 1, "max": 9 },
            "field_span": 4,
            "form_group_id": 3
        }))
        .unwrap();
        let record = request.into_record().unwrap();
        assert_eq!(record.validation, Some(json!({ "min": 1, "max": 9 })));
        assert_eq!(record.field_span, 4);
        assert_eq!(record.field_row, 0);
        assert_eq!(record.group_id, None);
        assert_eq!(record.form_group_id, Some(3));
    }
}
