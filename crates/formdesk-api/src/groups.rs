use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    extract::{ApiJson, ApiQuery},
    response::{self, Stamps},
    AppState,
};
use axum::{extract::State, response::Response};
use formdesk_db::models;

#[derive(serde::Deserialize, Debug)]
pub struct GroupRequest {
    name: String,
}

impl IntoRecord for GroupRequest {
    type Record = models::NewGroup;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewGroup {
            name: at_most(required(self.name, "name")?, "name", 50)?,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct GroupResponse {
    id: i32,
    name: String,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::Group> for GroupResponse {
    fn from(group: models::Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            stamps: Stamps::new(group.created, group.updated),
        }
    }
}

crud_handlers! {
    noun: "group", request: GroupRequest, response: GroupResponse;
    create => create_group,
    get => load_group,
    list => list_groups,
    update => update_group,
    delete => delete_group,
}

#[derive(serde::Deserialize, Debug)]
pub struct AddFieldsRequest {
    form_id: i32,
    group_id: i32,
    field_ids: Vec<i32>,
}

#[derive(serde::Serialize, Debug)]
pub struct AddFieldsResponse {
    form_id: i32,
    group_id: i32,
    updated: usize,
}

/// Moves fields already bound to a form into a group, all or nothing.
pub async fn add_fields(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<AddFieldsRequest>,
) -> Result<Response, ApiError> {
    let updated = match app_state
        .store
        .assign_fields_to_group(request.form_id, request.group_id, &request.field_ids)
        .await
    {
        Err(formdesk_db::Error::NotFound) => {
            let missing = match app_state.store.load_form(request.form_id).await {
                Ok(_) => "group",
                Err(_) => "form",
            };
            return Err(ApiError::NotFound(missing));
        }
        updated => updated?,
    };
    Ok(response::ok(
        AddFieldsResponse {
            form_id: request.form_id,
            group_id: request.group_id,
            updated,
        },
        "fields added to group successfully",
    ))
}

#[derive(serde::Deserialize, Debug)]
pub struct GroupFieldsQuery {
    form_id: i32,
    group_id: i32,
}

#[derive(serde::Serialize, Debug)]
pub struct GroupFieldResponse {
    id: i32,
    form_id: i32,
    field_id: i32,
    group_id: Option<i32>,
    form_group_id: Option<i32>,
    label: String,
    #[serde(rename = "type")]
    data_type: String,
    meta: Option<serde_json::Value>,
    is_required: bool,
    validation: Option<serde_json::Value>,
    field_span: i32,
    field_row: i32,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::GroupField> for GroupFieldResponse {
    fn from(field: models::GroupField) -> Self {
        Self {
            id: field.id,
            form_id: field.form_id,
            field_id: field.field_id,
            group_id: field.group_id,
            form_group_id: field.form_group_id,
            label: field.label,
            data_type: field.data_type,
            meta: field.meta,
            is_required: field.is_required,
            validation: field.validation,
            field_span: field.field_span,
            field_row: field.field_row,
            stamps: Stamps::new(field.created, field.updated),
        }
    }
}

pub async fn get_fields(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<GroupFieldsQuery>,
) -> Result<Response, ApiError> {
    let fields = app_state
        .store
        .load_group_fields(query.form_id, query.group_id)
        .await?;
    Ok(response::ok(
        fields
            .into_iter()
            .map(GroupFieldResponse::from)
            .collect::<Vec<_>>(),
        "group fields retrieved successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_names_the_data_type_as_type() {
        let at: jiff::Timestamp = "2025-03-01T12:00:00Z".parse().unwrap();
        let field = GroupFieldResponse {
            id: 4,
            form_id: 1,
            field_id: 2,
            group_id: Some(3),
            form_group_id: None,
            label: "First Name".to_owned(),
            data_type: "text".to_owned(),
            meta: Some(json!({ "placeholder": "Jane" })),
            is_required: true,
            validation: None,
            field_span: 6,
            field_row: 0,
            stamps: Stamps::new(at.into(), at.into()),
        };
        let value = serde_json::to_value(field).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["label"], "First Name");
        assert_eq!(value["meta"], json!({ "placeholder": "Jane" }));
        assert_eq!(value["created"], "2025-03-01T12:00:00Z");
        assert!(value.get("data_type").is_none());
    }
}
