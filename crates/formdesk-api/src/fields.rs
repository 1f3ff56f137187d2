use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    response::Stamps,
};
use formdesk_db::models;

#[derive(serde::Deserialize, Debug)]
pub struct FieldRequest {
    label: String,
    data_type_id: i32,
    #[serde(default)]
    group_id: Option<i32>,
    #[serde(default)]
    collection_id: Option<i32>,
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    meta: Option<serde_json::Value>,
    #[serde(default)]
    is_required: bool,
}

impl IntoRecord for FieldRequest {
    type Record = models::NewField;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewField {
            label: at_most(required(self.label, "label")?, "label", 50)?,
            data_type_id: self.data_type_id,
            group_id: self.group_id,
            collection_id: self.collection_id,
            status: self.status,
            meta: self.meta,
            is_required: self.is_required,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct FieldResponse {
    id: i32,
    label: String,
    data_type_id: i32,
    group_id: Option<i32>,
    collection_id: Option<i32>,
    status: Option<bool>,
    meta: Option<serde_json::Value>,
    is_required: bool,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::Field> for FieldResponse {
    fn from(field: models::Field) -> Self {
        Self {
            id: field.id,
            label: field.label,
            data_type_id: field.data_type_id,
            group_id: field.group_id,
            collection_id: field.collection_id,
            status: field.status,
            meta: field.meta,
            is_required: field.is_required,
            stamps: Stamps::new(field.created, field.updated),
        }
    }
}

crud_handlers! {
    noun: "field", request: FieldRequest, response: FieldResponse;
    create => create_field,
    get => load_field,
    list => list_fields,
    update => update_field,
    delete => delete_field,
}
