use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    form_fields::layout,
    response::Stamps,
};
use formdesk_db::models;

/// A layout section: where on the form grid its bindings are drawn.
#[derive(serde::Deserialize, Debug)]
pub struct FormGroupRequest {
    name: String,
    #[serde(default)]
    group_span: i32,
    #[serde(default)]
    group_row: i32,
}

impl IntoRecord for FormGroupRequest {
    type Record = models::NewFormGroup;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        layout(self.group_span, self.group_row)?;
        Ok(models::NewFormGroup {
            name: at_most(required(self.name, "name")?, "name", 50)?,
            group_span: self.group_span,
            group_row: self.group_row,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct FormGroupResponse {
    id: i32,
    name: String,
    group_span: i32,
    group_row: i32,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::FormGroup> for FormGroupResponse {
    fn from(section: models::FormGroup) -> Self {
        Self {
            id: section.id,
            name: section.name,
            group_span: section.group_span,
            group_row: section.group_row,
            stamps: Stamps::new(section.created, section.updated),
        }
    }
}

crud_handlers! {
    noun: "form group", request: FormGroupRequest, response: FormGroupResponse;
    create => create_form_group,
    get => load_form_group,
    list => list_form_groups,
    update => update_form_group,
    delete => delete_form_group,
}
