use diesel::prelude::*;

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub dob: Option<jiff_diesel::Date>,
    pub email: String,
    pub password: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

/// Insert and full-replace record for [`User`]; `password` must already be hashed.
#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewUser {
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub dob: Option<jiff_diesel::Date>,
    pub email: String,
    pub password: String,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewService {
    pub name: String,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::data_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DataType {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::data_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDataType {
    pub name: String,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGroup {
    pub name: String,
}

/// A layout section of a form: bindings tagged with it are rendered together.
#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::form_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FormGroup {
    pub id: i32,
    pub name: String,
    pub group_span: i32,
    pub group_row: i32,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::form_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFormGroup {
    pub name: String,
    pub group_span: i32,
    pub group_row: i32,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Collection {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCollection {
    pub name: String,
}

#[derive(Identifiable, Queryable, Selectable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::collection_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Collection))]
pub struct CollectionItem {
    pub id: i32,
    pub collection_id: Option<i32>,
    pub item: String,
    pub relation_id: Option<i32>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::collection_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewCollectionItem {
    pub collection_id: Option<i32>,
    pub item: String,
    pub relation_id: Option<i32>,
}

#[derive(Identifiable, Queryable, Selectable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::fields)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(DataType))]
pub struct Field {
    pub id: i32,
    pub label: String,
    pub data_type_id: i32,
    pub group_id: Option<i32>,
    pub collection_id: Option<i32>,
    pub status: Option<bool>,
    pub meta: Option<serde_json::Value>,
    pub is_required: bool,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
    pub deleted: Option<jiff_diesel::Timestamp>,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::fields)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewField {
    pub label: String,
    pub data_type_id: i32,
    pub group_id: Option<i32>,
    pub collection_id: Option<i32>,
    pub status: Option<bool>,
    pub meta: Option<serde_json::Value>,
    pub is_required: bool,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Form {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub data_type_id: i32,
    pub service_id: Option<i32>,
    pub status: Option<bool>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
    pub deleted: Option<jiff_diesel::Timestamp>,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewForm {
    pub name: String,
    pub description: String,
    pub data_type_id: i32,
    pub service_id: Option<i32>,
    pub status: Option<bool>,
}

#[derive(Identifiable, Queryable, Selectable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::form_fields)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Form))]
#[diesel(belongs_to(Field))]
pub struct FormField {
    pub id: i32,
    pub form_id: i32,
    pub field_id: i32,
    pub validation: Option<serde_json::Value>,
    pub field_span: i32,
    pub field_row: i32,
    pub group_id: Option<i32>,
    pub form_group_id: Option<i32>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::form_fields)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewFormField {
    pub form_id: i32,
    pub field_id: i32,
    pub validation: Option<serde_json::Value>,
    pub field_span: i32,
    pub field_row: i32,
    pub group_id: Option<i32>,
    pub form_group_id: Option<i32>,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Submission {
    pub id: i32,
    pub service_id: Option<i32>,
    pub created_by: Option<i32>,
    pub created_on: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewSubmission {
    pub service_id: Option<i32>,
    pub created_by: Option<i32>,
}

#[derive(Identifiable, Queryable, Selectable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::form_answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Submission))]
#[diesel(belongs_to(FormField))]
pub struct FormAnswer {
    pub id: i32,
    pub form_field_id: Option<i32>,
    pub answer: String,
    pub submission_id: Option<i32>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::form_answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewFormAnswer {
    pub form_field_id: Option<i32>,
    pub answer: String,
    pub submission_id: Option<i32>,
}

#[derive(Identifiable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::formdesk::reserved_names)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReservedName {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::formdesk::reserved_names)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewReservedName {
    pub name: String,
}

/// A form binding flattened together with the field definition it points at.
#[derive(Debug, Clone)]
pub struct GroupField {
    pub id: i32,
    pub form_id: i32,
    pub field_id: i32,
    pub group_id: Option<i32>,
    pub form_group_id: Option<i32>,
    pub label: String,
    pub data_type: String,
    pub meta: Option<serde_json::Value>,
    pub is_required: bool,
    pub validation: Option<serde_json::Value>,
    pub field_span: i32,
    pub field_row: i32,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

impl GroupField {
    pub(crate) fn resolve(binding: FormField, field: &Field, data_type: &DataType) -> Self {
        Self {
            id: binding.id,
            form_id: binding.form_id,
            field_id: binding.field_id,
            group_id: binding.group_id,
            form_group_id: binding.form_group_id,
            label: field.label.clone(),
            data_type: data_type.name.clone(),
            meta: field.meta.clone(),
            is_required: field.is_required,
            validation: binding.validation,
            field_span: binding.field_span,
            field_row: binding.field_row,
            created: binding.created,
            updated: binding.updated,
        }
    }
}
