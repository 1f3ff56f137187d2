use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    extract::ApiPath,
    response::{self, Stamps},
    AppState,
};
use axum::{extract::State, response::Response};
use formdesk_db::models;
use itertools::Itertools;

#[derive(serde::Deserialize, Debug)]
pub struct ReservedNameRequest {
    name: String,
}

impl IntoRecord for ReservedNameRequest {
    type Record = models::NewReservedName;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewReservedName {
            name: at_most(required(self.name, "name")?, "name", 50)?,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct ReservedNameResponse {
    id: i32,
    name: String,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::ReservedName> for ReservedNameResponse {
    fn from(reserved: models::ReservedName) -> Self {
        Self {
            id: reserved.id,
            name: reserved.name,
            stamps: Stamps::new(reserved.created, reserved.updated),
        }
    }
}

// `GET /reserved-name/{name}` searches, so single records are not fetched by id.
crud_handlers! {
    noun: "reserved name", request: ReservedNameRequest, response: ReservedNameResponse;
    create => create_reserved_name,
    list => list_reserved_names,
    update => update_reserved_name,
    delete => delete_reserved_name,
}

/// Every reserved name containing the path segment, ignoring case.
pub async fn search(
    State(app_state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> Result<Response, ApiError> {
    let found = app_state.store.search_reserved_names(&name).await?;
    Ok(response::ok(
        found
            .into_iter()
            .map(ReservedNameResponse::from)
            .collect_vec(),
        "reserved names retrieved successfully",
    ))
}
