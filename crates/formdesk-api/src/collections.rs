use crate::{
    collection_items::CollectionItemResponse,
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    extract::ApiPath,
    response::{self, Stamps},
    AppState,
};
use axum::{extract::State, response::Response};
use formdesk_db::models;

#[derive(serde::Deserialize, Debug)]
pub struct CollectionRequest {
    name: String,
}

impl IntoRecord for CollectionRequest {
    type Record = models::NewCollection;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewCollection {
            name: at_most(required(self.name, "name")?, "name", 50)?,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct CollectionResponse {
    id: i32,
    name: String,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::Collection> for CollectionResponse {
    fn from(collection: models::Collection) -> Self {
        Self {
            id: collection.id,
            name: collection.name,
            stamps: Stamps::new(collection.created, collection.updated),
        }
    }
}

crud_handlers! {
    noun: "collection", request: CollectionRequest, response: CollectionResponse;
    create => create_collection,
    get => load_collection,
    list => list_collections,
    update => update_collection,
    delete => delete_collection,
}

/// Items belonging to one collection; 404 when the collection does not exist.
pub async fn items(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, ApiError> {
    app_state
        .store
        .load_collection(id)
        .await
        .map_err(ApiError::lookup("collection"))?;
    let items = app_state.store.list_items_of_collection(id).await?;
    Ok(response::ok(
        items
            .into_iter()
            .map(CollectionItemResponse::from)
            .collect::<Vec<_>>(),
        "collection items retrieved successfully",
    ))
}
