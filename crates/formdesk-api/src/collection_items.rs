use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    response::Stamps,
};
use formdesk_db::models;

#[derive(serde::Deserialize, Debug)]
pub struct CollectionItemRequest {
    #[serde(default)]
    collection_id: Option<i32>,
    item: String,
    #[serde(default)]
    relation_id: Option<i32>,
}

impl IntoRecord for CollectionItemRequest {
    type Record = models::NewCollectionItem;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewCollectionItem {
            collection_id: self.collection_id,
            item: at_most(required(self.item, "item")?, "item", 50)?,
            relation_id: self.relation_id,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct CollectionItemResponse {
    id: i32,
    collection_id: Option<i32>,
    item: String,
    relation_id: Option<i32>,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::CollectionItem> for CollectionItemResponse {
    fn from(item: models::CollectionItem) -> Self {
        Self {
            id: item.id,
            collection_id: item.collection_id,
            item: item.item,
            relation_id: item.relation_id,
            stamps: Stamps::new(item.created, item.updated),
        }
    }
}

crud_handlers! {
    noun: "collection item", request: CollectionItemRequest, response: CollectionItemResponse;
    create => create_collection_item,
    get => load_collection_item,
    list => list_collection_items,
    update => update_collection_item,
    delete => delete_collection_item,
}
