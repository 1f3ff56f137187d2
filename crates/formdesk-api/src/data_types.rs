use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    response::Stamps,
};
use formdesk_db::models;

#[derive(serde::Deserialize, Debug)]
pub struct DataTypeRequest {
    name: String,
}

impl IntoRecord for DataTypeRequest {
    type Record = models::NewDataType;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewDataType {
            name: at_most(required(self.name, "name")?, "name", 50)?,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct DataTypeResponse {
    id: i32,
    name: String,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::DataType> for DataTypeResponse {
    fn from(data_type: models::DataType) -> Self {
        Self {
            id: data_type.id,
            name: data_type.name,
            stamps: Stamps::new(data_type.created, data_type.updated),
        }
    }
}

crud_handlers! {
    noun: "data type", request: DataTypeRequest, response: DataTypeResponse;
    create => create_data_type,
    get => load_data_type,
    list => list_data_types,
    update => update_data_type,
    delete => delete_data_type,
}
