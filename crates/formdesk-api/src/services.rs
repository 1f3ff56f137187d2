use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    response::Stamps,
};
use formdesk_db::models;

#[derive(serde::Deserialize, Debug)]
pub struct ServiceRequest {
    name: String,
}

impl IntoRecord for ServiceRequest {
    type Record = models::NewService;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        Ok(models::NewService {
            name: at_most(required(self.name, "name")?, "name", 100)?,
        })
    }
}

#[derive(serde::Serialize, Debug)]
pub struct ServiceResponse {
    id: i32,
    name: String,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::Service> for ServiceResponse {
    fn from(service: models::Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            stamps: Stamps::new(service.created, service.updated),
        }
    }
}

crud_handlers! {
    noun: "service", request: ServiceRequest, response: ServiceResponse;
    create => create_service,
    get => load_service,
    list => list_services,
    update => update_service,
    delete => delete_service,
}
