use crate::error::ApiError;

/// A validated request body turning into the record the store persists.
pub trait IntoRecord {
    type Record;

    fn into_record(self) -> Result<Self::Record, ApiError>;
}

/// Rejects values that are empty or only whitespace.
pub fn required(value: String, name: &str) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("{name} is required")))
    } else {
        Ok(value)
    }
}

pub fn at_most(value: String, name: &str, max_chars: usize) -> Result<String, ApiError> {
    if value.chars().count() > max_chars {
        Err(ApiError::BadRequest(format!(
            "{name} must be no more than {max_chars} characters in length"
        )))
    } else {
        Ok(value)
    }
}

/// Generates the JSON handlers for one entity, each delegating to one store
/// method: `create => create_group` emits a `create` handler calling
/// `Store::create_group`. The request type implements [`IntoRecord`] and the
/// response type converts `From` the stored model.
macro_rules! crud_handlers {
    {
        noun: $noun:literal, request: $request:ty, response: $response:ty;
        $($handler:ident => $store_fn:ident),+ $(,)?
    } => {
        $( crud_handlers!(@$handler $noun, $request, $response, $store_fn); )+
    };
    (@create $noun:literal, $request:ty, $response:ty, $store_fn:ident) => {
        pub async fn create(
            axum::extract::State(app_state): axum::extract::State<crate::AppState>,
            crate::extract::ApiJson(request): crate::extract::ApiJson<$request>,
        ) -> Result<axum::response::Response, crate::error::ApiError> {
            let record = crate::crud::IntoRecord::into_record(request)?;
            let created = app_state.store.$store_fn(record).await?;
            Ok(crate::response::created(
                <$response>::from(created),
                concat!($noun, " created successfully"),
            ))
        }
    };
    (@get $noun:literal, $request:ty, $response:ty, $store_fn:ident) => {
        pub async fn get(
            axum::extract::State(app_state): axum::extract::State<crate::AppState>,
            crate::extract::ApiPath(id): crate::extract::ApiPath<i32>,
        ) -> Result<axum::response::Response, crate::error::ApiError> {
            let found = app_state
                .store
                .$store_fn(id)
                .await
                .map_err(crate::error::ApiError::lookup($noun))?;
            Ok(crate::response::ok(
                <$response>::from(found),
                concat!($noun, " retrieved successfully"),
            ))
        }
    };
    (@list $noun:literal, $request:ty, $response:ty, $store_fn:ident) => {
        pub async fn list(
            axum::extract::State(app_state): axum::extract::State<crate::AppState>,
        ) -> Result<axum::response::Response, crate::error::ApiError> {
            let found = app_state.store.$store_fn().await?;
            Ok(crate::response::ok(
                found.into_iter().map(<$response>::from).collect::<Vec<_>>(),
                concat!($noun, "s retrieved successfully"),
            ))
        }
    };
    (@update $noun:literal, $request:ty, $response:ty, $store_fn:ident) => {
        pub async fn update(
            axum::extract::State(app_state): axum::extract::State<crate::AppState>,
            crate::extract::ApiPath(id): crate::extract::ApiPath<i32>,
            crate::extract::ApiJson(request): crate::extract::ApiJson<$request>,
        ) -> Result<axum::response::Response, crate::error::ApiError> {
            let record = crate::crud::IntoRecord::into_record(request)?;
            let updated = app_state
                .store
                .$store_fn(id, record)
                .await
                .map_err(crate::error::ApiError::lookup($noun))?;
            Ok(crate::response::ok(
                <$response>::from(updated),
                concat!($noun, " updated successfully"),
            ))
        }
    };
    (@delete $noun:literal, $request:ty, $response:ty, $store_fn:ident) => {
        pub async fn delete(
            axum::extract::State(app_state): axum::extract::State<crate::AppState>,
            crate::extract::ApiPath(id): crate::extract::ApiPath<i32>,
        ) -> Result<axum::response::Response, crate::error::ApiError> {
            app_state
                .store
                .$store_fn(id)
                .await
                .map_err(crate::error::ApiError::lookup($noun))?;
            Ok(crate::response::done(concat!($noun, " deleted successfully")))
        }
    };
}
