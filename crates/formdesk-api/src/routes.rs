use super::{
    collection_items, collections, data_types, error::ApiError, fields, form_answers,
    form_fields, form_groups, forms, groups, request_tracing, reserved_names, services,
    submissions, users,
};
use axum::{
    middleware,
    routing::{get, post},
};

pub(super) fn setup(app_state: super::AppState) -> axum::routing::Router {
    axum::Router::new()
        .route("/users", post(users::create).get(users::list))
        .route("/users/email/{email}", get(users::by_email))
        .route(
            "/users/{id}",
            get(users::get)
                .put(users::update)
                .patch(users::update)
                .delete(users::delete),
        )
        .route("/services", post(services::create).get(services::list))
        .route(
            "/services/{id}",
            get(services::get)
                .put(services::update)
                .patch(services::update)
                .delete(services::delete),
        )
        .route("/data-types", post(data_types::create).get(data_types::list))
        .route(
            "/data-types/{id}",
            get(data_types::get)
                .put(data_types::update)
                .patch(data_types::update)
                .delete(data_types::delete),
        )
        .route("/groups", post(groups::create).get(groups::list))
        .route("/groups/add-fields", post(groups::add_fields))
        .route("/groups/get-fields", get(groups::get_fields))
        .route(
            "/groups/{id}",
            get(groups::get)
                .put(groups::update)
                .patch(groups::update)
                .delete(groups::delete),
        )
        .route("/form-groups", post(form_groups::create).get(form_groups::list))
        .route(
            "/form-groups/{id}",
            get(form_groups::get)
                .put(form_groups::update)
                .patch(form_groups::update)
                .delete(form_groups::delete),
        )
        .route("/collections", post(collections::create).get(collections::list))
        .route("/collections/{id}/items", get(collections::items))
        .route(
            "/collections/{id}",
            get(collections::get)
                .put(collections::update)
                .patch(collections::update)
                .delete(collections::delete),
        )
        .route(
            "/collection-items",
            post(collection_items::create).get(collection_items::list),
        )
        .route(
            "/collection-items/{id}",
            get(collection_items::get)
                .put(collection_items::update)
                .patch(collection_items::update)
                .delete(collection_items::delete),
        )
        .route("/fields", post(fields::create).get(fields::list))
        .route(
            "/fields/{id}",
            get(fields::get)
                .put(fields::update)
                .patch(fields::update)
                .delete(fields::delete),
        )
        .route("/forms", post(forms::create).get(forms::list))
        .route("/forms/{id}/fields", get(forms::get_with_fields))
        .route("/forms/{id}/status", axum::routing::patch(forms::set_status))
        .route(
            "/forms/{id}",
            get(forms::get)
                .put(forms::update)
                .patch(forms::update)
                .delete(forms::delete),
        )
        .route("/form-fields", post(form_fields::create).get(form_fields::list))
        .route("/form-fields/multiple", post(form_fields::create_multiple))
        .route(
            "/form-fields/{id}",
            get(form_fields::get)
                .put(form_fields::update)
                .patch(form_fields::update)
                .delete(form_fields::delete),
        )
        .route("/submission", post(submissions::create).get(submissions::list))
        .route("/submission/service/{service_id}", get(submissions::by_service))
        .route(
            "/submission/{id}",
            get(submissions::get)
                .put(submissions::update)
                .patch(submissions::update)
                .delete(submissions::delete),
        )
        .route("/form-answers", post(form_answers::create).get(form_answers::list))
        .route(
            "/form-answers/{id}",
            get(form_answers::get)
                .put(form_answers::update)
                .patch(form_answers::update)
                .delete(form_answers::delete),
        )
        .route(
            "/reserved-name",
            post(reserved_names::create).get(reserved_names::list),
        )
        .route(
            "/reserved-name/{name}",
            get(reserved_names::search)
                .put(reserved_names::update)
                .patch(reserved_names::update)
                .delete(reserved_names::delete),
        )
        .fallback(fallback)
        .layer(middleware::from_fn(request_tracing::trace_requests))
        .with_state(app_state)
}

pub async fn fallback(_uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound("route")
}
