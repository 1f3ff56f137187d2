use crate::{
    crud::{at_most, required, IntoRecord},
    error::ApiError,
    extract::ApiPath,
    response::{self, Stamps},
    AppState,
};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::{extract::State, response::Response};
use email_address::EmailAddress;
use formdesk_db::models;

#[derive(serde::Deserialize)]
pub struct UserRequest {
    first_name: String,
    #[serde(default)]
    middle_name: String,
    surname: String,
    #[serde(default)]
    dob: Option<jiff::civil::Date>,
    email: String,
    password: String,
}

impl IntoRecord for UserRequest {
    type Record = models::NewUser;

    fn into_record(self) -> Result<Self::Record, ApiError> {
        let first_name = at_most(required(self.first_name, "first_name")?, "first_name", 100)?;
        let middle_name = at_most(self.middle_name, "middle_name", 100)?;
        let surname = at_most(required(self.surname, "surname")?, "surname", 100)?;
        let email = at_most(self.email, "email", 250)?;
        if !EmailAddress::is_valid(&email) {
            return Err(ApiError::BadRequest(format!(
                "{email:?} is not a valid email address"
            )));
        }
        let password = required(self.password, "password")?;
        Ok(models::NewUser {
            first_name,
            middle_name,
            surname,
            dob: self.dob.map(Into::into),
            email,
            password: hash_password(&password)?,
        })
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(ApiError::PasswordHash)
}

/// A stored user; the password hash never leaves the store.
#[derive(serde::Serialize, Debug)]
pub struct UserResponse {
    id: i32,
    first_name: String,
    middle_name: String,
    surname: String,
    dob: Option<jiff::civil::Date>,
    email: String,
    #[serde(flatten)]
    stamps: Stamps,
}

impl From<models::User> for UserResponse {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            middle_name: user.middle_name,
            surname: user.surname,
            dob: user.dob.map(|dob| dob.to_jiff()),
            email: user.email,
            stamps: Stamps::new(user.created, user.updated),
        }
    }
}

crud_handlers! {
    noun: "user", request: UserRequest, response: UserResponse;
    create => create_user,
    get => load_user,
    list => list_users,
    update => update_user,
    delete => delete_user,
}

pub async fn by_email(
    State(app_state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Response, ApiError> {
    let user = app_state
        .store
        .load_user_by_email(&email)
        .await
        .map_err(ApiError::lookup("user"))?;
    Ok(response::ok(
        UserResponse::from(user),
        "user retrieved successfully",
    ))
}
