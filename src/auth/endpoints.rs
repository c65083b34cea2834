use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::backend::SharedBackend;
use crate::internal_error::InternalResult;
use crate::notify::Notice;

use super::data::*;
use super::guard::CurrentUser;
use super::helpers::authenticate;

#[post("/auth/sign_up", format = "json", data = "<credentials>")]
pub fn sign_up(
    credentials: Json<Credentials>,
    backend: &State<SharedBackend>,
) -> Json<AuthResponse> {
    Json(authenticate(&***backend, AuthMode::SignUp, &credentials))
}

#[post("/auth/sign_in", format = "json", data = "<credentials>")]
pub fn sign_in(
    credentials: Json<Credentials>,
    backend: &State<SharedBackend>,
) -> Json<AuthResponse> {
    Json(authenticate(&***backend, AuthMode::SignIn, &credentials))
}

#[post("/auth/sign_out")]
pub fn sign_out(
    current: CurrentUser,
    backend: &State<SharedBackend>,
) -> InternalResult<Json<AuthResponse>> {
    if let Some(token) = &current.access_token {
        backend.sign_out(token)?;
    }

    Ok(Json(AuthResponse {
        success: true,
        session: None,
        notices: vec![Notice::info("Signed out", "See you soon!")],
    }))
}

#[get("/auth/user")]
pub fn get_user(current: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse { user: current.user })
}
