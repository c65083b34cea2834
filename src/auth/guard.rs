use rocket::request::{FromRequest, Outcome, Request};

use std::convert::Infallible;

use crate::backend::{SharedBackend, User};

/// The caller as resolved from `Authorization: Bearer <token>`. A missing or
/// unknown token is an anonymous caller, not a rejected request.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser {
    pub access_token: Option<String>,
    pub user: Option<User>,
}

fn bearer_token(request: &Request<'_>) -> Option<String> {
    request
        .headers()
        .get_one("Authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let access_token = bearer_token(request);
        let backend = request.rocket().state::<SharedBackend>();

        let user = match (&access_token, backend) {
            (Some(token), Some(backend)) => match backend.get_user(token) {
                Ok(user) => user,
                Err(e) => {
                    tracing::error!(error = %e, "error resolving session");
                    None
                }
            },
            _ => None,
        };

        Outcome::Success(CurrentUser { access_token, user })
    }
}
