use serde::{Deserialize, Serialize};

use crate::backend::{Session, User};
use crate::notify::Notice;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignUp,
    SignIn,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub session: Option<Session>,
    pub notices: Vec<Notice>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub user: Option<User>,
}
