use crate::backend::Backend;
use crate::notify::Notice;

use super::data::*;

/// Signs up or signs in, reporting the outcome as notices. Empty fields are
/// rejected before the backend is asked.
pub fn authenticate(
    backend: &dyn Backend,
    mode: AuthMode,
    credentials: &Credentials,
) -> AuthResponse {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return AuthResponse {
            success: false,
            session: None,
            notices: vec![Notice::error(
                "Required fields",
                "Please fill in email and password.",
            )],
        };
    }

    let result = match mode {
        AuthMode::SignUp => backend.sign_up(&credentials.email, &credentials.password),
        AuthMode::SignIn => {
            backend.sign_in_with_password(&credentials.email, &credentials.password)
        }
    };

    match result {
        Ok(session) => {
            let notice = match mode {
                AuthMode::SignUp => Notice::info("Account created!", "Welcome to goalflow."),
                AuthMode::SignIn => Notice::info("Signed in!", "Welcome back!"),
            };
            AuthResponse {
                success: true,
                session: Some(session),
                notices: vec![notice],
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, ?mode, "authentication failed");
            AuthResponse {
                success: false,
                session: None,
                notices: vec![Notice::error("Authentication error", e.to_string())],
            }
        }
    }
}
