#[macro_use]
extern crate rocket;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use std::sync::Arc;

pub mod auth;
pub mod backend;
pub mod config;
pub mod data;
pub mod goals;
pub mod internal_error;
pub mod micro_goals;
pub mod notify;
pub mod reports;

use backend::{SharedBackend, SqliteBackend};
use config::AppConfig;
use internal_error::InternalResult;

pub fn build_rocket(backend: SharedBackend, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment).manage(backend).mount(
        "/api",
        routes![
            auth::endpoints::sign_up,
            auth::endpoints::sign_in,
            auth::endpoints::sign_out,
            auth::endpoints::get_user,
            goals::endpoints::get_goals,
            goals::endpoints::add_goal,
            goals::endpoints::set_goal,
            goals::endpoints::delete_goal,
            micro_goals::endpoints::get_micro_goals,
            micro_goals::endpoints::add_micro_goal,
            micro_goals::endpoints::toggle_micro_goal,
            micro_goals::endpoints::delete_micro_goal,
            reports::endpoints::get_dashboard,
            reports::endpoints::get_report,
        ],
    )
}

/// Opens the SQLite backend named by the configuration and builds the server.
pub fn rocket_from_config(figment: Figment, config: &AppConfig) -> InternalResult<Rocket<Build>> {
    let backend = SqliteBackend::open(&config.database_path)?;
    tracing::info!(database = %config.database_path, "backend opened");

    Ok(build_rocket(Arc::new(backend), figment))
}
