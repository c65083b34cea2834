use chrono::Local;
use rocket::serde::json::Json;
use rocket::{get, State};

use crate::auth::guard::CurrentUser;
use crate::backend::SharedBackend;
use crate::goals::hook::GoalsHook;

use super::data::*;
use super::helpers::{build_report, dashboard_summary};

#[get("/get_dashboard")]
pub fn get_dashboard(
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<DashboardResponse> {
    let signed_in = current.user.is_some();
    let (goals, notices) = GoalsHook::mount(&***backend, current.user).into_parts();

    Json(DashboardResponse {
        signed_in,
        dashboard: dashboard_summary(&goals, Local::now().date_naive()),
        notices,
    })
}

#[get("/get_report?<search>")]
pub fn get_report(
    search: Option<&str>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<ReportResponse> {
    let signed_in = current.user.is_some();
    let (goals, notices) = GoalsHook::mount(&***backend, current.user).into_parts();

    Json(ReportResponse {
        signed_in,
        report: build_report(&goals, search, Local::now().date_naive()),
        notices,
    })
}
