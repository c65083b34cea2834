use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::guard::CurrentUser;
use crate::backend::SharedBackend;

use super::data::*;
use super::hook::MicroGoalsHook;

fn respond(success: bool, hook: MicroGoalsHook<'_>) -> Json<MicroGoalsResponse> {
    let (micro_goals, progress, notices) = hook.into_parts();
    Json(MicroGoalsResponse {
        success,
        micro_goals,
        progress,
        notices,
    })
}

#[get("/get_micro_goals/<goal_id>")]
pub fn get_micro_goals(
    goal_id: &str,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<MicroGoalsResponse> {
    let hook = MicroGoalsHook::mount(&***backend, current.user, Some(goal_id.to_string()));
    let success = !hook.notices().iter().any(|n| n.is_error());

    respond(success, hook)
}

#[post("/add_micro_goal", format = "json", data = "<add_micro_goal_request>")]
pub fn add_micro_goal(
    add_micro_goal_request: Json<AddMicroGoalRequest>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<MicroGoalsResponse> {
    let AddMicroGoalRequest {
        goal_id,
        micro_goal,
    } = add_micro_goal_request.into_inner();
    let mut hook = MicroGoalsHook::mount(&***backend, current.user, Some(goal_id.clone()));
    let success = hook.create(&goal_id, micro_goal);

    respond(success, hook)
}

#[post("/toggle_micro_goal", format = "json", data = "<toggle_micro_goal_request>")]
pub fn toggle_micro_goal(
    toggle_micro_goal_request: Json<ToggleMicroGoalRequest>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<MicroGoalsResponse> {
    let request = toggle_micro_goal_request.into_inner();
    let mut hook = MicroGoalsHook::mount(&***backend, current.user, Some(request.goal_id));
    let success = hook.toggle(&request.micro_goal_id, None);

    respond(success, hook)
}

#[post("/delete_micro_goal", format = "json", data = "<delete_micro_goal_request>")]
pub fn delete_micro_goal(
    delete_micro_goal_request: Json<DeleteMicroGoalRequest>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<MicroGoalsResponse> {
    let request = delete_micro_goal_request.into_inner();
    let mut hook = MicroGoalsHook::mount(&***backend, current.user, Some(request.goal_id));
    let success = hook.delete(&request.micro_goal_id, None);

    respond(success, hook)
}
