use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::guard::CurrentUser;
use crate::backend::SharedBackend;

use super::data::*;
use super::hook::GoalsHook;

fn respond(success: bool, hook: GoalsHook<'_>) -> Json<GoalsResponse> {
    let (goals, notices) = hook.into_parts();
    Json(GoalsResponse {
        success,
        goals,
        notices,
    })
}

#[get("/get_goals")]
pub fn get_goals(backend: &State<SharedBackend>, current: CurrentUser) -> Json<GoalsResponse> {
    let hook = GoalsHook::mount(&***backend, current.user);
    let success = !hook.notices().iter().any(|n| n.is_error());

    respond(success, hook)
}

#[post("/add_goal", format = "json", data = "<goal>")]
pub fn add_goal(
    goal: Json<CreateGoalData>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<GoalsResponse> {
    let mut hook = GoalsHook::mount(&***backend, current.user);
    let success = hook.create(goal.into_inner());

    respond(success, hook)
}

#[post("/set_goal", format = "json", data = "<set_goal_request>")]
pub fn set_goal(
    set_goal_request: Json<SetGoalRequest>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<GoalsResponse> {
    let SetGoalRequest { goal_id, goal } = set_goal_request.into_inner();
    let mut hook = GoalsHook::mount(&***backend, current.user);
    let success = hook.update(&goal_id, goal);

    respond(success, hook)
}

#[post("/delete_goal", format = "json", data = "<delete_goal_request>")]
pub fn delete_goal(
    delete_goal_request: Json<DeleteGoalRequest>,
    backend: &State<SharedBackend>,
    current: CurrentUser,
) -> Json<GoalsResponse> {
    let mut hook = GoalsHook::mount(&***backend, current.user);
    let success = hook.delete(&delete_goal_request.goal_id);

    respond(success, hook)
}
