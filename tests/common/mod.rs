#![allow(dead_code)]

use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;
use serde_json::json;

use std::sync::Arc;

use goalflow::auth::data::AuthResponse;
use goalflow::backend::SqliteBackend;
use goalflow::goals::data::{Goal, GoalsResponse};

pub fn client() -> Client {
    let backend = SqliteBackend::open_in_memory().expect("in-memory backend");
    let figment = rocket::Config::figment().merge(("log_level", "off"));
    Client::tracked(goalflow::build_rocket(Arc::new(backend), figment)).expect("valid rocket")
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}

/// Signs a new user up and returns their access token.
pub fn sign_up(client: &Client, email: &str) -> String {
    let response = client
        .post("/api/auth/sign_up")
        .header(ContentType::JSON)
        .json(&json!({ "email": email, "password": "secret1" }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let auth: AuthResponse = response.into_json().expect("auth response");
    auth.session.expect("session").access_token
}

pub fn add_goal(client: &Client, token: &str, body: serde_json::Value) -> GoalsResponse {
    client
        .post("/api/add_goal")
        .header(bearer(token))
        .json(&body)
        .dispatch()
        .into_json()
        .expect("goals response")
}

pub fn create_goal(client: &Client, token: &str, title: &str, due_date: &str) -> Goal {
    let response = add_goal(
        client,
        token,
        json!({ "title": title, "priority": "medium", "dueDate": due_date }),
    );
    assert!(response.success, "{:?}", response.notices);

    response
        .goals
        .into_iter()
        .find(|goal| goal.title == title)
        .expect("created goal is listed")
}

pub fn get_goals(client: &Client, token: Option<&str>) -> GoalsResponse {
    let mut request = client.get("/api/get_goals");
    if let Some(token) = token {
        request = request.header(bearer(token));
    }
    request.dispatch().into_json().expect("goals response")
}
