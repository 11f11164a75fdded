use chrono::{Duration, NaiveDate};
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use rusqlite::Connection;
use serde_json::{json, Value};

use crate::build_rocket;
use crate::config::TrackerConfig;
use crate::data::{init_db, wrap_connection};

fn client() -> Client {
    let connection = Connection::open_in_memory().expect("open in-memory db");
    init_db(&connection).expect("install schema");

    Client::tracked(build_rocket(TrackerConfig::default(), wrap_connection(connection)))
        .expect("valid rocket instance")
}

fn post(client: &Client, uri: &str, body: Value) -> (Status, Option<Value>) {
    let response = client
        .post(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    let status = response.status();
    let body = response.into_string().and_then(|s| serde_json::from_str(&s).ok());
    (status, body)
}

fn get(client: &Client, uri: &str) -> (Status, Option<Value>) {
    let response = client.get(uri).dispatch();
    let status = response.status();
    let body = response.into_string().and_then(|s| serde_json::from_str(&s).ok());
    (status, body)
}

fn add_habit(client: &Client, name: &str) -> i64 {
    let (status, body) = post(client, "/api/add_habit", json!({ "name": name }));
    assert_eq!(status, Status::Ok);
    body.expect("json body")["habit_id"].as_i64().expect("habit id")
}

#[test]
fn habits_are_listed_in_display_order() {
    let client = client();
    let read = add_habit(&client, "Read");
    let run = add_habit(&client, "Run");

    let (status, _) = post(
        &client,
        "/api/reorder_habits",
        json!({ "habit_ids": [run, read] }),
    );
    assert_eq!(status, Status::Ok);

    let (_, body) = get(&client, "/api/get_habits");
    let names: Vec<String> = body.expect("habits").as_array().expect("array")
        .iter()
        .map(|habit| habit["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Run", "Read"]);
}

#[test]
fn rename_and_set_display_order() {
    let client = client();
    let habit_id = add_habit(&client, "Read");

    let (status, _) = post(
        &client,
        "/api/rename_habit",
        json!({ "habit_id": habit_id, "name": "Read poetry" }),
    );
    assert_eq!(status, Status::Ok);
    let (status, _) = post(
        &client,
        "/api/set_display_order",
        json!({ "habit_id": habit_id, "display_order": 7 }),
    );
    assert_eq!(status, Status::Ok);

    let (_, body) = get(&client, &format!("/api/get_habit/{}", habit_id));
    let habit = body.expect("habit");
    assert_eq!(habit["name"], "Read poetry");
    assert_eq!(habit["display_order"], 7);
}

#[test]
fn toggle_round_trips_through_the_api() {
    let client = client();
    let habit_id = add_habit(&client, "Read");

    let (status, body) = post(
        &client,
        "/api/toggle",
        json!({ "habit_id": habit_id, "log_date": "2024-06-15" }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body.expect("toggle result")["state"], "complete");

    let (_, body) = get(&client, &format!("/api/get_day_state/{}?date=2024-06-15", habit_id));
    assert_eq!(body.expect("state")["state"], "complete");

    let (_, body) = post(
        &client,
        "/api/toggle",
        json!({ "habit_id": habit_id, "log_date": "2024-06-15" }),
    );
    assert_eq!(body.expect("toggle result")["state"], "incomplete");

    let (_, body) = get(&client, &format!("/api/get_events/{}", habit_id));
    let events = body.expect("events");
    let types: Vec<&str> = events.as_array().unwrap()
        .iter()
        .map(|event| event["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["mark_complete", "mark_incomplete"]);
}

#[test]
fn window_reports_count_and_dots_together() {
    let client = client();
    let habit_id = add_habit(&client, "Read");
    let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    for offset in [0, 5, 50] {
        let day = reference - Duration::days(offset);
        let (status, _) = post(
            &client,
            "/api/mark",
            json!({ "habit_id": habit_id, "log_date": day.to_string(), "event_type": "complete" }),
        );
        assert_eq!(status, Status::Ok);
    }

    let (status, body) = get(&client, &format!("/api/get_window/{}?date=2024-06-15", habit_id));
    assert_eq!(status, Status::Ok);
    let summary = body.expect("summary");
    let dots = summary["dots"].as_array().expect("dots");
    assert_eq!(dots.len(), 100);
    assert_eq!(summary["count"], 3);
    assert_eq!(dots[0], "complete");
    assert_eq!(dots[5], "complete");
    assert_eq!(dots[50], "complete");
    assert_eq!(dots[1], "incomplete");

    let (_, body) = get(&client, &format!("/api/get_window/{}?date=2024-06-15&window_size=10", habit_id));
    let summary = body.expect("summary");
    assert_eq!(summary["dots"].as_array().unwrap().len(), 10);
    assert_eq!(summary["count"], 2);

    let (_, body) = get(
        &client,
        &format!("/api/get_completion_count/{}?date=2024-06-15&window_size=6", habit_id),
    );
    assert_eq!(body.expect("count"), 2);
    let (_, body) = get(
        &client,
        &format!("/api/get_dot_sequence/{}?date=2024-06-15&window_size=6", habit_id),
    );
    assert_eq!(
        body.expect("dots"),
        json!(["complete", "incomplete", "incomplete", "incomplete", "incomplete", "complete"])
    );

    let (_, body) = get(&client, "/api/get_habit_stats?date=2024-06-15");
    assert_eq!(body.expect("stats")[0]["count"], 3);
    let (_, body) = get(&client, "/api/get_habit_stats?date=2024-06-15&window_size=6");
    assert_eq!(body.expect("stats")[0]["count"], 2);
}

#[test]
fn unknown_habits_are_not_found() {
    let client = client();

    let (status, _) = post(&client, "/api/toggle", json!({ "habit_id": 404 }));
    assert_eq!(status, Status::NotFound);
    let (status, _) = get(&client, "/api/get_window/404");
    assert_eq!(status, Status::NotFound);
    let (status, _) = get(&client, "/api/get_habit/404");
    assert_eq!(status, Status::NotFound);
    let (status, _) = post(&client, "/api/delete_habit", json!({ "habit_id": 404 }));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn deleting_a_habit_removes_its_history() {
    let client = client();
    let habit_id = add_habit(&client, "Read");
    post(&client, "/api/toggle", json!({ "habit_id": habit_id }));

    let (status, _) = post(&client, "/api/delete_habit", json!({ "habit_id": habit_id }));
    assert_eq!(status, Status::Ok);

    let (status, _) = get(&client, &format!("/api/get_events/{}", habit_id));
    assert_eq!(status, Status::NotFound);
    let (status, _) = get(&client, &format!("/api/get_day_state/{}", habit_id));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn bad_arguments_are_rejected() {
    let client = client();
    let habit_id = add_habit(&client, "Read");

    let (status, _) = get(&client, &format!("/api/get_window/{}?window_size=0", habit_id));
    assert_eq!(status, Status::BadRequest);
    for size in ["abc", "1.5", "90000000"] {
        for route in ["get_window", "get_completion_count", "get_dot_sequence"] {
            let (status, _) = get(
                &client,
                &format!("/api/{}/{}?date=2024-06-15&window_size={}", route, habit_id, size),
            );
            assert_eq!(status, Status::BadRequest, "{} with window_size={}", route, size);
        }
        let (status, _) = get(&client, &format!("/api/get_habit_stats?window_size={}", size));
        assert_eq!(status, Status::BadRequest);
    }
    let (status, _) = get(&client, &format!("/api/get_day_state/{}?date=15-06-2024", habit_id));
    assert_eq!(status, Status::BadRequest);
    let (status, _) = post(&client, "/api/add_habit", json!({ "name": "  " }));
    assert_eq!(status, Status::BadRequest);
    let (status, _) = post(
        &client,
        "/api/toggle",
        json!({ "habit_id": habit_id, "log_date": "not a date" }),
    );
    assert_eq!(status, Status::BadRequest);

    // nothing was recorded by the failed toggle
    let (_, body) = get(&client, &format!("/api/get_events/{}", habit_id));
    assert!(body.expect("events").as_array().unwrap().is_empty());
}
