//! In-process fake of the pot service, recommendation webhook and weather
//! API, served by axum on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// The only token the fake backend accepts.
pub const VALID_TOKEN: &str = "good-token";

/// Start the fake backend and return its base URL (`http://127.0.0.1:<port>`).
pub async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/google", get(google_auth_url))
        .route("/api/auth/profile", get(profile))
        .route("/api/mypot", get(my_pots))
        .route("/api/mypot/add", post(add_pot))
        .route("/api/mypot/hydration", get(hydration))
        .route("/api/mypot/{pot_id}/data", get(pot_detail))
        .route("/api/mypot/{pot_id}/watering", post(water_pot))
        .route("/webhook/plant-recommendation", post(recommend))
        .route("/data/2.5/weather", get(weather));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend");
    });

    format!("http://{addr}")
}

fn success(message: &str, data: Value) -> Response {
    Json(json!({ "status": "SUCCESS", "message": message, "data": data })).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status": "FAILED", "message": "Invalid token" })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_TOKEN}"))
}

async fn google_auth_url() -> Response {
    success(
        "Auth URL generated",
        json!({ "auth_url": "https://accounts.google.com/o/oauth2/auth?client_id=test" }),
    )
}

async fn profile(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    success(
        "Profile fetched",
        json!({
            "user": {
                "id": "user-1",
                "first_name": "Ana",
                "last_name": "Lima",
                "email": "ana@example.com",
                "photo": "https://example.com/ana.png",
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-02T10:00:00Z"
            }
        }),
    )
}

async fn my_pots(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    success(
        "Pots fetched",
        json!({
            "pots": [
                {
                    "pot_id": "t8NTt3FhUZ",
                    "type_name": "Potafull Home 1.0",
                    "max_water": 6,
                    "soil_health": 82.5,
                    "last_update": "2024-05-02T09:00:00Z"
                }
            ],
            "total": 1
        }),
    )
}

async fn add_pot(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let pot_id = body["pot_id"].as_str().unwrap_or_default().to_string();
    if pot_id == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "status": "FAILED", "message": "Pot already registered" })),
        )
            .into_response();
    }
    success(
        "Pot added",
        json!({
            "pot_id": pot_id,
            "type_pot_id": "type-1",
            "type_name": "Potafull Home 1.0",
            "max_water": 6,
            "created_at": "2024-05-02T09:00:00Z"
        }),
    )
}

async fn hydration(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    success(
        "Hydration fetched",
        json!({
            "pots": [
                { "id": "a", "type_name": "Potafull Home 1.0", "condition": "SAFE", "soil_hydration": 64.0 },
                { "id": "b", "condition": "URGENT", "soil_hydration": 0 },
                { "id": null, "type_name": null }
            ],
            "total": 3
        }),
    )
}

async fn pot_detail(headers: HeaderMap, Path(pot_id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if pot_id == "missing" {
        return (StatusCode::NOT_FOUND, "not here").into_response();
    }
    success(
        "Pot data fetched",
        json!({
            "pot_id": pot_id,
            "type_name": "Potafull Home 1.0",
            "max_water": 6,
            "sensor_data": {
                "n": 45, "p": 8, "k": 350,
                "temperature": 24.0, "moisture": 55.0, "ph": 6.2,
                "salinity": 0.3, "conductivity": 1.5,
                "water_level": 1.5, "soil_health": 72.0
            },
            "timestamp": "2024-05-02T09:00:00Z"
        }),
    )
}

async fn water_pot(headers: HeaderMap, Path(pot_id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if pot_id == "offline" {
        return Json(json!({ "status": "FAILED", "message": "Pot is offline" })).into_response();
    }
    success(
        "Watering command sent",
        json!({ "pot_id": pot_id, "action": "watering", "status": "sent" }),
    )
}

async fn recommend(Query(params): Query<HashMap<String, String>>) -> Response {
    let location = params.get("location").cloned().unwrap_or_default();
    if location == "Nowhere" {
        return Json(json!([])).into_response();
    }
    let preference = params.get("preference").cloned().unwrap_or_default();
    Json(json!([{
        "output": [{
            "id": "msg_1",
            "role": "assistant",
            "type": "message",
            "status": "completed",
            "content": [{
                "type": "output_text",
                "annotations": [],
                "text": {
                    "recommendation": [format!("{preference} for {location}"), "Aloe Vera"],
                    "reason": [
                        format!("skill {}", params.get("skill_level").cloned().unwrap_or_default()),
                        format!("home {}", params.get("home_frequency").cloned().unwrap_or_default())
                    ]
                }
            }]
        }]
    }]))
    .into_response()
}

async fn weather(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("appid").map(String::as_str) != Some("weather-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "cod": 401, "message": "Invalid API key" })),
        )
            .into_response();
    }
    let city = params.get("q").cloned().unwrap_or_default();
    let units = params.get("units").cloned().unwrap_or_default();
    Json(json!({
        "weather": [{ "main": "Rain", "description": format!("light rain ({units})"), "icon": "10d" }],
        "main": { "temp": 23.4, "humidity": 88 },
        "name": city
    }))
    .into_response()
}
