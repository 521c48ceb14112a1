use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::event::{Event, EventPayload};
use crate::store::EventStore;
use crate::utils::error::{AppError, FieldError};
use crate::utils::response::message;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "eventbook-api",
    };

    (StatusCode::OK, Json(payload)).into_response()
}

pub async fn list_events(State(store): State<Arc<EventStore>>) -> Json<Vec<Event>> {
    Json(store.list())
}

pub async fn get_event(
    State(store): State<Arc<EventStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Event>, AppError> {
    store.get(id).map(Json)
}

pub async fn create_event(
    State(store): State<Arc<EventStore>>,
    body: Result<Json<EventPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = body.map_err(undecodable_body)?;
    let event = store.create(&payload)?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

pub async fn update_event(
    State(store): State<Arc<EventStore>>,
    Path(id): Path<u64>,
    body: Result<Json<EventPayload>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let Json(payload) = body.map_err(undecodable_body)?;
    store.update(id, &payload).map(Json)
}

pub async fn delete_event(
    State(store): State<Arc<EventStore>>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    store.delete(id)?;

    Ok(message(StatusCode::OK, "Event removed"))
}

// A body that cannot be decoded at all is reported in the same shape as a
// field validation failure, under the pseudo-field "body".
fn undecodable_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::event::DATETIME_FORMAT;
    use crate::routes::create_routes;

    use super::*;

    fn app() -> axum::Router {
        create_routes(Arc::new(EventStore::new()))
    }

    fn in_days(days: i64) -> String {
        (Utc::now().naive_utc() + Duration::days(days))
            .format(DATETIME_FORMAT)
            .to_string()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_the_assigned_id() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/events",
                json!({
                    "name": "Conf",
                    "description": "Annual conf",
                    "datetime_of_event": in_days(10),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Conf");
        assert_eq!(body["organizer"], Value::Null);
    }

    #[tokio::test]
    async fn created_events_show_up_in_the_list() {
        let app = app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/events",
                json!({
                    "name": "Conf",
                    "description": "Annual conf",
                    "organizer": "Acme",
                    "datetime_of_event": in_days(10),
                }),
            ))
            .await
            .unwrap();

        let response = app.oneshot(get_request("/api/events/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["organizer"], "Acme");
    }

    #[tokio::test]
    async fn listing_an_empty_store_returns_an_empty_array() {
        let response = app().oneshot(get_request("/api/events/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn fetching_a_missing_event_is_404_with_the_expected_body() {
        let response = app().oneshot(get_request("/api/events/7")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!("Event not found"));
    }

    #[tokio::test]
    async fn invalid_create_is_400_and_names_every_offending_field() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/events",
                json!({ "organizer": "Acme" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        let fields: Vec<_> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["name", "description", "datetime_of_event"]);
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_400_validation_response() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not-json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["fields"][0]["field"], "body");
    }

    #[tokio::test]
    async fn update_overwrites_only_the_provided_fields() {
        let app = app();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/events",
                json!({
                    "name": "Conf",
                    "description": "Annual conf",
                    "datetime_of_event": in_days(10),
                }),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/events/1",
                json!({ "organizer": "NewOrg" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["organizer"], "NewOrg");
        assert_eq!(body["name"], "Conf");
        assert_eq!(body["description"], "Annual conf");
    }

    #[tokio::test]
    async fn updating_a_missing_event_is_404() {
        let response = app()
            .oneshot(json_request(
                "PUT",
                "/api/events/7",
                json!({ "name": "New" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!("Event not found"));
    }

    #[tokio::test]
    async fn delete_answers_with_event_removed_then_404_on_repeat() {
        let app = app();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/events",
                json!({
                    "name": "Conf",
                    "description": "Annual conf",
                    "datetime_of_event": in_days(10),
                }),
            ))
            .await
            .unwrap();

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/events/1")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(delete).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!("Event removed"));

        let again = Request::builder()
            .method("DELETE")
            .uri("/api/events/1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(again).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!("Event not found"));
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let response = app().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
