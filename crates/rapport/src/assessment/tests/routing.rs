use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::assessment::router::score_handler;
use crate::assessment::{assessment_router, ScoreRequest};

fn score_request(payload: Value) -> Request<Body> {
    Request::post("/api/v1/assessment/score")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn criteria_route_lists_the_catalog() {
    let router = assessment_router(shared_engine());

    let response = router
        .oneshot(
            Request::get("/api/v1/assessment/criteria")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let criteria = body["criteria"].as_array().expect("criteria array");
    assert_eq!(criteria.len(), 3);
    assert_eq!(criteria[0]["key"], "communication");
    assert_eq!(criteria[2]["kind"], "boolean");
    assert_eq!(body["ladder"]["steps"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn score_route_returns_assessment_for_complete_answers() {
    let router = assessment_router(shared_engine());

    let response = router
        .oneshot(score_request(json!({
            "answers": {"communication": 4, "trust": 5, "birthdayGifts": true}
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["band"], "exceptional");
    assert_eq!(body["display_score"], 4.57);
    assert_eq!(body["complete"], true);
}

#[tokio::test]
async fn score_route_rejects_incomplete_answers() {
    let router = assessment_router(shared_engine());

    let response = router
        .oneshot(score_request(json!({
            "answers": {"communication": 4, "trust": null}
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["missing"], json!(["trust", "birthdayGifts"]));
}

#[tokio::test]
async fn score_route_previews_partial_answers_on_request() {
    let router = assessment_router(shared_engine());

    let response = router
        .oneshot(score_request(json!({
            "answers": {"trust": 3},
            "preview": true
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["complete"], false);
    assert_eq!(body["answered"], 1);
    assert_eq!(body["band"], "stable");
}

#[tokio::test]
async fn score_handler_rejects_unknown_criteria() {
    let request = ScoreRequest {
        answers: [("humour", 5)].into_iter().collect(),
        preview: true,
    };

    let response = score_handler(State(shared_engine()), Ok(axum::Json(request))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("humour"));
}

#[tokio::test]
async fn score_route_treats_mistyped_answers_as_unanswered() {
    for mistyped in [json!("4"), json!(4.5), json!("yes")] {
        let router = assessment_router(shared_engine());

        let response = router
            .oneshot(score_request(json!({
                "answers": {"communication": mistyped, "trust": 5, "birthdayGifts": true}
            })))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json_body(response).await;
        assert_eq!(body["missing"], json!(["communication"]));
    }
}

#[tokio::test]
async fn score_route_rejects_unreadable_bodies_as_bad_requests() {
    let router = assessment_router(shared_engine());

    let response = router
        .oneshot(
            Request::post("/api/v1/assessment/score")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"answers": ["communication"]}"#))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}
