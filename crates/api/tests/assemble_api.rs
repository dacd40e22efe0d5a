//! HTTP-level integration tests for `/assemble` and `/structure`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// POST /api/v1/assemble
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assembles_natural_language_prompt() {
    let response = post_json(
        build_test_app(),
        "/api/v1/assemble",
        json!({
            "structure": { "subject": "a fox", "environment": "snowy forest" },
            "platform": "dalle",
            "language": "english"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["prompt"], "snowy forest, a fox");
}

#[tokio::test]
async fn assembles_midjourney_flags() {
    let response = post_json(
        build_test_app(),
        "/api/v1/assemble",
        json!({
            "structure": {
                "subject": "a fox",
                "environment": "snowy forest",
                "negative": "blurry",
                "technical": { "aspectRatio": "1:1" }
            },
            "platform": "midjourney"
        }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["prompt"], "snowy forest, a fox --ar 1:1 --no blurry");
}

#[tokio::test]
async fn legacy_structures_are_upgraded() {
    let response = post_json(
        build_test_app(),
        "/api/v1/assemble",
        json!({
            "structure": {
                "subject": "a fox",
                "action": "leaping",
                "modifiers": { "color": "amber", "mood": "None" }
            },
            "platform": "flux"
        }),
    )
    .await;

    let json = body_json(response).await;
    let prompt = json["data"]["prompt"].as_str().unwrap();
    assert!(prompt.contains("leaping"));
    assert!(prompt.contains("amber"));
    assert!(!prompt.contains("None"));
}

#[tokio::test]
async fn placeholder_field_groups_are_treated_as_absent() {
    let response = post_json(
        build_test_app(),
        "/api/v1/assemble",
        json!({
            "structure": {
                "subject": "a fox",
                "environment": "snowy forest",
                "modifiers": "None",
                "technical": "N/A"
            },
            "platform": "dalle"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["prompt"], "snowy forest, a fox");
}

#[tokio::test]
async fn sd_always_headers_layout_is_selectable() {
    let response = post_json(
        build_test_app(),
        "/api/v1/assemble",
        json!({
            "structure": { "subject": "a fox" },
            "platform": "sd",
            "sdLayout": "always_headers"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let prompt = json["data"]["prompt"].as_str().unwrap();
    assert!(prompt.contains("a fox"));
    assert!(prompt.contains("Negative Prompt:"));
}

#[tokio::test]
async fn non_object_structure_returns_400() {
    let response = post_json(
        build_test_app(),
        "/api/v1/assemble",
        json!({ "structure": "a fox", "platform": "dalle" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// POST /api/v1/structure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn structures_fenced_completion_text() {
    let text = "```json\n{\"subject\": \"a fox\", \"environment\": \"snowy forest\", \"theme\": \"N/A\"}\n```";
    let response = post_json(
        build_test_app(),
        "/api/v1/structure",
        json!({ "text": text, "platform": "dalle" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["structure"]["subject"], "a fox");
    assert_eq!(json["data"]["structure"]["theme"], "");
    assert_eq!(json["data"]["prompt"], "snowy forest, a fox");
    assert_eq!(json["data"]["structure"]["enrichedPrompt"], "snowy forest, a fox");
}

#[tokio::test]
async fn structures_completion_with_placeholder_groups() {
    let text = r#"{"environment":"snowy forest","subject":"a fox","modifiers":"None","technical":"N/A","negative":"blurry"}"#;
    let response = post_json(
        build_test_app(),
        "/api/v1/structure",
        json!({ "text": text, "platform": "midjourney" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["structure"]["modifiers"]["lighting"], "");
    assert_eq!(json["data"]["prompt"], "snowy forest, a fox --no blurry");
}

#[tokio::test]
async fn text_without_json_returns_422() {
    let response = post_json(
        build_test_app(),
        "/api/v1/structure",
        json!({ "text": "Sorry, I cannot help with that." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "STRUCTURING_FAILED");
}

#[tokio::test]
async fn empty_text_returns_400() {
    let response = post_json(build_test_app(), "/api/v1/structure", json!({ "text": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
