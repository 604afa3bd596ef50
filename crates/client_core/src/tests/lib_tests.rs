use super::*;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{domain::Edge, error::ErrorKind};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::net::TcpListener;

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn supported_pairs_decodes_object_records() {
    let app = Router::new().route(
        "/supported_pairs",
        get(|| async {
            Json(serde_json::json!({
                "pairs": [
                    { "source": "c#", "target": "c" },
                    { "source": "c", "target": "java" }
                ]
            }))
        }),
    );
    let engine = HttpTranslationEngine::new(format!("{}/", serve(app).await));

    let catalog = fetch_catalog(&engine).await.expect("catalog");
    assert_eq!(
        catalog.edges(),
        &[Edge::new("c#", "c"), Edge::new("c", "java")]
    );
}

#[tokio::test]
async fn supported_pairs_with_wrong_shape_is_format_error() {
    let app = Router::new().route(
        "/supported_pairs",
        get(|| async { Json(serde_json::json!({ "pairs": "c,java" })) }),
    );
    let engine = HttpTranslationEngine::new(serve(app).await);

    let err = engine.supported_pairs().await.expect_err("format");
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn supported_pairs_server_error_is_network_error() {
    let app = Router::new().route(
        "/supported_pairs",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let engine = HttpTranslationEngine::new(serve(app).await);

    let err = engine.supported_pairs().await.expect_err("network");
    assert_eq!(
        err,
        TranslatorError::network(Some(500), "Internal Server Error")
    );
}

#[tokio::test]
async fn translate_posts_wire_body_and_decodes_warnings() {
    let app = Router::new().route(
        "/translate",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["source_code"], "int x=1;");
            assert_eq!(body["source_lang"], "c");
            assert_eq!(body["target_lang"], "java");
            Json(serde_json::json!({
                "translation": "int x = 1;",
                "warnings": ["unchecked cast"]
            }))
        }),
    );
    let engine = HttpTranslationEngine::new(serve(app).await);

    let response = engine
        .translate(&TranslateRequest::new("int x=1;", &Edge::new("c", "java")))
        .await
        .expect("translate");
    assert_eq!(response.translation, "int x = 1;");
    assert_eq!(response.warnings, vec!["unchecked cast".to_string()]);
}

#[tokio::test]
async fn translate_missing_model_reports_status_text() {
    let app = Router::new().route(
        "/translate",
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "detail": "Model for c_to_rust not found." })),
            )
        }),
    );
    let engine = HttpTranslationEngine::new(serve(app).await);

    let err = engine
        .translate(&TranslateRequest::new("x", &Edge::new("c", "rust")))
        .await
        .expect_err("not found");
    assert_eq!(err, TranslatorError::network(Some(404), "Not Found"));
    assert_eq!(err.to_string(), "API error: Not Found");
}

#[tokio::test]
async fn translate_without_translation_field_is_malformed() {
    let app = Router::new().route(
        "/translate",
        post(|| async { Json(serde_json::json!({ "result": "x" })) }),
    );
    let engine = HttpTranslationEngine::new(serve(app).await);

    let err = engine
        .translate(&TranslateRequest::new("x", &Edge::new("c", "java")))
        .await
        .expect_err("malformed");
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn unreachable_engine_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let engine = HttpTranslationEngine::new(format!("http://{addr}"));

    let err = engine.supported_pairs().await.expect_err("refused");
    assert!(matches!(err, TranslatorError::Network { status: None, .. }));
}

#[tokio::test]
async fn controller_submit_issues_exactly_one_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().route(
        "/translate",
        post(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(serde_json::json!({ "translation": "int x = 1;", "warnings": [] }))
            }
        }),
    );
    let engine = HttpTranslationEngine::new(serve(app).await);
    let catalog = PairCatalog::load([Edge::new("c", "java")]);
    let mut selection = PairSelectionController::new(Arc::new(catalog.clone()));
    selection.init(None);
    let mut controller = TranslationController::new();

    let outcome = controller
        .submit(&engine, &catalog, &selection.selection(), "int x=1;")
        .await
        .clone();
    assert_eq!(
        outcome,
        TranslationOutcome::Success {
            text: "int x = 1;".to_string(),
            warnings: Vec::new(),
        }
    );

    controller
        .submit(&engine, &catalog, &selection.selection(), "   ")
        .await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mixed_case_catalog_ids_reach_the_engine_unchanged() {
    let app = Router::new()
        .route(
            "/supported_pairs",
            get(|| async {
                Json(serde_json::json!({
                    "pairs": [{ "source": "Python", "target": "Java" }]
                }))
            }),
        )
        .route(
            "/translate",
            post(|Json(body): Json<serde_json::Value>| async move {
                let model_key = format!(
                    "{}_to_{}",
                    body["source_lang"].as_str().unwrap_or_default(),
                    body["target_lang"].as_str().unwrap_or_default()
                );
                if model_key == "Python_to_Java" {
                    Json(serde_json::json!({ "translation": "int x = 1;" })).into_response()
                } else {
                    StatusCode::NOT_FOUND.into_response()
                }
            }),
        );
    let base_url = serve(app).await;
    let engine = HttpTranslationEngine::with_client(reqwest::Client::new(), format!("{base_url}//"));
    assert_eq!(engine.base_url(), base_url);

    let catalog = fetch_catalog(&engine).await.expect("catalog");
    let mut selection = PairSelectionController::new(Arc::new(catalog.clone()));
    selection.init(None);
    assert_eq!(selection.current_edge(), Some(Edge::new("Python", "Java")));

    let mut controller = TranslationController::new();
    let outcome = controller
        .submit(&engine, &catalog, &selection.selection(), "x = 1")
        .await
        .clone();
    assert_eq!(
        outcome,
        TranslationOutcome::Success {
            text: "int x = 1;".to_string(),
            warnings: Vec::new(),
        }
    );
}
