mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use lopdf::{Document, Object};
use serde_json::Value;
use tower::ServiceExt;

use formforge::application::services::ProcessingService;
use formforge::domain::{FieldSchema, SchemaField};
use formforge::infrastructure::assets::{StaticSchemaSource, StaticTemplateStore};
use formforge::infrastructure::extraction::CompositeExtractor;
use formforge::infrastructure::llm::MockLlmClient;
use formforge::infrastructure::ocr::MockOcrEngine;
use formforge::presentation::config::{
    AssetSettings, LimitSettings, LlmSettings, LoggingSettings, OcrProvider, OcrSettings,
    ServerSettings, Settings,
};
use formforge::presentation::{create_router, AppState};

const BOUNDARY: &str = "test-boundary-7f3a";

fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        llm: LlmSettings {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            base_url: None,
            timeout_secs: 5,
        },
        ocr: OcrSettings {
            provider: OcrProvider::Mock,
            endpoint: None,
            api_key: None,
        },
        assets: AssetSettings {
            schema_path: "unused".to_string(),
            template_path: "unused".to_string(),
        },
        limits: LimitSettings {
            max_upload_bytes: 1024 * 1024,
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            enable_json: false,
        },
    }
}

fn test_schema() -> FieldSchema {
    FieldSchema::new(vec![SchemaField {
        field_name: "Company name".to_string(),
        mapping_key: "name".to_string(),
        instructions: "The company's legal name".to_string(),
    }])
    .unwrap()
}

fn test_router(llm: MockLlmClient) -> axum::Router {
    let ocr = Arc::new(MockOcrEngine::returning(""));
    let extractor = Arc::new(CompositeExtractor::with_defaults(ocr));
    let schema_source = Arc::new(StaticSchemaSource::new(test_schema()));
    let template_store = Arc::new(StaticTemplateStore::new(common::fillable_form_pdf()));

    let processing_service = Arc::new(ProcessingService::new(
        extractor,
        Arc::new(llm),
        schema_source,
        template_store,
    ));

    create_router(AppState {
        processing_service,
        settings: test_settings(),
    })
}

fn multipart_file(filename: &str, content: &str) -> (String, Body) {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        Body::from(body),
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_txt_upload_when_processing_then_filled_pdf_is_returned() {
    let router = test_router(MockLlmClient::answering(r#"{"name": "Acme Corp"}"#));
    let (content_type, body) = multipart_file("company.txt", "Name: Acme Corp");

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"filled.pdf\""
    );

    let pdf_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let doc = Document::load_mem(&pdf_bytes).unwrap();

    // The name field carries the extracted value and output is flattened.
    let name_value = doc.objects.values().find_map(|obj| {
        let dict = obj.as_dict().ok()?;
        (dict.get(b"T").ok()?.as_str().ok()? == b"name")
            .then(|| dict.get(b"V").ok().cloned())
            .flatten()
    });
    assert!(matches!(name_value, Some(Object::String(s, _)) if s == b"Acme Corp"));

    let root_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let catalog = doc.get_object(root_id).unwrap().as_dict().unwrap();
    assert!(!catalog.has(b"AcroForm"), "output still carries an AcroForm");
}

#[tokio::test]
async fn given_get_request_when_calling_process_then_post_only_message() {
    let router = test_router(MockLlmClient::answering("{}"));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/process")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "POST only");
}

#[tokio::test]
async fn given_non_json_answer_when_processing_then_invalid_ai_output_error() {
    let router = test_router(MockLlmClient::answering(
        "Sorry, I could not find any fields in this document.",
    ));
    let (content_type, body) = multipart_file("company.txt", "Name: Acme Corp");

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("invalid AI output"),
        "unexpected error body: {body}"
    );
}

#[tokio::test]
async fn given_llm_transport_failure_when_processing_then_bad_gateway() {
    let router = test_router(MockLlmClient::failing("connection refused"));
    let (content_type, body) = multipart_file("company.txt", "Name: Acme Corp");

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn given_no_parts_when_processing_then_bad_request() {
    let router = test_router(MockLlmClient::answering("{}"));
    let body = format!("--{BOUNDARY}--\r\n");

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unsupported_extension_when_processing_then_bad_request() {
    let router = test_router(MockLlmClient::answering("{}"));
    let (content_type, body) = multipart_file("movie.mp4", "binary-ish");

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("unsupported"));
}

#[tokio::test]
async fn given_text_only_request_when_processing_then_free_text_reaches_the_prompt() {
    let llm = MockLlmClient::answering(r#"{"name": "Acme Corp"}"#);
    let router = test_router(llm);
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"text\"\r\n\r\n\
         Name: Acme Corp\r\n\
         --{BOUNDARY}--\r\n"
    );

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_incoming_request_id_when_responding_then_same_id_is_echoed() {
    let router = test_router(MockLlmClient::answering("{}"));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
}

#[tokio::test]
async fn given_no_request_id_when_responding_then_one_is_minted() {
    let router = test_router(MockLlmClient::answering("{}"));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok(), "not a UUID: {id}");
}

#[tokio::test]
async fn given_health_endpoint_when_getting_then_ok() {
    let router = test_router(MockLlmClient::answering("{}"));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
