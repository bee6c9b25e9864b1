#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use loom_core::orchestrator::{
    GenerationRequest, GenerationService, HttpGenerationService, ServiceErrorKind,
};
use loom_core::{
    Error, GenerationOrchestrator, GenerationPipeline, GenerationPolicy, GeneratorConfig, Stage,
    TechStack,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> HttpGenerationService {
    HttpGenerationService::new(format!("{}/generate", server.uri()), "test-model", Duration::from_secs(5))
        .expect("client builds")
}

fn structure_request() -> GenerationRequest {
    GenerationRequest::new(Stage::Structure, "a pricing table", GeneratorConfig::default())
}

async fn failure_kind(status: u16) -> ServiceErrorKind {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&server)
        .await;

    service_for(&server)
        .generate(&structure_request())
        .await
        .expect_err("non-success status should fail")
        .kind
}

#[tokio::test]
async fn test_json_source_field_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "stage": "structure",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"source": "<div>Hi</div>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = service_for(&server).generate(&structure_request()).await.unwrap();
    assert_eq!(source, "<div>Hi</div>");
}

#[tokio::test]
async fn test_plain_text_body_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>plain</p>\n"))
        .mount(&server)
        .await;

    let source = service_for(&server).generate(&structure_request()).await.unwrap();
    assert_eq!(source, "<p>plain</p>");
}

#[tokio::test]
async fn test_plain_text_svelte_block_is_not_parsed_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string("{#if x}<p/>{/if}"),
        )
        .mount(&server)
        .await;

    let source = service_for(&server).generate(&structure_request()).await.unwrap();
    assert_eq!(source, "{#if x}<p/>{/if}");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server).with_api_key(Some("sk-test".into()));
    assert_eq!(service.generate(&structure_request()).await.unwrap(), "<p>ok</p>");
}

#[tokio::test]
async fn test_previous_source_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"previous": "<div>v1</div>"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div>v2</div>"))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerationRequest::new(Stage::Styling, "a card", GeneratorConfig::default())
        .with_previous(Some("<div>v1</div>".into()));
    assert_eq!(service_for(&server).generate(&request).await.unwrap(), "<div>v2</div>");
}

#[tokio::test]
async fn test_status_classification() {
    assert_eq!(failure_kind(429).await, ServiceErrorKind::RateLimited);
    assert_eq!(failure_kind(401).await, ServiceErrorKind::Misconfigured);
    assert_eq!(failure_kind(503).await, ServiceErrorKind::Unavailable);
    assert_eq!(failure_kind(504).await, ServiceErrorKind::Timeout);
}

#[tokio::test]
async fn test_json_without_source_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 7})))
        .mount(&server)
        .await;

    let err = service_for(&server).generate(&structure_request()).await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>late</p>")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let service = HttpGenerationService::new(
        format!("{}/generate", server.uri()),
        "test-model",
        Duration::from_millis(100),
    )
    .unwrap();
    let err = service.generate(&structure_request()).await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::Timeout);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    // Port 9 (discard) is not expected to accept connections in test environments.
    let service =
        HttpGenerationService::new("http://127.0.0.1:9/generate", "m", Duration::from_secs(2)).unwrap();
    let err = service.generate(&structure_request()).await.unwrap_err();
    assert!(matches!(err.kind, ServiceErrorKind::Unavailable | ServiceErrorKind::Timeout));
}

#[tokio::test]
async fn test_pipeline_end_to_end_per_stage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "```tsx\nexport default function Hero() {\n  return <h1>Hi</h1>;\n}\n```"
        })))
        .expect(4)
        .mount(&server)
        .await;

    let orchestrator =
        GenerationOrchestrator::new(service_for(&server)).with_policy(GenerationPolicy::PerStage);
    let pipeline = GenerationPipeline::new(orchestrator);

    let mut stages = Vec::new();
    let result = pipeline
        .run("react", "hero section", &GeneratorConfig::default(), |e| stages.push(e.stage))
        .await
        .unwrap();

    assert_eq!(stages, Stage::ORDER);
    assert_eq!(result.framework, TechStack::React);
    let app = result.file("src/App.tsx").unwrap();
    assert!(app.content.starts_with("export default function Hero()"));
}

#[tokio::test]
async fn test_pipeline_failure_reports_complete_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = GenerationPipeline::new(
        GenerationOrchestrator::new(service_for(&server)).with_policy(GenerationPolicy::SingleCall {
            stage_delay: Duration::ZERO,
        }),
    );

    let mut events = Vec::new();
    let err = pipeline
        .run("vue", "a form", &GeneratorConfig::default(), |e| events.push(e.clone()))
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::Generation(e) if e.kind == ServiceErrorKind::RateLimited));
    assert!(err.is_recoverable());

    let stages: Vec<_> = events.iter().map(|e| e.stage).collect();
    assert_eq!(stages, [Stage::Preparing, Stage::Structure, Stage::Complete]);
    assert!(events.last().unwrap().error.is_some());
}
