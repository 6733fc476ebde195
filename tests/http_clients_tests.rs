use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use research_agent::api::create_router;
use research_agent::client::ResearchApiClient;
use research_agent::search::{SearchClient, SearchProvider, SerpApiProvider};
use research_agent::summarizer::{ChatModel, OpenAiChatModel, Summarizer};

mod common;
use common::{ONE_RESULT_JSON, StubModel, StubSearch, agent, three_results};

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn fake_serpapi(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("api_key").map(String::as_str) != Some("good-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid API key." })),
        );
    }
    assert_eq!(params.get("engine").map(String::as_str), Some("google"));

    match params.get("q").map(String::as_str) {
        Some("nothing") => (StatusCode::OK, Json(json!({ "search_metadata": {} }))),
        Some("zxqvw plorf") => (
            StatusCode::OK,
            Json(json!({
                "search_metadata": { "status": "Success" },
                "error": "Google hasn't returned any results for this query."
            })),
        ),
        Some(q) => (
            StatusCode::OK,
            Json(json!({
                "organic_results": [
                    { "position": 1, "title": format!("About {q}"), "link": "https://a.example", "snippet": "first" },
                    { "position": 2, "link": "https://b.example" }
                ]
            })),
        ),
        None => (StatusCode::BAD_REQUEST, Json(json!({ "error": "Missing query" }))),
    }
}

#[tokio::test]
async fn test_serpapi_provider_parses_organic_results() {
    let base = spawn_server(Router::new().route("/search.json", get(fake_serpapi))).await;
    let provider = SerpApiProvider::new(&base, "good-key");

    let results = provider.organic_results("rust async").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title.as_deref(), Some("About rust async"));
    assert!(results[1].title.is_none());
}

#[tokio::test]
async fn test_serpapi_missing_organic_results_means_no_results() {
    let base = spawn_server(Router::new().route("/search.json", get(fake_serpapi))).await;
    let client = SearchClient::new(Arc::new(SerpApiProvider::new(&base, "good-key")));

    assert_eq!(
        client.search("nothing").await.unwrap(),
        "No results found for the query."
    );
}

#[tokio::test]
async fn test_serpapi_empty_google_results_means_no_results() {
    let base = spawn_server(Router::new().route("/search.json", get(fake_serpapi))).await;
    let client = SearchClient::new(Arc::new(SerpApiProvider::new(&base, "good-key")));

    assert_eq!(
        client.search("zxqvw plorf").await.unwrap(),
        "No results found for the query."
    );
}

#[tokio::test]
async fn test_serpapi_error_surfaces_as_search_error() {
    let base = spawn_server(Router::new().route("/search.json", get(fake_serpapi))).await;
    let client = SearchClient::new(Arc::new(SerpApiProvider::new(&base, "bad-key")));

    let err = client.search("rust").await.unwrap_err();
    assert_eq!(err.to_string(), "Error performing search: Invalid API key.");
}

#[tokio::test]
async fn test_serpapi_unreachable_is_search_error() {
    let provider = SerpApiProvider::new("http://127.0.0.1:1", "good-key");
    let err = provider.organic_results("rust").await.unwrap_err();
    assert!(err.to_string().starts_with("Error performing search: "));
}

#[tokio::test]
async fn test_openai_chat_model_request_and_response() {
    let captured: Arc<std::sync::Mutex<Option<Value>>> = Arc::default();
    let captured_clone = captured.clone();

    let router = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = captured_clone.clone();
            async move {
                assert_eq!(
                    headers.get("authorization").unwrap().to_str().unwrap(),
                    "Bearer hf-key"
                );
                *captured.lock().unwrap() = Some(body);
                Json(json!({
                    "choices": [{ "index": 0, "message": { "role": "assistant", "content": ONE_RESULT_JSON } }]
                }))
            }
        }),
    );
    let base = spawn_server(router).await;
    let model = OpenAiChatModel::new(&format!("{base}/v1/"), "hf-key", "llama-test", 0.7, 2048);

    let reply = model.complete("system text", "user text").await.unwrap();
    assert_eq!(reply, ONE_RESULT_JSON);

    let body = captured.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "llama-test");
    assert_eq!(body["max_tokens"], 2048);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "system text");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "user text");
}

#[tokio::test]
async fn test_openai_chat_model_http_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let base = spawn_server(router).await;
    let summarizer = Summarizer::new(Arc::new(OpenAiChatModel::new(&base, "k", "m", 0.7, 16)));

    let err = summarizer
        .summarize(&[research_agent::data_models::Document::new("x".to_string())])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_api_client_against_running_server() {
    let app = create_router(Arc::new(agent(
        StubSearch::with_results(three_results()),
        StubModel::replying(ONE_RESULT_JSON),
    )));
    let base = spawn_server(app).await;
    let client = ResearchApiClient::new(&format!("{base}/"));

    assert!(client.health_check().await);

    let response = client.research("ml").await.unwrap();
    assert_eq!(response.status, "success");

    let top = client.top_result("ml").await.unwrap();
    assert_eq!(top.rank, 1);
    assert_eq!(top.url, "http://a");
    assert_eq!(client.all_results("ml").await.len(), 1);
}

#[tokio::test]
async fn test_api_client_reports_server_detail() {
    let app = create_router(Arc::new(agent(
        StubSearch::with_results(three_results()),
        StubModel::replying(ONE_RESULT_JSON),
    )));
    let base = spawn_server(app).await;
    let client = ResearchApiClient::new(&base);

    let err = client.research("   ").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "research agent returned 400: Query cannot be empty"
    );
    assert!(client.all_results("   ").await.is_empty());
}

#[tokio::test]
async fn test_api_client_health_check_unreachable() {
    let client = ResearchApiClient::new("http://127.0.0.1:1");
    assert!(!client.health_check().await);
}
