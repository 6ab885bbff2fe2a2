//! End-to-end tests: serve the router on an ephemeral port over the
//! seeded in-memory store and exercise it with a real HTTP client.

#![allow(clippy::panic, clippy::indexing_slicing, missing_docs)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use costfinders_api::api::build_app;
use costfinders_api::app_state::AppState;
use costfinders_api::config::{DeployEnv, SiteConfig};
use costfinders_api::domain::context::{ROLE_HEADER, SUBJECT_HEADER};
use costfinders_api::persistence::memory::seed_ids;
use costfinders_api::persistence::{MarketplaceStore, MemoryStore};
use costfinders_api::service::DirectoryService;

async fn spawn_server(store: MemoryStore, site: SiteConfig) -> SocketAddr {
    let app = build_app(AppState::new(Arc::new(store), site), Duration::from_secs(5));
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn get(url: String) -> reqwest::Response {
    let Ok(response) = reqwest::get(&url).await else {
        panic!("request to {url} failed");
    };
    response
}

async fn json(response: reqwest::Response) -> serde_json::Value {
    let Ok(value) = response.json::<serde_json::Value>().await else {
        panic!("body is not json");
    };
    value
}

#[tokio::test]
async fn cities_over_http() {
    let addr = spawn_server(MemoryStore::seeded().await, SiteConfig::default()).await;

    let response = get(format!("http://{addr}/api/cities")).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["cities"][0]["id"], seed_ids::AUSTIN.to_string());
    assert_eq!(body["cities"][0]["latitude"], 30.2672);
    assert_eq!(body["cities"][1]["name"], "Dallas");
    assert_eq!(body["cities"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn store_failure_over_http() {
    let store = MemoryStore::seeded().await;
    store.set_failure(Some("connection reset by peer")).await;
    let addr = spawn_server(store, SiteConfig::default()).await;

    let response = get(format!("http://{addr}/api/cities")).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json(response).await,
        serde_json::json!({ "error": "connection reset by peer" })
    );
}

#[tokio::test]
async fn production_robots_over_http() {
    let site = SiteConfig::new(None, Some("https://www.costfinders.ai/"), DeployEnv::Production);
    let addr = spawn_server(MemoryStore::new(), site).await;

    let response = get(format!("http://{addr}/robots.txt")).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let Ok(text) = response.text().await else {
        panic!("no body");
    };
    assert_eq!(
        text,
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         Disallow: /dashboard/\n\
         Disallow: /business/dashboard/\n\
         \n\
         Sitemap: https://www.costfinders.ai/sitemap.xml\n"
    );
}

#[tokio::test]
async fn business_owner_reads_claim_thread() {
    let addr = spawn_server(MemoryStore::seeded().await, SiteConfig::default()).await;
    let client = reqwest::Client::new();

    let Ok(response) = client
        .get(format!("http://{addr}/api/claims/{}/messages", seed_ids::CLAIM))
        .header(SUBJECT_HEADER, seed_ids::GLOW_MEDSPA.to_string())
        .header(ROLE_HEADER, "business_owner")
        .header("x-request-id", "it-claim-thread")
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["messages"][0]["claimId"], seed_ids::CLAIM.to_string());
}

#[tokio::test]
async fn unknown_deal_is_not_found() {
    let addr = spawn_server(MemoryStore::seeded().await, SiteConfig::default()).await;
    let id = uuid::Uuid::new_v4();

    let response = get(format!("http://{addr}/api/deals/{id}")).await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["error"], format!("deal not found: {id}"));
}

#[test]
fn directory_service_matches_store_contract() {
    let cities = tokio_test::block_on(async {
        let store: Arc<dyn MarketplaceStore> = Arc::new(MemoryStore::seeded().await);
        let raw = store.list_cities_with_offers(Utc::now()).await;
        let served = DirectoryService::new(store)
            .list_cities_with_offers(Utc::now())
            .await;
        (raw, served)
    });
    let (Ok(raw), Ok(served)) = cities else {
        panic!("seeded store failed");
    };
    assert_eq!(raw, served);
}
