//! Router tests for the page data API
//!
//! Drives the axum router end to end with in-memory collaborators:
//! - business detail pages and the not-found page
//! - static path enumeration
//! - submission page options and the submission pipeline

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use shared::{
    BusinessDoc, BusinessRecord, OptionRecord, SiteContext, SubmissionPayload, TransportError,
};
use together_apart_site::config::{
    Config, ContentConfig, SearchConfig, ServerConfig, SiteConfig, SubmissionConfig,
};
use together_apart_site::external::{ContentBackend, SearchFilter, SearchIndex, SubmissionApi};
use together_apart_site::{create_app, AppError, AppResult, AppState};
use tower::ServiceExt;

// ============================================================================
// In-memory collaborators
// ============================================================================

#[derive(Default)]
struct FakeContent {
    items: Vec<BusinessRecord>,
    locations: Vec<OptionRecord>,
    categories: Vec<OptionRecord>,
    fail: bool,
    prepared: AtomicUsize,
}

#[async_trait]
impl ContentBackend for FakeContent {
    async fn prepare(&self, _site: &SiteContext) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Content("unavailable".into()));
        }
        self.prepared.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn current_site_items(&self, site: &SiteContext) -> AppResult<Vec<BusinessRecord>> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.site == site.id)
            .cloned()
            .collect())
    }

    async fn current_site_locations(&self, _site: &SiteContext) -> AppResult<Vec<OptionRecord>> {
        Ok(self.locations.clone())
    }

    async fn categories(&self, _site: &SiteContext) -> AppResult<Vec<OptionRecord>> {
        Ok(self.categories.clone())
    }
}

/// Matches on the slug clause of the filter the way the index would
struct FakeSearch {
    docs: Vec<BusinessDoc>,
}

#[async_trait]
impl SearchIndex for FakeSearch {
    async fn search(&self, _query: &str, filter: &SearchFilter) -> AppResult<Vec<BusinessDoc>> {
        let filter = filter.to_string();
        Ok(self
            .docs
            .iter()
            .filter(|doc| {
                filter.contains(&format!("slug:\"{}\"", doc.record.slug))
                    && filter.contains(&format!("site:\"{}\"", doc.record.site))
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct FakeSubmission {
    fail: bool,
    received: Mutex<Vec<SubmissionPayload>>,
}

#[async_trait]
impl SubmissionApi for FakeSubmission {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        self.received.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(TransportError::Status(500))
        } else {
            Ok(())
        }
    }
}

fn record(slug: &str, site: &str) -> BusinessRecord {
    BusinessRecord {
        id: format!("rec-{}", slug),
        name: format!("Business {}", slug),
        slug: slug.to_string(),
        site: site.to_string(),
        header_image: Some(format!("https://cdn.example.com/{}.jpg", slug)),
        ..Default::default()
    }
}

fn option(id: &str, name: &str) -> OptionRecord {
    OptionRecord {
        id: id.to_string(),
        name: name.to_string(),
        site: None,
    }
}

fn config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        site: SiteConfig {
            id: "site1".to_string(),
            region_name: "Ottawa".to_string(),
            contact_email: "hi@example.com".to_string(),
        },
        search: SearchConfig {
            application_id: "APP".to_string(),
            api_key: "key".to_string(),
            index_name: "businesses".to_string(),
            endpoint: None,
        },
        content: ContentConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_token: "token".to_string(),
            businesses_collection: "biz".to_string(),
            locations_collection: "loc".to_string(),
            categories_collection: "cat".to_string(),
            refresh_secs: None,
        },
        submission: SubmissionConfig {
            endpoint: "http://127.0.0.1:9/submit".to_string(),
        },
    }
}

struct Harness {
    state: AppState,
    content: Arc<FakeContent>,
    submission: Arc<FakeSubmission>,
}

fn harness(content: FakeContent, submission: FakeSubmission) -> Harness {
    let docs = content
        .items
        .iter()
        .map(|record| BusinessDoc {
            object_id: format!("obj-{}", record.slug),
            record: record.clone(),
        })
        .collect();

    let config = config();
    let content = Arc::new(content);
    let submission = Arc::new(submission);
    let state = AppState {
        site: config.site.context(),
        config: Arc::new(config),
        content: content.clone(),
        search: Arc::new(FakeSearch { docs }),
        submission: submission.clone(),
    };

    Harness {
        state,
        content,
        submission,
    }
}

fn default_content() -> FakeContent {
    FakeContent {
        items: vec![
            record("bobs-bakery", "site1"),
            record("glebe-books", "site1"),
            record("elsewhere-cafe", "site2"),
        ],
        locations: vec![option("l2", "Westboro"), option("l1", "Glebe")],
        categories: vec![option("c2", "Restaurant"), option("c1", "Bakery")],
        ..Default::default()
    }
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_submission() -> Value {
    json!({
        "name": "Bob's Bakery",
        "description": "Fresh bread",
        "websiteURL": "HTTP://Example.COM/Shop",
        "location": { "id": "l1", "label": "Glebe" },
        "category": { "id": "c1", "label": "Bakery" },
        "tags": [
            { "id": "a", "label": "Vegan" },
            { "id": "b", "label": "Local" }
        ],
        "supportsTakeout": true
    })
}

// ============================================================================
// Business pages
// ============================================================================

#[tokio::test]
async fn test_business_page_found() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, body) = send(h.state, get("/api/v1/businesses/bobs-bakery")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business"]["slug"], "bobs-bakery");
    assert_eq!(body["business"]["objectID"], "obj-bobs-bakery");
    assert_eq!(body["meta"]["title"], "Business bobs-bakery is open during COVID-19");
    assert_eq!(body["meta"]["og_image"], "https://cdn.example.com/bobs-bakery.jpg");
    assert_eq!(h.content.prepared.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_business_page_not_found() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, body) = send(h.state, get("/api/v1/businesses/no-such-business")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Page not found");
}

#[tokio::test]
async fn test_business_from_other_site_not_found() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, _) = send(h.state, get("/api/v1/businesses/elsewhere-cafe")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_business_page_backend_failure() {
    let content = FakeContent {
        fail: true,
        ..default_content()
    };
    let h = harness(content, FakeSubmission::default());
    let (status, body) = send(h.state, get("/api/v1/businesses/bobs-bakery")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "CONTENT_ERROR");
}

#[tokio::test]
async fn test_business_paths() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, body) = send(h.state, get("/api/v1/businesses")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
    assert_eq!(
        body["paths"],
        json!([{ "slug": "bobs-bakery" }, { "slug": "glebe-books" }])
    );
}

#[tokio::test]
async fn test_business_paths_empty() {
    let h = harness(FakeContent::default(), FakeSubmission::default());
    let (status, body) = send(h.state, get("/api/v1/businesses")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paths"], json!([]));
}

// ============================================================================
// Submission page
// ============================================================================

#[tokio::test]
async fn test_submit_page_options_sorted() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, body) = send(h.state, get("/api/v1/submit-a-business")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region_name"], "Ottawa");
    assert_eq!(
        body["locations"],
        json!([{ "id": "l1", "label": "Glebe" }, { "id": "l2", "label": "Westboro" }])
    );
    assert_eq!(body["categories"][0]["label"], "Bakery");
    assert!(body["tag_options"].as_array().map_or(false, |tags| !tags.is_empty()));
}

#[tokio::test]
async fn test_submit_business_success() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, body) = send(
        h.state,
        post_json("/api/v1/submit-a-business", valid_submission()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledgement"]["title"], "Thanks!");
    assert_eq!(body["acknowledgement"]["contact_email"], "hi@example.com");
    assert_eq!(body["values"]["websiteURL"], "HTTP://Example.COM/Shop");

    let received = h.submission.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].tags, "Vegan, Local");
    assert_eq!(received[0].website_url, "http://example.com/shop");
    assert_eq!(received[0].site_id, "site1");
    assert_eq!(received[0].site_name, "Ottawa");
}

#[tokio::test]
async fn test_submit_business_validation_errors() {
    let h = harness(default_content(), FakeSubmission::default());
    let (status, body) = send(
        h.state,
        post_json(
            "/api/v1/submit-a-business",
            json!({ "submitterEmail": "nope", "websiteURL": "example" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = &body["error"]["fields"];
    assert_eq!(fields["name"], "Required");
    assert_eq!(fields["description"], "Required");
    assert_eq!(fields["location"], "Required");
    assert_eq!(fields["category"], "Required");
    assert_eq!(fields["submitterEmail"], "Invalid email address");
    assert!(fields["websiteURL"].is_string());

    assert!(h.submission.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_business_transport_failure() {
    let submission = FakeSubmission {
        fail: true,
        ..Default::default()
    };
    let h = harness(default_content(), submission);
    let (status, body) = send(
        h.state,
        post_json("/api/v1/submit-a-business", valid_submission()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "SUBMISSION_FAILED");
    assert_eq!(body["error"]["toast"]["kind"], "negative");
    assert_eq!(body["error"]["toast"]["auto_hide_ms"], 3000);
    assert_eq!(h.submission.received.lock().unwrap().len(), 1);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let h = harness(FakeContent::default(), FakeSubmission::default());
    let (status, body) = send(h.state, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["site"], "site1");
}
