//! End-to-end tests for the registration page and form endpoint.
//!
//! The app is assembled the same way as the server binary, backed by the
//! in-memory store and an Argon2 hasher with minimal cost parameters.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use argon2::Params;
use async_trait::async_trait;
use rstest::{fixture, rstest};

use registration::Trace;
use registration::domain::ports::{RegistrationPersistenceError, RegistrationRepository};
use registration::domain::{RegistrationService, TRACE_ID_HEADER, UserRecord};
use registration::inbound::http::configure;
use registration::inbound::http::health::HealthState;
use registration::inbound::http::state::HttpState;
use registration::outbound::hashing::Argon2PasswordHasher;
use registration::outbound::persistence::InMemoryRegistrationRepository;

const PASSWORD_RULE_FRAGMENT: &str = "<h2>Error: Incorrect password type! Password must be at least 6 characters long, contain at least one uppercase letter, and one number.</h2>";

/// Store that rejects every write.
struct UnavailableStore;

#[async_trait]
impl RegistrationRepository for UnavailableStore {
    async fn upsert(&self, _record: &UserRecord) -> Result<(), RegistrationPersistenceError> {
        Err(RegistrationPersistenceError::connection(
            "connection refused",
        ))
    }
}

#[fixture]
fn hasher() -> Arc<Argon2PasswordHasher> {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
    Arc::new(Argon2PasswordHasher::new(params))
}

#[fixture]
fn store() -> Arc<InMemoryRegistrationRepository> {
    Arc::new(InMemoryRegistrationRepository::new())
}

async fn init_app<R>(
    repository: Arc<R>,
    hasher: Arc<Argon2PasswordHasher>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
where
    R: RegistrationRepository + 'static,
{
    let health = HealthState::new();
    health.mark_ready();
    let http_state = HttpState::new(Arc::new(RegistrationService::new(repository, hasher)));
    test::init_service(
        App::new()
            .app_data(web::Data::new(health))
            .app_data(web::Data::new(http_state))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

fn register_request(body: &'static str) -> Request {
    TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(body)
        .to_request()
}

async fn submit<S>(app: &S, body: &'static str) -> (StatusCode, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, register_request(body)).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    (
        status,
        String::from_utf8(bytes.to_vec()).expect("utf8 body"),
    )
}

#[rstest]
#[actix_web::test]
async fn registration_stores_hashed_record(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
) {
    let app = init_app(Arc::clone(&store), Arc::clone(&hasher)).await;

    let (status, html) = submit(&app, "name=Ann&email=ann%40x.com&password=Abc123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html, "<h2>Thank you for registering, Ann!</h2>");
    let record = store.get("ann@x.com").expect("record stored under email");
    assert_eq!(record.name().as_ref(), "Ann");
    assert_ne!(record.password_hash().as_ref(), "Abc123");
    assert!(
        hasher
            .verify("Abc123", record.password_hash())
            .expect("stored value is a PHC string")
    );
}

#[rstest]
#[actix_web::test]
async fn repeat_registration_overwrites_name(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
) {
    let app = init_app(Arc::clone(&store), hasher).await;

    submit(&app, "name=Ann&email=ann%40x.com&password=Abc123").await;
    let (_, html) = submit(&app, "name=Annie&email=ann%40x.com&password=Xyz789").await;

    assert_eq!(html, "<h2>Thank you for registering, Annie!</h2>");
    assert_eq!(store.len(), 1);
    let record = store.get("ann@x.com").expect("record stored");
    assert_eq!(record.name().as_ref(), "Annie");
}

#[rstest]
#[case::missing_name(
    "email=ann%40x.com&password=Abc123",
    "<h2>Error: All fields are required!</h2>"
)]
#[case::empty_password(
    "name=Ann&email=ann%40x.com&password=",
    "<h2>Error: All fields are required!</h2>"
)]
#[case::bad_email(
    "name=Ann&email=bob%40example&password=Abc123",
    "<h2>Error: Invalid email format!</h2>"
)]
#[case::weak_password("name=Ann&email=ann%40x.com&password=abc123", PASSWORD_RULE_FRAGMENT)]
#[case::short_password("name=Ann&email=ann%40x.com&password=Ab1", PASSWORD_RULE_FRAGMENT)]
#[actix_web::test]
async fn invalid_submission_leaves_store_untouched(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
    #[case] body: &'static str,
    #[case] expected: &str,
) {
    let app = init_app(Arc::clone(&store), hasher).await;

    let (status, html) = submit(&app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html, expected);
    assert!(store.is_empty());
}

#[rstest]
#[actix_web::test]
async fn long_submission_is_stored(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
) {
    let app = init_app(Arc::clone(&store), hasher).await;
    let name = "A".repeat(20_000);
    let body: &'static str = format!("name={name}&email=ann%40x.com&password=Abc123").leak();

    let (status, html) = submit(&app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html, format!("<h2>Thank you for registering, {name}!</h2>"));
    let record = store.get("ann@x.com").expect("record stored");
    assert_eq!(record.name().as_ref(), name);
}

#[rstest]
#[case::repeated_field("name=Ann&name=Bob&email=ann%40x.com&password=Abc123")]
#[case::invalid_utf8("name=%FF&email=ann%40x.com&password=Abc123")]
#[actix_web::test]
async fn malformed_submission_is_not_stored(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
    #[case] body: &'static str,
) {
    let app = init_app(Arc::clone(&store), hasher).await;

    let (status, html) = submit(&app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        html,
        "<h2>Error: There was an issue with registration. Please try again later.</h2>"
    );
    assert!(store.is_empty());
}

#[rstest]
#[actix_web::test]
async fn store_failure_renders_generic_message(hasher: Arc<Argon2PasswordHasher>) {
    let app = init_app(Arc::new(UnavailableStore), hasher).await;

    let (status, html) = submit(&app, "name=Ann&email=ann%40x.com&password=Abc123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        html,
        "<h2>Error: There was an issue with registration. Please try again later.</h2>"
    );
    assert!(!html.contains("connection refused"));
}

#[rstest]
#[actix_web::test]
async fn name_is_escaped_in_greeting(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
) {
    let app = init_app(store, hasher).await;

    let (_, html) = submit(
        &app,
        "name=%3Cscript%3EAnn%3C%2Fscript%3E&email=ann%40x.com&password=Abc123",
    )
    .await;

    assert_eq!(
        html,
        "<h2>Thank you for registering, &lt;script&gt;Ann&lt;/script&gt;!</h2>"
    );
}

#[rstest]
#[case::page(TestRequest::get().uri("/"))]
#[case::register(
    TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("name=Ann")
)]
#[case::probe(TestRequest::get().uri("/health/ready"))]
#[actix_web::test]
async fn every_response_carries_trace_id(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
    #[case] request: TestRequest,
) {
    let app = init_app(store, hasher).await;

    let res = test::call_service(&app, request.to_request()).await;

    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace-id header");
    assert!(trace_id.parse::<uuid::Uuid>().is_ok(), "{trace_id}");
}

#[rstest]
#[actix_web::test]
async fn index_page_links_form_and_assets(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
) {
    let app = init_app(store, hasher).await;

    let res = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    let page = std::str::from_utf8(&body).expect("utf8 page");

    for needle in [
        "action=\"/register\"",
        "name=\"name\"",
        "name=\"email\"",
        "name=\"password\"",
        "/styles.css",
        "/script.js",
    ] {
        assert!(page.contains(needle), "page is missing {needle}");
    }
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn probes_report_ok(
    store: Arc<InMemoryRegistrationRepository>,
    hasher: Arc<Argon2PasswordHasher>,
    #[case] uri: &str,
) {
    let app = init_app(store, hasher).await;

    let res = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
}
