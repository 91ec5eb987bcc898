//! Client against a real server on a loopback port.
//!
//! Checks that client-side and server-side enforcement agree: titles the
//! client would reject are rejected by the server with the same reason.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use dataflow_api::auth::jwt::{generate_access_token, JwtConfig};
use dataflow_api::config::{ServerConfig, StoreBackend};
use dataflow_api::router::build_app_router;
use dataflow_api::state::AppState;
use dataflow_client::config::ClientConfig;
use dataflow_client::{ClientError, RecordApi, RecordTransport, SubmissionFlow, SubmitError};
use dataflow_core::record::{validate_title, CreateRecord, TitleViolation};
use dataflow_core::types::DbId;
use dataflow_db::models::record::Record;
use dataflow_db::{InMemoryRecordStore, RecordStore, StoreError};

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "end-to-end-secret-that-is-long-enough".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// A store that never answers.
struct HangingStore;

#[async_trait]
impl RecordStore for HangingStore {
    async fn create(&self, _account_id: DbId, _title: &str) -> Result<Record, StoreError> {
        std::future::pending().await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Start the API on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    spawn_server_with(Arc::new(InMemoryRecordStore::new()), 30).await
}

async fn spawn_server_with(store: Arc<dyn RecordStore>, request_timeout_secs: u64) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs,
        store: StoreBackend::Memory,
        jwt: jwt_config(),
    };
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api(base_url: &str, account_id: i64) -> RecordApi {
    let token = generate_access_token(1, account_id, &jwt_config()).unwrap();
    RecordApi::new(base_url, Some(token))
}

#[tokio::test]
async fn submit_creates_record_on_server() {
    let base = spawn_server().await;
    let flow = SubmissionFlow::new(api(&base, 1));

    let record = flow.submit("My First Record").await.unwrap();

    assert_eq!(record.title, "My First Record");
    assert!(record.id_record > 0);
}

#[tokio::test]
async fn server_and_client_agree_on_every_sample() {
    let base = spawn_server().await;
    let transport = api(&base, 1);

    let samples = [
        "".to_string(),
        "ab".to_string(),
        "!!".to_string(),
        "!!!!!".to_string(),
        "   ok   ".to_string(),
        "abc".to_string(),
        "x".repeat(100),
        "x".repeat(101),
        "Título válido".to_string(),
        "#".repeat(150),
        format!(" {}", "a".repeat(100)),
        format!("{}  ", "a".repeat(99)),
        " ".repeat(150),
        "日本語".to_string(),
    ];

    for (i, title) in samples.iter().enumerate() {
        // Keep accepted titles unique so the duplicate rule never interferes.
        let local = validate_title(title);
        let title = if local.is_ok() { format!("{title}{i}") } else { title.clone() };
        let local = validate_title(&title);

        let remote = transport.create_record(&CreateRecord::new(title.clone())).await;
        match (local, remote) {
            (Ok(()), Ok(_)) => {}
            (Err(expected), Err(ClientError::Validation(violations))) => {
                assert_eq!(violations[0].field, "title", "{title:?}");
                assert_eq!(
                    TitleViolation::from_code(&violations[0].code),
                    Some(expected),
                    "{title:?}"
                );
            }
            (local, remote) => panic!("disagreement on {title:?}: local {local:?}, remote {remote:?}"),
        }
    }
}

#[tokio::test]
async fn duplicate_title_surfaces_as_business_rule() {
    let base = spawn_server().await;
    let flow = SubmissionFlow::new(api(&base, 1));

    flow.submit("Budget").await.unwrap();
    let err = flow.submit("Budget").await.unwrap_err();

    assert_matches!(err, SubmitError::Api(ClientError::BusinessRule(ref m)) if m.contains("already exists"));
}

#[tokio::test]
async fn accounts_are_isolated() {
    let base = spawn_server().await;

    SubmissionFlow::new(api(&base, 1)).submit("Budget").await.unwrap();
    SubmissionFlow::new(api(&base, 2)).submit("Budget").await.unwrap();
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let base = spawn_server().await;
    let flow = SubmissionFlow::new(RecordApi::new(base, None));

    let err = flow.submit("Valid title").await.unwrap_err();
    assert_matches!(err, SubmitError::Api(ClientError::Unauthorized(_)));
}

#[tokio::test]
async fn unreachable_server_is_request_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let flow = SubmissionFlow::new(RecordApi::new(format!("http://{addr}"), None));
    let err = flow.submit("Valid title").await.unwrap_err();
    assert_matches!(err, SubmitError::Api(ClientError::Request(_)));
}

#[tokio::test]
async fn client_timeout_from_config_gives_up_on_stalled_server() {
    let base = spawn_server_with(Arc::new(HangingStore), 30).await;
    let config = ClientConfig {
        base_url: base,
        token: Some(generate_access_token(1, 1, &jwt_config()).unwrap()),
        request_timeout: Duration::from_millis(200),
    };
    let flow = SubmissionFlow::new(RecordApi::from_config(&config).unwrap());

    let err = flow.submit("Valid title").await.unwrap_err();
    assert_matches!(err, SubmitError::Api(ClientError::Request(ref e)) if e.is_timeout());
    assert!(!flow.is_in_flight());
}

#[tokio::test]
async fn server_timeout_reaches_client_as_generic_server_error() {
    let base = spawn_server_with(Arc::new(HangingStore), 1).await;
    let flow = SubmissionFlow::new(api(&base, 1));

    let err = flow.submit("Valid title").await.unwrap_err();
    assert_matches!(
        err,
        SubmitError::Api(ClientError::Server { status: 500, ref message })
            if message == "An internal error occurred"
    );
}
