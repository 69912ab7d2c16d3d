//! Credential-handling tests
//!
//! The admin check must behave identically for every flavor of bad
//! credential (missing header, wrong scheme, garbage encoding, wrong
//! value) and the comparison itself must not short-circuit on the first
//! differing byte.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sqlx::sqlite::SqlitePoolOptions;
use subtle::ConstantTimeEq;
use tower::util::ServiceExt;

use safesight::api::AdminAuth;
use safesight::db::{self, Store};
use safesight::vision::SafeSearchScores;
use safesight::{build_router, AppState};

const ADMIN_USER: &str = "admin";
const ADMIN_PASS: &str = "t3st-s3cret";

async fn setup_app_with_record() -> (axum::Router, Store, i64) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    db::create_schema(&pool).await.expect("Should create schema");

    let store = Store::new(pool);
    let scores = SafeSearchScores {
        adult: 1,
        spoof: 1,
        medical: 1,
        violence: 1,
        racy: 1,
    };
    let record = store.create("guarded.jpg", &scores).await.unwrap();

    let state = AppState::new(
        store.clone(),
        None,
        AdminAuth::new(ADMIN_USER.to_string(), ADMIN_PASS.to_string()),
    );
    (build_router(state), store, record.id)
}

fn delete_with_auth(id: i64, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/analysis/{id}"));
    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }
    builder.body(Body::empty()).unwrap()
}

fn encode_basic(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

#[tokio::test]
async fn test_delete_challenge_on_missing_header() {
    let (app, store, id) = setup_app_with_record().await;

    let response = app.oneshot(delete_with_auth(id, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic")
    );
    assert!(store.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_rejects_non_basic_scheme() {
    let (app, store, id) = setup_app_with_record().await;

    let response = app
        .oneshot(delete_with_auth(id, Some("Bearer some-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_rejects_undecodable_credentials() {
    let (app, store, id) = setup_app_with_record().await;

    let response = app
        .oneshot(delete_with_auth(id, Some("Basic %%%not-base64%%%")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_rejects_credentials_without_separator() {
    let (app, store, id) = setup_app_with_record().await;

    let encoded = format!("Basic {}", STANDARD.encode("no-colon-here"));
    let response = app
        .oneshot(delete_with_auth(id, Some(&encoded)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_accepts_valid_credentials() {
    let (app, store, id) = setup_app_with_record().await;

    let response = app
        .oneshot(delete_with_auth(
            id,
            Some(&encode_basic(ADMIN_USER, ADMIN_PASS)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.get(id).await.unwrap().is_none());
}

#[test]
fn test_authenticate_rejects_same_length_wrong_password() {
    let auth = AdminAuth::new("admin".to_string(), "changeme123".to_string());
    // Same length as the real password, differs in the last byte only
    assert!(!auth.authenticate("admin", "changeme124"));
    // And in the first byte only
    assert!(!auth.authenticate("admin", "dhangeme123"));
}

#[test]
fn test_authenticate_checks_both_fields() {
    let auth = AdminAuth::new("admin".to_string(), "changeme123".to_string());
    assert!(!auth.authenticate("admin", "wrong"));
    assert!(!auth.authenticate("wrong", "changeme123"));
    assert!(auth.authenticate("admin", "changeme123"));
}

#[test]
fn test_ct_eq_same_length_different_content() {
    // The underlying comparison inspects every byte of equal-length inputs
    let a = b"changeme123";
    let b = b"changeme124";
    assert_eq!(bool::from(a.ct_eq(b)), false);
    assert_eq!(bool::from(a.ct_eq(a)), true);
}

#[test]
fn test_ct_eq_different_lengths() {
    let a = b"short";
    let b = b"much-longer-value";
    assert_eq!(bool::from(a.ct_eq(&b[..])), false);
}
