//! JSON REST API for the roster contact service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::ContactStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(state.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use roster_core::{ldap::LdapConfig, store::ContactStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Tenant id stamped on created contacts.
  #[serde(default = "default_entity")]
  pub entity:          i64,
  /// Capitalize each word of first/last names on creation.
  #[serde(default)]
  pub uppercase_names: bool,
  /// Directory-export mapping; the `/contacts/{id}/ldap` endpoint answers
  /// 503 when absent.
  #[serde(default)]
  pub ldap:            Option<LdapConfig>,
}

fn default_entity() -> i64 {
  1
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ContactStore> {
  pub store: Arc<S>,
  pub ldap:  Option<Arc<LdapConfig>>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ContactStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/contacts",
      post(contacts::create::<S>).get(contacts::get_by_ref::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update_one::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .route("/contacts/{id}/status", post(contacts::set_status::<S>))
    .route("/contacts/{id}/personal", put(contacts::update_personal::<S>))
    .route(
      "/contacts/{id}/categories",
      get(contacts::categories::<S>).put(contacts::set_categories::<S>),
    )
    .route("/contacts/{id}/refs", get(contacts::ref_counts::<S>))
    .route("/contacts/{id}/mailings", get(contacts::mailing_count::<S>))
    .route("/contacts/{id}/ldap", get(contacts::directory_entry::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use roster_core::ldap::{DirectoryFlavor, LdapAttributeMap};
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    AppState {
      store: Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      ldap:  None,
    }
  }

  async fn send(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    api_router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn create_body(lastname: &str) -> Value {
    json!({ "actor": 7, "contact": { "lastname": lastname } })
  }

  // ── Create / fetch ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_and_get_roundtrip() {
    let state = make_state().await;

    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = json_body(resp).await["id"].as_i64().unwrap();
    assert!(id > 0);

    let resp =
      send(state, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["contact"]["lastname"], "Doe");
    assert_eq!(body["contact"]["status"], "enabled");
    assert_eq!(body["contact"]["visibility"], "shared");
  }

  #[tokio::test]
  async fn create_without_a_name_is_a_bad_request() {
    let state = make_state().await;
    let resp =
      send(state, "POST", "/contacts", Some(create_body("   "))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn get_missing_returns_404() {
    let state = make_state().await;
    let resp = send(state, "GET", "/contacts/999", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn get_by_external_ref() {
    let state = make_state().await;

    // Missing parameter is a 400, not a 404.
    let resp = send(state.clone(), "GET", "/contacts", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json!({
      "actor": 7,
      "contact": { "lastname": "Doe", "external_ref": "crm-12" }
    });
    send(state.clone(), "POST", "/contacts", Some(body)).await;

    let resp =
      send(state, "GET", "/contacts?external_ref=crm-12", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["contact"]["external_ref"], "crm-12");
  }

  // ── Update / delete ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_overwrites_and_get_reflects_it() {
    let state = make_state().await;
    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let body = json!({
      "actor": 11,
      "contact": { "lastname": "Doe", "firstname": "Jane", "email": "jane@example.com" }
    });
    let resp = send(
      state.clone(),
      "PUT",
      &format!("/contacts/{id}"),
      Some(body),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(state, "GET", &format!("/contacts/{id}"), None).await;
    let body = json_body(resp).await;
    assert_eq!(body["contact"]["firstname"], "Jane");
    assert_eq!(body["contact"]["email"], "jane@example.com");
    assert_eq!(body["contact"]["updated_by"], 11);
  }

  #[tokio::test]
  async fn delete_then_get_returns_404() {
    let state = make_state().await;
    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let resp = send(
      state.clone(),
      "DELETE",
      &format!("/contacts/{id}?actor=7"),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(state, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_missing_returns_404() {
    let state = make_state().await;
    let resp = send(state, "DELETE", "/contacts/999?actor=7", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Status ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn status_endpoint_reports_noops() {
    let state = make_state().await;
    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let body = json!({ "actor": 7, "status": "enabled" });
    let resp = send(
      state.clone(),
      "POST",
      &format!("/contacts/{id}/status"),
      Some(body),
    )
    .await;
    assert_eq!(json_body(resp).await["changed"], false);

    let body = json!({ "actor": 7, "status": "disabled" });
    let resp = send(
      state.clone(),
      "POST",
      &format!("/contacts/{id}/status"),
      Some(body),
    )
    .await;
    assert_eq!(json_body(resp).await["changed"], true);

    let resp = send(state, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(json_body(resp).await["contact"]["status"], "disabled");
  }

  // ── Personal / categories ──────────────────────────────────────────────────

  #[tokio::test]
  async fn personal_endpoint_sets_birthday_and_alert() {
    let state = make_state().await;
    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let body = json!({ "actor": 7, "birthday": "1990-12-24", "birthday_alert": true });
    let resp = send(
      state.clone(),
      "PUT",
      &format!("/contacts/{id}/personal"),
      Some(body),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(
      state,
      "GET",
      &format!("/contacts/{id}?subscriber=7"),
      None,
    )
    .await;
    let body = json_body(resp).await;
    assert_eq!(body["contact"]["birthday"], "1990-12-24");
    assert_eq!(body["birthday_alert"], true);
  }

  #[tokio::test]
  async fn categories_roundtrip() {
    let state = make_state().await;
    let vip = state.store.add_category("vip").await.unwrap();
    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let resp = send(
      state.clone(),
      "PUT",
      &format!("/contacts/{id}/categories"),
      Some(json!({ "categories": [vip] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(
      state,
      "GET",
      &format!("/contacts/{id}/categories"),
      None,
    )
    .await;
    assert_eq!(json_body(resp).await, json!([vip]));
  }

  // ── Reporting / directory ──────────────────────────────────────────────────

  #[tokio::test]
  async fn refs_and_mailings_endpoints() {
    let state = make_state().await;
    let body = json!({
      "actor": 7,
      "contact": { "lastname": "Doe", "email": "doe@example.com" }
    });
    let resp = send(state.clone(), "POST", "/contacts", Some(body)).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let resp = send(state.clone(), "GET", &format!("/contacts/{id}/refs"), None).await;
    assert_eq!(
      json_body(resp).await,
      json!({ "invoices": 0, "contracts": 0, "orders": 0, "proposals": 0 })
    );

    state
      .store
      .add_mailing_target("doe@example.com", roster_core::links::MailingStatus::Sent)
      .await
      .unwrap();
    let resp =
      send(state, "GET", &format!("/contacts/{id}/mailings"), None).await;
    assert_eq!(json_body(resp).await["count"], 1);
  }

  #[tokio::test]
  async fn directory_endpoint_requires_configuration() {
    let state = make_state().await;
    let resp =
      send(state.clone(), "POST", "/contacts", Some(create_body("Doe"))).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let resp = send(state, "GET", &format!("/contacts/{id}/ldap"), None).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
  }

  #[tokio::test]
  async fn directory_endpoint_renders_entry_and_dn() {
    let mut state = make_state().await;
    state.ldap = Some(Arc::new(LdapConfig {
      contact_dn:     "ou=contacts,dc=example,dc=com".to_string(),
      key_attribute:  "cn".to_string(),
      object_classes: vec!["top".to_string(), "inetOrgPerson".to_string()],
      flavor:         DirectoryFlavor::Generic,
      attributes:     LdapAttributeMap {
        fullname: Some("cn".to_string()),
        lastname: Some("sn".to_string()),
        ..Default::default()
      },
    }));

    let body = json!({
      "actor": 7,
      "contact": { "lastname": "Doe", "firstname": "Jane" }
    });
    let resp = send(state.clone(), "POST", "/contacts", Some(body)).await;
    let id = json_body(resp).await["id"].as_i64().unwrap();

    let resp = send(state, "GET", &format!("/contacts/{id}/ldap"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["dn"], "cn=Jane Doe,ou=contacts,dc=example,dc=com");
    assert_eq!(body["entry"]["sn"], json!(["Doe"]));
  }
}
