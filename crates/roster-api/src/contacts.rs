//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/contacts` | Body: [`CreateBody`]; returns 201 + `{"id":…}` |
//! | `GET`    | `/contacts` | `?external_ref=` required; optional `subscriber` |
//! | `GET`    | `/contacts/{id}` | Optional `?subscriber=`; 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: [`UpdateBody`]; full overwrite |
//! | `DELETE` | `/contacts/{id}` | `?actor=` required; optional `silent` |
//! | `POST`   | `/contacts/{id}/status` | Body: `{"actor":…,"status":"enabled"}` |
//! | `PUT`    | `/contacts/{id}/personal` | Birthday + alert subscription |
//! | `GET/PUT`| `/contacts/{id}/categories` | Assignment set |
//! | `GET`    | `/contacts/{id}/refs` | Linked-element counts |
//! | `GET`    | `/contacts/{id}/mailings` | Mass-mailing delivery count |
//! | `GET`    | `/contacts/{id}/ldap` | Directory entry; 503 when unconfigured |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use roster_core::{
  contact::{CategoryId, ContactId, ContactView, NewContact, UserId},
  ldap::{DnMode, ldap_dn, ldap_entry},
  links::RefCounts,
  status::Status,
  store::ContactStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError};

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub actor:   UserId,
  pub contact: NewContact,
}

/// `POST /contacts` — returns 201 + `{"id": <new id>}`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = state
    .store
    .create(body.contact, body.actor)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Fetch ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FetchParams {
  pub subscriber: Option<UserId>,
}

/// `GET /contacts/{id}[?subscriber=<user id>]`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
  Query(params): Query<FetchParams>,
) -> Result<Json<ContactView>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let view = state
    .store
    .fetch(Some(id), None, params.subscriber)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct RefParams {
  pub external_ref: Option<String>,
  pub subscriber:   Option<UserId>,
}

/// `GET /contacts?external_ref=<ref>[&subscriber=<user id>]`
pub async fn get_by_ref<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<RefParams>,
) -> Result<Json<ContactView>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let external_ref = params.external_ref.ok_or_else(|| {
    ApiError::BadRequest("external_ref query parameter is required".to_string())
  })?;
  let view = state
    .store
    .fetch(None, Some(&external_ref), params.subscriber)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("contact {external_ref:?} not found"))
    })?;
  Ok(Json(view))
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub actor:   UserId,
  #[serde(default)]
  pub silent:  bool,
  pub contact: NewContact,
}

/// `PUT /contacts/{id}` — full overwrite of the mutable fields.
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
  Json(body): Json<UpdateBody>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .update(id, &body.contact, body.actor, body.silent)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PersonalBody {
  pub actor:          UserId,
  pub birthday:       Option<NaiveDate>,
  #[serde(default)]
  pub birthday_alert: bool,
}

/// `PUT /contacts/{id}/personal`
pub async fn update_personal<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
  Json(body): Json<PersonalBody>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .update_personal(id, body.actor, body.birthday, body.birthday_alert)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
  pub actor:  UserId,
  #[serde(default)]
  pub silent: bool,
}

/// `DELETE /contacts/{id}?actor=<user id>[&silent=true]`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
  Query(params): Query<DeleteParams>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .delete(id, params.actor, params.silent)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub actor:  UserId,
  pub status: Status,
}

/// `POST /contacts/{id}/status` — `{"changed": false}` when the requested
/// status equals the current one.
pub async fn set_status<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
  Json(body): Json<StatusBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let changed = state
    .store
    .set_status(id, body.status, body.actor)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "changed": changed })))
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CategoriesBody {
  pub categories: Vec<CategoryId>,
}

/// `PUT /contacts/{id}/categories`
pub async fn set_categories<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
  Json(body): Json<CategoriesBody>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .set_categories(id, &body.categories)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /contacts/{id}/categories`
pub async fn categories<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
) -> Result<Json<Vec<CategoryId>>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let categories = state
    .store
    .categories_of(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(categories))
}

// ─── Reporting ───────────────────────────────────────────────────────────────

/// `GET /contacts/{id}/refs`
pub async fn ref_counts<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
) -> Result<Json<RefCounts>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let counts = state
    .store
    .ref_counts(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(counts))
}

/// `GET /contacts/{id}/mailings` — deliveries to this contact's address.
pub async fn mailing_count<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let view = state
    .store
    .fetch(Some(id), None, None)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  let count = state
    .store
    .mailing_count(&view.contact.email)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "count": count })))
}

// ─── Directory export ────────────────────────────────────────────────────────

/// `GET /contacts/{id}/ldap` — the directory entry and DN for this contact.
pub async fn directory_entry<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<ContactId>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(cfg) = state.ldap.clone() else {
    return Err(ApiError::Unavailable(
      "directory export is not configured".to_string(),
    ));
  };
  let view = state
    .store
    .fetch(Some(id), None, None)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;

  let entry = ldap_entry(&view, &cfg);
  let dn = ldap_dn(&entry, &cfg, DnMode::Full);
  Ok(Json(json!({ "dn": dn, "entry": entry })))
}
