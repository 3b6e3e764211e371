//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`) depend on this abstraction, not on any
//! concrete backend.
//!
//! Multi-statement operations (create, update, delete, set_status) are
//! atomic: the backend wraps them in a transaction and a failure in any step
//! — including a listener veto — rolls the whole operation back.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  contact::{
    AuditInfo, CategoryId, CompanyId, ContactId, ContactView, NewContact,
    UserId,
  },
  links::RefCounts,
  status::Status,
};

/// Abstraction over a contact persistence backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Create a contact from `draft` and return the storage-assigned id.
  ///
  /// Normalizes the draft (trimmed names, lastname fallback, non-positive
  /// foreign keys to NULL), inserts the base row, writes the remaining
  /// fields, reconciles the birthday alert, saves extended attributes, and
  /// fires the created event — all in one transaction.
  fn create<'a>(
    &'a self,
    draft: NewContact,
    actor: UserId,
  ) -> impl Future<Output = Result<ContactId, Self::Error>> + Send + 'a;

  /// Overwrite every mutable field of contact `id` with `draft`.
  ///
  /// Fires the modified event unless `silent`. The draft's creation-only
  /// fields (canvas, entity, external reference, import key, birthday) are
  /// left untouched.
  fn update<'a>(
    &'a self,
    id: ContactId,
    draft: &'a NewContact,
    actor: UserId,
    silent: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Update the birthday and reconcile the acting user's birthday-alert
  /// subscription, atomically: insert the alert row when requested and
  /// absent, keep it when present, delete it when not requested.
  fn update_personal<'a>(
    &'a self,
    id: ContactId,
    actor: UserId,
    birthday: Option<NaiveDate>,
    birthday_alert: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete contact `id`: external-sourced link rows, category links,
  /// birthday alerts, extended attributes, then the base row, atomically.
  /// Fires the deleted event (carrying the prior record) unless `silent`.
  fn delete<'a>(
    &'a self,
    id: ContactId,
    actor: UserId,
    silent: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Fetch a contact by id or external reference (at least one required)
  /// and hydrate every display field in one pass. When `subscriber` is
  /// given, also resolves whether that user holds a birthday alert.
  ///
  /// Returns `Ok(None)` when no record matches — not an error.
  fn fetch<'a>(
    &'a self,
    id: Option<ContactId>,
    external_ref: Option<&'a str>,
    subscriber: Option<UserId>,
  ) -> impl Future<Output = Result<Option<ContactView>, Self::Error>> + Send + 'a;

  /// Count, by element kind, the linked elements this contact is attached
  /// to.
  fn ref_counts<'a>(
    &'a self,
    id: ContactId,
  ) -> impl Future<Output = Result<RefCounts, Self::Error>> + Send + 'a;

  /// Creation/modification audit trail. `Ok(None)` when the contact does
  /// not exist.
  fn audit_info<'a>(
    &'a self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<AuditInfo>, Self::Error>> + Send + 'a;

  // ── Status ────────────────────────────────────────────────────────────

  /// Set the status. Returns `false` — with no write and no event — when
  /// the requested status equals the current one.
  fn set_status<'a>(
    &'a self,
    id: ContactId,
    status: Status,
    actor: UserId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Categories ────────────────────────────────────────────────────────

  /// Reassign the contact's categories to exactly `desired`: associations
  /// outside the desired set are removed, missing ones are added (when the
  /// category exists), the intersection is left untouched.
  fn set_categories<'a>(
    &'a self,
    id: ContactId,
    desired: &'a [CategoryId],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// The contact's current category assignment set.
  fn categories_of<'a>(
    &'a self,
    id: ContactId,
  ) -> impl Future<Output = Result<Vec<CategoryId>, Self::Error>> + Send + 'a;

  // ── Reporting ─────────────────────────────────────────────────────────

  /// Number of mass-mailing deliveries made to `email`, excluding pending
  /// and errored targets.
  fn mailing_count<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Repoint every contact of company `origin` to company `dest`. Returns
  /// the number of rows touched.
  fn replace_company<'a>(
    &'a self,
    origin: CompanyId,
    dest: CompanyId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}
