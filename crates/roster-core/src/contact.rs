//! Contact — the person/address record at the heart of the service.
//!
//! A contact optionally belongs to a company and may back a login account.
//! [`NewContact`] is the mutable field bundle accepted by create and update;
//! [`Contact`] is the persisted record; [`ContactView`] is the hydrated read
//! model assembled per fetch, never stored.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  locale::{Translator, resolve},
  status::{Status, Visibility},
};

// ─── Identifiers ─────────────────────────────────────────────────────────────

// Row ids are assigned by the storage backend on insert and are immutable
// afterwards. Foreign keys are either a positive id or absent.
pub type ContactId = i64;
pub type CompanyId = i64;
pub type UserId = i64;
pub type CountryId = i64;
pub type StateId = i64;
pub type CategoryId = i64;
pub type LinkTypeId = i64;

/// Normalize a raw foreign-key value: anything non-positive means "no link"
/// and is persisted as NULL, never as 0.
pub fn normalize_fk(raw: Option<i64>) -> Option<i64> {
  raw.filter(|v| *v > 0)
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The mutable field bundle for a contact.
///
/// Used as the creation draft and as the payload of a full update. String
/// fields are trimmed by the store before being written; `name` is the legacy
/// combined field used as a fallback when `lastname` is blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewContact {
  pub name:           String,
  pub lastname:       String,
  pub firstname:      String,
  pub civility:       Option<String>,
  pub position:       String,
  pub company_id:     Option<CompanyId>,
  pub address:        String,
  pub zip:            String,
  pub town:           String,
  pub country_id:     Option<CountryId>,
  pub state_id:       Option<StateId>,
  pub email:          String,
  pub phone_work:     String,
  pub phone_home:     String,
  pub phone_mobile:   String,
  pub fax:            String,
  pub im_jabber:      String,
  pub im_skype:       String,
  pub photo:          String,
  pub note_private:   Option<String>,
  pub note_public:    Option<String>,
  pub visibility:     Visibility,
  pub status:         Status,
  pub birthday:       Option<NaiveDate>,
  /// Whether the acting user subscribes to a birthday reminder.
  pub birthday_alert: bool,
  pub default_lang:   Option<String>,
  pub no_email:       bool,
  pub canvas:         Option<String>,
  pub external_ref:   Option<String>,
  pub import_key:     Option<String>,
  /// Free-form extended attributes, persisted alongside the record.
  pub attributes:     BTreeMap<String, serde_json::Value>,
}

impl NewContact {
  /// A fixed sample record, used to build previews and test fixtures.
  pub fn specimen() -> Self {
    Self {
      lastname: "SPECIMEN".to_string(),
      firstname: "Sample".to_string(),
      address: "21 Jump Street".to_string(),
      zip: "99999".to_string(),
      town: "MyTown".to_string(),
      email: "specimen@example.com".to_string(),
      im_skype: "tom.hanson".to_string(),
      phone_work: "0909090901".to_string(),
      phone_home: "0909090902".to_string(),
      phone_mobile: "0909090903".to_string(),
      fax: "0909090909".to_string(),
      note_public: Some("This is a comment (public)".to_string()),
      note_private: Some("This is a comment (private)".to_string()),
      status: Status::Enabled,
      ..Self::default()
    }
  }
}

// ─── Persisted record ────────────────────────────────────────────────────────

/// A persisted contact record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
  pub id:           ContactId,
  pub external_ref: Option<String>,
  pub import_key:   Option<String>,
  pub company_id:   Option<CompanyId>,
  pub civility:     Option<String>,
  pub lastname:     String,
  pub firstname:    String,
  pub position:     String,
  pub address:      String,
  pub zip:          String,
  pub town:         String,
  pub country_id:   Option<CountryId>,
  pub state_id:     Option<StateId>,
  pub email:        String,
  pub phone_work:   String,
  pub phone_home:   String,
  pub phone_mobile: String,
  pub fax:          String,
  pub im_jabber:    String,
  pub im_skype:     String,
  pub photo:        String,
  pub note_private: Option<String>,
  pub note_public:  Option<String>,
  pub visibility:   Visibility,
  pub status:       Status,
  pub birthday:     Option<NaiveDate>,
  pub default_lang: Option<String>,
  pub no_email:     bool,
  pub canvas:       Option<String>,
  pub entity:       i64,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   Option<DateTime<Utc>>,
  pub created_by:   Option<UserId>,
  pub updated_by:   Option<UserId>,
  pub attributes:   BTreeMap<String, serde_json::Value>,
}

impl Contact {
  /// Display name: first name then last name, collapsed when one is blank.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.firstname.trim(), self.lastname.trim())
      .trim()
      .to_string()
  }

  /// Legacy accessor for the department reference, kept for callers that
  /// predate the canonical `state_id` field.
  pub fn department_id(&self) -> Option<StateId> {
    self.state_id
  }

  /// Translated civility label, falling back to the raw code.
  pub fn civility_label(&self, tr: &dyn Translator) -> String {
    match self.civility.as_deref() {
      None | Some("") => String::new(),
      Some(code) => resolve(tr, &format!("civility.{code}"), code),
    }
  }
}

// ─── Hydrated view ───────────────────────────────────────────────────────────

/// Company display fields joined into a [`ContactView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
  pub name:     String,
  pub customer: bool,
  pub prospect: bool,
  pub supplier: bool,
}

/// The login account backed by a contact, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedUser {
  pub user_id: UserId,
  pub login:   String,
}

/// The read model returned by fetch: the record plus every display field
/// hydrated in one pass. Recomputed per read, so update never has to
/// invalidate cached labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactView {
  pub contact:        Contact,
  pub company:        Option<CompanyInfo>,
  pub country_code:   Option<String>,
  pub country:        Option<String>,
  pub state_code:     Option<String>,
  pub state:          Option<String>,
  pub linked_user:    Option<LinkedUser>,
  /// Whether the requesting subscriber holds a birthday alert for this
  /// contact. Always `false` when fetch was called without a subscriber.
  pub birthday_alert: bool,
}

// ─── Audit ───────────────────────────────────────────────────────────────────

/// Creation/modification audit trail for a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditInfo {
  pub created_at: DateTime<Utc>,
  pub created_by: Option<UserId>,
  pub updated_at: Option<DateTime<Utc>>,
  pub updated_by: Option<UserId>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::locale::EnglishCatalog;

  #[test]
  fn normalize_fk_rejects_zero_and_negative() {
    assert_eq!(normalize_fk(Some(7)), Some(7));
    assert_eq!(normalize_fk(Some(0)), None);
    assert_eq!(normalize_fk(Some(-3)), None);
    assert_eq!(normalize_fk(None), None);
  }

  #[test]
  fn full_name_collapses_blank_parts() {
    let mut draft = NewContact::specimen();
    draft.firstname = String::new();
    let contact = contact_from(&draft);
    assert_eq!(contact.full_name(), "SPECIMEN");
  }

  #[test]
  fn civility_label_falls_back_to_code() {
    let mut contact = contact_from(&NewContact::specimen());
    contact.civility = Some("MR".to_string());
    assert_eq!(contact.civility_label(&EnglishCatalog), "Mr.");

    contact.civility = Some("XYZ".to_string());
    assert_eq!(contact.civility_label(&EnglishCatalog), "XYZ");

    contact.civility = None;
    assert_eq!(contact.civility_label(&EnglishCatalog), "");
  }

  fn contact_from(draft: &NewContact) -> Contact {
    Contact {
      id: 1,
      external_ref: None,
      import_key: None,
      company_id: None,
      civility: draft.civility.clone(),
      lastname: draft.lastname.clone(),
      firstname: draft.firstname.clone(),
      position: draft.position.clone(),
      address: draft.address.clone(),
      zip: draft.zip.clone(),
      town: draft.town.clone(),
      country_id: None,
      state_id: None,
      email: draft.email.clone(),
      phone_work: draft.phone_work.clone(),
      phone_home: draft.phone_home.clone(),
      phone_mobile: draft.phone_mobile.clone(),
      fax: draft.fax.clone(),
      im_jabber: draft.im_jabber.clone(),
      im_skype: draft.im_skype.clone(),
      photo: draft.photo.clone(),
      note_private: draft.note_private.clone(),
      note_public: draft.note_public.clone(),
      visibility: draft.visibility,
      status: draft.status,
      birthday: draft.birthday,
      default_lang: draft.default_lang.clone(),
      no_email: draft.no_email,
      canvas: draft.canvas.clone(),
      entity: 1,
      created_at: Utc::now(),
      updated_at: None,
      created_by: None,
      updated_by: None,
      attributes: draft.attributes.clone(),
    }
  }
}
