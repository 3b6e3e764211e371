//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Audit timestamps are stored as RFC 3339 strings, birthdays as `%Y-%m-%d`
//! dates, extended attribute values as compact JSON, and enum flags as their
//! integer codes.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{
  contact::{
    CompanyInfo, Contact, ContactView, LinkedUser, NewContact, normalize_fk,
  },
  status::{Status, Visibility},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Normalization ───────────────────────────────────────────────────────────

fn clean(s: &str) -> String {
  s.trim().to_string()
}

/// Capitalize the first letter of each space-separated word.
fn uppercase_words(s: &str) -> String {
  s.split(' ')
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

// ─── Column bundle ───────────────────────────────────────────────────────────

/// The normalized, encoded column values written by create and update.
pub struct ContactColumns {
  pub company_id:   Option<i64>,
  pub civility:     Option<String>,
  pub lastname:     String,
  pub firstname:    String,
  pub position:     String,
  pub address:      String,
  pub zip:          String,
  pub town:         String,
  pub country_id:   Option<i64>,
  pub state_id:     Option<i64>,
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
  pub visibility:   i64,
  pub status:       i64,
  pub default_lang: Option<String>,
  pub no_email:     i64,
  /// Extended attributes as (name, JSON value) pairs.
  pub attributes:   Vec<(String, String)>,
}

impl ContactColumns {
  /// Normalize a draft into column values: trimmed strings, lastname
  /// falling back to the legacy combined name, optional word-uppercasing,
  /// non-positive foreign keys collapsed to NULL.
  pub fn from_draft(draft: &NewContact, uppercase: bool) -> Result<Self> {
    let mut lastname = clean(&draft.lastname);
    if lastname.is_empty() {
      lastname = clean(&draft.name);
    }
    let mut firstname = clean(&draft.firstname);
    if uppercase {
      lastname = uppercase_words(&lastname);
      firstname = uppercase_words(&firstname);
    }

    let mut attributes = Vec::with_capacity(draft.attributes.len());
    for (name, value) in &draft.attributes {
      attributes.push((name.clone(), serde_json::to_string(value)?));
    }

    Ok(Self {
      company_id: normalize_fk(draft.company_id),
      civility: draft.civility.as_deref().map(clean),
      lastname,
      firstname,
      position: clean(&draft.position),
      address: clean(&draft.address),
      zip: clean(&draft.zip),
      town: clean(&draft.town),
      country_id: normalize_fk(draft.country_id),
      state_id: normalize_fk(draft.state_id),
      email: clean(&draft.email),
      phone_work: clean(&draft.phone_work),
      phone_home: clean(&draft.phone_home),
      phone_mobile: clean(&draft.phone_mobile),
      fax: clean(&draft.fax),
      im_jabber: clean(&draft.im_jabber),
      im_skype: clean(&draft.im_skype),
      photo: clean(&draft.photo),
      note_private: draft.note_private.clone(),
      note_public: draft.note_public.clone(),
      visibility: draft.visibility.code(),
      status: draft.status.code(),
      default_lang: draft.default_lang.clone(),
      no_email: i64::from(draft.no_email),
      attributes,
    })
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from a `contacts` row joined with its display lookups.
pub struct RawContactRow {
  pub contact_id:       i64,
  pub company_id:       Option<i64>,
  pub civility:         Option<String>,
  pub lastname:         String,
  pub firstname:        String,
  pub position:         String,
  pub address:          String,
  pub zip:              String,
  pub town:             String,
  pub country_id:       Option<i64>,
  pub state_id:         Option<i64>,
  pub email:            String,
  pub phone_work:       String,
  pub phone_home:       String,
  pub phone_mobile:     String,
  pub fax:              String,
  pub im_jabber:        String,
  pub im_skype:         String,
  pub photo:            String,
  pub note_private:     Option<String>,
  pub note_public:      Option<String>,
  pub visibility:       i64,
  pub status:           i64,
  pub birthday:         Option<String>,
  pub default_lang:     Option<String>,
  pub no_email:         i64,
  pub canvas:           Option<String>,
  pub entity:           i64,
  pub external_ref:     Option<String>,
  pub import_key:       Option<String>,
  pub created_at:       String,
  pub updated_at:       Option<String>,
  pub created_by:       Option<i64>,
  pub updated_by:       Option<i64>,
  // countries join
  pub country_code:     Option<String>,
  pub country:          Option<String>,
  // states join
  pub state_code:       Option<String>,
  pub state:            Option<String>,
  // companies join
  pub company_name:     Option<String>,
  pub company_customer: Option<i64>,
  pub company_supplier: Option<i64>,
  // secondary lookups
  pub linked_user:      Option<(i64, String)>,
  pub birthday_alert:   bool,
  pub attributes:       Vec<(String, String)>,
}

impl RawContactRow {
  pub fn into_view(self) -> Result<ContactView> {
    let mut attributes = BTreeMap::new();
    for (name, value) in self.attributes {
      attributes.insert(name, serde_json::from_str(&value)?);
    }

    let contact = Contact {
      id: self.contact_id,
      external_ref: self.external_ref,
      import_key: self.import_key,
      company_id: self.company_id,
      civility: self.civility,
      lastname: self.lastname,
      firstname: self.firstname,
      position: self.position,
      address: self.address,
      zip: self.zip,
      town: self.town,
      country_id: self.country_id,
      state_id: self.state_id,
      email: self.email,
      phone_work: self.phone_work,
      phone_home: self.phone_home,
      phone_mobile: self.phone_mobile,
      fax: self.fax,
      im_jabber: self.im_jabber,
      im_skype: self.im_skype,
      photo: self.photo,
      note_private: self.note_private,
      note_public: self.note_public,
      visibility: Visibility::from_code(self.visibility)
        .map_err(Error::Core)?,
      status: Status::from_code(self.status).map_err(Error::Core)?,
      birthday: self.birthday.as_deref().map(decode_date).transpose()?,
      default_lang: self.default_lang,
      no_email: self.no_email != 0,
      canvas: self.canvas,
      entity: self.entity,
      created_at: decode_dt(&self.created_at)?,
      updated_at: self.updated_at.as_deref().map(decode_dt).transpose()?,
      created_by: self.created_by,
      updated_by: self.updated_by,
      attributes,
    };

    let company = self.company_name.map(|name| CompanyInfo {
      name,
      customer: self.company_customer == Some(1),
      prospect: self.company_customer == Some(2),
      supplier: self.company_supplier.unwrap_or(0) != 0,
    });

    let linked_user = self
      .linked_user
      .map(|(user_id, login)| LinkedUser { user_id, login });

    Ok(ContactView {
      contact,
      company,
      country_code: self.country_code,
      country: self.country,
      state_code: self.state_code,
      state: self.state,
      linked_user,
      birthday_alert: self.birthday_alert,
    })
  }
}

/// Raw values read from the audit columns of a `contacts` row.
pub struct RawAudit {
  pub created_at: String,
  pub created_by: Option<i64>,
  pub updated_at: Option<String>,
  pub updated_by: Option<i64>,
}

impl RawAudit {
  pub fn into_audit(self) -> Result<roster_core::contact::AuditInfo> {
    Ok(roster_core::contact::AuditInfo {
      created_at: decode_dt(&self.created_at)?,
      created_by: self.created_by,
      updated_at: self.updated_at.as_deref().map(decode_dt).transpose()?,
      updated_by: self.updated_by,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uppercase_words_capitalizes_each_word() {
    assert_eq!(uppercase_words("van der berg"), "Van Der Berg");
    assert_eq!(uppercase_words("doe"), "Doe");
    assert_eq!(uppercase_words(""), "");
  }

  #[test]
  fn date_codec_roundtrips() {
    let d = NaiveDate::from_ymd_opt(1988, 4, 2).unwrap();
    assert_eq!(decode_date(&encode_date(d)).unwrap(), d);
    assert!(decode_date("02/04/1988").is_err());
  }

  #[test]
  fn draft_normalization_trims_and_falls_back() {
    let draft = NewContact {
      name: "  Fallback Name  ".to_string(),
      lastname: "   ".to_string(),
      firstname: "  John ".to_string(),
      company_id: Some(0),
      ..Default::default()
    };
    let cols = ContactColumns::from_draft(&draft, false).unwrap();
    assert_eq!(cols.lastname, "Fallback Name");
    assert_eq!(cols.firstname, "John");
    assert_eq!(cols.company_id, None);
  }
}
