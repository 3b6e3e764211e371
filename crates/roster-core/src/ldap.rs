//! Directory-export mapping for contacts.
//!
//! Builds the attribute map and distinguished name for pushing a contact
//! into an LDAP directory. Attribute names come from installation
//! configuration; unmapped or empty fields are skipped. A compatibility
//! attribute set is added for the egroupware directory flavor.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::contact::ContactView;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Which directory product the export targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryFlavor {
  #[default]
  Generic,
  Egroupware,
}

/// Directory attribute names for each exported contact field. A `None`
/// mapping means the field is not exported.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LdapAttributeMap {
  pub fullname:     Option<String>,
  pub lastname:     Option<String>,
  pub firstname:    Option<String>,
  pub company:      Option<String>,
  pub address:      Option<String>,
  pub zip:          Option<String>,
  pub town:         Option<String>,
  pub country:      Option<String>,
  pub phone_work:   Option<String>,
  pub phone_home:   Option<String>,
  pub phone_mobile: Option<String>,
  pub fax:          Option<String>,
  pub skype:        Option<String>,
  pub description:  Option<String>,
  pub email:        Option<String>,
}

/// Installation-level directory-export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LdapConfig {
  /// Parent DN for contact entries, e.g. `ou=contacts,dc=example,dc=com`.
  pub contact_dn:     String,
  /// The attribute whose value forms the entry's RDN.
  pub key_attribute:  String,
  pub object_classes: Vec<String>,
  #[serde(default)]
  pub flavor:         DirectoryFlavor,
  #[serde(default)]
  pub attributes:     LdapAttributeMap,
}

/// An LDAP entry: attribute name to values.
pub type LdapEntry = BTreeMap<String, Vec<String>>;

/// How much of the DN to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnMode {
  /// `key=value,parent-dn`
  Full,
  /// The parent DN alone.
  Parent,
  /// `key=value` alone.
  KeyOnly,
}

// ─── Entry building ──────────────────────────────────────────────────────────

fn put(entry: &mut LdapEntry, attr: &str, value: &str) {
  entry.insert(attr.to_string(), vec![value.to_string()]);
}

fn put_mapped(entry: &mut LdapEntry, attr: Option<&String>, value: &str) {
  if let Some(attr) = attr
    && !value.is_empty()
  {
    put(entry, attr, value);
  }
}

/// Build the directory attribute map for a contact.
pub fn ldap_entry(view: &ContactView, cfg: &LdapConfig) -> LdapEntry {
  let contact = &view.contact;
  let map = &cfg.attributes;
  let mut entry = LdapEntry::new();

  entry.insert("objectclass".to_string(), cfg.object_classes.clone());

  put_mapped(&mut entry, map.fullname.as_ref(), &contact.full_name());
  put_mapped(&mut entry, map.lastname.as_ref(), &contact.lastname);
  put_mapped(&mut entry, map.firstname.as_ref(), &contact.firstname);

  if !contact.position.is_empty() {
    put(&mut entry, "title", &contact.position);
  }

  if let Some(company) = &view.company {
    put_mapped(&mut entry, map.company.as_ref(), &company.name);
    // Sequential overwrite: a company that is several things at once exports
    // the last matching category.
    if company.customer {
      put(&mut entry, "businessCategory", "Customers");
    }
    if company.prospect {
      put(&mut entry, "businessCategory", "Prospects");
    }
    if company.supplier {
      put(&mut entry, "businessCategory", "Suppliers");
    }
  }

  put_mapped(&mut entry, map.address.as_ref(), &contact.address);
  put_mapped(&mut entry, map.zip.as_ref(), &contact.zip);
  put_mapped(&mut entry, map.town.as_ref(), &contact.town);
  put_mapped(
    &mut entry,
    map.country.as_ref(),
    view.country_code.as_deref().unwrap_or(""),
  );
  put_mapped(&mut entry, map.phone_work.as_ref(), &contact.phone_work);
  put_mapped(&mut entry, map.phone_home.as_ref(), &contact.phone_home);
  put_mapped(&mut entry, map.phone_mobile.as_ref(), &contact.phone_mobile);
  put_mapped(&mut entry, map.fax.as_ref(), &contact.fax);
  put_mapped(&mut entry, map.skype.as_ref(), &contact.im_skype);
  put_mapped(
    &mut entry,
    map.description.as_ref(),
    contact.note_private.as_deref().unwrap_or(""),
  );
  put_mapped(&mut entry, map.email.as_ref(), &contact.email);

  if cfg.flavor == DirectoryFlavor::Egroupware {
    egroupware_extras(&mut entry, view);
  }

  entry
}

/// egroupware wants its own attribute set alongside the standard ones.
fn egroupware_extras(entry: &mut LdapEntry, view: &ContactView) {
  let contact = &view.contact;

  entry
    .entry("objectclass".to_string())
    .or_default()
    .push("phpgwContact".to_string());

  put(entry, "uidnumber", &contact.id.to_string());
  put(entry, "phpgwTz", "0");
  put(entry, "phpgwMailType", "INTERNET");
  put(entry, "phpgwMailHomeType", "INTERNET");
  put(entry, "phpgwContactTypeId", "n");
  put(entry, "phpgwContactCatId", "0");
  put(entry, "phpgwContactAccess", "public");
  put(entry, "phpgwContactOwner", "1");

  if !contact.email.is_empty() {
    put(entry, "rfc822Mailbox", &contact.email);
  }
  if !contact.phone_mobile.is_empty() {
    put(entry, "phpgwCellTelephoneNumber", &contact.phone_mobile);
  }
}

// ─── DN building ─────────────────────────────────────────────────────────────

/// Render the distinguished name for an entry built by [`ldap_entry`].
pub fn ldap_dn(entry: &LdapEntry, cfg: &LdapConfig, mode: DnMode) -> String {
  let key_value = entry
    .get(&cfg.key_attribute)
    .and_then(|values| values.first())
    .map(String::as_str)
    .unwrap_or("");

  match mode {
    DnMode::Full => {
      format!("{}={},{}", cfg.key_attribute, key_value, cfg.contact_dn)
    }
    DnMode::Parent => cfg.contact_dn.clone(),
    DnMode::KeyOnly => format!("{}={}", cfg.key_attribute, key_value),
  }
}
