//! Label translation seam.
//!
//! Display strings (status, visibility, civility) go through a [`Translator`]
//! so installations can plug in their own catalogs. [`EnglishCatalog`] is the
//! built-in fallback.

/// A label catalog. Returns `None` for keys it does not carry, in which case
/// callers fall back to a built-in English wording or to the raw code.
pub trait Translator: Send + Sync {
  fn text(&self, key: &str) -> Option<String>;
}

/// Look up `key`, falling back to `fallback` when the catalog has no entry.
pub fn resolve(tr: &dyn Translator, key: &str, fallback: &str) -> String {
  tr.text(key).unwrap_or_else(|| fallback.to_string())
}

/// The built-in English catalog.
pub struct EnglishCatalog;

impl Translator for EnglishCatalog {
  fn text(&self, key: &str) -> Option<String> {
    let text = match key {
      "status.enabled" => "Enabled",
      "status.disabled" => "Disabled",
      "visibility.shared" => "Shared",
      "visibility.private" => "Private",
      "civility.MR" => "Mr.",
      "civility.MME" => "Mrs.",
      "civility.MLLE" => "Miss",
      "civility.DR" => "Doctor",
      _ => return None,
    };
    Some(text.to_string())
  }
}
