//! Contact status and visibility flags, with their display labels.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  locale::{Translator, resolve},
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether a contact is active. Two semantic states, each reachable from the
/// other; the storage layer also accepts the legacy alias codes 4 (enabled)
/// and 5 (disabled) on read, but never writes them back.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Disabled,
  #[default]
  Enabled,
}

impl Status {
  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 | 5 => Ok(Self::Disabled),
      1 | 4 => Ok(Self::Enabled),
      other => Err(Error::UnknownStatusCode(other)),
    }
  }

  /// The canonical storage code. Legacy aliases are read-only.
  pub fn code(self) -> i64 {
    match self {
      Self::Disabled => 0,
      Self::Enabled => 1,
    }
  }

  fn badge(self) -> &'static str {
    match self {
      Self::Disabled => "○",
      Self::Enabled => "●",
    }
  }

  fn key(self) -> &'static str {
    match self {
      Self::Disabled => "status.disabled",
      Self::Enabled => "status.enabled",
    }
  }

  fn fallback(self) -> &'static str {
    match self {
      Self::Disabled => "Disabled",
      Self::Enabled => "Enabled",
    }
  }

  /// Render the status for display at the requested verbosity.
  pub fn label(self, mode: LabelMode, tr: &dyn Translator) -> String {
    let text = resolve(tr, self.key(), self.fallback());
    match mode {
      LabelMode::Long | LabelMode::Short => text,
      LabelMode::BadgeShort | LabelMode::BadgeLong => {
        format!("{} {}", self.badge(), text)
      }
      LabelMode::Badge => self.badge().to_string(),
      LabelMode::ShortBadge => format!("{} {}", text, self.badge()),
    }
  }
}

/// Verbosity of a status label. The long and short wordings are currently
/// identical; the modes differ in badge placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
  Long,
  Short,
  BadgeShort,
  Badge,
  BadgeLong,
  ShortBadge,
}

// ─── Visibility ──────────────────────────────────────────────────────────────

/// Whether a contact is shared with everyone who can see its company, or
/// private to the owning user.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
  #[default]
  Shared,
  Private,
}

impl Visibility {
  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 => Ok(Self::Shared),
      1 => Ok(Self::Private),
      other => Err(Error::UnknownVisibilityCode(other)),
    }
  }

  pub fn code(self) -> i64 {
    match self {
      Self::Shared => 0,
      Self::Private => 1,
    }
  }

  pub fn label(self, tr: &dyn Translator) -> String {
    match self {
      Self::Shared => resolve(tr, "visibility.shared", "Shared"),
      Self::Private => resolve(tr, "visibility.private", "Private"),
    }
  }
}
