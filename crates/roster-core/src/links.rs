//! Linked elements and mass-mailing delivery codes.
//!
//! Contacts are attached to other elements (invoices, contracts, orders,
//! proposals) through a polymorphic link table keyed by a type definition;
//! each type carries the element kind and whether the link is held by an
//! internal user or an external contact.

use serde::Serialize;

use crate::{Error, Result};

// ─── Element kinds ───────────────────────────────────────────────────────────

/// The kinds of elements a contact can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
  Invoice,
  Contract,
  Order,
  Proposal,
}

impl ElementKind {
  pub const ALL: [Self; 4] =
    [Self::Invoice, Self::Contract, Self::Order, Self::Proposal];

  pub fn code(self) -> &'static str {
    match self {
      Self::Invoice => "invoice",
      Self::Contract => "contract",
      Self::Order => "order",
      Self::Proposal => "proposal",
    }
  }

  pub fn from_code(code: &str) -> Result<Self> {
    match code {
      "invoice" => Ok(Self::Invoice),
      "contract" => Ok(Self::Contract),
      "order" => Ok(Self::Order),
      "proposal" => Ok(Self::Proposal),
      other => Err(Error::UnknownElementKind(other.to_string())),
    }
  }
}

/// Which side holds a link of a given type: an internal user or an external
/// contact. Deleting a contact only cascades over external-sourced links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
  Internal,
  External,
}

impl LinkSource {
  pub fn code(self) -> &'static str {
    match self {
      Self::Internal => "internal",
      Self::External => "external",
    }
  }

  pub fn from_code(code: &str) -> Result<Self> {
    match code {
      "internal" => Ok(Self::Internal),
      "external" => Ok(Self::External),
      other => Err(Error::UnknownLinkSource(other.to_string())),
    }
  }
}

/// Per-kind counts of the elements a contact is linked to. Computed on
/// demand, never persisted on the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefCounts {
  pub invoices:  u64,
  pub contracts: u64,
  pub orders:    u64,
  pub proposals: u64,
}

// ─── Mailing delivery ────────────────────────────────────────────────────────

/// Delivery state of a mass-mailing target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailingStatus {
  Errored,
  Pending,
  Sent,
}

impl MailingStatus {
  pub fn code(self) -> i64 {
    match self {
      Self::Errored => -1,
      Self::Pending => 0,
      Self::Sent => 1,
    }
  }
}
