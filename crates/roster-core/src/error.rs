//! Error types for `roster-core`.

use thiserror::Error;

use crate::contact::ContactId;

#[derive(Debug, Error)]
pub enum Error {
  /// Creation requires a non-empty lastname (or the legacy combined name).
  #[error("contact has no lastname and no fallback name")]
  MissingName,

  /// Fetch requires either a numeric id or an external reference.
  #[error("neither id nor external reference was supplied")]
  MissingLookupKey,

  #[error("contact not found: {0}")]
  ContactNotFound(ContactId),

  #[error("unknown status code: {0}")]
  UnknownStatusCode(i64),

  #[error("unknown visibility code: {0}")]
  UnknownVisibilityCode(i64),

  #[error("unknown linked element kind: {0:?}")]
  UnknownElementKind(String),

  #[error("unknown link source: {0:?}")]
  UnknownLinkSource(String),

  /// A listener vetoed a mutation; the enclosing transaction is rolled back.
  #[error("listener aborted {event}: {reason}")]
  ListenerAbort {
    event:  &'static str,
    reason: String,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
