use serde::{Serialize, Deserialize};
use percent_encoding::percent_decode_str;

use polyxia_error::io::{IoError, IoResult};

/// Value of the `debug` query parameter enabling the debug rendering
pub const DEBUG_TOKEN: &str = "dummy";

/// Parameters of one event detail lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "dev", derive(utoipa::ToSchema))]
pub struct EventQuery {
  /// Opaque identifier of the event
  pub id: String,
  /// Ask the retrieval service for a richer rendering
  pub debug: bool,
}

impl EventQuery {
  pub fn new(id: &str, debug: bool) -> Self {
    Self {
      id: id.to_owned(),
      debug,
    }
  }

  /// Build a query from a raw query string.
  ///
  /// Only the first `id` and the first `debug` are considered.
  /// Pairs holding a `;` or that can't be decoded are dropped.
  /// Fails with InvalidInput when `id` is missing or empty.
  pub fn from_query_string(qs: &str) -> IoResult<Self> {
    let mut id = None;
    let mut debug = None;
    for (key, value) in decode_pairs(qs) {
      match key.as_str() {
        "id" if id.is_none() => id = Some(value),
        "debug" if debug.is_none() => debug = Some(value),
        _ => {}
      }
    }
    let id = id
      .filter(|id| !id.is_empty())
      .ok_or_else(|| IoError::invalid_input("EventQuery", "id is required"))?;
    Ok(Self {
      id,
      debug: debug.as_deref() == Some(DEBUG_TOKEN),
    })
  }
}

/// Every `%` must start a two digit hex escape
fn has_valid_escapes(raw: &str) -> bool {
  let bytes = raw.as_bytes();
  let mut idx = 0;
  while idx < bytes.len() {
    if bytes[idx] != b'%' {
      idx += 1;
      continue;
    }
    match bytes.get(idx + 1..idx + 3) {
      Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => idx += 3,
      _ => return false,
    }
  }
  true
}

/// Decode one form component, `None` for a broken escape or non utf-8 bytes
fn decode_component(raw: &str) -> Option<String> {
  if !has_valid_escapes(raw) {
    return None;
  }
  let raw = raw.replace('+', " ");
  percent_decode_str(&raw)
    .decode_utf8()
    .ok()
    .map(|decoded| decoded.into_owned())
}

/// Split a query string in decoded `(key, value)` pairs, in order
fn decode_pairs(qs: &str) -> impl Iterator<Item = (String, String)> + '_ {
  qs.split('&')
    .filter(|pair| !pair.is_empty() && !pair.contains(';'))
    .filter_map(|pair| {
      let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
      Some((decode_component(key)?, decode_component(value)?))
    })
}

/// Error reported by an event retriever
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrieveError {
  /// The event exists but is deliberately not surfaced,
  /// like a slight sea level change below the alert threshold
  Suppressed,
  /// Any other failure, the details are only meant for logs
  Other(String),
}

impl std::fmt::Display for RetrieveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RetrieveError::Suppressed => write!(f, "event is suppressed"),
      RetrieveError::Other(msg) => write!(f, "{msg}"),
    }
  }
}

impl std::error::Error for RetrieveError {}

impl From<IoError> for RetrieveError {
  fn from(err: IoError) -> Self {
    RetrieveError::Other(err.to_string())
  }
}

impl From<Box<IoError>> for RetrieveError {
  fn from(err: Box<IoError>) -> Self {
    (*err).into()
  }
}

/// Serialized json detail of an event or why there is none
pub type RetrieveResult = Result<Option<String>, RetrieveError>;

/// How a retrieval is answered to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetailOutcome {
  Success(String),
  Suppressed,
  Failure,
}

impl From<RetrieveResult> for EventDetailOutcome {
  fn from(res: RetrieveResult) -> Self {
    match res {
      Ok(Some(payload)) => EventDetailOutcome::Success(payload),
      Ok(None) => EventDetailOutcome::Failure,
      Err(RetrieveError::Suppressed) => EventDetailOutcome::Suppressed,
      Err(RetrieveError::Other(_)) => EventDetailOutcome::Failure,
    }
  }
}
