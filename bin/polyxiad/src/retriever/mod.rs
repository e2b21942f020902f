use futures::future::LocalBoxFuture;
use ntex::time::Millis;

use crate::models::{EventQuery, RetrieveResult};

mod upstream;
pub use upstream::{UpstreamEndpoint, UpstreamRetriever};

/// Locate an event and produce its serialized json detail.
///
/// `deadline` bounds the whole retrieval, implementations should give up
/// once it elapsed. A suppressed event is reported as
/// [RetrieveError::Suppressed](crate::models::RetrieveError::Suppressed)
/// and never carries a payload.
/// A retriever lives on a single worker.
pub trait EventRetriever {
  fn retrieve_event_details<'a>(
    &'a self,
    query: &'a EventQuery,
    deadline: Millis,
  ) -> LocalBoxFuture<'a, RetrieveResult>;
}
