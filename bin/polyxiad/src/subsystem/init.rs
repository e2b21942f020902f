use std::rc::Rc;

use polyxia_error::io::{FromIo, IoResult};

use crate::{
  retriever::{UpstreamEndpoint, UpstreamRetriever},
  models::{DaemonConfig, SystemState, SystemStateRef},
};

/// Validate the upstream before any worker starts
pub fn init(config: &DaemonConfig) -> IoResult<UpstreamEndpoint> {
  let endpoint = UpstreamEndpoint::parse(&config.upstream)
    .map_err(|err| err.map_err_context(|| "Upstream"))?;
  log::info!(
    "subsystem::init: retrieving events from {endpoint} with a {}ms deadline",
    config.timeout
  );
  Ok(endpoint)
}

/// Build the state of a worker, with its own upstream connection pool
pub fn gen_state(
  config: &DaemonConfig,
  endpoint: &UpstreamEndpoint,
) -> SystemStateRef {
  Rc::new(SystemState {
    config: config.clone(),
    retriever: Rc::new(UpstreamRetriever::new(endpoint)),
  })
}
