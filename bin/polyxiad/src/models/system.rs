use std::rc::Rc;

use crate::retriever::EventRetriever;

use super::DaemonConfig;

/// State of one server worker
pub struct SystemState {
  pub config: DaemonConfig,
  pub retriever: Rc<dyn EventRetriever>,
}

pub type SystemStateRef = Rc<SystemState>;
