#[cfg(test)]
pub mod tests {
  use std::rc::Rc;
  use std::sync::{Arc, Mutex};
  use std::sync::atomic::{AtomicUsize, Ordering};

  use futures::FutureExt;
  use futures::future::LocalBoxFuture;
  use ntex::time::Millis;

  use polyxia_utils::logger;

  pub use polyxia_utils::ntex::test_client::*;

  use crate::services;
  use crate::retriever::EventRetriever;
  use crate::models::{
    DaemonConfig, EventQuery, RetrieveError, RetrieveResult, SystemState,
    SystemStateRef,
  };

  /// Payload with spacing a serializer would not keep
  pub const SPACED_PAYLOAD: &str = "{ \"id\" : \"spaced\",\n  \"mag\": 3.20 }";

  /// Retriever answering from a fixed script and recording its calls,
  /// clones share the same records
  #[derive(Clone, Default)]
  pub struct ScriptedRetriever {
    pub calls: Arc<AtomicUsize>,
    pub debug: Arc<Mutex<Option<bool>>>,
  }

  impl ScriptedRetriever {
    pub fn last_debug(&self) -> Option<bool> {
      self.debug.lock().map(|debug| *debug).unwrap_or(None)
    }

    async fn answer(&self, query: &EventQuery) -> RetrieveResult {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if let Ok(mut debug) = self.debug.lock() {
        *debug = Some(query.debug);
      }
      match query.id.as_str() {
        "E1" => Ok(Some(r#"{"id":"E1","mag":3.2}"#.to_owned())),
        "E2" => Err(RetrieveError::Suppressed),
        "E3" => Err(RetrieveError::Other("upstream unavailable".to_owned())),
        "E4" => Ok(Some(format!(r#"{{"id":"E4","debug":{}}}"#, query.debug))),
        "E5" => Ok(None),
        "spaced" => Ok(Some(SPACED_PAYLOAD.to_owned())),
        "slow" => {
          ntex::time::sleep(Millis(2_000)).await;
          Ok(Some("{}".to_owned()))
        }
        _ => Err(RetrieveError::Other(format!("{} not found", query.id))),
      }
    }
  }

  impl EventRetriever for ScriptedRetriever {
    fn retrieve_event_details<'a>(
      &'a self,
      query: &'a EventQuery,
      _deadline: Millis,
    ) -> LocalBoxFuture<'a, RetrieveResult> {
      self.answer(query).boxed_local()
    }
  }

  // Before a test
  pub fn before() {
    std::env::set_var("TEST", "true");
    logger::enable_logger("polyxiad");
  }

  pub fn gen_state(retriever: &ScriptedRetriever) -> SystemStateRef {
    let config = DaemonConfig {
      timeout: 200,
      ..Default::default()
    };
    let retriever: Rc<dyn EventRetriever> = Rc::new(retriever.clone());
    Rc::new(SystemState { config, retriever })
  }

  /// Test server where events are answered by the given retriever
  pub fn gen_test_client(retriever: &ScriptedRetriever) -> TestClient {
    before();
    let retriever = retriever.clone();
    let srv = ntex::web::test::server(move || {
      ntex::web::App::new()
        .state(gen_state(&retriever))
        .configure(services::ntex_config)
        .default_service(ntex::web::route().to(services::unhandled))
    });
    TestClient::new(srv, services::SCOPE)
  }

  pub fn gen_default_test_client() -> TestClient {
    gen_test_client(&ScriptedRetriever::default())
  }
}
