use futures::FutureExt;
use futures::future::LocalBoxFuture;
use ntex::rt;
use ntex::http;
use ntex::time::Millis;

use polyxia_error::io::{FromIo, IoError, IoResult};

use crate::models::{EventQuery, RetrieveError, RetrieveResult};

use super::EventRetriever;

/// Upper bound of a detail payload we accept from the upstream
const MAX_PAYLOAD_SIZE: usize = 20_000_000;

/// Address of the upstream event detail service.
///
/// The upstream answers `GET /events/details?id=..&debug=..` with
/// `200` and the json detail, or `204` for a suppressed event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamEndpoint {
  pub url: String,
  pub unix_socket: Option<String>,
}

impl std::fmt::Display for UpstreamEndpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.unix_socket {
      Some(path) => write!(f, "unix://{path}"),
      None => write!(f, "{}", self.url),
    }
  }
}

impl UpstreamEndpoint {
  /// Parse `http://` and `unix://` addresses,
  /// tls isn't built in so `https://` is refused
  pub fn parse(url: &str) -> IoResult<Self> {
    match url {
      url if url.starts_with("http://") => Ok(Self {
        url: url.trim_end_matches('/').to_owned(),
        unix_socket: None,
      }),
      url if url.starts_with("unix://") => Ok(Self {
        url: "http://localhost".to_owned(),
        unix_socket: Some(url.trim_start_matches("unix://").to_owned()),
      }),
      _ => Err(IoError::invalid_input(
        "Upstream",
        format!("invalid url {url} (must be http:// or unix://)"),
      )),
    }
  }
}

/// Retrieve event details from an upstream http service.
///
/// The client and its connection pool are built once,
/// it's bound to the worker that created it.
pub struct UpstreamRetriever {
  endpoint: UpstreamEndpoint,
  client: http::client::Client,
}

impl std::fmt::Display for UpstreamRetriever {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.endpoint)
  }
}

impl UpstreamRetriever {
  pub fn new(endpoint: &UpstreamEndpoint) -> Self {
    let mut client = http::client::Client::build();
    if let Some(unix_socket) = &endpoint.unix_socket {
      let unix_socket = unix_socket.clone();
      client = client.connector(
        http::client::Connector::default()
          .connector(ntex::service::fn_service(move |_| {
            let unix_socket = unix_socket.clone();
            async { Ok::<_, _>(rt::unix_connect(unix_socket).await?) }
          }))
          .finish(),
      );
    }
    Self {
      endpoint: endpoint.clone(),
      client: client.finish(),
    }
  }

  async fn fetch(&self, query: &EventQuery, deadline: Millis) -> RetrieveResult {
    let url = format!("{}/events/details", self.endpoint.url);
    let mut res = self
      .client
      .get(url.as_str())
      .header("User-Agent", "polyxiad")
      .timeout(deadline)
      .query(query)
      .map_err(|err| err.map_err_context(|| "Upstream query"))?
      .send()
      .await
      .map_err(|err| err.map_err_context(|| self.to_string()))?;
    match res.status() {
      http::StatusCode::NO_CONTENT => Err(RetrieveError::Suppressed),
      http::StatusCode::OK => {
        let body = res
          .body()
          .limit(MAX_PAYLOAD_SIZE)
          .await
          .map_err(|err| err.map_err_context(|| "Upstream payload"))?;
        if body.is_empty() {
          return Ok(None);
        }
        serde_json::from_slice::<serde::de::IgnoredAny>(&body).map_err(
          |err| {
            RetrieveError::Other(format!("malformed upstream data: {err}"))
          },
        )?;
        let payload = String::from_utf8(body.to_vec()).map_err(|err| {
          RetrieveError::Other(format!("malformed upstream data: {err}"))
        })?;
        Ok(Some(payload))
      }
      status => Err(RetrieveError::Other(format!(
        "{self}: upstream replied {status} for {}",
        query.id
      ))),
    }
  }
}

impl EventRetriever for UpstreamRetriever {
  fn retrieve_event_details<'a>(
    &'a self,
    query: &'a EventQuery,
    deadline: Millis,
  ) -> LocalBoxFuture<'a, RetrieveResult> {
    self.fetch(query, deadline).boxed_local()
  }
}

#[cfg(test)]
mod tests {
  use ntex::web;

  use super::*;

  #[web::get("/events/details")]
  async fn fake_details(
    req: web::HttpRequest,
    qs: web::types::Query<EventQuery>,
  ) -> web::HttpResponse {
    match qs.id.as_str() {
      "peer" => web::HttpResponse::Ok().body(format!(
        r#"{{"peer":"{}"}}"#,
        req.peer_addr().map(|addr| addr.to_string()).unwrap_or_default()
      )),
      "E1" => web::HttpResponse::Ok()
        .content_type("application/json")
        .body(format!(r#"{{"id":"E1","debug":{}}}"#, qs.debug)),
      "E2" => web::HttpResponse::NoContent().finish(),
      "E5" => web::HttpResponse::Ok().finish(),
      "E6" => web::HttpResponse::Ok().body("not json"),
      "slow" => {
        ntex::time::sleep(Millis(2_000)).await;
        web::HttpResponse::Ok().body("{}")
      }
      _ => web::HttpResponse::NotFound().finish(),
    }
  }

  fn gen_upstream() -> (web::test::TestServer, UpstreamRetriever) {
    let srv =
      web::test::server(|| web::App::new().service(fake_details));
    let endpoint = UpstreamEndpoint::parse(&srv.url("")).unwrap();
    let retriever = UpstreamRetriever::new(&endpoint);
    (srv, retriever)
  }

  #[test]
  fn parse_endpoint() {
    let endpoint = UpstreamEndpoint::parse("http://localhost:8585/").unwrap();
    assert_eq!(endpoint.url, "http://localhost:8585");
    assert_eq!(endpoint.unix_socket, None);
    let endpoint =
      UpstreamEndpoint::parse("unix:///run/polyxia/upstream.sock").unwrap();
    assert_eq!(
      endpoint.unix_socket.as_deref(),
      Some("/run/polyxia/upstream.sock")
    );
    assert_eq!(endpoint.to_string(), "unix:///run/polyxia/upstream.sock");
    assert!(UpstreamEndpoint::parse("ftp://localhost").is_err());
  }

  #[test]
  fn parse_endpoint_without_tls() {
    let err = UpstreamEndpoint::parse("https://localhost:8585").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(err.context(), Some("Upstream"));
  }

  #[ntex::test]
  async fn connection_is_reused() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("peer", false);
    let first = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await
      .unwrap();
    let second = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await
      .unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
  }

  #[ntex::test]
  async fn payload_passthrough() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("E1", false);
    let res = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await;
    assert_eq!(res, Ok(Some(r#"{"id":"E1","debug":false}"#.to_owned())));
    let query = EventQuery::new("E1", true);
    let res = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await;
    assert_eq!(res, Ok(Some(r#"{"id":"E1","debug":true}"#.to_owned())));
  }

  #[ntex::test]
  async fn suppressed() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("E2", false);
    let res = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await;
    assert_eq!(res, Err(RetrieveError::Suppressed));
  }

  #[ntex::test]
  async fn empty_payload() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("E5", false);
    let res = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await;
    assert_eq!(res, Ok(None));
  }

  #[ntex::test]
  async fn malformed_payload() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("E6", false);
    let res = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await;
    assert!(matches!(res, Err(RetrieveError::Other(_))));
  }

  #[ntex::test]
  async fn not_found() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("E3", false);
    let res = retriever
      .retrieve_event_details(&query, Millis(5_000))
      .await;
    assert!(matches!(res, Err(RetrieveError::Other(_))));
  }

  #[ntex::test]
  async fn deadline_elapsed() {
    let (_srv, retriever) = gen_upstream();
    let query = EventQuery::new("slow", false);
    let res = retriever.retrieve_event_details(&query, Millis(100)).await;
    assert!(matches!(res, Err(RetrieveError::Other(_))));
  }

  #[ntex::test]
  async fn unreachable() {
    let endpoint = UpstreamEndpoint::parse("http://127.0.0.1:1").unwrap();
    let retriever = UpstreamRetriever::new(&endpoint);
    let query = EventQuery::new("E1", false);
    let res = retriever
      .retrieve_event_details(&query, Millis(1_000))
      .await;
    assert!(matches!(res, Err(RetrieveError::Other(_))));
  }
}
