use ntex::web::test::TestServer;
use ntex::http::client::{ClientRequest, ClientResponse};

/// Assert a status code with the context of the request in the message
#[macro_export]
macro_rules! test_status_code {
  ($current:expr,$expected:expr,$context:expr) => {{
    assert_eq!(
      $current, $expected,
      "Expect {} to return status {} got: {}",
      $context, $expected, $current,
    );
  }};
}

pub use test_status_code;

/// Client for a `ntex::web::test` server where every url is relative to a scope
pub struct TestClient {
  srv: TestServer,
  scope: String,
}

impl TestClient {
  pub fn new(srv: TestServer, scope: &str) -> Self {
    Self {
      srv,
      scope: scope.trim_end_matches('/').to_owned(),
    }
  }

  fn gen_url(&self, url: &str) -> String {
    format!("{}{url}", self.scope)
  }

  pub fn get(&self, url: &str) -> ClientRequest {
    self
      .srv
      .get(self.gen_url(url))
      .header("User-Agent", "polyxia_test_client")
  }

  pub fn head(&self, url: &str) -> ClientRequest {
    self
      .srv
      .head(self.gen_url(url))
      .header("User-Agent", "polyxia_test_client")
  }

  pub async fn send_get<Q>(&self, url: &str, query: Option<Q>) -> ClientResponse
  where
    Q: serde::Serialize,
  {
    let mut req = self.get(url);
    if let Some(query) = query {
      req = req.query(&query).unwrap_or_else(|err| {
        panic!("Failed to serialize query GET {url}: {err}")
      })
    }
    req
      .send()
      .await
      .unwrap_or_else(|err| panic!("Failed to send GET {url}: {err}"))
  }

  /// Send a GET with an already encoded query string
  pub async fn send_get_raw(&self, url: &str, query: &str) -> ClientResponse {
    self
      .get(&format!("{url}?{query}"))
      .send()
      .await
      .unwrap_or_else(|err| panic!("Failed to send GET {url}?{query}: {err}"))
  }

  pub async fn send_head<Q>(
    &self,
    url: &str,
    query: Option<Q>,
  ) -> ClientResponse
  where
    Q: serde::Serialize,
  {
    let mut req = self.head(url);
    if let Some(query) = query {
      req = req.query(&query).unwrap_or_else(|err| {
        panic!("Failed to serialize query HEAD {url}: {err}")
      })
    }
    req
      .send()
      .await
      .unwrap_or_else(|err| panic!("Failed to send HEAD {url}: {err}"))
  }

  /// Read the whole body of a response
  pub async fn res_body(mut res: ClientResponse) -> Vec<u8> {
    res
      .body()
      .limit(20_000_000)
      .await
      .unwrap_or_else(|err| panic!("Failed to read body: {err}"))
      .to_vec()
  }

  pub async fn res_json<R>(mut res: ClientResponse) -> R
  where
    R: serde::de::DeserializeOwned + Send + 'static,
  {
    res
      .json::<R>()
      .limit(20_000_000)
      .await
      .unwrap_or_else(|err| panic!("Failed to read json body: {err}"))
  }
}
