use ntex::web;
use ntex::http;

/// An http response error rendered as `{ "msg": "..." }`
#[derive(Clone, Debug)]
pub struct HttpError {
  pub msg: String,
  pub status: http::StatusCode,
}

pub type HttpResult<T, E = HttpError> = Result<T, E>;

impl HttpError {
  pub fn new<T>(status: http::StatusCode, msg: T) -> Self
  where
    T: ToString,
  {
    Self {
      status,
      msg: msg.to_string(),
    }
  }

  /// BadRequest - 400
  pub fn bad_request<T>(msg: T) -> Self
  where
    T: ToString,
  {
    Self::new(http::StatusCode::BAD_REQUEST, msg)
  }

  /// NotFound - 404
  pub fn not_found<T>(msg: T) -> Self
  where
    T: ToString,
  {
    Self::new(http::StatusCode::NOT_FOUND, msg)
  }

  /// InternalServerError - 500
  pub fn internal_server_error<T>(msg: T) -> Self
  where
    T: ToString,
  {
    Self::new(http::StatusCode::INTERNAL_SERVER_ERROR, msg)
  }

  pub fn bad_gateway<T>(msg: T) -> Self
  where
    T: ToString,
  {
    Self::new(http::StatusCode::BAD_GATEWAY, msg)
  }

  pub fn gateway_timeout<T>(msg: T) -> Self
  where
    T: ToString,
  {
    Self::new(http::StatusCode::GATEWAY_TIMEOUT, msg)
  }
}

impl std::fmt::Display for HttpError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {}", self.status, self.msg)
  }
}

impl std::error::Error for HttpError {}

impl web::WebResponseError for HttpError {
  fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
    log::debug!("http_error: {self}");
    let err_json = serde_json::json!({ "msg": self.msg });
    web::HttpResponse::build(self.status).json(&err_json)
  }
}

#[cfg(feature = "io")]
impl From<crate::io::IoError> for HttpError {
  fn from(err: crate::io::IoError) -> Self {
    use std::io::ErrorKind;

    match err.kind() {
      ErrorKind::NotFound => HttpError::not_found(err.to_string()),
      ErrorKind::InvalidData | ErrorKind::InvalidInput => {
        HttpError::bad_request(err.to_string())
      }
      ErrorKind::ConnectionAborted | ErrorKind::ConnectionRefused => {
        HttpError::bad_gateway(err.to_string())
      }
      ErrorKind::TimedOut => HttpError::gateway_timeout(err.to_string()),
      _ => HttpError::internal_server_error(err.to_string()),
    }
  }
}

#[cfg(feature = "io")]
impl From<Box<crate::io::IoError>> for HttpError {
  fn from(err: Box<crate::io::IoError>) -> Self {
    (*err).into()
  }
}
