use std::io::ErrorKind;

/// An io error carrying an optional context describing what was being done
#[derive(Debug)]
pub struct IoError {
  pub context: Option<String>,
  pub inner: std::io::Error,
}

pub type IoResult<T, E = IoError> = Result<T, E>;

impl Clone for IoError {
  fn clone(&self) -> Self {
    Self {
      context: self.context.clone(),
      inner: std::io::Error::new(self.inner.kind(), self.inner.to_string()),
    }
  }
}

impl IoError {
  pub fn new<T>(context: T, inner: std::io::Error) -> Self
  where
    T: Into<String>,
  {
    Self {
      context: Some(context.into()),
      inner,
    }
  }

  pub fn without_context(inner: std::io::Error) -> Self {
    Self {
      context: None,
      inner,
    }
  }

  fn with_kind<C, M>(kind: ErrorKind, context: C, message: M) -> Self
  where
    C: ToString,
    M: ToString,
  {
    Self::new(
      context.to_string(),
      std::io::Error::new(kind, message.to_string()),
    )
  }

  pub fn invalid_data<C, M>(context: C, message: M) -> Self
  where
    C: ToString,
    M: ToString,
  {
    Self::with_kind(ErrorKind::InvalidData, context, message)
  }

  pub fn invalid_input<C, M>(context: C, message: M) -> Self
  where
    C: ToString,
    M: ToString,
  {
    Self::with_kind(ErrorKind::InvalidInput, context, message)
  }

  pub fn not_found<C, M>(context: C, message: M) -> Self
  where
    C: ToString,
    M: ToString,
  {
    Self::with_kind(ErrorKind::NotFound, context, message)
  }

  pub fn timed_out<C, M>(context: C, message: M) -> Self
  where
    C: ToString,
    M: ToString,
  {
    Self::with_kind(ErrorKind::TimedOut, context, message)
  }

  pub fn context(&self) -> Option<&str> {
    self.context.as_deref()
  }

  pub fn kind(&self) -> ErrorKind {
    self.inner.kind()
  }

  pub fn into_inner(self) -> std::io::Error {
    self.inner
  }

  /// Terminate the process using the os error code when there is one
  pub fn exit(&self) -> ! {
    std::process::exit(self.inner.raw_os_error().unwrap_or(1));
  }
}

impl std::fmt::Display for IoError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut message = self.inner.to_string();
    // Os errors end with " (os error XX)", the code is already in raw_os_error
    if self.inner.raw_os_error().is_some() {
      if let Some(pos) = message.find(" (os error ") {
        message.truncate(pos);
      }
    }
    if let Some(first) = message.get_mut(..1) {
      first.make_ascii_uppercase();
    }
    match &self.context {
      Some(ctx) => write!(f, "{ctx}: {message}"),
      None => write!(f, "{message}"),
    }
  }
}

impl std::error::Error for IoError {}

/// Attach a context to an error while converting it into `T`
pub trait FromIo<T> {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> T
  where
    C: ToString + std::fmt::Display;
}

impl FromIo<IoError> for IoError {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> IoError
  where
    C: ToString + std::fmt::Display,
  {
    IoError {
      context: Some(context().to_string()),
      inner: self.into_inner(),
    }
  }
}

impl FromIo<Box<IoError>> for std::io::Error {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> Box<IoError>
  where
    C: ToString + std::fmt::Display,
  {
    Box::new(IoError::new(context().to_string(), self))
  }
}

impl From<Box<IoError>> for IoError {
  fn from(f: Box<IoError>) -> Self {
    *f
  }
}

impl From<std::io::Error> for IoError {
  fn from(f: std::io::Error) -> Self {
    Self::without_context(f)
  }
}

impl From<IoError> for std::io::Error {
  fn from(f: IoError) -> Self {
    f.inner
  }
}

/// Wrap any displayable error as InvalidData with a context
fn invalid_data_boxed<E, C>(err: E, context: C) -> Box<IoError>
where
  E: std::fmt::Display,
  C: ToString,
{
  Box::new(IoError::invalid_data(context, err.to_string()))
}

#[cfg(feature = "serde_json")]
impl FromIo<Box<IoError>> for serde_json::Error {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> Box<IoError>
  where
    C: ToString + std::fmt::Display,
  {
    invalid_data_boxed(self, context())
  }
}

#[cfg(feature = "serde_yaml")]
impl FromIo<Box<IoError>> for serde_yaml::Error {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> Box<IoError>
  where
    C: ToString + std::fmt::Display,
  {
    invalid_data_boxed(self, context())
  }
}

#[cfg(feature = "serde_urlencoded")]
impl FromIo<Box<IoError>> for serde_urlencoded::ser::Error {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> Box<IoError>
  where
    C: ToString + std::fmt::Display,
  {
    invalid_data_boxed(self, context())
  }
}

#[cfg(feature = "ntex")]
impl FromIo<Box<IoError>> for ntex::http::client::error::SendRequestError {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> Box<IoError>
  where
    C: ToString + std::fmt::Display,
  {
    use ntex::http::client::error::{ConnectError, SendRequestError};

    let kind = match &self {
      SendRequestError::Timeout => ErrorKind::TimedOut,
      SendRequestError::Connect(ConnectError::Disconnected(_)) => {
        ErrorKind::ConnectionAborted
      }
      SendRequestError::Connect(_) => ErrorKind::ConnectionRefused,
      _ => ErrorKind::Interrupted,
    };
    Box::new(IoError::new(
      context().to_string(),
      std::io::Error::new(kind, self.to_string()),
    ))
  }
}

#[cfg(feature = "ntex")]
impl FromIo<Box<IoError>> for ntex::http::error::PayloadError {
  fn map_err_context<C>(self, context: impl FnOnce() -> C) -> Box<IoError>
  where
    C: ToString + std::fmt::Display,
  {
    invalid_data_boxed(self, context())
  }
}
