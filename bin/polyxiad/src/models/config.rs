use serde::{Serialize, Deserialize};

/// Merged configuration of the daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
  /// Hosts to listen on, `tcp://` or `unix://`
  pub hosts: Vec<String>,
  /// Address of the upstream event detail service
  pub upstream: String,
  /// Deadline in milliseconds for one retrieval
  pub timeout: u32,
}

/// Configuration file of the daemon, every key is optional
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfigFile {
  pub hosts: Option<Vec<String>>,
  pub upstream: Option<String>,
  pub timeout: Option<u32>,
}

impl Default for DaemonConfig {
  fn default() -> Self {
    Self {
      hosts: vec!["tcp://0.0.0.0:8080".to_owned()],
      upstream: "http://localhost:8585".to_owned(),
      timeout: 10_000,
    }
  }
}
