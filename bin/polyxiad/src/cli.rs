use clap::Parser;

/// Polyxia Daemon - Read-only detail of disaster and alert events
#[derive(Debug, Clone, Parser)]
#[command(name = "polyxiad")]
#[command(version)]
pub struct Cli {
  /// Hosts to listen to use tcp:// and unix:// [default: tcp://0.0.0.0:8080]
  #[clap(short = 'H', long = "hosts")]
  pub(crate) hosts: Option<Vec<String>>,
  /// Upstream event detail service http:// or unix:// [default: http://localhost:8585]
  #[clap(long)]
  pub(crate) upstream: Option<String>,
  /// Deadline of one retrieval in milliseconds [default: 10000]
  #[clap(long)]
  pub(crate) timeout: Option<u32>,
  /// Config directory
  #[clap(long, default_value = "/etc/polyxia")]
  pub(crate) conf_dir: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cli_with_default() {
    let args = Cli::parse_from(["polyxiad"]);
    assert_eq!(args.hosts, None);
    assert_eq!(args.upstream, None);
    assert_eq!(args.timeout, None);
    assert_eq!(args.conf_dir, "/etc/polyxia");
  }

  #[test]
  fn cli_with_custom() {
    let args = Cli::parse_from([
      "polyxiad",
      "-H",
      "unix:///run/polyxia.sock",
      "-H",
      "tcp://127.0.0.1:8080",
      "--upstream",
      "http://upstream.internal:8585",
      "--timeout",
      "2500",
      "--conf-dir",
      "/tmp/polyxia",
    ]);
    assert_eq!(
      args.hosts,
      Some(vec![
        "unix:///run/polyxia.sock".to_owned(),
        "tcp://127.0.0.1:8080".to_owned(),
      ])
    );
    assert_eq!(args.upstream.as_deref(), Some("http://upstream.internal:8585"));
    assert_eq!(args.timeout, Some(2500));
    assert_eq!(args.conf_dir, "/tmp/polyxia");
  }

  #[test]
  fn cli_with_invalid_timeout() {
    let args = Cli::try_parse_from(["polyxiad", "--timeout", "soon"]);
    assert!(args.is_err());
  }
}
