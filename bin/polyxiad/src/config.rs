use std::path::Path;

use polyxia_error::io::{FromIo, IoError, IoResult};

use crate::cli::Cli;
use crate::models::{DaemonConfig, DaemonConfigFile};

/// Name of the config file inside the config directory
const CONFIG_FILE: &str = "polyxia.conf";

fn gen_daemon_conf(
  args: &Cli,
  config: &DaemonConfigFile,
) -> IoResult<DaemonConfig> {
  let default = DaemonConfig::default();
  let hosts = args
    .hosts
    .clone()
    .or_else(|| config.hosts.clone())
    .unwrap_or(default.hosts);
  if hosts.is_empty() {
    return Err(IoError::invalid_input("Config", "hosts can't be empty"));
  }
  let upstream = args
    .upstream
    .clone()
    .or_else(|| config.upstream.clone())
    .unwrap_or(default.upstream);
  let timeout = args.timeout.or(config.timeout).unwrap_or(default.timeout);
  if timeout == 0 {
    return Err(IoError::invalid_input(
      "Config",
      "timeout must be greater than 0",
    ));
  }
  Ok(DaemonConfig {
    hosts,
    upstream,
    timeout,
  })
}

fn read_config_file(config_dir: &str) -> IoResult<DaemonConfigFile> {
  let config_path = Path::new(config_dir).join(CONFIG_FILE);
  if !config_path.exists() {
    return Ok(DaemonConfigFile::default());
  }
  let display = config_path.display().to_string();
  let content = std::fs::read_to_string(&config_path)
    .map_err(|err| err.map_err_context(|| format!("Read {display}")))?;
  let config = serde_yaml::from_str::<DaemonConfigFile>(&content)
    .map_err(|err| err.map_err_context(|| format!("Parse {display}")))?;
  Ok(config)
}

/// Read `{conf_dir}/polyxia.conf` when it exists
/// and merge it with the cli arguments, the arguments win.
pub fn init(args: &Cli) -> IoResult<DaemonConfig> {
  let file_config = read_config_file(&args.conf_dir)?;
  gen_daemon_conf(args, &file_config)
}
