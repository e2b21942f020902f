use ntex::web;

use polyxia_error::io::{IoError, IoResult};

use crate::services;
use crate::subsystem;
use crate::models::DaemonConfig;
use crate::retriever::UpstreamEndpoint;

/// Generate the http server bound to every configured host,
/// each worker builds its own state.
/// NOTE: in dev mode we also bind [http://0.0.0.0:8787](http://0.0.0.0:8787)
///       with an explorer on [http://0.0.0.0:8787/explorer/](http://0.0.0.0:8787/explorer/)
pub fn gen(
  config: &DaemonConfig,
  endpoint: &UpstreamEndpoint,
) -> IoResult<ntex::server::Server> {
  let worker_config = config.clone();
  let endpoint = endpoint.clone();
  let mut server = web::HttpServer::new(move || {
    web::App::new()
      .state(subsystem::gen_state(&worker_config, &endpoint))
      .configure(services::ntex_config)
      .default_service(web::route().to(services::unhandled))
  });
  for host in &config.hosts {
    server = match host {
      host if host.starts_with("unix://") => {
        server.bind_uds(host.trim_start_matches("unix://"))?
      }
      host if host.starts_with("tcp://") => {
        server.bind(host.trim_start_matches("tcp://"))?
      }
      _ => {
        return Err(IoError::invalid_data(
          "Server",
          format!("invalid host format {host} (must be unix:// or tcp://)"),
        ))
      }
    };
    log::info!("server::gen: listening on {host}");
  }
  #[cfg(feature = "dev")]
  {
    server = server.bind("0.0.0.0:8787")?;
    log::debug!("server::gen: dev mode http://0.0.0.0:8787");
    log::debug!("server::gen: swagger http://0.0.0.0:8787/explorer/");
  }
  Ok(server.run())
}
