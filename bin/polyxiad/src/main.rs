use clap::Parser;

use polyxia_utils::logger;
use polyxia_error::io::IoResult;

mod cli;
mod utils;
mod config;
mod models;
mod server;
mod version;
mod services;
mod retriever;
mod subsystem;

use cli::Cli;

async fn run(cli: &Cli) -> IoResult<()> {
  logger::enable_logger("polyxiad");
  log::info!(
    "polyxiad_{}_{}_v{}:{}",
    version::ARCH,
    version::CHANNEL,
    version::VERSION,
    version::COMMIT_ID
  );
  let config = config::init(cli)?;
  let endpoint = subsystem::init(&config)?;
  let server = server::gen(&config, &endpoint)?;
  server.await?;
  Ok(())
}

#[ntex::main]
async fn main() -> std::io::Result<()> {
  let cli = Cli::parse();
  if let Err(err) = run(&cli).await {
    log::error!("{err}");
    err.exit();
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[ntex::test]
  async fn run_wrong_host() {
    let cli = Cli::parse_from([
      "polyxiad",
      "--hosts",
      "wrong://dsadsa",
      "--conf-dir",
      "/tmp/polyxia-test-run",
    ]);
    assert!(run(&cli).await.is_err());
  }

  #[ntex::test]
  async fn run_wrong_upstream() {
    let cli = Cli::parse_from([
      "polyxiad",
      "-H",
      "tcp://127.0.0.1:9988",
      "--upstream",
      "upstream.internal",
      "--conf-dir",
      "/tmp/polyxia-test-run",
    ]);
    assert!(run(&cli).await.is_err());
  }
}
