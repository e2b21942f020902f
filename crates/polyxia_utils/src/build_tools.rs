use std::io::{Error, ErrorKind, Result};

/// ## Set env git commit hash
///
/// Export the hash of the current commit as `GIT_HASH`,
/// `<unknown>` when git is missing or we are not in a repository.
///
pub fn set_env_git_commit_hash() -> Result<()> {
  let git_hash = std::process::Command::new("git")
    .args(["rev-parse", "HEAD"])
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|hash| hash.trim().to_owned())
    .filter(|hash| !hash.is_empty())
    .unwrap_or_else(|| "<unknown>".to_owned());
  println!("cargo:rustc-env=GIT_HASH={git_hash}");
  Ok(())
}

/// ## Set env target arch
///
/// Export the target arch as `TARGET_ARCH`
///
pub fn set_env_target_arch() -> Result<()> {
  let arch = std::env::var("CARGO_CFG_TARGET_ARCH")
    .map_err(|e| Error::new(ErrorKind::Other, e))?;
  println!("cargo:rustc-env=TARGET_ARCH={arch}");
  Ok(())
}

/// ## Set channel
///
/// Export the release channel as `CHANNEL`.
/// `POLYXIA_CHANNEL` overrides the default.
///
pub fn set_channel() -> Result<()> {
  #[allow(unused)]
  let mut default_channel = "stable";
  #[cfg(feature = "dev")]
  {
    default_channel = "nightly";
  }
  let channel =
    std::env::var("POLYXIA_CHANNEL").unwrap_or(default_channel.into());
  println!("cargo:rerun-if-env-changed=POLYXIA_CHANNEL");
  println!("cargo:rustc-env=CHANNEL={channel}");
  Ok(())
}
