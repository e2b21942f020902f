/// Initialize env_logger for the given binary.
///
/// The filter is read from `LOG_LEVEL` and defaults to `{bin_name}=debug`.
/// When `TEST` is set the logger captures output per test.
pub fn enable_logger(bin_name: &str) {
  if std::env::var("LOG_LEVEL").is_err() {
    std::env::set_var("LOG_LEVEL", format!("{bin_name}=debug"));
  }
  let is_test = std::env::var("TEST").is_ok();
  // try_init: tests may bootstrap the logger more than once per process
  let _ = env_logger::Builder::new()
    .parse_env("LOG_LEVEL")
    .is_test(is_test)
    .try_init();
}
