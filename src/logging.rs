//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level; `RUST_LOG` still wins.
pub fn init(default_filter: &str) {
    let env = Env::default().default_filter_or(default_filter);
    // Already initialized (tests, embedding) is fine.
    let _ = env_logger::Builder::from_env(env).try_init();
}
