//! ログ初期化
//!
//! 利用者向けの進捗は println!/プログレスバー、診断ログは tracing で stderr へ

use tracing_subscriber::EnvFilter;

/// RUST_LOG があれば優先、なければ verbose で debug / 通常は warn
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
