//! Logging setup utilities for the Utage binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the library crate that owns the binary as well as the binary
/// itself. It can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The package emitting most of the logs (e.g., "utage-server")
/// * `binary_name` - The name of the binary (e.g., "utage-server", "utage-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use utage_shared::logger::setup_logger;
///
/// setup_logger("utage-server", "utage-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Crate and binary names use `-` in Cargo but `_` as tracing targets.
fn default_filter(crate_name: &str, binary_name: &str, level: &str) -> String {
    let crate_target = crate_name.replace('-', "_");
    let binary_target = binary_name.replace('-', "_");
    let mut directives = format!("{}={},tower_http={}", crate_target, level, level);
    if binary_target != crate_target {
        directives.push_str(&format!(",{}={}", binary_target, level));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_for_server_binary() {
        // テスト項目: クレート名とバイナリ名が同じ場合、ディレクティブが重複しない
        // given (前提条件):
        let crate_name = "utage-server";

        // when (操作):
        let result = default_filter(crate_name, "utage-server", "debug");

        // then (期待する結果):
        assert_eq!(result, "utage_server=debug,tower_http=debug");
    }

    #[test]
    fn test_default_filter_for_distinct_binary() {
        // テスト項目: バイナリ名が異なる場合、バイナリ用のディレクティブが追加される
        // given (前提条件):
        let crate_name = "utage-client";

        // when (操作):
        let result = default_filter(crate_name, "queue-debug", "info");

        // then (期待する結果):
        assert_eq!(
            result,
            "utage_client=info,tower_http=info,queue_debug=info"
        );
    }
}
