//! Logging setup utilities for the marubatsu workspace.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for both the application crate and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "marubatsu-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directives for this crate and the binary's crate.
///
/// Tracing targets are module paths, which use underscores, so crate and
/// binary names containing hyphens must be normalized or the directives
/// never match any event.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_hyphens_to_match_tracing_targets() {
        // テスト項目: ハイフン入りのバイナリ名がトレーシングターゲットの
        //             形式（アンダースコア）に正規化される
        // given (前提条件):
        let binary_name = "marubatsu-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果): lib crate のターゲット
        // `marubatsu_server::...` にもマッチするディレクティブになる
        assert_eq!(filter, "marubatsu_shared=debug,marubatsu_server=debug");
    }

    #[test]
    fn test_default_filter_applies_the_given_level() {
        // テスト項目: 指定したログレベルが両方のディレクティブに反映される
        let filter = default_filter("server", "info");
        assert_eq!(filter, "marubatsu_shared=info,server=info");
    }
}
