//! Logging setup utilities shared by the store and client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the library crates of the workspace and the binary itself log at
/// `default_log_level`. The filter can be overridden with `RUST_LOG`.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "janken-store", "janken-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use janken_shared::logger::setup_logger;
///
/// setup_logger("janken-store", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

const WORKSPACE_CRATES: [&str; 3] = ["janken_shared", "janken_store", "janken_client"];

/// Build the default filter directive covering every workspace crate.
///
/// The binary's own target is appended only when it is not one of them.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<&str> = WORKSPACE_CRATES.to_vec();
    if !targets.contains(&binary_target.as_str()) {
        targets.push(binary_target.as_str());
    }
    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates_once() {
        // テスト項目: バイナリ名がワークスペースのクレートと同じ場合はターゲットが重複しない
        // given (前提条件):
        let binary_name = "janken-client";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert_eq!(filter, "janken_shared=info,janken_store=info,janken_client=info");
    }

    #[test]
    fn test_default_filter_appends_other_binary() {
        // テスト項目: ワークスペース外のバイナリ名はターゲットとして追加される
        // given (前提条件):
        let binary_name = "janken-bench";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "janken_shared=debug,janken_store=debug,janken_client=debug,janken_bench=debug"
        );
    }
}
