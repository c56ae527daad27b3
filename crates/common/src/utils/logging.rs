use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output shape of the process-wide subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; every other name falls back to compact.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") { Self::Json } else { Self::Compact }
    }

    /// Directives used when `RUST_LOG` is unset.
    pub fn default_directives(self) -> &'static str {
        match self {
            // 人读日志：保留请求级别的 tower_http 输出
            Self::Compact => "info,tower_http=info,axum=info",
            // 机器采集：额外打开存储层 debug，便于按 key 追踪 merge/purge
            Self::Json => "info,service::records=debug",
        }
    }
}

fn env_filter(format: LogFormat) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format.default_directives()))
}

/// Install the global subscriber, writing to stdout. A second call is a no-op.
pub fn init_logging(format: LogFormat) {
    let builder = fmt().with_env_filter(env_filter(format)).with_target(false).with_writer(io::stdout);
    // 重复初始化（例如测试中）直接忽略
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn init_logging_default() {
    init_logging(LogFormat::Compact);
}

/// Pick the subscriber by the configured `logging.format` name.
pub fn init_logging_for(name: &str) {
    init_logging(LogFormat::from_name(name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_name(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::from_name("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_name("pretty"), LogFormat::Compact);
    }

    #[test]
    fn json_enables_store_debug() {
        assert!(LogFormat::Json.default_directives().contains("service::records=debug"));
        assert!(!LogFormat::Compact.default_directives().contains("debug"));
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging(LogFormat::Compact);
        init_logging(LogFormat::Json);
    }
}
