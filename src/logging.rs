use tracing_subscriber;

pub enum LogLevel {
    Trace, Info, Debug, Warn, Error
}
impl LogLevel {
    pub fn to_log_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Self{
        match s {
            "trace" => LogLevel::Trace,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}
impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

pub struct Logger;

impl Logger {
    /// Initialize the logger
    pub fn init(level: LogLevel) {
        tracing_subscriber::fmt()
            .with_max_level(level.to_log_level())
            .init();
    }
}

pub fn setup_logger(level: &str) {
    Logger::init(LogLevel::from_str(level));
}
