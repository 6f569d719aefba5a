use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    fn format_line(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}] {}", timestamp, prefix, message)
        } else {
            format!("[{}] {}", timestamp, message)
        }
    }

    /// Writes to stderr; stdout belongs to the board display.
    pub fn log(&self, message: &str) {
        eprintln!("{}", self.format_line(message));
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn is_enabled() -> bool {
    LOGGER.get().is_some()
}

/// Dropped silently until `init_logger` has been called.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled() {
            $crate::logger::log(&format!($($arg)*))
        }
    };
}
