//! Logging abstraction
//!
//! Provides unified logging macros used throughout the crate. All macros
//! forward to the [`log`] facade, so the embedding program decides where
//! messages go (stderr logger, ring buffer, robot controller console).
//!
//! The crate never installs a logger. Without one, every macro is a no-op
//! apart from argument formatting being skipped by `log`'s level check.
//!
//! ## Usage
//!
//! ```
//! use robot_tasks::{log_info, log_warn};
//!
//! log_info!("Task {} started", "drive");
//! log_warn!("Slice budget exceeded: {}us", 25_000);
//! ```

/// Log target used by every macro in this crate
pub const LOG_TARGET: &str = "robot_tasks";

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_without_logger() {
        // No logger installed: macros must still compile and be no-ops
        crate::log_info!("info {}", 1);
        crate::log_warn!("warn {}", 2);
        crate::log_error!("error {}", 3);
        crate::log_debug!("debug {}", 4);
        crate::log_trace!("trace {}", 5);
    }
}
