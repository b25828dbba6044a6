//! Debug infrastructure with per-module loggers.
//!
//! Control via PEGSCOPE_DEBUG environment variable:
//! - `PEGSCOPE_DEBUG=*` - Enable all loggers
//! - `PEGSCOPE_DEBUG=disasm` - Enable only the disassembler
//! - `PEGSCOPE_DEBUG=disasm,registry` - Enable multiple
//!
//! Verbosity via PEGSCOPE_DEBUG_VERBOSITY (0-3, default 1)

use std::collections::HashSet;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

pub const DEBUG_VAR: &str = "PEGSCOPE_DEBUG";
pub const VERBOSITY_VAR: &str = "PEGSCOPE_DEBUG_VERBOSITY";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum EnabledConfig {
    All,
    None,
    Some(HashSet<String>),
}

impl EnabledConfig {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => EnabledConfig::None,
            Some("*") | Some("1") | Some("true") => EnabledConfig::All,
            Some(value) => {
                let set: HashSet<_> = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if set.is_empty() { EnabledConfig::None } else { EnabledConfig::Some(set) }
            }
        }
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            EnabledConfig::None => false,
            EnabledConfig::All => true,
            EnabledConfig::Some(set) => set.contains(name),
        }
    }
}

fn parse_verbosity(value: Option<&str>) -> u8 {
    value
        .and_then(|v| v.trim().parse().ok())
        .map(|v: u8| v.min(3))
        .unwrap_or(1)
}

struct GlobalConfig {
    enabled: EnabledConfig,
    verbosity: u8,
}

static CONFIG: OnceLock<GlobalConfig> = OnceLock::new();

fn get_config() -> &'static GlobalConfig {
    CONFIG.get_or_init(|| GlobalConfig {
        enabled: EnabledConfig::parse(env::var(DEBUG_VAR).ok().as_deref()),
        verbosity: parse_verbosity(env::var(VERBOSITY_VAR).ok().as_deref()),
    })
}

fn verbosity() -> u8 {
    get_config().verbosity
}

// ============================================================================
// Logger
// ============================================================================

/// A named stderr logger. Disabled loggers cost one branch per call site.
pub struct Logger {
    name: &'static str,
    enabled: bool,
    indent: AtomicUsize,
}

impl Logger {
    pub const fn disabled() -> Self {
        Self { name: "", enabled: false, indent: AtomicUsize::new(0) }
    }

    /// An enabled logger, whatever `PEGSCOPE_DEBUG` says.
    pub fn active(name: &'static str) -> Self {
        Self { name, enabled: true, indent: AtomicUsize::new(0) }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current nesting of `push_indent` calls.
    pub fn indent(&self) -> usize {
        self.indent.load(Ordering::Relaxed)
    }

    fn emit(&self, level: u8, tag: &str, msg: &str) {
        if self.enabled && verbosity() >= level {
            let indent = self.indent.load(Ordering::Relaxed);
            eprintln!("{}[{}] {}{}", "  ".repeat(indent), self.name, tag, msg);
        }
    }

    #[inline]
    pub fn log(&self, msg: &str) {
        self.emit(1, "", msg);
    }

    #[inline]
    pub fn detail(&self, msg: &str) {
        self.emit(2, "", msg);
    }

    #[inline]
    pub fn success(&self, msg: &str) {
        self.emit(1, "OK: ", msg);
    }

    #[inline]
    pub fn fail(&self, msg: &str) {
        self.emit(1, "FAIL: ", msg);
    }

    #[inline]
    pub fn push_indent(&self) {
        if self.enabled {
            self.indent.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn pop_indent(&self) {
        if self.enabled {
            let _ = self.indent.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(v.saturating_sub(1))
            });
        }
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Create a logger. The name must be a static string.
pub fn create_logger(name: &'static str) -> Logger {
    if get_config().enabled.contains(name) {
        Logger::active(name)
    } else {
        Logger::disabled()
    }
}

// ============================================================================
// Macros - avoid format! cost when disabled
// ============================================================================

#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:tt)*) => {
        if $logger.enabled() {
            $logger.log(&format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_detail {
    ($logger:expr, $($arg:tt)*) => {
        if $logger.enabled() {
            $logger.detail(&format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_success {
    ($logger:expr, $($arg:tt)*) => {
        if $logger.enabled() {
            $logger.success(&format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_fail {
    ($logger:expr, $($arg:tt)*) => {
        if $logger.enabled() {
            $logger.fail(&format!($($arg)*));
        }
    };
}
