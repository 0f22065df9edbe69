use std::fmt;
use std::str::FromStr;

/// Severity on the façade side.
///
/// Levels are plain integers so callers can define their own in between the
/// four named ones; a larger value is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(level: i32) -> Self {
        Level(level)
    }

    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = if self.0 < Level::INFO.0 {
            ("DEBUG", Level::DEBUG.0)
        } else if self.0 < Level::WARN.0 {
            ("INFO", Level::INFO.0)
        } else if self.0 < Level::ERROR.0 {
            ("WARN", Level::WARN.0)
        } else {
            ("ERROR", Level::ERROR.0)
        };

        match self.0 - base {
            0 => f.write_str(name),
            offset => write!(f, "{}{:+}", name, offset),
        }
    }
}

/// Severity on the target logger side, ordered from most to least severe.
///
/// `TargetLevel::Error < TargetLevel::Debug`: a larger value is more verbose,
/// so a logger at level `l` emits every `x <= l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetLevel {
    Panic,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl TargetLevel {
    pub const ALL: [TargetLevel; 7] = [
        TargetLevel::Panic,
        TargetLevel::Fatal,
        TargetLevel::Error,
        TargetLevel::Warn,
        TargetLevel::Info,
        TargetLevel::Debug,
        TargetLevel::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetLevel::Panic => "panic",
            TargetLevel::Fatal => "fatal",
            TargetLevel::Error => "error",
            TargetLevel::Warn => "warning",
            TargetLevel::Info => "info",
            TargetLevel::Debug => "debug",
            TargetLevel::Trace => "trace",
        }
    }

    pub(crate) fn from_u8(value: u8) -> TargetLevel {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .unwrap_or(TargetLevel::Trace)
    }
}

impl fmt::Display for TargetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a target level name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("not a valid log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for TargetLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panic" => Ok(TargetLevel::Panic),
            "fatal" => Ok(TargetLevel::Fatal),
            "error" => Ok(TargetLevel::Error),
            "warn" | "warning" => Ok(TargetLevel::Warn),
            "info" => Ok(TargetLevel::Info),
            "debug" => Ok(TargetLevel::Debug),
            "trace" => Ok(TargetLevel::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<TargetLevel> for tracing::Level {
    fn from(level: TargetLevel) -> Self {
        match level {
            TargetLevel::Panic | TargetLevel::Fatal | TargetLevel::Error => tracing::Level::ERROR,
            TargetLevel::Warn => tracing::Level::WARN,
            TargetLevel::Info => tracing::Level::INFO,
            TargetLevel::Debug => tracing::Level::DEBUG,
            TargetLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Pick the target severity for a façade level.
///
/// Only the four named façade levels have a counterpart; anything else is
/// logged at `Info`.
pub fn to_target_level(level: Level) -> TargetLevel {
    match level {
        Level::DEBUG => TargetLevel::Debug,
        Level::INFO => TargetLevel::Info,
        Level::WARN => TargetLevel::Warn,
        Level::ERROR => TargetLevel::Error,
        _ => TargetLevel::Info,
    }
}

/// Mirror a target severity onto the façade scale.
///
/// The façade has fewer levels: `Trace` collapses into `DEBUG`, and `Fatal`
/// and `Panic` collapse into `ERROR`.
pub fn from_target_level(level: TargetLevel) -> Level {
    match level {
        TargetLevel::Trace | TargetLevel::Debug => Level::DEBUG,
        TargetLevel::Info => Level::INFO,
        TargetLevel::Warn => Level::WARN,
        TargetLevel::Error | TargetLevel::Fatal | TargetLevel::Panic => Level::ERROR,
    }
}
