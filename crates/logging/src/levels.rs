//! crates/logging/src/levels.rs
//! Severity bits, level masks, and level-spec parsing.
//!
//! Every record carries a [`Level`]: a single bit drawn from the ordered set
//! `TRACE < DEBUG0 < ... < DEBUG31 < INFO < WARN < ERROR`. A [`LevelMask`]
//! selects the levels a logger accepts. Plain severities pass when their bit
//! intersects the mask. Debug sub-levels use a ceiling comparison instead: the
//! debug bits of the mask form a threshold and `debug(n)` passes when
//! `mask & DEBUG <= DEBUG0 << n`, so a mask that opens `DEBUG3` also admits
//! every sub-level above three.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Number of debug sub-levels (`DEBUG0` through `DEBUG31`).
pub const DEBUG_SUB_LEVELS: u8 = 32;

/// Separator used between level names in a level spec.
pub const LEVEL_SEPARATOR: &str = "|";

const TRACE_BIT: u64 = 1;
const DEBUG0_BIT: u64 = 1 << 1;
const DEBUG_BITS: u64 = ((1u64 << DEBUG_SUB_LEVELS) - 1) << 1;
const INFO_BIT: u64 = 1 << 33;
const WARN_BIT: u64 = 1 << 34;
const ERROR_BIT: u64 = 1 << 35;
const VALID_BITS: u64 = TRACE_BIT | DEBUG_BITS | INFO_BIT | WARN_BIT | ERROR_BIT;

/// The five severities a [`ScopedLogger`](crate::ScopedLogger) routes to
/// separate handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Mirror channel and the most verbose records.
    Trace,
    /// Debug records of any sub-level.
    Debug,
    /// Informational records.
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
}

impl Severity {
    /// Every severity, least significant first.
    pub const ALL: [Self; 5] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Returns the upper-case name used in level specs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Returns the bracketed, fixed-width tag written in front of the scope.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Trace => "[TRACE]",
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO ]",
            Self::Warn => "[WARN ]",
            Self::Error => "[ERROR]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The level of a single record.
///
/// Levels are totally ordered by significance, which is also their numeric
/// order: `TRACE` is the lowest bit and `ERROR` the highest.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u64);

impl Level {
    /// Trace records.
    pub const TRACE: Self = Self(TRACE_BIT);
    /// The least verbose debug sub-level.
    pub const DEBUG0: Self = Self(DEBUG0_BIT);
    /// Informational records.
    pub const INFO: Self = Self(INFO_BIT);
    /// Warnings.
    pub const WARN: Self = Self(WARN_BIT);
    /// Errors.
    pub const ERROR: Self = Self(ERROR_BIT);

    /// Returns debug sub-level `n`, i.e. `DEBUG0 << n`.
    ///
    /// Sub-levels above 31 saturate at `DEBUG31` so they never alias `INFO`.
    #[must_use]
    pub const fn debug(n: u8) -> Self {
        let n = if n >= DEBUG_SUB_LEVELS {
            DEBUG_SUB_LEVELS - 1
        } else {
            n
        };
        Self(DEBUG0_BIT << n)
    }

    /// Builds a level from raw bits. Unknown bits are kept so that
    /// [`severity`](Self::severity) can report them as unrecognised.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reports whether this level is one of the debug sub-levels.
    #[must_use]
    pub const fn is_debug(self) -> bool {
        self.0 & DEBUG_BITS != 0 && self.0 & !DEBUG_BITS == 0
    }

    /// Maps the level onto the severity whose handle receives it.
    ///
    /// Returns `None` for a level with no recognised bit.
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        if self.0 >= ERROR_BIT {
            Some(Severity::Error)
        } else if self.0 >= WARN_BIT {
            Some(Severity::Warn)
        } else if self.0 >= INFO_BIT {
            Some(Severity::Info)
        } else if self.0 & DEBUG_BITS != 0 {
            Some(Severity::Debug)
        } else if self.0 & TRACE_BIT != 0 {
            Some(Severity::Trace)
        } else {
            None
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_debug() && self.0.is_power_of_two() {
            return write!(f, "Level(DEBUG{})", self.0.trailing_zeros() - 1);
        }
        match self.severity() {
            Some(severity) => write!(f, "Level({severity})"),
            None => write!(f, "Level({:#x})", self.0),
        }
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace => Self::TRACE,
            Severity::Debug => Self::DEBUG0,
            Severity::Info => Self::INFO,
            Severity::Warn => Self::WARN,
            Severity::Error => Self::ERROR,
        }
    }
}

/// Error returned when a level spec cannot be turned into a [`LevelMask`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelParseError {
    /// The spec named no level at all.
    #[error("level spec is empty")]
    Empty,
    /// A token did not name a known level.
    #[error("unknown level '{token}'")]
    UnknownLevel {
        /// The offending token as written.
        token: String,
    },
    /// A `DEBUGn` token used a sub-level outside `0..=31`.
    #[error("debug sub-level '{token}' is out of range (0-31)")]
    DebugSubLevelOutOfRange {
        /// The offending token as written.
        token: String,
    },
}

/// The set of levels a logger accepts.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct LevelMask(u64);

impl LevelMask {
    /// Accepts nothing.
    pub const NONE: Self = Self(0);
    /// Accepts every severity and every debug sub-level.
    pub const ALL: Self = Self(TRACE_BIT | DEBUG0_BIT | INFO_BIT | WARN_BIT | ERROR_BIT);

    /// Builds a mask from raw bits, discarding bits that name no level.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & VALID_BITS)
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reports whether no level is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the mask with `level`'s bits added.
    #[must_use]
    pub const fn with(self, level: Level) -> Self {
        Self::from_bits(self.0 | level.0)
    }

    /// Returns the mask with `level`'s bits removed.
    #[must_use]
    pub const fn without(self, level: Level) -> Self {
        Self(self.0 & !level.0)
    }

    /// Plain bit intersection, without the debug ceiling rule.
    #[must_use]
    pub const fn contains(self, level: Level) -> bool {
        self.0 & level.0 != 0
    }

    /// Reports whether a record of `level` passes this mask.
    ///
    /// Debug sub-levels pass when the mask carries a debug threshold and that
    /// threshold does not exceed the record's sub-level bit. A mask without
    /// any debug bit closes every debug sub-level.
    #[must_use]
    pub const fn test(self, level: Level) -> bool {
        if level.is_debug() {
            let threshold = self.0 & DEBUG_BITS;
            threshold != 0 && threshold <= level.0
        } else {
            self.contains(level)
        }
    }

    /// Parses `spec`, a list of level names joined by `separator`.
    ///
    /// Names are matched case-insensitively after trimming whitespace.
    /// Accepted names are `TRACE`, `DEBUG` (the same as `DEBUG0`),
    /// `DEBUG0`..`DEBUG31`, `INFO`, `WARN` (or `WARNING`), `ERROR`, and `ALL`.
    /// Empty tokens between separators are skipped, but a spec that names no
    /// level is rejected rather than producing a mask that silently disables
    /// logging.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Level, LevelMask};
    ///
    /// let mask = LevelMask::parse("info|WARN|error", "|")?;
    /// assert!(mask.test(Level::WARN));
    /// assert!(!mask.test(Level::TRACE));
    /// assert!(LevelMask::parse("  ", "|").is_err());
    /// # Ok::<(), logging::LevelParseError>(())
    /// ```
    pub fn parse(spec: &str, separator: &str) -> Result<Self, LevelParseError> {
        let mut mask = Self::NONE;
        for token in spec.split(separator) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            mask.0 |= parse_token(token)?;
        }

        if mask.is_empty() {
            return Err(LevelParseError::Empty);
        }
        Ok(mask)
    }

    /// Iterates over the names of the selected levels, least significant first.
    pub fn names(self) -> impl Iterator<Item = String> {
        (0..36u32).filter_map(move |bit| {
            let value = 1u64 << bit;
            if self.0 & value == 0 {
                return None;
            }
            Some(match value {
                TRACE_BIT => "TRACE".to_string(),
                INFO_BIT => "INFO".to_string(),
                WARN_BIT => "WARN".to_string(),
                ERROR_BIT => "ERROR".to_string(),
                _ => format!("DEBUG{}", bit - 1),
            })
        })
    }
}

fn parse_token(token: &str) -> Result<u64, LevelParseError> {
    let upper = token.to_ascii_uppercase();
    match upper.as_str() {
        "ALL" => Ok(LevelMask::ALL.0),
        "TRACE" => Ok(TRACE_BIT),
        "DEBUG" => Ok(DEBUG0_BIT),
        "INFO" => Ok(INFO_BIT),
        "WARN" | "WARNING" => Ok(WARN_BIT),
        "ERROR" => Ok(ERROR_BIT),
        other => {
            let digits = other
                .strip_prefix("DEBUG")
                .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| LevelParseError::UnknownLevel {
                    token: token.to_string(),
                })?;
            match digits.parse::<u8>() {
                Ok(n) if n < DEBUG_SUB_LEVELS => Ok(DEBUG0_BIT << n),
                _ => Err(LevelParseError::DebugSubLevelOutOfRange {
                    token: token.to_string(),
                }),
            }
        }
    }
}

impl FromStr for LevelMask {
    type Err = LevelParseError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::parse(spec, LEVEL_SEPARATOR)
    }
}

impl fmt::Display for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.names().collect();
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join(LEVEL_SEPARATOR))
        }
    }
}

impl fmt::Debug for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelMask({self})")
    }
}

impl From<Level> for LevelMask {
    fn from(level: Level) -> Self {
        Self::from_bits(level.0)
    }
}

impl BitOr for LevelMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Level> for LevelMask {
    type Output = Self;

    fn bitor(self, rhs: Level) -> Self {
        self.with(rhs)
    }
}

impl BitOr for Level {
    type Output = LevelMask;

    fn bitor(self, rhs: Self) -> LevelMask {
        LevelMask::from(self).with(rhs)
    }
}

impl BitOrAssign<Level> for LevelMask {
    fn bitor_assign(&mut self, rhs: Level) {
        *self = self.with(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_severity_maps_to_its_own_level() {
        for severity in Severity::ALL {
            assert_eq!(Level::from(severity).severity(), Some(severity));
            assert_eq!(severity.tag().len(), 7, "{severity}");
            assert!(LevelMask::ALL.test(Level::from(severity)));
        }
    }

    #[test]
    fn levels_are_ordered_by_significance() {
        assert!(Level::TRACE < Level::DEBUG0);
        assert!(Level::DEBUG0 < Level::debug(31));
        assert!(Level::debug(31) < Level::INFO);
        assert!(Level::INFO < Level::WARN);
        assert!(Level::WARN < Level::ERROR);
    }

    #[test]
    fn debug_sub_levels_saturate() {
        assert_eq!(Level::debug(40), Level::debug(31));
        assert_eq!(Level::debug(31).severity(), Some(Severity::Debug));
    }

    #[test]
    fn severity_of_each_level() {
        assert_eq!(Level::TRACE.severity(), Some(Severity::Trace));
        assert_eq!(Level::debug(7).severity(), Some(Severity::Debug));
        assert_eq!(Level::INFO.severity(), Some(Severity::Info));
        assert_eq!(Level::WARN.severity(), Some(Severity::Warn));
        assert_eq!(Level::ERROR.severity(), Some(Severity::Error));
        assert_eq!(Level::from_bits(0).severity(), None);
    }

    #[test]
    fn parse_combines_names() {
        let mask = LevelMask::parse("TRACE|INFO|ERROR", "|").unwrap();
        assert!(mask.test(Level::TRACE));
        assert!(mask.test(Level::INFO));
        assert!(mask.test(Level::ERROR));
        assert!(!mask.test(Level::WARN));
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        let mask = LevelMask::parse(" warn , Error ", ",").unwrap();
        assert_eq!(mask, Level::WARN | Level::ERROR);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(LevelMask::parse("all", "|").unwrap(), LevelMask::ALL);
        assert_eq!(
            LevelMask::parse("debug", "|").unwrap(),
            LevelMask::from(Level::DEBUG0)
        );
        assert_eq!(
            LevelMask::parse("warning", "|").unwrap(),
            LevelMask::from(Level::WARN)
        );
        assert_eq!(
            LevelMask::parse("DEBUG12", "|").unwrap(),
            LevelMask::from(Level::debug(12))
        );
    }

    #[test]
    fn parse_skips_empty_tokens() {
        let mask = LevelMask::parse("INFO||WARN|", "|").unwrap();
        assert_eq!(mask, Level::INFO | Level::WARN);
    }

    #[test]
    fn parse_rejects_empty_spec() {
        assert_eq!(LevelMask::parse("", "|"), Err(LevelParseError::Empty));
        assert_eq!(LevelMask::parse("| |", "|"), Err(LevelParseError::Empty));
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert_eq!(
            LevelMask::parse("INFO|LOUD", "|"),
            Err(LevelParseError::UnknownLevel {
                token: "LOUD".to_string()
            })
        );
        assert!(matches!(
            LevelMask::parse("DEBUGX", "|"),
            Err(LevelParseError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn parse_rejects_out_of_range_debug() {
        assert_eq!(
            LevelMask::parse("DEBUG32", "|"),
            Err(LevelParseError::DebugSubLevelOutOfRange {
                token: "DEBUG32".to_string()
            })
        );
    }

    #[test]
    fn from_str_uses_pipe_separator() {
        let mask: LevelMask = "INFO|ERROR".parse().unwrap();
        assert_eq!(mask, Level::INFO | Level::ERROR);
    }

    #[test]
    fn debug_gate_is_a_ceiling() {
        let mask = LevelMask::from(Level::debug(3));
        assert!(!mask.test(Level::debug(0)));
        assert!(!mask.test(Level::debug(2)));
        assert!(mask.test(Level::debug(3)));
        assert!(mask.test(Level::debug(20)));
    }

    #[test]
    fn debug_gate_closed_without_debug_bits() {
        let mask = Level::INFO | Level::ERROR;
        assert!(!mask.test(Level::debug(0)));
        assert!(!mask.test(Level::debug(31)));
    }

    #[test]
    fn all_admits_every_debug_sub_level() {
        for n in 0..DEBUG_SUB_LEVELS {
            assert!(LevelMask::ALL.test(Level::debug(n)));
        }
    }

    #[test]
    fn display_lists_selected_names() {
        let mask = Level::TRACE | Level::debug(2);
        assert_eq!(mask.with(Level::ERROR).to_string(), "TRACE|DEBUG2|ERROR");
        assert_eq!(LevelMask::NONE.to_string(), "NONE");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let mask = LevelMask::parse("trace|debug4|warn", "|").unwrap();
        assert_eq!(mask.to_string().parse::<LevelMask>().unwrap(), mask);
    }

    #[test]
    fn without_removes_bits() {
        let mask = LevelMask::ALL.without(Level::TRACE);
        assert!(!mask.test(Level::TRACE));
        assert!(mask.test(Level::INFO));
    }

    #[test]
    fn level_debug_format_names_sub_levels() {
        assert_eq!(format!("{:?}", Level::debug(5)), "Level(DEBUG5)");
        assert_eq!(format!("{:?}", Level::WARN), "Level(WARN)");
    }
}
