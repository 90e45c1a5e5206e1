//! Version strings and version constraints.
//!
//! Installed tools report versions in many shapes (`3.9.1`, `v18.17`, `2.2`).
//! [`Version::parse`] accepts one to three numeric components, missing
//! components defaulting to `0`, plus optional `-prerelease` and `+build`
//! suffixes. A pre-release starting with a letter may also follow the last
//! component directly (`3.13.0rc1`). Ordering is numeric per component; a pre-release orders below its
//! release and build metadata never affects ordering.
//!
//! # Example
//!
//! ```
//! use trellis::requirements::version::{Version, VersionConstraint};
//!
//! let constraint = VersionConstraint::parse(">= 9.0.0").unwrap();
//! assert!(constraint.matches(&Version::parse("10.0.0").unwrap()));
//! assert!(!constraint.matches(&Version::parse("2.0.0").unwrap()));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease};

use crate::error::{Result, TrellisError};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+)|([A-Za-z][0-9A-Za-z.-]*))?(?:\+([0-9A-Za-z.-]+))?$",
    )
        .expect("VERSION_REGEX must compile")
});

static CONSTRAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>=|<=|>|<|=)?\s*(\S+)$").expect("CONSTRAINT_REGEX must compile")
});

/// A parsed tool version.
#[derive(Debug, Clone)]
pub struct Version(semver::Version);

impl Version {
    /// Parse a version string, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = |message: String| TrellisError::VersionParse {
            input: trimmed.to_string(),
            message,
        };

        let caps = VERSION_REGEX
            .captures(trimmed)
            .ok_or_else(|| invalid("expected major[.minor[.patch]]".to_string()))?;

        let component = |index: usize| -> Result<u64> {
            match caps.get(index) {
                Some(m) => m
                    .as_str()
                    .parse::<u64>()
                    .map_err(|e| invalid(e.to_string())),
                None => Ok(0),
            }
        };

        let mut version = semver::Version::new(component(1)?, component(2)?, component(3)?);
        // Python-style tags such as `3.13.0rc1` carry no `-` separator.
        if let Some(pre) = caps.get(4).or_else(|| caps.get(5)) {
            version.pre = Prerelease::new(pre.as_str()).map_err(|e| invalid(e.to_string()))?;
        }
        if let Some(build) = caps.get(6) {
            version.build =
                BuildMetadata::new(build.as_str()).map_err(|e| invalid(e.to_string()))?;
        }

        Ok(Self(version))
    }

    /// Major component.
    pub fn major(&self) -> u64 {
        self.0.major
    }

    /// Minor component (0 when omitted).
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Patch component (0 when omitted).
    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl FromStr for Version {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        (a.major, a.minor, a.patch)
            .cmp(&(b.major, b.minor, b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comparison operator of a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
}

impl Comparator {
    /// The operator as written in a constraint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::Equal => "=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
        }
    }

    /// Whether `installed.cmp(required)` satisfies this operator.
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::Greater => ordering == Ordering::Greater,
            Self::Equal => ordering == Ordering::Equal,
            Self::Less => ordering == Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
        }
    }
}

impl FromStr for Comparator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ">=" => Ok(Self::GreaterOrEqual),
            ">" => Ok(Self::Greater),
            "=" => Ok(Self::Equal),
            "<" => Ok(Self::Less),
            "<=" => Ok(Self::LessOrEqual),
            _ => Err(format!("unknown comparator: {}", s)),
        }
    }
}

/// A comparator paired with a version, e.g. `>= 3.8.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    /// The comparison operator (`=` when none was written).
    pub comparator: Comparator,
    /// The version compared against.
    pub version: Version,
}

impl VersionConstraint {
    /// Parse a constraint such as `>= 3.8.0`, `<2` or `1.2.3`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = |message: String| TrellisError::ConstraintParse {
            input: trimmed.to_string(),
            message,
        };

        let caps = CONSTRAINT_REGEX
            .captures(trimmed)
            .ok_or_else(|| invalid("expected <comparator> <version>".to_string()))?;

        let comparator = match caps.get(1) {
            Some(op) => op.as_str().parse::<Comparator>().map_err(invalid)?,
            None => Comparator::Equal,
        };
        let version = Version::parse(&caps[2]).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            comparator,
            version,
        })
    }

    /// Whether `installed` satisfies this constraint.
    pub fn matches(&self, installed: &Version) -> bool {
        self.comparator.accepts(installed.cmp(&self.version))
    }
}

impl FromStr for VersionConstraint {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparator.as_str(), self.version)
    }
}
