//! `major.minor.build` versions with single-digit rollover

use std::fmt;

use semver::Version;

use crate::{Error, Result};

/// Highest value of the build and minor parts before they roll over.
const ROLLOVER_AT: u64 = 9;

/// A version as kept in `Files/version.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVersion(Version);

impl BuildVersion {
    /// The version written when no version file exists yet.
    pub fn initial() -> Self {
        Self(Version::new(0, 0, 1))
    }

    pub fn new(major: u64, minor: u64, build: u64) -> Self {
        Self(Version::new(major, minor, build))
    }

    /// Parse `major.minor.build`, ignoring surrounding whitespace.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim();
        let version = Version::parse(trimmed).map_err(|e| Error::InvalidVersion {
            content: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(Error::InvalidVersion {
                content: trimmed.to_string(),
                reason: "pre-release and build metadata are not supported".to_string(),
            });
        }
        Ok(Self(version))
    }

    /// Increment the build part. Past 9 it rolls to 0 and bumps minor, which
    /// rolls into major the same way.
    pub fn next(&self) -> Self {
        let Version {
            mut major,
            mut minor,
            patch,
            ..
        } = self.0;
        let mut build = patch + 1;
        if build > ROLLOVER_AT {
            build = 0;
            minor += 1;
            if minor > ROLLOVER_AT {
                minor = 0;
                major += 1;
            }
        }
        Self::new(major, minor, build)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn build(&self) -> u64 {
        self.0.patch
    }
}

impl fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
    }
}
