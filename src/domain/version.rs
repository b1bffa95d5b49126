use crate::error::{PodPublishError, Result};
use std::fmt;
use std::str::FromStr;

/// Strict `major.minor.patch` version as written in a podspec
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version literal (e.g., "1.2.3" -> Version(1,2,3))
    ///
    /// Exactly three components of ASCII digits are accepted; leading zeros
    /// are read as their numeric value (`1.02.3` is 1.2.3).
    pub fn parse(literal: &str) -> Result<Self> {
        let parts: Vec<&str> = literal.split('.').collect();
        if parts.len() != 3 {
            return Err(PodPublishError::malformed_version(format!(
                "'{}' - expected major.minor.patch",
                literal
            )));
        }

        let major = parse_component(literal, "major", parts[0])?;
        let minor = parse_component(literal, "minor", parts[1])?;
        let patch = parse_component(literal, "patch", parts[2])?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Next patch release; major and minor are untouched
    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| {
            PodPublishError::malformed_version(format!("patch component of {} overflows", self))
        })?;

        Ok(Version { patch, ..*self })
    }
}

fn parse_component(literal: &str, name: &str, part: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PodPublishError::malformed_version(format!(
            "'{}' - invalid {} component '{}'",
            literal, name, part
        )));
    }

    part.parse::<u32>().map_err(|_| {
        PodPublishError::malformed_version(format!(
            "'{}' - {} component '{}' is out of range",
            literal, name, part
        ))
    })
}

impl FromStr for Version {
    type Err = PodPublishError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_zeroes() {
        assert_eq!(Version::parse("0.0.0").unwrap(), Version::new(0, 0, 0));
        assert_eq!(Version::parse("10.20.30").unwrap(), Version::new(10, 20, 30));
    }

    #[test]
    fn test_version_parse_wrong_component_count() {
        assert!(matches!(
            Version::parse("1.2"),
            Err(PodPublishError::MalformedVersion(_))
        ));
        assert!(matches!(
            Version::parse("1.2.3.4"),
            Err(PodPublishError::MalformedVersion(_))
        ));
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_version_parse_non_numeric() {
        assert!(matches!(
            Version::parse("a.b.c"),
            Err(PodPublishError::MalformedVersion(_))
        ));
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("1.2.3-beta").is_err());
        assert!(Version::parse("1.+2.3").is_err());
        assert!(Version::parse("1. 2.3").is_err());
    }

    #[test]
    fn test_version_parse_leading_zero() {
        assert_eq!(Version::parse("1.02.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(Version::parse("00.0.007").unwrap(), Version::new(0, 0, 7));
    }

    #[test]
    fn test_version_parse_out_of_range() {
        let err = Version::parse("1.2.99999999999").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_bump_patch_keeps_major_minor() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump_patch().unwrap(), Version::new(1, 2, 4));

        let v = Version::new(7, 0, 9);
        assert_eq!(v.bump_patch().unwrap(), Version::new(7, 0, 10));
    }

    #[test]
    fn test_bump_patch_overflow() {
        let v = Version::new(1, 2, u32::MAX);
        assert!(matches!(
            v.bump_patch(),
            Err(PodPublishError::MalformedVersion(_))
        ));
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new(1, 2, 3) < Version::new(1, 2, 4));
        assert!(Version::new(1, 9, 9) < Version::new(2, 0, 0));
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 99));
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
        assert_eq!("4.5.6".parse::<Version>().unwrap(), Version::new(4, 5, 6));
    }
}
