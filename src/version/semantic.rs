//! Semantic Versioning Struct
//!
//! Holds the numeric triple of a semantic version number. Pre-release and
//! build suffixes are not stored; the composer appends the feature-branch
//! suffix to the rendered string instead.

use std::fmt;

/// The Semantic data structure represents a semantic version number as the
/// triple of major, minor and patch components.
///
/// Ordering is lexicographic over the triple.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Semantic {
    pub(crate) major: u32,
    pub(crate) minor: u32,
    pub(crate) patch: u32,
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Semantic {
    /// Create a new version from its components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Semantic {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string.
    ///
    /// Accepts `major.minor` or `major.minor.patch`; a missing patch
    /// component defaults to 0. Anything after the first `-` is discarded,
    /// so `2.0-rc1` parses as `2.0.0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use monosv::Semantic;
    ///
    /// let version = Semantic::parse("1.2").unwrap();
    /// assert_eq!("1.2.0", version.to_string());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let text = match text.split_once('-') {
            Some((version, _suffix)) => version,
            None => text,
        };

        let mut components = text.split('.');
        let major = components.next()?.parse().ok()?;
        let minor = components.next()?.parse().ok()?;
        let patch = match components.next() {
            Some(patch) => patch.parse().ok()?,
            None => 0,
        };
        if components.next().is_some() {
            log::trace!("`{text}` has more than three version components");
            return None;
        }

        Some(Semantic {
            major,
            minor,
            patch,
        })
    }

    /// Two versions are in the same series when major and minor are equal.
    pub fn same_series(&self, other: &Semantic) -> bool {
        self.major == other.major && self.minor == other.minor
    }

    /// Increment the patch component of the version number by 1
    pub fn increment_patch(&mut self) -> &mut Self {
        self.patch += 1;
        self
    }

    /// Report the major version number
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Report the minor version number
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Report the patch version number
    pub fn patch(&self) -> u32 {
        self.patch
    }
}
