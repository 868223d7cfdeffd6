//! Parsing, normalization and ordering of Python package versions, following
//! [PEP 440](https://peps.python.org/pep-0440).
//!
//! ```rust
//! use std::cmp::Ordering;
//!
//! let rc = pyver::parse("1.0-RC1").unwrap();
//! let final_release = pyver::parse("v1.0.0").unwrap();
//!
//! assert_eq!(rc.to_string(), "1.0rc1");
//! assert_eq!(pyver::compare(&rc, &final_release), Ordering::Less);
//! ```
//!
//! A version is read in three steps:
//!
//! * the input is trimmed, lowercased and stripped of a leading `v` ([`normalize`]);
//! * the remaining text is scanned left to right into epoch, release, pre-, post- and
//!   dev-release markers and a local label, collapsing every spelling alias on the way;
//! * the resulting [`Version`] renders back to a single canonical form ([`canonical`]).
//!
//! Ordering between versions is total, but it is not the order of the canonical strings:
//!
//! * trailing zeros in the release are ignored (`1.0 == 1.0.0`) even though the canonical
//!   form keeps them;
//! * a dev release without a pre-release sorts before every pre-release of the same release,
//!   while a dev release attached to a pre- or post-release sorts just below it;
//! * a local label sorts after the same public version without one, and its segments are
//!   compared with numbers ranking above strings.
#![deny(missing_docs)]

use std::borrow::Cow;
use std::cmp::Ordering;

pub use crate::error::{InvalidReason, VersionParseError};
pub use crate::normalize::normalize;
pub use crate::version::{LocalSegment, Prerelease, PrereleaseKind, Version};

mod compare;
mod error;
mod normalize;
mod parser;
mod version;

/// Parse a version string such as `1.19`, `v1.0-rc1` or `1!2.0.post3+ubuntu.1`.
///
/// Equivalent to [`Version::from_str`](std::str::FromStr::from_str).
pub fn parse(version: &str) -> Result<Version, VersionParseError> {
    parser::parse(version)
}

/// Compare two parsed versions.
///
/// This is the same order as [`Ord`] on [`Version`].
pub fn compare(left: &Version, right: &Version) -> Ordering {
    left.cmp(right)
}

/// Compare two parsed versions, returning `-1`, `0` or `1`.
pub fn compare_signum(left: &Version, right: &Version) -> i8 {
    match compare(left, right) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// The normalized form of a version, e.g. `1.0rc1` for `1.0-RC1`.
pub fn canonical(version: &Version) -> String {
    version.to_string()
}

/// Parse and render a version in one step.
///
/// Returns the input unchanged (borrowed) if it already is in canonical form.
pub fn canonicalize(version: &str) -> Result<Cow<'_, str>, VersionParseError> {
    let parsed = parse(version)?;
    let canonical = canonical(&parsed);
    if canonical == version {
        Ok(Cow::Borrowed(version))
    } else {
        Ok(Cow::Owned(canonical))
    }
}
