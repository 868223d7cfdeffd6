//! The PEP 440 total order.
//!
//! Versions are compared layer by layer, stopping at the first difference:
//!
//! 1. epoch;
//! 2. release, with the shorter one padded with zeros;
//! 3. the phase of the release (dev < pre < final < post) and the marker numbers within it;
//! 4. no local label < local label;
//! 5. local segments.
//!
//! <https://peps.python.org/pep-0440/#summary-of-permitted-suffixes-and-relative-ordering>

use std::cmp::Ordering;
use std::iter;

use crate::version::{LocalSegment, Prerelease, Version};

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// 1.0.dev456 < 1.0a1 < 1.0a2.dev456 < 1.0a12.dev456 < 1.0a12 < 1.0b1.dev456 < 1.0b2
    /// < 1.0b2.post345.dev456 < 1.0b2.post345 < 1.0c1.dev456 < 1.0c1 < 1.0rc2 < 1.0
    /// < 1.0+abc < 1.0+5 < 1.0.post456.dev34 < 1.0.post456
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_release(&self.release, &other.release))
            .then_with(|| Phase::of(self).cmp(&Phase::of(other)))
            .then_with(|| self.local.as_deref().cmp(&other.local.as_deref()))
    }
}

/// Compare release numbers as if the shorter one were padded with zeros, so that
/// `1.1 == 1.1.0` and `1.16 < 1.19`.
pub(crate) fn compare_release(this: &[u64], other: &[u64]) -> Ordering {
    let len = this.len().max(other.len());
    let this = this.iter().chain(iter::repeat(&0)).take(len);
    let other = other.iter().chain(iter::repeat(&0)).take(len);
    this.cmp(other)
}

/// Where a version sits relative to the final release of its epoch and release numbers.
///
/// The derived order is the PEP 440 order: variants compare by declaration order first, then
/// by their fields in order.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Phase {
    /// A dev release of the final release, e.g. `1.0.dev1`. Sorts before any pre-release.
    Dev(u64),
    /// `1.0rc1`, `1.0rc1.dev2`, `1.0rc1.post3`, ...
    Pre(Prerelease, PostMarker, DevMarker),
    /// `1.0`
    Final,
    /// `1.0.post1` or `1.0.post1.dev2`.
    Post(u64, DevMarker),
}

impl Phase {
    fn of(version: &Version) -> Self {
        match (version.pre, version.post, version.dev) {
            (Some(pre), post, dev) => Self::Pre(pre, PostMarker(post), DevMarker::from(dev)),
            (None, Some(post), dev) => Self::Post(post, DevMarker::from(dev)),
            (None, None, Some(dev)) => Self::Dev(dev),
            (None, None, None) => Self::Final,
        }
    }
}

/// A post-release number inside a pre-release; having none sorts first, which `Option`
/// already does.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd)]
struct PostMarker(Option<u64>);

/// A dev-release number attached to a pre- or post-release. A dev release comes before
/// the release it develops, so having one sorts before having none.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd)]
enum DevMarker {
    Dev(u64),
    None,
}

impl From<Option<u64>> for DevMarker {
    fn from(dev: Option<u64>) -> Self {
        match dev {
            Some(dev) => Self::Dev(dev),
            None => Self::None,
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalSegment {
    /// Numbers compare by value, strings lexicographically, and any number is greater
    /// than any string.
    ///
    /// Number digits carry no leading zeros, so a longer number is always the larger one.
    ///
    /// With this, the `Ord` of `Option<&[LocalSegment]>` is the PEP 440 order of local labels:
    /// no label first, then element-wise, with a longer label winning over its own prefix.
    fn cmp(&self, other: &Self) -> Ordering {
        // <https://peps.python.org/pep-0440/#local-version-identifiers>
        match (self, other) {
            (Self::Number(n1), Self::Number(n2)) => {
                n1.len().cmp(&n2.len()).then_with(|| n1.cmp(n2))
            }
            (Self::String(s1), Self::String(s2)) => s1.cmp(s2),
            (Self::Number(_), Self::String(_)) => Ordering::Greater,
            (Self::String(_), Self::Number(_)) => Ordering::Less,
        }
    }
}
