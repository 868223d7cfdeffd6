use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::VersionParseError;

/// The kind of a pre-release, ordered alpha < beta < release candidate.
///
/// <https://peps.python.org/pep-0440/#pre-releases>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PrereleaseKind {
    /// `a`, also spelled `alpha`
    Alpha,
    /// `b`, also spelled `beta`
    Beta,
    /// `rc`, also spelled `c`, `pre` or `preview`
    Rc,
}

impl PrereleaseKind {
    /// Every accepted spelling with the kind it stands for, longest spelling first so that a
    /// scanner trying them in order never stops at a prefix of a longer alias.
    pub(crate) const SPELLINGS: [(&'static str, Self); 8] = [
        ("preview", Self::Rc),
        ("alpha", Self::Alpha),
        ("beta", Self::Beta),
        ("pre", Self::Rc),
        ("rc", Self::Rc),
        ("a", Self::Alpha),
        ("b", Self::Beta),
        ("c", Self::Rc),
    ];

    /// The canonical tag, one of `a`, `b` or `rc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::Rc => "rc",
        }
    }
}

impl FromStr for PrereleaseKind {
    type Err = String;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        let lowercase = kind.to_ascii_lowercase();
        Self::SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == lowercase)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| format!("`{kind}` isn't recognized as alpha, beta or release candidate"))
    }
}

impl Display for PrereleaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-release marker such as `a1` or `rc0`.
///
/// Ordered by kind first, then by number.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Prerelease {
    /// Alpha, beta or release candidate.
    pub kind: PrereleaseKind,
    /// The number after the kind, `0` when it was omitted.
    pub number: u64,
}

impl Display for Prerelease {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

/// One dot-separated part of a [local version label](https://peps.python.org/pep-0440/#local-version-identifiers).
///
/// A segment made only of digits is a number, everything else is a lowercase string. When
/// compared, numbers always rank above strings (see the `Ord` impl in `compare.rs`).
///
/// Numbers are kept as their digits since a local label has no length limit
/// (`1.0+20240101123456789012`).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LocalSegment {
    /// A segment containing at least one letter.
    String(String),
    /// A segment made of ASCII digits only, leading zeros dropped (`"0"` for zero).
    Number(String),
}

impl LocalSegment {
    /// A numeric segment from a run of ASCII digits, with leading zeros dropped.
    pub(crate) fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self::Number("0".to_string())
        } else {
            Self::Number(trimmed.to_string())
        }
    }

    /// Bring a segment into the form the parser produces. Hands back the segment's text if
    /// no local label could spell it.
    fn into_canonical(self) -> Result<Self, String> {
        let text = match self {
            Self::String(string) => string,
            Self::Number(digits) => {
                if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
                    return Err(digits);
                }
                digits
            }
        };
        if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
            return Err(text);
        }
        if text.bytes().all(|byte| byte.is_ascii_digit()) {
            Ok(Self::number(&text))
        } else {
            Ok(Self::String(text.to_ascii_lowercase()))
        }
    }
}

impl Display for LocalSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(string) => f.write_str(string),
            Self::Number(digits) => f.write_str(digits),
        }
    }
}

/// A parsed version such as `1.2.3` or `4!5.6.7a8.post9.dev10+local.11`.
///
/// `Eq`, `Ord` and `Hash` follow the PEP 440 ordering, not the fields: `1.0` and `1.0.0`
/// are equal, yet each renders as itself.
///
/// Parse with [`crate::parse`] or [`Version::from_str`]:
///
/// ```rust
/// use std::str::FromStr;
/// use pyver::Version;
///
/// let version = Version::from_str("1.19").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Version {
    pub(crate) epoch: u64,
    pub(crate) release: Vec<u64>,
    pub(crate) pre: Option<Prerelease>,
    pub(crate) post: Option<u64>,
    pub(crate) dev: Option<u64>,
    pub(crate) local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// A final release with the given release numbers, e.g. `[3, 12]` for `3.12`.
    ///
    /// # Panics
    ///
    /// When `release` is empty; every version has at least one release number.
    pub fn new(release: impl IntoIterator<Item = u64>) -> Self {
        let release: Vec<u64> = release.into_iter().collect();
        assert!(!release.is_empty(), "a version needs at least one release number");
        Self {
            epoch: 0,
            release,
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// Set the [epoch](https://peps.python.org/pep-0440/#version-epochs).
    #[must_use]
    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Set or clear the pre-release marker.
    #[must_use]
    pub fn with_pre(mut self, pre: Option<Prerelease>) -> Self {
        self.pre = pre;
        self
    }

    /// Set or clear the post-release number.
    #[must_use]
    pub fn with_post(mut self, post: Option<u64>) -> Self {
        self.post = post;
        self
    }

    /// Set or clear the dev-release number.
    #[must_use]
    pub fn with_dev(mut self, dev: Option<u64>) -> Self {
        self.dev = dev;
        self
    }

    /// Set the local version label. An empty label clears it.
    ///
    /// Segments are stored the way the parser would produce them: strings are lowercased,
    /// digit-only strings become numbers and numbers lose their leading zeros.
    ///
    /// # Panics
    ///
    /// When a segment is empty or has a character other than an ASCII letter or digit, or
    /// when a number segment has anything but digits. No local label spells such a segment.
    #[must_use]
    pub fn with_local(mut self, local: Vec<LocalSegment>) -> Self {
        self.local = if local.is_empty() {
            None
        } else {
            Some(
                local
                    .into_iter()
                    .map(|segment| {
                        segment.into_canonical().unwrap_or_else(|text| {
                            panic!("`{text}` is not a valid local version segment")
                        })
                    })
                    .collect(),
            )
        };
        self
    }

    /// The epoch, `0` unless given as `N!`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The release numbers, e.g. `[1, 2, 0]` for `1.2.0`. Never empty.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The release numbers without trailing zeros, as the ordering sees them.
    ///
    /// May be empty for releases like `0.0`.
    pub fn release_trimmed(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|number| *number != 0)
            .map_or(0, |index| index + 1);
        &self.release[..end]
    }

    /// The first release number.
    pub fn major(&self) -> u64 {
        self.release.first().copied().unwrap_or_default()
    }

    /// The second release number, or `0`.
    pub fn minor(&self) -> u64 {
        self.release.get(1).copied().unwrap_or_default()
    }

    /// The third release number, or `0`.
    pub fn micro(&self) -> u64 {
        self.release.get(2).copied().unwrap_or_default()
    }

    /// The pre-release marker, if any.
    pub fn pre(&self) -> Option<Prerelease> {
        self.pre
    }

    /// The post-release number, if any.
    pub fn post(&self) -> Option<u64> {
        self.post
    }

    /// The dev-release number, if any.
    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// The local version label segments, if any. Never an empty slice.
    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// Whether this is an alpha, beta or release candidate.
    pub fn is_pre(&self) -> bool {
        self.pre.is_some()
    }

    /// Whether this is a post-release.
    pub fn is_post(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a dev-release.
    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this has a local version label (e.g. `1.2.3+ubuntu1`).
    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// Whether this is a pre-release or a dev-release.
    pub fn any_prerelease(&self) -> bool {
        self.is_pre() || self.is_dev()
    }

    /// Whether this is neither a pre-release nor a dev-release. Post-releases are stable.
    pub fn is_stable(&self) -> bool {
        !self.any_prerelease()
    }

    /// The same version with the local label removed.
    #[must_use]
    pub fn without_local(&self) -> Self {
        Self {
            local: None,
            ..self.clone()
        }
    }

    /// Only the epoch and release, e.g. `1!2.3` for `1!2.3rc1.post2+abc`.
    #[must_use]
    pub fn only_release(&self) -> Self {
        Self {
            epoch: self.epoch,
            release: self.release.clone(),
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// The canonical string form, same as [`Display`].
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses a version such as `1.19`, `1.0a1`, `1.0+abc.5` or `1!2012.2`.
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(version)
    }
}

/// Renders the canonical form.
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let mut release = self.release.iter();
        if let Some(first) = release.next() {
            write!(f, "{first}")?;
        }
        for number in release {
            write!(f, ".{number}")?;
        }
        if let Some(pre) = &self.pre {
            write!(f, "{pre}")?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        if let Some(local) = &self.local {
            let mut segments = local.iter();
            if let Some(first) = segments.next() {
                write!(f, "+{first}")?;
            }
            for segment in segments {
                write!(f, ".{segment}")?;
            }
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Hashes the fields the ordering looks at, which means skipping trailing release zeros.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        self.release_trimmed().hash(state);
        self.pre.hash(state);
        self.post.hash(state);
        self.dev.hash(state);
        self.local.hash(state);
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PrereleaseKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PrereleaseKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
