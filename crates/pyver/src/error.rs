use std::fmt::{Display, Formatter};

/// A version string that doesn't follow PEP 440.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("Invalid version `{input}`: {kind}")]
pub struct VersionParseError {
    input: String,
    // Boxed to keep `Result<Version, VersionParseError>` small.
    kind: Box<ErrorKind>,
}

impl VersionParseError {
    pub(crate) fn new(input: &str, kind: ErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind: Box::new(kind),
        }
    }

    /// The rejected input, exactly as it was passed in.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Why the input was rejected.
    pub fn reason(&self) -> InvalidReason {
        self.kind.reason()
    }
}

/// The category of a [`VersionParseError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InvalidReason {
    /// Nothing left after trimming whitespace and the `v` prefix.
    Empty,
    /// Text that doesn't fit the version grammar at the point it appears.
    Syntax,
    /// A release with a leading, trailing or doubled dot, or a signed number.
    ReleaseShape,
    /// A second epoch, pre-release, post-release, dev-release or local marker.
    DuplicateMarker,
    /// A malformed local version label.
    BadLocal,
    /// A character that can never appear in a version.
    BadCharacter,
}

impl InvalidReason {
    /// The stable tag of this reason, e.g. `release_shape`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Syntax => "syntax",
            Self::ReleaseShape => "release_shape",
            Self::DuplicateMarker => "duplicate_marker",
            Self::BadLocal => "bad_local",
            Self::BadCharacter => "bad_character",
        }
    }
}

impl Display for InvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marker that may appear at most once in a version.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Marker {
    Epoch,
    Pre,
    Post,
    Dev,
    Local,
}

impl Display for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Epoch => f.write_str("epoch"),
            Self::Pre => f.write_str("pre-release"),
            Self::Post => f.write_str("post-release"),
            Self::Dev => f.write_str("dev-release"),
            Self::Local => f.write_str("local version"),
        }
    }
}

/// The detailed cause of a [`VersionParseError`]. Positions are byte offsets into the
/// normalized input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ErrorKind {
    Empty,
    InvalidCharacter {
        character: char,
        position: usize,
    },
    NoLeadingNumber,
    EmptyEpoch,
    LeadingDot,
    SignedRelease {
        position: usize,
    },
    EmptyReleaseSegment {
        position: usize,
    },
    TrailingDot,
    NumberTooBig {
        digits: String,
    },
    Duplicate {
        marker: Marker,
        position: usize,
    },
    OutOfOrder {
        marker: Marker,
        after: Marker,
        position: usize,
    },
    UnexpectedTrailing {
        parsed: String,
        remaining: String,
    },
    EmptyLocal,
    EmptyLocalSegment {
        position: usize,
    },
    LocalEdgeSeparator {
        position: usize,
    },
    InvalidLocalCharacter {
        character: char,
        position: usize,
    },
}

impl ErrorKind {
    fn reason(&self) -> InvalidReason {
        match self {
            Self::Empty => InvalidReason::Empty,
            Self::InvalidCharacter { .. } => InvalidReason::BadCharacter,
            Self::NoLeadingNumber
            | Self::EmptyEpoch
            | Self::NumberTooBig { .. }
            | Self::OutOfOrder { .. }
            | Self::UnexpectedTrailing { .. } => InvalidReason::Syntax,
            Self::LeadingDot
            | Self::SignedRelease { .. }
            | Self::EmptyReleaseSegment { .. }
            | Self::TrailingDot => InvalidReason::ReleaseShape,
            Self::Duplicate { .. } => InvalidReason::DuplicateMarker,
            Self::EmptyLocal
            | Self::EmptyLocalSegment { .. }
            | Self::LocalEdgeSeparator { .. }
            | Self::InvalidLocalCharacter { .. } => InvalidReason::BadLocal,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("expected a version, found an empty string"),
            Self::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "character {character:?} at position {position} is not allowed in a version"
            ),
            Self::NoLeadingNumber => f.write_str("expected a version to start with a number"),
            Self::EmptyEpoch => f.write_str("expected a number before the epoch separator `!`"),
            Self::LeadingDot => f.write_str("the release must not start with a dot"),
            Self::SignedRelease { position } => write!(
                f,
                "found a sign at position {position}, release numbers must be non-negative"
            ),
            Self::EmptyReleaseSegment { position } => {
                write!(f, "found an empty release segment at position {position}")
            }
            Self::TrailingDot => f.write_str("the release must not end with a dot"),
            Self::NumberTooBig { digits } => {
                write!(f, "the number `{digits}` is too large to be represented")
            }
            Self::Duplicate { marker, position } => {
                write!(f, "found a second {marker} at position {position}")
            }
            Self::OutOfOrder {
                marker,
                after,
                position,
            } => write!(
                f,
                "found a {marker} at position {position}, which must come before the {after}"
            ),
            Self::UnexpectedTrailing { parsed, remaining } => write!(
                f,
                "after parsing `{parsed}`, found `{remaining}`, which is not part of a valid version"
            ),
            Self::EmptyLocal => f.write_str("expected a local version label after `+`"),
            Self::EmptyLocalSegment { position } => {
                write!(f, "found an empty local version segment at position {position}")
            }
            Self::LocalEdgeSeparator { position } => write!(
                f,
                "the local version label must start and end with a letter or digit, found a \
                 separator at position {position}"
            ),
            Self::InvalidLocalCharacter {
                character,
                position,
            } => write!(
                f,
                "character {character:?} at position {position} is not allowed in a local version"
            ),
        }
    }
}
