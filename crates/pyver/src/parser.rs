//! A scanner for the PEP 440 version grammar.
//!
//! ```text
//! [N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]
//! ```
//!
//! Every optional marker may be spelled in several ways (`alpha`, `-c`, `_rev`, ...); the
//! scanner tries the spellings of each marker longest first, in the fixed order pre, post,
//! dev, and collapses them into the typed fields of [`Version`] as it goes.

use unscanny::Scanner;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::error::{ErrorKind, Marker};
use crate::normalize::normalize;
use crate::version::{LocalSegment, Prerelease, PrereleaseKind, Version};
use crate::VersionParseError;

/// Separators allowed around and between markers.
const SEPARATORS: [char; 3] = ['.', '-', '_'];

const POST_SPELLINGS: [&str; 3] = ["post", "rev", "r"];

const DEV_SPELLINGS: [&str; 1] = ["dev"];

/// Parse a version, reporting errors against the raw input.
pub(crate) fn parse(input: &str) -> Result<Version, VersionParseError> {
    let normalized = normalize(input);
    Parser::new(&normalized).parse().map_err(|kind| {
        let err = VersionParseError::new(input, kind);
        #[cfg(feature = "tracing")]
        debug!("Rejected version ({}): {err}", err.reason());
        err
    })
}

/// Single-use scanner state over an already normalized version string.
struct Parser<'a> {
    s: Scanner<'a>,
    epoch: Option<u64>,
    release: Vec<u64>,
    pre: Option<Prerelease>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<Vec<LocalSegment>>,
    /// The last marker that was parsed, for out-of-order errors.
    last_marker: Option<Marker>,
}

impl<'a> Parser<'a> {
    fn new(version: &'a str) -> Self {
        Self {
            s: Scanner::new(version),
            epoch: None,
            release: Vec::new(),
            pre: None,
            post: None,
            dev: None,
            local: None,
            last_marker: None,
        }
    }

    fn parse(mut self) -> Result<Version, ErrorKind> {
        if self.s.done() {
            return Err(ErrorKind::Empty);
        }
        self.check_characters()?;

        self.parse_epoch()?;
        self.parse_release()?;
        self.parse_pre()?;
        self.parse_post()?;
        self.parse_dev()?;
        if self.s.eat_if('+') {
            self.parse_local()?;
        }
        if !self.s.done() {
            return Err(self.trailing_error());
        }

        Ok(Version {
            epoch: self.epoch.unwrap_or_default(),
            release: self.release,
            pre: self.pre,
            post: self.post,
            dev: self.dev,
            local: self.local,
        })
    }

    /// Reject anything outside of `[0-9a-z._+!-]` up front, so the rest of the scanner only
    /// ever deals with ASCII.
    fn check_characters(&self) -> Result<(), ErrorKind> {
        let invalid = self.s.string().char_indices().find(|(_, character)| {
            !matches!(character, '0'..='9' | 'a'..='z' | '.' | '-' | '_' | '+' | '!')
        });
        match invalid {
            Some((position, character)) => Err(ErrorKind::InvalidCharacter {
                character,
                position,
            }),
            None => Ok(()),
        }
    }

    /// `N!`, if present.
    fn parse_epoch(&mut self) -> Result<(), ErrorKind> {
        if self.s.at('!') {
            return Err(ErrorKind::EmptyEpoch);
        }
        let start = self.s.cursor();
        let digits = self.s.eat_while(|c: char| c.is_ascii_digit());
        if !digits.is_empty() && self.s.eat_if('!') {
            self.epoch = Some(parse_number(digits)?);
            self.last_marker = Some(Marker::Epoch);
        } else {
            self.s.jump(start);
        }
        Ok(())
    }

    /// `N(.N)*`, stopping at the first dot that isn't followed by a digit.
    fn parse_release(&mut self) -> Result<(), ErrorKind> {
        loop {
            let digits = self.s.eat_while(|c: char| c.is_ascii_digit());
            if digits.is_empty() {
                // Only reachable for the first number, later ones are checked before the dot
                // is consumed.
                return Err(match self.s.peek() {
                    Some('.') => ErrorKind::LeadingDot,
                    Some('-' | '+') if self.is_digit_at(1) => ErrorKind::SignedRelease {
                        position: self.s.cursor(),
                    },
                    Some('!') if self.epoch.is_some() => ErrorKind::Duplicate {
                        marker: Marker::Epoch,
                        position: self.s.cursor(),
                    },
                    _ => ErrorKind::NoLeadingNumber,
                });
            }
            self.release.push(parse_number(digits)?);

            if !self.s.at('.') {
                return Ok(());
            }
            match self.s.scout(1) {
                Some('0'..='9') => {
                    self.s.eat();
                }
                None => return Err(ErrorKind::TrailingDot),
                Some('.') => {
                    return Err(ErrorKind::EmptyReleaseSegment {
                        position: self.s.cursor() + 1,
                    });
                }
                Some('-' | '+') if self.is_digit_at(2) => {
                    return Err(ErrorKind::SignedRelease {
                        position: self.s.cursor() + 1,
                    });
                }
                // The dot starts a marker (`1.0.post1`), or is garbage left for the trailing
                // check.
                Some(_) => return Ok(()),
            }
        }
    }

    /// `[sep](a|b|c|rc|alpha|beta|pre|preview)[sep][N]`
    fn parse_pre(&mut self) -> Result<(), ErrorKind> {
        let Some(kind) = self.eat_pre_kind() else {
            return Ok(());
        };
        let number = self.parse_marker_number()?;
        self.pre = Some(Prerelease { kind, number });
        self.last_marker = Some(Marker::Pre);
        Ok(())
    }

    /// `-N` or `[sep](post|rev|r)[sep][N]`
    fn parse_post(&mut self) -> Result<(), ErrorKind> {
        let post = if self.s.at('-') && self.is_digit_at(1) {
            self.s.eat();
            let digits = self.s.eat_while(|c: char| c.is_ascii_digit());
            parse_number(digits)?
        } else if self.eat_marker(&POST_SPELLINGS) {
            self.parse_marker_number()?
        } else {
            return Ok(());
        };
        self.post = Some(post);
        self.last_marker = Some(Marker::Post);
        Ok(())
    }

    /// `[sep]dev[sep][N]`
    fn parse_dev(&mut self) -> Result<(), ErrorKind> {
        if !self.eat_marker(&DEV_SPELLINGS) {
            return Ok(());
        }
        self.dev = Some(self.parse_marker_number()?);
        self.last_marker = Some(Marker::Dev);
        Ok(())
    }

    /// The label after `+`: alphanumeric segments joined by single `.`, `-` or `_`.
    fn parse_local(&mut self) -> Result<(), ErrorKind> {
        if self.s.done() {
            return Err(ErrorKind::EmptyLocal);
        }
        let mut segments = Vec::new();
        loop {
            let segment = self.s.eat_while(|c: char| c.is_ascii_alphanumeric());
            if segment.is_empty() {
                let position = self.s.cursor();
                return Err(match self.s.peek() {
                    // Only reachable after a separator, `+` followed by nothing is caught above.
                    None => ErrorKind::LocalEdgeSeparator {
                        position: position - 1,
                    },
                    Some('+') => ErrorKind::Duplicate {
                        marker: Marker::Local,
                        position,
                    },
                    Some('.' | '-' | '_') if segments.is_empty() => {
                        ErrorKind::LocalEdgeSeparator { position }
                    }
                    Some('.' | '-' | '_') => ErrorKind::EmptyLocalSegment { position },
                    Some(character) => ErrorKind::InvalidLocalCharacter {
                        character,
                        position,
                    },
                });
            }
            segments.push(parse_local_segment(segment));

            match self.s.peek() {
                None => break,
                Some('.' | '-' | '_') => {
                    self.s.eat();
                }
                Some('+') => {
                    return Err(ErrorKind::Duplicate {
                        marker: Marker::Local,
                        position: self.s.cursor(),
                    });
                }
                Some(character) => {
                    return Err(ErrorKind::InvalidLocalCharacter {
                        character,
                        position: self.s.cursor(),
                    });
                }
            }
        }
        self.local = Some(segments);
        self.last_marker = Some(Marker::Local);
        Ok(())
    }

    /// Try the pre-release spellings after an optional separator. Leaves the cursor where it
    /// was if none matches.
    fn eat_pre_kind(&mut self) -> Option<PrereleaseKind> {
        let start = self.s.cursor();
        self.s.eat_if(SEPARATORS);
        for (spelling, kind) in PrereleaseKind::SPELLINGS {
            if self.s.eat_if(spelling) {
                return Some(kind);
            }
        }
        self.s.jump(start);
        None
    }

    /// Try the given spellings (longest first) after an optional separator. Leaves the cursor
    /// where it was if none matches.
    fn eat_marker(&mut self, spellings: &[&str]) -> bool {
        let start = self.s.cursor();
        self.s.eat_if(SEPARATORS);
        if spellings.iter().any(|spelling| self.s.eat_if(*spelling)) {
            return true;
        }
        self.s.jump(start);
        false
    }

    /// The number after a marker spelling, defaulting to `0`.
    ///
    /// The marker owns one separator after its spelling, whatever follows it: a number
    /// (`1.0a.1`), the end of the public version (`1.0a.`, `1.0.post-+local`) or the next
    /// marker's own separator (`1.0a..dev1`). A separator directly followed by a spelling
    /// (`1.0a.dev1`) is left to the next marker.
    fn parse_marker_number(&mut self) -> Result<u64, ErrorKind> {
        if self.s.at(SEPARATORS) {
            match self.s.scout(1) {
                Some('0'..='9' | '+' | '.' | '-' | '_') | None => {
                    self.s.eat();
                }
                Some(_) => return Ok(0),
            }
        }
        let digits = self.s.eat_while(|c: char| c.is_ascii_digit());
        if digits.is_empty() {
            Ok(0)
        } else {
            parse_number(digits)
        }
    }

    /// Whether the character `offset` characters after the cursor is an ASCII digit.
    fn is_digit_at(&self, offset: isize) -> bool {
        self.s.scout(offset).is_some_and(|c| c.is_ascii_digit())
    }

    /// Explain why scanning stopped before the end of the input.
    ///
    /// Looks at whether the leftover text starts with a marker to tell repeated and misplaced
    /// markers apart from plain garbage.
    fn trailing_error(&mut self) -> ErrorKind {
        let position = self.s.cursor();
        if self.s.at('!') && self.epoch.is_some() {
            return ErrorKind::Duplicate {
                marker: Marker::Epoch,
                position,
            };
        }

        let marker = if self.eat_pre_kind().is_some() {
            Some((Marker::Pre, self.pre.is_some()))
        } else if (self.s.at('-') && self.is_digit_at(1)) || self.eat_marker(&POST_SPELLINGS) {
            Some((Marker::Post, self.post.is_some()))
        } else if self.eat_marker(&DEV_SPELLINGS) {
            Some((Marker::Dev, self.dev.is_some()))
        } else {
            None
        };
        self.s.jump(position);

        match (marker, self.last_marker) {
            (Some((marker, true)), _) => ErrorKind::Duplicate { marker, position },
            (Some((marker, false)), Some(after)) => ErrorKind::OutOfOrder {
                marker,
                after,
                position,
            },
            _ => ErrorKind::UnexpectedTrailing {
                parsed: self.s.before().to_string(),
                remaining: self.s.after().to_string(),
            },
        }
    }
}

/// Parse a run of ASCII digits by value, so leading zeros disappear.
fn parse_number(digits: &str) -> Result<u64, ErrorKind> {
    digits.parse::<u64>().map_err(|_| ErrorKind::NumberTooBig {
        digits: digits.to_string(),
    })
}

/// A local segment is a number if it only has digits, a string otherwise. Numbers here
/// have no size limit.
fn parse_local_segment(segment: &str) -> LocalSegment {
    if segment.bytes().all(|byte| byte.is_ascii_digit()) {
        LocalSegment::number(segment)
    } else {
        LocalSegment::String(segment.to_string())
    }
}

#[cfg(test)]
mod tests;
