//! Compiled path patterns.
//!
//! # Responsibilities
//! - Compile a path template into literal/capture segments
//! - Match a request path segment-wise, extracting captures in one pass
//! - Provide the structural equality that merges duplicate registrations
//!
//! # Design Decisions
//! - Literal comparison is ASCII-case-insensitive; captures keep the
//!   request's original case
//! - A capture matches any run of characters excluding `/`, including the
//!   empty run
//! - Segment counts must agree exactly (a trailing slash is a real, empty
//!   segment and must be present in both pattern and path)

use crate::error::RouterError;
use std::fmt;

/// One piece of a mixed segment: literal text or a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Literal(String),
    Capture,
}

/// One `/`-delimited segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Fixed text, matched case-insensitively.
    Literal(String),
    /// A placeholder spanning the whole segment.
    Capture,
    /// Literal text interleaved with captures, e.g. `v{1}.{2}`.
    Mixed(Vec<Piece>),
}

/// A compiled path pattern.
///
/// Equality is structural: all placeholders normalize to the same capture
/// form, so two templates differing only in placeholder numbers compile to
/// equal patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
    capture_count: usize,
}

impl PathPattern {
    /// Compile the path portion of a template, returning the pattern and the
    /// placeholder numbers in left-to-right encounter order (aligned with
    /// capture order).
    ///
    /// Placeholder values outside `1..=param_count` fail compilation; brace
    /// groups that are not all-decimal (`{id}`) stay literal text.
    pub(crate) fn compile(
        path: &str,
        param_count: usize,
    ) -> Result<(Self, Vec<usize>), RouterError> {
        let mut places = Vec::new();
        let mut segments = Vec::new();
        for raw in path.split('/') {
            segments.push(compile_segment(raw, param_count, &mut places)?);
        }
        let capture_count = places.len();
        Ok((
            Self {
                segments,
                capture_count,
            },
            places,
        ))
    }

    /// Match a request path against this pattern. Returns the captured
    /// substrings in capture order, or `None` if the path does not match
    /// in full.
    pub fn matches(&self, path: &str) -> Option<Vec<String>> {
        let mut captures = Vec::with_capacity(self.capture_count);
        let mut path_segments = path.split('/');
        let mut pattern_segments = self.segments.iter();
        loop {
            match (pattern_segments.next(), path_segments.next()) {
                (None, None) => return Some(captures),
                (Some(segment), Some(text)) => {
                    if !match_segment(segment, text, &mut captures) {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }

    pub fn capture_count(&self) -> usize {
        self.capture_count
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                Segment::Literal(lit) => f.write_str(lit)?,
                Segment::Capture => f.write_str("{}")?,
                Segment::Mixed(pieces) => {
                    for piece in pieces {
                        match piece {
                            Piece::Literal(lit) => f.write_str(lit)?,
                            Piece::Capture => f.write_str("{}")?,
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Range-check a placeholder value against the handler's parameter count.
pub(crate) fn validate_place(place: u64, param_count: usize) -> Result<usize, RouterError> {
    if place == 0 || place > param_count as u64 {
        tracing::error!(
            placeholder = place,
            max = param_count,
            "Parameter placeholder out of range"
        );
        return Err(RouterError::PlaceholderOutOfRange {
            placeholder: place,
            max: param_count,
        });
    }
    Ok(place as usize)
}

fn compile_segment(
    raw: &str,
    param_count: usize,
    places: &mut Vec<usize>,
) -> Result<Segment, RouterError> {
    let mut pieces: Vec<Piece> = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let group = after.find('}').map(|close| &after[..close]);
        match group {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                literal.push_str(&rest[..open]);
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                let place = digits.parse::<u64>().unwrap_or(u64::MAX);
                places.push(validate_place(place, param_count)?);
                pieces.push(Piece::Capture);
                rest = &after[digits.len() + 1..];
            }
            _ => {
                // unterminated or non-decimal group: the brace is literal text
                literal.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    literal.push_str(rest);

    if pieces.is_empty() {
        return Ok(Segment::Literal(literal));
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    if pieces.len() == 1 {
        // single capture spanning the segment
        return Ok(Segment::Capture);
    }
    Ok(Segment::Mixed(pieces))
}

fn match_segment(segment: &Segment, text: &str, captures: &mut Vec<String>) -> bool {
    match segment {
        Segment::Literal(lit) => lit.eq_ignore_ascii_case(text),
        Segment::Capture => {
            captures.push(text.to_string());
            true
        }
        Segment::Mixed(pieces) => match_mixed(pieces, text, captures),
    }
}

fn match_mixed(pieces: &[Piece], text: &str, captures: &mut Vec<String>) -> bool {
    let mut rest = text;
    let mut i = 0;
    while i < pieces.len() {
        match &pieces[i] {
            Piece::Literal(lit) => {
                match rest.get(..lit.len()) {
                    Some(head) if head.eq_ignore_ascii_case(lit) => rest = &rest[lit.len()..],
                    _ => return false,
                }
            }
            Piece::Capture => match pieces.get(i + 1) {
                None => {
                    captures.push(rest.to_string());
                    rest = "";
                }
                Some(Piece::Capture) => captures.push(String::new()),
                Some(Piece::Literal(lit)) => {
                    // a trailing literal anchors at the end of the segment;
                    // an inner one binds to its leftmost occurrence
                    let at = if i + 2 == pieces.len() {
                        rest.len()
                            .checked_sub(lit.len())
                            .filter(|&p| matches_at(rest, p, lit))
                    } else {
                        find_ignore_ascii_case(rest, lit)
                    };
                    let Some(at) = at else { return false };
                    captures.push(rest[..at].to_string());
                    rest = &rest[at..];
                }
            },
        }
        i += 1;
    }
    rest.is_empty()
}

fn matches_at(haystack: &str, at: usize, needle: &str) -> bool {
    haystack
        .get(at..at + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle))
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    (0..=haystack.len().saturating_sub(needle.len()))
        .find(|&at| haystack.is_char_boundary(at) && matches_at(haystack, at, needle))
}
