//! Template validation and segment scanning.
//!
//! A template is literal text interleaved with `{name}` placeholders
//! ("holes"). Validation happens once at bind time; emitters re-scan the
//! template into [`Segment`]s when generating code.

use thiserror::Error;

/// Outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// Brackets balance with exactly one level of nesting.
    pub well_formed: bool,
    /// Number of holes seen before the scan finished or stopped.
    pub holes: usize,
}

/// Validate the bracket structure of a template and count its holes.
///
/// The scan stops at the first nested `{` or unmatched `}`; the hole count
/// is whatever had accumulated by then.
pub fn validate(template: &str) -> Validation {
    let mut depth = 0usize;
    let mut holes = 0usize;

    for byte in template.bytes() {
        match byte {
            b'{' => {
                if depth > 0 {
                    return Validation { well_formed: false, holes };
                }
                depth += 1;
                holes += 1;
            }
            b'}' => {
                if depth != 1 {
                    return Validation { well_formed: false, holes };
                }
                depth = 0;
            }
            _ => {}
        }
    }

    Validation {
        well_formed: depth == 0,
        holes,
    }
}

/// An immutable template string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn validate(&self) -> Validation {
        validate(&self.0)
    }

    /// Whether the template is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Re-scan the template into literal and hole segments.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            rest: &self.0,
            offset: 0,
        }
    }

    /// Names written inside the holes, in template order.
    ///
    /// Stops at the first scan error.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments()
            .map_while(Result::ok)
            .filter_map(|segment| match segment {
                Segment::Hole(name) => Some(name),
                Segment::Literal(_) => None,
            })
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// One piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text between holes. Never empty.
    Literal(&'a str),
    /// The text between `{` and `}`.
    Hole(&'a str),
}

/// Inconsistency found while re-scanning a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("unclosed '{{' at byte {offset}")]
    UnclosedHole { offset: usize },

    #[error("unmatched '}}' at byte {offset}")]
    UnmatchedClose { offset: usize },

    #[error("nested '{{' at byte {offset}")]
    NestedHole { offset: usize },
}

/// Iterator returned by [`Template::segments`].
///
/// Fused after the first error.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> Segments<'a> {
    fn fail(&mut self, err: SegmentError) -> Option<Result<Segment<'a>, SegmentError>> {
        self.rest = "";
        Some(Err(err))
    }

    fn advance(&mut self, len: usize) {
        self.rest = &self.rest[len..];
        self.offset += len;
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Segment<'a>, SegmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let rest = self.rest;
        match rest.find(['{', '}']) {
            None => {
                self.advance(rest.len());
                Some(Ok(Segment::Literal(rest)))
            }
            Some(pos) if pos > 0 => {
                self.advance(pos);
                Some(Ok(Segment::Literal(&rest[..pos])))
            }
            Some(_) if rest.starts_with('}') => {
                let offset = self.offset;
                self.fail(SegmentError::UnmatchedClose { offset })
            }
            Some(_) => {
                let open = self.offset;
                let body = &rest[1..];
                match body.find(['{', '}']) {
                    Some(end) if body.as_bytes()[end] == b'}' => {
                        self.advance(end + 2);
                        Some(Ok(Segment::Hole(&body[..end])))
                    }
                    Some(end) => self.fail(SegmentError::NestedHole {
                        offset: open + 1 + end,
                    }),
                    None => self.fail(SegmentError::UnclosedHole { offset: open }),
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}
