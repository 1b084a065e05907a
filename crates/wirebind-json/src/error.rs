//! Decode errors.

use thiserror::Error;

/// A segment of the path at which a decode failure occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// A decode failure annotated with the JSON path at which it occurred.
///
/// Path segments are appended innermost-first as decode calls unwind
/// outward, and rendered outermost-first from the `$` root: fields joined
/// with `.`, indices as `[n]`, e.g. `missing field id at $.items[3]`.
///
/// `Clone` is required because a struct field's default is decoded once and
/// cached; a cached failure re-propagates on every later decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {}", render_path(.context))]
pub struct ParseError {
    message: String,
    context: Vec<PathSegment>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            context: vec![],
        }
    }

    /// Record an enclosing field name as the error propagates outward.
    pub fn push_field(&mut self, name: impl Into<String>) {
        self.context.push(PathSegment::Field(name.into()));
    }

    /// Record an enclosing array index as the error propagates outward.
    pub fn push_index(&mut self, index: usize) {
        self.context.push(PathSegment::Index(index));
    }

    /// The base message, without the path.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The rendered path, rooted at `$`.
    pub fn path(&self) -> String {
        render_path(&self.context)
    }
}

fn render_path(context: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in context.iter().rev() {
        match segment {
            PathSegment::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let err = ParseError::new("expected a number");
        assert_eq!(err.path(), "$");
        assert_eq!(err.to_string(), "expected a number at $");
    }

    #[test]
    fn test_segments_render_outermost_first() {
        // Innermost segment is pushed first, as decode calls unwind
        let mut err = ParseError::new("expected a number");
        err.push_index(1);
        err.push_field("a");
        assert_eq!(err.path(), "$.a[1]");
        assert_eq!(err.to_string(), "expected a number at $.a[1]");
    }

    #[test]
    fn test_nested_fields_and_indices() {
        let mut err = ParseError::new("expected a string");
        err.push_field("name");
        err.push_index(0);
        err.push_field("people");
        assert_eq!(err.path(), "$.people[0].name");
    }
}
