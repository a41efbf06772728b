//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that ties an error kind to the regions of source code it
//! originated from.

#[cfg(test)]
extern crate self as poly_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns this error kind as [`Any`], so that it can be downcast to its concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, or [`None`] if it is a different kind.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Moves every span of this error forward by `offset` bytes.
    ///
    /// Used when an error was produced while parsing a slice of a larger input.
    pub fn offset(mut self, offset: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + offset..span.end + offset;
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to the given writer, using `input` as the source code
    /// the spans point into.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, writer: W) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), writer)
    }

    /// Prints the report for this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_attrs::ErrorKind;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = "something went wrong",
        labels = [format!("look at {} here", what)],
        help = "try something else",
    )]
    struct Oops {
        what: &'static str,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "another thing went wrong", labels = [""])]
    struct Other;

    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.write_report("input", input, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], Oops { what: "this" });
        assert!(err.is::<Oops>());
        assert!(!err.is::<Other>());
        assert_eq!(err.downcast_ref::<Oops>().map(|oops| oops.what), Some("this"));
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![2..3], Oops { what: "the plus" });
        let report = render(&err, "a + b");

        assert!(report.contains("something went wrong"));
        assert!(report.contains("look at the plus here"));
        assert!(report.contains("try something else"));
    }

    #[test]
    fn offset_moves_spans() {
        let err = Error::new(vec![0..2, 3..4], Other).offset(5);
        assert_eq!(err.spans, vec![5..7, 8..9]);
    }
}
