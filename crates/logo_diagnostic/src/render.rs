//! Source-pointing diagnostic rendering.
//!
//! Position-aware error presentation is part of the ambient engineering
//! stack, not a scoped-out feature.

use ariadne::{Label, Report, ReportKind, Source};

use crate::parse_error::ParseError;

/// Render a `ParseError` as a source-pointing report. Falls back to the
/// plain `Display` message when the error carries no span (e.g.
/// `UnexpectedEof`, which by definition names no specific offset).
#[must_use]
pub fn render_parse_error(source_name: &str, source: &str, err: &ParseError) -> String {
    let Some(span) = err.span() else {
        return err.to_string();
    };
    let range = span.as_range();
    let range = range.start.min(source.len())..range.end.min(source.len());

    let mut buf = Vec::new();
    let report = Report::build(ReportKind::Error, (source_name, range.clone()))
        .with_message(err.to_string())
        .with_label(Label::new((source_name, range)).with_message(err.to_string()))
        .finish();
    // `ariadne` writes UTF-8; a cache lookup failure here would be a bug in
    // our own span bookkeeping, not recoverable input, so this unwraps.
    #[allow(clippy::unwrap_used)]
    report
        .write((source_name, Source::from(source)), &mut buf)
        .unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}
