//! Conversion state owned by a caller such as an editor.
//!
//! A [`Session`] holds the current source text and the outcome of the most
//! recent conversion. It never converts on its own: callers decide when
//! (and how often) to call [`Session::convert`].

use crate::error::Result;
use crate::options::Options;
use crate::query::{SelectorEngine, SelectorQuery};
use crate::stats::Statistics;
use crate::transform::{ConversionResult, convert_with};

/// Output of one successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub markup: String,
    pub result: ConversionResult,
    pub statistics: Statistics,
}

/// Source text plus the last conversion made from it.
pub struct Session<Q: SelectorQuery = SelectorEngine> {
    source: String,
    options: Options,
    query: Q,
    last: Option<Report>,
}

impl Session<SelectorEngine> {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_query(source, SelectorEngine)
    }
}

impl<Q: SelectorQuery> Session<Q> {
    pub fn with_query(source: impl Into<String>, query: Q) -> Self {
        Self {
            source: source.into(),
            options: Options::default(),
            query,
            last: None,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace the source text. The previous report stays available until
    /// the next [`convert`](Self::convert).
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Convert the current source.
    ///
    /// On failure the previous report is discarded so stale output is never
    /// shown next to an error.
    pub fn convert(&mut self) -> Result<&Report> {
        let conversion = match convert_with(&self.source, &self.query, &self.options) {
            Ok(conversion) => conversion,
            Err(e) => {
                self.last = None;
                return Err(e);
            }
        };

        let statistics = Statistics::compute(
            &conversion.stats,
            self.source.len(),
            conversion.markup.len(),
        );
        Ok(&*self.last.insert(Report {
            markup: conversion.markup,
            result: conversion.stats,
            statistics,
        }))
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_on_demand() {
        let mut session = Session::new("<svg><style>rect{fill:red}</style><rect/></svg>");
        assert!(session.last_report().is_none());

        let report = session.convert().unwrap();
        assert_eq!(report.markup, r#"<svg><rect style="fill:red"/></svg>"#);
        assert_eq!(report.statistics.converted_styles, 1);
        assert_eq!(report.statistics.processed_elements, 1);
        assert!(session.last_report().is_some());
    }

    #[test]
    fn test_failure_clears_last_report() {
        let mut session = Session::new("<svg/>");
        session.convert().unwrap();

        session.set_source("<svg>");
        assert!(session.convert().is_err());
        assert!(session.last_report().is_none());
        assert_eq!(session.source(), "<svg>");
    }

    #[test]
    fn test_statistics_use_formatted_output() {
        let mut session = Session::new("<svg><rect/></svg>").with_options(Options::pretty());
        let report = session.convert().unwrap();
        assert_eq!(report.markup, "<svg>\n  <rect/>\n</svg>");
        assert_eq!(report.statistics.size_change, 4);
    }
}
