//! Lazy filter list iterator

use std::iter::FusedIterator;

use log::warn;

use crate::error::ParseError;
use crate::parser::parse_line;
use crate::types::Line;

/// Iterator over the parsed lines of a filter list.
///
/// Lines are parsed one at a time as they are requested. A line that fails to
/// parse yields an `Err` and iteration continues with the next line, except
/// for fatal errors (see [`ParseError::is_fatal`]) after which the iterator is
/// exhausted.
#[derive(Debug, Clone)]
pub struct FilterList<I> {
    lines: I,
    line_number: usize,
    failed: bool,
}

/// Parse a filter list from any sequence of lines.
///
/// ```
/// use abp_filters::{parse_filter_list, Line};
///
/// let text = "[Adblock Plus 2.0]\n! Title: Example\n||ads.example.com^";
/// let lines: Vec<Line> = parse_filter_list(text.lines()).collect::<Result<_, _>>().unwrap();
/// assert_eq!(lines.len(), 3);
/// ```
pub fn parse_filter_list<I>(lines: I) -> FilterList<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    FilterList {
        lines: lines.into_iter(),
        line_number: 0,
        failed: false,
    }
}

impl<I> FilterList<I> {
    /// 1-based number of the line most recently returned, 0 before the first.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Pass a line's result through, stopping the list on a fatal error.
    fn record(&mut self, result: Result<Line, ParseError>) -> Result<Line, ParseError> {
        if let Err(err) = &result {
            if err.is_fatal() {
                warn!("stopping at line {}: {}", self.line_number, err);
                self.failed = true;
            }
        }
        result
    }
}

impl<I> Iterator for FilterList<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Line, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let text = self.lines.next()?;
        self.line_number += 1;

        let result = parse_line(text.as_ref());
        Some(self.record(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            self.lines.size_hint()
        }
    }
}

impl<I> FusedIterator for FilterList<I>
where
    I: FusedIterator,
    I::Item: AsRef<str>,
{
}
