use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use abp_filters::{parse_filter_list, Line, ParseError};

/// Parse outcome of a single filter list file.
#[derive(Debug, Default)]
pub struct ListReport {
    pub lines: usize,
    /// Successfully parsed lines by kind name (`blocking filter`, `comment`, ...).
    pub kinds: BTreeMap<String, usize>,
    /// Failed lines with their 1-based line number.
    pub errors: Vec<(usize, ParseError)>,
}

impl ListReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// JSON line emitted by `abp-cli parse`.
#[derive(Serialize)]
pub struct ParsedRecord<'a> {
    pub line: usize,
    #[serde(flatten)]
    pub record: &'a Line,
}

pub fn read_list(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}

/// Parse every line of `content`, counting records by kind and collecting errors.
pub fn scan_list(content: &str) -> ListReport {
    let mut report = ListReport::default();
    let mut lines = parse_filter_list(content.lines());

    while let Some(result) = lines.next() {
        let line_number = lines.line_number();
        report.lines = line_number;
        match result {
            Ok(line) => *report.kinds.entry(line.kind().to_string()).or_default() += 1,
            Err(err) => report.errors.push((line_number, err)),
        }
    }

    report
}

pub fn format_error(path: &Path, line_number: usize, err: &ParseError) -> String {
    format!("{}:{}: {}", path.display(), line_number, err)
}

/// Closing stderr line for a non-strict `parse` run, `None` when every line parsed.
pub fn failure_summary(failed: usize, lines: usize) -> Option<String> {
    match failed {
        0 => None,
        1 => Some(format!("1 of {lines} lines failed to parse")),
        _ => Some(format!("{failed} of {lines} lines failed to parse")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn counts_kinds_and_errors() {
        let content = "[Adblock Plus 2.0]\n! Title: x\n||a.com^\n||b.com^\n%bad%\nx.com##.ad\n";
        let report = scan_list(content);

        assert_eq!(report.lines, 6);
        assert_eq!(report.kinds["blocking filter"], 2);
        assert_eq!(report.kinds["hiding filter"], 1);
        assert_eq!(report.kinds["metadata"], 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, 5);
        assert_eq!(report.kinds["header"], 1);
        assert_eq!(report.kinds.values().sum::<usize>(), 5);
        assert!(!report.is_clean());
    }

    #[test]
    fn clean_list_report() {
        let report = scan_list("! a

! Title: x");
        assert_eq!(report.lines, 3);
        assert_eq!(report.kinds["emptyline"], 1);
        assert!(report.is_clean());
    }

    #[test]
    fn parsed_record_json_has_line_and_type() {
        let line = abp_filters::parse_line("! Title: x").unwrap();
        let json = serde_json::to_value(ParsedRecord { line: 3, record: &line }).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["type"], "metadata");
        assert_eq!(json["key"], "Title");
    }

    #[test]
    fn reads_list_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "! hello").unwrap();
        let content = read_list(file.path()).unwrap();
        assert_eq!(content, "! hello\n");

        let err = read_list(Path::new("/nonexistent/list.txt")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }

    #[test]
    fn summarizes_failed_lines() {
        assert_eq!(failure_summary(0, 10), None);
        assert_eq!(failure_summary(1, 10).as_deref(), Some("1 of 10 lines failed to parse"));
        assert_eq!(failure_summary(3, 10).as_deref(), Some("3 of 10 lines failed to parse"));
    }

    #[test]
    fn formats_errors_with_location() {
        let err = abp_filters::parse_line("[Adblock 1.1]").unwrap_err();
        assert_eq!(
            format_error(Path::new("list.txt"), 7, &err),
            "list.txt:7: Malformed header in \"[Adblock 1.1]\""
        );
    }
}
