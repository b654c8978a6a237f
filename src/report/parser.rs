//! Parser for the solver's fixed-format stdout report.

use crate::error::ReportError;

use super::result::{HeaderStats, InstanceReport, Timestep};

/// Number of labeled header lines at the top of a report.
///
/// This is the report format version in all but name: a future solver
/// emitting more (or fewer) stats changes this constant, not the parser.
pub const HEADER_LINE_COUNT: usize = 3;

/// Delimiter between a header label and its value.
const HEADER_DELIMITER: &str = ":\t";

/// Parses a raw solver report into its unaggregated form.
///
/// The report contract is line-oriented:
/// 1. [`HEADER_LINE_COUNT`] lines of `label:<tab>value`, kept verbatim.
/// 2. One separator line, discarded.
/// 3. One row per agent, `<anything><tab><completionTime>`, where the
///    completion time is one-indexed and stored zero-indexed.
///
/// Parsing is all-or-nothing: any malformed line fails the whole report.
pub fn parse_report(raw: &str) -> Result<InstanceReport, ReportError> {
    let lines: Vec<&str> = raw.trim().lines().collect();

    // Headers plus the separator; agent rows may legitimately be absent.
    let min_lines = HEADER_LINE_COUNT + 1;
    if lines.len() < min_lines {
        return Err(ReportError::Truncated {
            expected: min_lines,
            got: lines.len(),
        });
    }

    let mut stats = HeaderStats::default();
    for (index, line) in lines[..HEADER_LINE_COUNT].iter().enumerate() {
        let (label, value) =
            line.split_once(HEADER_DELIMITER)
                .ok_or_else(|| ReportError::MalformedHeader {
                    index,
                    line: (*line).to_string(),
                })?;
        stats.push(label, value);
    }

    // lines[HEADER_LINE_COUNT] is the separator line.
    let rows = &lines[HEADER_LINE_COUNT + 1..];
    let mut agents_span: Vec<Timestep> = Vec::with_capacity(rows.len());
    for (index, line) in rows.iter().enumerate() {
        let field = line
            .split('\t')
            .nth(1)
            .ok_or_else(|| ReportError::MalformedAgentRow {
                index,
                line: (*line).to_string(),
            })?;
        let one_indexed: Timestep =
            field
                .parse()
                .map_err(|source| ReportError::InvalidCompletionTime {
                    index,
                    value: field.to_string(),
                    source,
                })?;
        agents_span.push(one_indexed - 1);
    }

    Ok(InstanceReport { stats, agents_span })
}
