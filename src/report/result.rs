//! Parsed report shapes: header statistics, agent spans, aggregates.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Completion timestep reported by the solver (zero-indexed once parsed).
pub type Timestep = i64;

/// Ordered mapping from a header label to its raw string value.
///
/// Insertion order matches the report's line order and is preserved on
/// iteration; lookup is by label. Values are kept verbatim, with no type
/// coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStats {
    entries: Vec<(String, String)>,
}

impl HeaderStats {
    /// Appends a label/value entry, preserving report order.
    pub(crate) fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }

    /// Looks up a value by its label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates entries in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The raw (unaggregated) outcome of one solver run.
///
/// An empty `agents_span` is legal in this shape; only aggregation
/// requires at least one agent row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceReport {
    /// Header statistics, in report order.
    pub stats: HeaderStats,
    /// Per-agent completion timesteps, zero-indexed, in report row order.
    pub agents_span: Vec<Timestep>,
}

impl InstanceReport {
    /// Maximum completion timestep across agents.
    pub fn makespan(&self) -> Result<Timestep, ReportError> {
        self.agents_span
            .iter()
            .copied()
            .max()
            .ok_or(ReportError::EmptyInstance)
    }

    /// Sum of completion timesteps across agents (total time traveled).
    pub fn ttt(&self) -> Timestep {
        self.agents_span.iter().sum()
    }

    /// Converts into the aggregated result shape.
    ///
    /// Fails when the report listed no agents, since makespan is
    /// undefined for an empty span.
    pub fn aggregate(self) -> Result<InstanceResult, ReportError> {
        let makespan = self.makespan()?;
        let ttt = self.ttt();
        Ok(InstanceResult {
            stats: self.stats,
            makespan,
            ttt,
        })
    }
}

/// The aggregated outcome of one solver run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceResult {
    /// Header statistics, in report order.
    pub stats: HeaderStats,
    /// Maximum completion timestep across agents.
    pub makespan: Timestep,
    /// Sum of completion timesteps across agents.
    pub ttt: Timestep,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> HeaderStats {
        let mut s = HeaderStats::default();
        s.push("cost", "42");
        s.push("time", "10");
        s
    }

    #[test]
    fn test_header_stats_lookup_and_order() {
        let s = stats();
        assert_eq!(s.get("cost"), Some("42"));
        assert_eq!(s.get("time"), Some("10"));
        assert_eq!(s.get("missing"), None);

        let labels: Vec<&str> = s.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["cost", "time"]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_aggregates() {
        let report = InstanceReport {
            stats: stats(),
            agents_span: vec![4, 11, 7],
        };
        assert_eq!(report.makespan().unwrap(), 11);
        assert_eq!(report.ttt(), 22);

        let result = report.aggregate().unwrap();
        assert_eq!(result.makespan, 11);
        assert_eq!(result.ttt, 22);
        assert_eq!(result.stats.get("cost"), Some("42"));
    }

    #[test]
    fn test_empty_span_raw_vs_aggregate() {
        let report = InstanceReport {
            stats: stats(),
            agents_span: Vec::new(),
        };
        // Raw form is valid with no agents; ttt of nothing is 0.
        assert!(report.agents_span.is_empty());
        assert_eq!(report.ttt(), 0);

        assert!(matches!(
            report.makespan(),
            Err(ReportError::EmptyInstance)
        ));
        assert!(matches!(
            report.aggregate(),
            Err(ReportError::EmptyInstance)
        ));
    }
}
