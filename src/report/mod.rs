//! Solver report parsing and aggregation.
//!
//! Turns the solver's fixed-format stdout block into structured results:
//! labeled header statistics plus the per-agent completion-time span, with
//! makespan (max) and total-time-traveled (sum) derived from the span.
//!
//! Both result shapes are public because downstream consumers use either:
//! [`InstanceReport`] keeps the raw span, [`InstanceResult`] carries the
//! aggregates.

pub mod parser;
pub mod result;

pub use parser::{parse_report, HEADER_LINE_COUNT};
pub use result::{HeaderStats, InstanceReport, InstanceResult, Timestep};
