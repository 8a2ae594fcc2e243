//! CLI output formatting for a `process` run.
//!
//! # Output Format
//!
//! The only output on a successful default run is the global value range
//! measured by the normalizer, taken across all three channels:
//!
//! ```text
//! Minimum value: 0
//! Maximum value: 10
//! ```
//!
//! With `--verbose` the per-channel ranges and the saved file follow as
//! indented context lines:
//!
//! ```text
//! Minimum value: 0
//! Maximum value: 10
//!     red: 0..10
//!     green: 0..10
//!     blue: 77 (constant, preserve)
//! Saved out.hsdec (2x2)
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Errors and diagnostics go
//! to stderr through `main` and the `log` facade, never through here.

use crate::imaging::{ChannelRanges, ConstantChannel};
use crate::process::ProcessReport;
use crate::types::Channel;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Global minimum and maximum across every channel.
pub fn format_range_lines(ranges: &ChannelRanges) -> Vec<String> {
    vec![
        format!("Minimum value: {}", ranges.global_min()),
        format!("Maximum value: {}", ranges.global_max()),
    ]
}

/// One context line per channel: its range, or its value and the policy
/// applied when it is constant.
pub fn format_channel_lines(ranges: &ChannelRanges, policy: ConstantChannel) -> Vec<String> {
    Channel::ALL
        .into_iter()
        .map(|channel| {
            let range = ranges.get(channel);
            if range.is_constant() {
                format!(
                    "{}{}: {} (constant, {})",
                    indent(1),
                    channel,
                    range.min,
                    policy.as_str()
                )
            } else {
                format!("{}{}: {}..{}", indent(1), channel, range.min, range.max)
            }
        })
        .collect()
}

/// Full run summary.
pub fn format_report(report: &ProcessReport, verbose: bool) -> Vec<String> {
    let mut lines = format_range_lines(&report.ranges);
    if verbose {
        lines.extend(format_channel_lines(&report.ranges, report.constant_channel));
        lines.push(format!(
            "Saved {} ({}x{})",
            report.output.display(),
            report.width,
            report.height
        ));
    }
    lines
}

pub fn print_report(report: &ProcessReport, verbose: bool) {
    for line in format_report(report, verbose) {
        println!("{}", line);
    }
}
