//! Reduction diagnostics: counts collected alongside each reduction.
//!
//! These are cheap to gather during the sweep and exist for tuning and
//! for the bench tool. They carry no timings; callers that want
//! durations measure around the call themselves.

use serde::{Deserialize, Serialize};

/// Diagnostics collected from a single reduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionDiagnostics {
    /// Number of vertices in the input path.
    pub input_points: usize,
    /// Number of vertices in the reduced path.
    pub output_points: usize,
    /// Number of pixel columns the sweep entered.
    pub columns: usize,
    /// Index of the decreasing-X point that stopped the sweep, if any.
    pub halted_at: Option<usize>,
    /// `true` when the sweep stopped on decreasing X but the point before
    /// it was not the tracked column maximum.
    pub fill_mismatch: bool,
}

impl ReductionDiagnostics {
    /// Fraction of input vertices that survived (`output / input`).
    ///
    /// Returns `1.0` for an empty input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_ratio(&self) -> f64 {
        if self.input_points == 0 {
            return 1.0;
        }
        self.output_points as f64 / self.input_points as f64
    }

    /// Human-readable multi-line report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Reduction\n{}", "=".repeat(40)));
        lines.push(format!("{:<20} {:>12}", "Input points", self.input_points));
        lines.push(format!("{:<20} {:>12}", "Output points", self.output_points));
        lines.push(format!("{:<20} {:>12}", "Pixel columns", self.columns));
        lines.push(format!(
            "{:<20} {:>11.2}%",
            "Kept",
            self.reduction_ratio() * 100.0
        ));

        match self.halted_at {
            Some(index) => {
                lines.push(format!("{:<20} {:>12}", "Fill return at", index));
                lines.push(format!(
                    "{:<20} {:>12}",
                    "Fill consistent",
                    if self.fill_mismatch { "NO" } else { "yes" }
                ));
            }
            None => lines.push(format!("{:<20} {:>12}", "Fill return at", "-")),
        }

        lines.join("\n")
    }
}
