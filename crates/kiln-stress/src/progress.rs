//! Carriage-return progress bar for stress mode.
//!
//! The bar rewrites itself in place, so output goes through unbuffered
//! writes with an explicit flush rather than line printing.

use std::io::{self, Write};

/// Renders `world_ms` against the frame budget as a fixed-width bar.
#[derive(Clone, Debug)]
pub struct ProgressBar {
    width: usize,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self { width: 12 }
    }
}

impl ProgressBar {
    /// A bar with the given number of fill cells.
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }

    /// Format one bar line, e.g. `[####        ]   12.34 / 1000.00 ms  (1.2%)`.
    pub fn render(&self, world_ms: f64, budget_ms: f64) -> String {
        let ratio = if budget_ms > 0.0 {
            (world_ms / budget_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let filled = (ratio * self.width as f64).round() as usize;
        let mut bar = String::with_capacity(self.width);
        for i in 0..self.width {
            bar.push(if i < filled { '#' } else { ' ' });
        }
        format!(
            "[{bar}]  {world_ms:6.2} / {budget_ms:7.2} ms  ({:.1}%)",
            ratio * 100.0
        )
    }

    /// Rewrite the bar in place on `out` and flush.
    pub fn draw(&self, out: &mut impl Write, world_ms: f64, budget_ms: f64) -> io::Result<()> {
        write!(out, "\r{}", self.render(world_ms, budget_ms))?;
        out.flush()
    }
}
