pub mod engine;
mod join;
mod queue;
mod regression;
mod translate;

pub use engine::simplify_ring;
pub use queue::SegmentQueue;

use std::f64::consts::PI;

use crate::error::{GeometryError, Result};

/// Tolerances steering the reduction loop.
///
/// Defaults suit building footprints at meter scale:
/// 1 unit of distance tolerance, 5° angle tolerance, 1° collinearity
/// tolerance, no explicit join bound, no merge-first shortcut.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyParams {
    /// Distance tolerance. Segments longer than `tau` are never reworked
    /// (only absorbed by collinear merges).
    pub tau: f64,
    /// Angle tolerance (radians) classifying a short segment's neighbors as
    /// nearly parallel (regression) or nearly anti-parallel (translate).
    pub epsilon: f64,
    /// Collinearity tolerance (radians): bend angles within `delta` of π
    /// trigger a collinear merge.
    pub delta: f64,
    /// Join-distance threshold. Falls back to the popped segment's own
    /// length when `None`; always capped at `tau`.
    pub gamma: Option<f64>,
    /// Bridge two short neighbors directly instead of regressing when the
    /// bridged segment stays under `tau`.
    pub merge_first: bool,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            tau: 1.0,
            epsilon: PI / 36.0,
            delta: PI / 180.0,
            gamma: None,
            merge_first: false,
        }
    }
}

impl SimplifyParams {
    /// Checks all tolerances for range and finiteness.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` naming the offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.tau <= 0.0 || !self.tau.is_finite() {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "tau",
                value: self.tau,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if !(0.0..=PI).contains(&self.epsilon) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "epsilon",
                value: self.epsilon,
                min: 0.0,
                max: PI,
            }
            .into());
        }
        if !(0.0..=PI).contains(&self.delta) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "delta",
                value: self.delta,
                min: 0.0,
                max: PI,
            }
            .into());
        }
        if let Some(gamma) = self.gamma {
            if gamma <= 0.0 || !gamma.is_finite() {
                return Err(GeometryError::ParameterOutOfRange {
                    parameter: "gamma",
                    value: gamma,
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into());
            }
        }
        Ok(())
    }
}
