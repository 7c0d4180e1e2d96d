use crate::gas::Gas;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A linear depth change (or constant-depth hold, when `start_depth == end_depth`)
/// over `time` minutes on a fixed open-circuit `gas`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveSegment {
    pub start_depth: f64,
    pub end_depth: f64,
    pub time: f64,
    pub gas: Gas,
}

impl DiveSegment {
    pub fn new(start_depth: f64, end_depth: f64, time: f64, gas: Gas) -> Self {
        Self {
            start_depth,
            end_depth,
            time,
            gas,
        }
    }
}

/// A CCR segment: same shape as [`DiveSegment`] but governed by a constant
/// setpoint over a diluent rather than a fixed OC mix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CcrSegment {
    pub start_depth: f64,
    pub end_depth: f64,
    pub time: f64,
    pub setpoint: f64,
}

impl CcrSegment {
    pub fn new(start_depth: f64, end_depth: f64, time: f64, setpoint: f64) -> Self {
        Self {
            start_depth,
            end_depth,
            time,
            setpoint,
        }
    }
}
