use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Crate-wide failure kinds. The core never panics; every fallible operation
/// surfaces one of these instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecoError {
    /// Gas fractions out of range, or `fO2 + fHe + fN2` doesn't sum to 1 within tolerance.
    InvalidGas,
    /// CCR effective-gas derivation impossible for the given (depth, setpoint, diluent).
    CannotDilute,
    /// The deco scheduler hit its iteration cap without converging.
    MaxDurationExceeded,
}

impl fmt::Display for DecoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoError::InvalidGas => {
                write!(f, "gas fractions must be in [0,1] and sum to 1 within 1e-4")
            }
            DecoError::CannotDilute => write!(
                f,
                "diluent can't supply enough inert gas at this depth/setpoint combination"
            ),
            DecoError::MaxDurationExceeded => write!(
                f,
                "deco schedule iteration cap exceeded: dive profile not survivable under the given configuration"
            ),
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for DecoError {}
