use crate::error::DecoError;
use crate::pressure::P_H2O;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const FRACTION_SUM_TOLERANCE: f64 = 1e-4;

/// A breathing gas mixture: fractions of O2, He and N2, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gas {
    pub f_o2: f64,
    pub f_he: f64,
    pub f_n2: f64,
    /// Optional maximum operating depth (m), supplied by the caller.
    pub mod_depth: Option<f64>,
}

impl Gas {
    /// Construct from O2 and He fractions; N2 is derived as `1 - fO2 - fHe`.
    pub fn new(f_o2: f64, f_he: f64) -> Result<Self, DecoError> {
        Self::with_mod(f_o2, f_he, None)
    }

    pub fn with_mod(f_o2: f64, f_he: f64, mod_depth: Option<f64>) -> Result<Self, DecoError> {
        if !(0. ..=1.).contains(&f_o2) || !(0. ..=1.).contains(&f_he) {
            return Err(DecoError::InvalidGas);
        }
        let f_n2 = 1. - f_o2 - f_he;
        if f_n2 < -FRACTION_SUM_TOLERANCE || f_n2 > 1. + FRACTION_SUM_TOLERANCE {
            return Err(DecoError::InvalidGas);
        }
        let f_n2 = f_n2.clamp(0., 1.);

        Ok(Self {
            f_o2,
            f_he,
            f_n2,
            mod_depth,
        })
    }

    /// Construct directly from all three fractions, validating they sum to 1.
    pub fn from_fractions(f_o2: f64, f_he: f64, f_n2: f64) -> Result<Self, DecoError> {
        if !(0. ..=1.).contains(&f_o2) || !(0. ..=1.).contains(&f_he) || !(0. ..=1.).contains(&f_n2)
        {
            return Err(DecoError::InvalidGas);
        }
        if (f_o2 + f_he + f_n2 - 1.).abs() > FRACTION_SUM_TOLERANCE {
            return Err(DecoError::InvalidGas);
        }

        Ok(Self {
            f_o2,
            f_he,
            f_n2,
            mod_depth: None,
        })
    }

    pub fn air() -> Self {
        Self::new(0.21, 0.).expect("air fractions are always valid")
    }

    pub fn with_mod_depth(mut self, mod_depth: f64) -> Self {
        self.mod_depth = Some(mod_depth);
        self
    }

    /// Partial pressures of (N2, He) at ambient pressure `p_amb` (bar).
    pub fn partial_pressures(&self, p_amb: f64) -> (f64, f64) {
        (self.f_n2 * p_amb, self.f_he * p_amb)
    }

    /// Alveolar (inspired) partial pressures of (N2, He) at ambient pressure
    /// `p_amb`, accounting for water-vapour dilution in the lungs.
    pub fn inspired_partial_pressures(&self, p_amb: f64) -> (f64, f64) {
        let alveolar = p_amb - P_H2O;
        (self.f_n2 * alveolar, self.f_he * alveolar)
    }

    /// Maximum operating depth for a given ppO2 limit.
    pub fn max_operating_depth(
        &self,
        pp_o2_limit: f64,
        surface_pressure: f64,
        water_density: f64,
    ) -> f64 {
        if self.f_o2 <= 0. {
            return f64::INFINITY;
        }
        let p_amb_limit = pp_o2_limit / self.f_o2;
        crate::pressure::pressure_to_depth(p_amb_limit, surface_pressure, water_density)
    }
}

/// Derives the effective open-circuit-equivalent gas a CCR delivers at a given
/// ambient pressure for a fixed setpoint and diluent.
pub fn ccr_effective_gas(p_amb: f64, setpoint: f64, diluent: &Gas) -> Result<Gas, DecoError> {
    let sp_eff = setpoint.min(p_amb);
    let f_o2 = sp_eff / p_amb;
    let f_inert = 1. - f_o2;
    let d_inert = diluent.f_he + diluent.f_n2;

    if d_inert - f_inert <= 1e-4 {
        return Err(DecoError::CannotDilute);
    }

    let f_he = if d_inert.abs() < 1e-12 {
        0.
    } else {
        f_inert * diluent.f_he / d_inert
    };
    let f_n2 = f_inert - f_he;

    Ok(Gas {
        f_o2,
        f_he,
        f_n2,
        mod_depth: None,
    })
}
