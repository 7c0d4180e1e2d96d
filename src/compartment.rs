use crate::gas::Gas;
use crate::math;
use crate::pressure::P_H2O;
use crate::zhl_values::ZHLParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One ZH-L16C tissue compartment: its loaded inert-gas partial pressures and
/// the coefficients needed to compute M-value / tolerated-pressure limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compartment {
    pub no: u8,
    pub p_n2: f64,
    pub p_he: f64,
    params: ZHLParams,
}

impl Compartment {
    /// New compartment pre-saturated to a surface-equilibrium state on the given
    /// gas at `surface_pressure` (bar).
    pub fn new(no: u8, params: ZHLParams, gas: &Gas, surface_pressure: f64) -> Self {
        let (p_n2, p_he) = gas.inspired_partial_pressures(surface_pressure);
        Self {
            no,
            p_n2,
            p_he,
            params,
        }
    }

    fn k_n2(&self) -> f64 {
        math::ln(2.) / self.params.0
    }

    fn k_he(&self) -> f64 {
        math::ln(2.) / self.params.3
    }

    /// Schreiner equation: integrate gas loading over a segment of `time` minutes
    /// during which ambient pressure moves linearly from `p0` to `p1`, breathing `gas`.
    pub fn apply_segment(&mut self, p0: f64, p1: f64, time: f64, gas: &Gas) {
        if time <= 0. {
            return;
        }

        self.p_n2 = schreiner(self.p_n2, p0, p1, time, gas.f_n2, self.k_n2());
        self.p_he = schreiner(self.p_he, p0, p1, time, gas.f_he, self.k_he());
    }

    /// Constant-depth decay over `delta_t` minutes (closed form, used by NDL simulation).
    pub fn apply_constant_depth(&mut self, p_amb: f64, delta_t: f64, gas: &Gas) {
        let (alv_n2, alv_he) = gas.inspired_partial_pressures(p_amb);
        self.p_n2 = alv_n2 + (self.p_n2 - alv_n2) * math::exp(-self.k_n2() * delta_t);
        self.p_he = alv_he + (self.p_he - alv_he) * math::exp(-self.k_he() * delta_t);
    }

    /// Inert-load-weighted (a, b) coefficients for this compartment's current state.
    fn weighted_ab(&self) -> (f64, f64) {
        let total = self.p_n2 + self.p_he;
        if total < 1e-10 {
            return (0., 0.);
        }
        let (_, a_n2, b_n2, _, a_he, b_he) = self.params;
        let a = (a_n2 * self.p_n2 + a_he * self.p_he) / total;
        let b = (b_n2 * self.p_n2 + b_he * self.p_he) / total;
        (a, b)
    }

    /// M-value: tolerated inert-gas partial pressure at ambient pressure `p_amb`.
    pub fn m_value(&self, p_amb: f64) -> f64 {
        let total = self.p_n2 + self.p_he;
        if total < 1e-10 {
            return 0.;
        }
        let (a, b) = self.weighted_ab();
        p_amb / b + a
    }

    /// Shallowest ambient pressure at which the current inert load stays within
    /// the gf-gradient of the M-value.
    pub fn tolerated_ambient_pressure(&self, gf: f64) -> f64 {
        let total = self.p_n2 + self.p_he;
        if total < 1e-10 {
            return 0.;
        }
        let (a, b) = self.weighted_ab();
        (total - a * gf) / (gf / b + 1. - gf)
    }
}

fn schreiner(p_initial: f64, p0: f64, p1: f64, time: f64, f_inert: f64, k: f64) -> f64 {
    let p_alv_0 = (p0 - P_H2O) * f_inert;
    let rate = ((p1 - p0) / time) * f_inert;
    p_alv_0 + rate * (time - 1. / k) - (p_alv_0 - p_initial - rate / k) * math::exp(-k * time)
}
