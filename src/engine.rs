use crate::compartment::Compartment;
use crate::gas::Gas;
use crate::math;
use crate::pressure::{depth_to_pressure, pressure_to_depth};
use crate::zhl_values::ZHL_16C_N2_HE_VALUES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clamp gradient factors into `(0, 1]` with `gf_low <= gf_high` (§4.5).
pub(crate) fn clamp_gf(gf_low: f64, gf_high: f64) -> (f64, f64) {
    let lo = gf_low.clamp(0.01, 1.0);
    let hi = gf_high.clamp(0.01, 1.0);
    if lo > hi {
        (hi, hi)
    } else {
        (lo, hi)
    }
}

/// Deepest depth at which any compartment's gf_low-limited tolerated pressure
/// would be exceeded; the GF-slope anchor for a whole ascent.
pub(crate) fn anchor_first_stop(
    compartments: &[Compartment],
    gf_low: f64,
    surface_pressure: f64,
    water_density: f64,
) -> f64 {
    let mut max_depth = 0.0_f64;
    for c in compartments {
        let p_tol = c.tolerated_ambient_pressure(gf_low);
        if p_tol <= 0. {
            continue;
        }
        let d = pressure_to_depth(p_tol, surface_pressure, water_density);
        if d > max_depth {
            max_depth = d;
        }
    }
    max_depth.max(0.)
}

fn gf_at_depth(d: f64, first_stop: f64, gf_low: f64, gf_high: f64) -> f64 {
    if first_stop <= 0. {
        return gf_high;
    }
    if d >= first_stop {
        gf_low
    } else {
        gf_high - (gf_high - gf_low) * (d / first_stop)
    }
}

fn is_safe(
    compartments: &[Compartment],
    d: f64,
    first_stop: f64,
    gf_low: f64,
    gf_high: f64,
    surface_pressure: f64,
    water_density: f64,
) -> bool {
    const EPS: f64 = 1e-9;
    let p_amb = depth_to_pressure(d, surface_pressure, water_density);
    let gf = gf_at_depth(d, first_stop, gf_low, gf_high);
    compartments.iter().all(|c| {
        let total = c.p_n2 + c.p_he;
        let m = c.m_value(p_amb);
        total <= p_amb + gf * (m - p_amb) + EPS
    })
}

/// Binary-search ceiling solver (§4.5), operating on a bare compartment slice so
/// the deco schedulers can reuse it against their own working tissue copies
/// without constructing a throwaway [`Engine`] on every iteration.
pub(crate) fn ceiling_for(
    compartments: &[Compartment],
    gf_low: f64,
    gf_high: f64,
    fixed_first_stop_depth: Option<f64>,
    surface_pressure: f64,
    water_density: f64,
) -> f64 {
    let (gf_low, gf_high) = clamp_gf(gf_low, gf_high);
    let first_stop = fixed_first_stop_depth
        .unwrap_or_else(|| anchor_first_stop(compartments, gf_low, surface_pressure, water_density));

    if first_stop <= 0. {
        return 0.;
    }

    if is_safe(compartments, 0., first_stop, gf_low, gf_high, surface_pressure, water_density) {
        return 0.;
    }

    let upper_bound = first_stop + 0.1;
    if !is_safe(
        compartments,
        upper_bound,
        first_stop,
        gf_low,
        gf_high,
        surface_pressure,
        water_density,
    ) {
        return first_stop;
    }

    let mut lo = 0.0;
    let mut hi = upper_bound;
    while hi - lo > 0.01 {
        let mid = (lo + hi) / 2.0;
        if is_safe(compartments, mid, first_stop, gf_low, gf_high, surface_pressure, water_density) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    math::ceil(hi * 10.0) / 10.0
}

/// Linear-scan cross-check for [`ceiling_for`]; test-only by design (§4.5).
#[cfg(test)]
pub(crate) fn ceiling_linear_scan(
    compartments: &[Compartment],
    gf_low: f64,
    gf_high: f64,
    fixed_first_stop_depth: Option<f64>,
    surface_pressure: f64,
    water_density: f64,
) -> f64 {
    let (gf_low, gf_high) = clamp_gf(gf_low, gf_high);
    let first_stop = fixed_first_stop_depth
        .unwrap_or_else(|| anchor_first_stop(compartments, gf_low, surface_pressure, water_density));

    if first_stop <= 0. {
        return 0.;
    }
    if is_safe(compartments, 0., first_stop, gf_low, gf_high, surface_pressure, water_density) {
        return 0.;
    }

    let mut d = first_stop + 0.1;
    loop {
        if is_safe(compartments, d, first_stop, gf_low, gf_high, surface_pressure, water_density) {
            return math::ceil(d * 10.0) / 10.0;
        }
        d += 0.1;
    }
}

/// §4.6 NDL, operating on a bare compartment slice.
pub(crate) fn ndl_for(
    compartments: &[Compartment],
    depth: f64,
    gas: &Gas,
    gf: f64,
    surface_pressure: f64,
    water_density: f64,
) -> f64 {
    const NDL_CUTOFF: u32 = 999;
    let gf = gf.clamp(0.01, 1.0);

    if ceiling_for(compartments, gf, gf, None, surface_pressure, water_density) > 0. {
        return 0.;
    }

    let mut sim: alloc::vec::Vec<Compartment> = compartments.to_vec();
    let p_amb = depth_to_pressure(depth, surface_pressure, water_density);

    for t in 1..=NDL_CUTOFF {
        for c in sim.iter_mut() {
            c.apply_constant_depth(p_amb, 1.0, gas);
        }
        let violates_tolerance = sim
            .iter()
            .any(|c| c.tolerated_ambient_pressure(gf) > surface_pressure);
        if violates_tolerance {
            return (t - 1) as f64;
        }
    }

    NDL_CUTOFF as f64
}

/// Owns the 16 ZH-L16C tissue compartments and exposes the safety-critical
/// queries (ceiling, NDL, deco scheduling, bailout) derived from their state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Engine {
    pub(crate) compartments: alloc::vec::Vec<Compartment>,
    pub(crate) water_density: f64,
}

impl Engine {
    /// `surface_pressure` is kept only for symmetry with the richer constructor
    /// contract in the interface (§6); tissues are seeded from
    /// `initial_surface_pressure`, which lets a caller pre-saturate at sea
    /// level and then dive starting from an altitude surface pressure.
    pub fn new(_surface_pressure: f64, water_density: f64, initial_surface_pressure: f64) -> Self {
        let mut engine = Self {
            compartments: alloc::vec::Vec::with_capacity(16),
            water_density,
        };
        engine.initialize_tissues(initial_surface_pressure, &Gas::air());
        engine
    }

    pub(crate) fn from_compartments(
        compartments: alloc::vec::Vec<Compartment>,
        water_density: f64,
    ) -> Self {
        Self {
            compartments,
            water_density,
        }
    }

    /// Reseed every compartment from a surface-equilibrium assumption on `gas`
    /// at `surface_pressure`. Used for altitude acclimatisation modelling.
    pub fn initialize_tissues(&mut self, surface_pressure: f64, gas: &Gas) {
        self.compartments = ZHL_16C_N2_HE_VALUES
            .iter()
            .enumerate()
            .map(|(i, params)| Compartment::new(i as u8 + 1, *params, gas, surface_pressure))
            .collect();
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    pub fn water_density(&self) -> f64 {
        self.water_density
    }

    /// Apply Schreiner integration for an open-circuit segment to every compartment.
    pub fn add_segment(
        &mut self,
        start_depth: f64,
        end_depth: f64,
        time: f64,
        gas: &Gas,
        surface_pressure: f64,
    ) {
        if time <= 0. {
            return;
        }
        let p0 = depth_to_pressure(start_depth, surface_pressure, self.water_density);
        let p1 = depth_to_pressure(end_depth, surface_pressure, self.water_density);
        for c in self.compartments.iter_mut() {
            c.apply_segment(p0, p1, time, gas);
        }
    }

    /// Apply a CCR segment: derives the effective OC-equivalent gas from the
    /// diluent and setpoint (discretising travel into <=0.5m steps per §4.4)
    /// and applies the same Schreiner update per step.
    pub fn add_ccr_segment(
        &mut self,
        start_depth: f64,
        end_depth: f64,
        time: f64,
        diluent: &Gas,
        setpoint: f64,
        surface_pressure: f64,
    ) -> Result<(), crate::error::DecoError> {
        if time <= 0. {
            return Ok(());
        }

        let distance = math::abs(end_depth - start_depth);
        if distance <= 0.01 {
            let p_amb = depth_to_pressure(start_depth, surface_pressure, self.water_density);
            let gas = crate::gas::ccr_effective_gas(p_amb, setpoint, diluent)?;
            for c in self.compartments.iter_mut() {
                c.apply_segment(p_amb, p_amb, time, &gas);
            }
            return Ok(());
        }

        let steps = math::ceil(distance / 0.5).max(1.0) as u32;
        let step_delta = (end_depth - start_depth) / steps as f64;
        let step_time = time / steps as f64;
        let mut cursor = start_depth;

        for _ in 0..steps {
            let next = cursor + step_delta;
            let mid = (cursor + next) / 2.0;
            let p0 = depth_to_pressure(cursor, surface_pressure, self.water_density);
            let p1 = depth_to_pressure(next, surface_pressure, self.water_density);
            let p_mid = depth_to_pressure(mid, surface_pressure, self.water_density);
            let gas = crate::gas::ccr_effective_gas(p_mid, setpoint, diluent)?;
            for c in self.compartments.iter_mut() {
                c.apply_segment(p0, p1, step_time, &gas);
            }
            cursor = next;
        }

        Ok(())
    }

    /// Shallowest depth the diver may currently occupy (§4.5).
    pub fn ceiling(
        &self,
        gf_low: f64,
        gf_high: f64,
        fixed_first_stop_depth: Option<f64>,
        surface_pressure: f64,
    ) -> f64 {
        ceiling_for(
            &self.compartments,
            gf_low,
            gf_high,
            fixed_first_stop_depth,
            surface_pressure,
            self.water_density,
        )
    }

    /// No-decompression limit at `depth` breathing `gas` (§4.6).
    pub fn ndl(&self, depth: f64, gas: &Gas, gf: f64, surface_pressure: f64) -> f64 {
        ndl_for(&self.compartments, depth, gas, gf, surface_pressure, self.water_density)
    }
}
