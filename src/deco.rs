//! OC and CCR deco-stop scheduling (§4.7-4.9).

use crate::compartment::Compartment;
use crate::config::{DecoConfig, GasSwitchMode};
use crate::engine::{anchor_first_stop, ceiling_for, Engine};
use crate::error::DecoError;
use crate::gas::{ccr_effective_gas, Gas};
use crate::math;
use crate::pressure::depth_to_pressure;
use crate::segment::{CcrSegment, DiveSegment};

const MAX_ITERATIONS: u32 = 100_000;
const SURFACE_EPSILON: f64 = 0.01;
const CEILING_EPSILON: f64 = 1e-9;

/// Stop-grid policy (§4.9): snaps `depth` down to the next multiple of
/// `stop_increment`, applying the last-stop-depth rule.
pub(crate) fn next_stop(depth: f64, config: &DecoConfig) -> f64 {
    let inc = config.stop_increment;
    let mut n = math::floor(depth / inc) * inc;
    if math::abs(n - depth) < 1e-6 {
        n -= inc;
    }
    if n > 0. && n < config.last_stop_depth {
        n = if depth > config.last_stop_depth {
            config.last_stop_depth
        } else {
            0.
        };
    }
    n.max(0.)
}

fn gases_equal(a: &Gas, b: &Gas) -> bool {
    math::abs(a.f_o2 - b.f_o2) < 1e-3 && math::abs(a.f_he - b.f_he) < 1e-3
}

fn apply_stop(
    compartments: &mut [Compartment],
    depth: f64,
    dt: f64,
    gas: &Gas,
    surface_pressure: f64,
    water_density: f64,
) {
    let p = depth_to_pressure(depth, surface_pressure, water_density);
    for c in compartments.iter_mut() {
        c.apply_segment(p, p, dt, gas);
    }
}

fn push_oc_stop(segments: &mut alloc::vec::Vec<DiveSegment>, depth: f64, dt: f64, gas: Gas) {
    if let Some(last) = segments.last_mut() {
        if last.start_depth == last.end_depth
            && last.end_depth == depth
            && gases_equal(&last.gas, &gas)
        {
            last.time += dt;
            return;
        }
    }
    segments.push(DiveSegment::new(depth, depth, dt, gas));
}

fn push_oc_ascent(segments: &mut alloc::vec::Vec<DiveSegment>, from: f64, to: f64, dt: f64, gas: Gas) {
    if let Some(last) = segments.last_mut() {
        if last.end_depth == from && last.start_depth != last.end_depth && gases_equal(&last.gas, &gas)
        {
            last.end_depth = to;
            last.time += dt;
            return;
        }
    }
    segments.push(DiveSegment::new(from, to, dt, gas));
}

fn push_ccr_stop(segments: &mut alloc::vec::Vec<CcrSegment>, depth: f64, dt: f64, setpoint: f64) {
    if let Some(last) = segments.last_mut() {
        if last.start_depth == last.end_depth && last.end_depth == depth {
            last.time += dt;
            return;
        }
    }
    segments.push(CcrSegment::new(depth, depth, dt, setpoint));
}

fn push_ccr_ascent(segments: &mut alloc::vec::Vec<CcrSegment>, from: f64, to: f64, dt: f64, setpoint: f64) {
    if let Some(last) = segments.last_mut() {
        if last.end_depth == from && last.start_depth != last.end_depth {
            last.end_depth = to;
            last.time += dt;
            return;
        }
    }
    segments.push(CcrSegment::new(from, to, dt, setpoint));
}

struct SwitchGas {
    gas: Gas,
    switch_depth: f64,
    taken: bool,
}

fn build_switch_gases(deco_gases: &[Gas], stop_increment: f64) -> alloc::vec::Vec<SwitchGas> {
    let mut gases: alloc::vec::Vec<SwitchGas> = deco_gases
        .iter()
        .map(|g| {
            let switch_depth = match g.mod_depth {
                Some(mod_depth) if mod_depth.is_finite() => {
                    (math::floor(mod_depth / stop_increment) * stop_increment).max(0.)
                }
                _ => f64::INFINITY,
            };
            SwitchGas {
                gas: *g,
                switch_depth,
                taken: false,
            }
        })
        .collect();
    gases.sort_by(|a, b| b.switch_depth.partial_cmp(&a.switch_depth).unwrap());
    gases
}

fn pick_switch_gas(gases: &mut [SwitchGas], depth: f64, current_gas: &Gas) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, sg) in gases.iter().enumerate() {
        if sg.taken {
            continue;
        }
        // safe_at(depth): this gas's MOD-derived switch depth must be at or
        // below the current depth, i.e. we've already reached (or passed) it.
        if depth > sg.switch_depth + CEILING_EPSILON {
            continue;
        }
        if gases_equal(&sg.gas, current_gas) {
            continue;
        }
        let is_better = match best {
            None => true,
            Some(bi) => {
                let cur = &gases[bi].gas;
                sg.gas.f_o2 > cur.f_o2 + CEILING_EPSILON
                    || (math::abs(sg.gas.f_o2 - cur.f_o2) <= CEILING_EPSILON && sg.gas.f_he > cur.f_he)
            }
        };
        if is_better {
            best = Some(i);
        }
    }
    best
}

impl Engine {
    /// Open-circuit multi-gas deco schedule from `current_depth` to the surface (§4.7).
    pub fn calculate_deco_stops(
        &self,
        gf_low: f64,
        gf_high: f64,
        current_depth: f64,
        bottom_gas: &Gas,
        deco_gases: &[Gas],
        config: &DecoConfig,
        surface_pressure: f64,
    ) -> Result<alloc::vec::Vec<DiveSegment>, DecoError> {
        let water_density = self.water_density;
        let mut compartments = self.compartments.clone();
        let first_stop = anchor_first_stop(&compartments, gf_low, surface_pressure, water_density);
        let mut switch_gases = build_switch_gases(deco_gases, config.stop_increment);

        let mut depth = current_depth;
        let mut gas = *bottom_gas;
        let mut segments: alloc::vec::Vec<DiveSegment> = alloc::vec::Vec::new();
        let mut iterations: u32 = 0;

        while depth > SURFACE_EPSILON {
            iterations += 1;
            if iterations > MAX_ITERATIONS {
                return Err(DecoError::MaxDurationExceeded);
            }

            let next = next_stop(depth, config);

            if let Some(idx) = pick_switch_gas(&mut switch_gases, depth, &gas) {
                let new_gas = switch_gases[idx].gas;
                switch_gases[idx].taken = true;
                match config.gas_switch_mode {
                    GasSwitchMode::Disabled => {
                        gas = new_gas;
                    }
                    GasSwitchMode::Minimum => {
                        gas = new_gas;
                        let dt = config.gas_switch_time;
                        apply_stop(&mut compartments, depth, dt, &gas, surface_pressure, water_density);
                        push_oc_stop(&mut segments, depth, dt, gas);
                    }
                    GasSwitchMode::Additive => {
                        let dt = config.gas_switch_time;
                        apply_stop(&mut compartments, depth, dt, &gas, surface_pressure, water_density);
                        push_oc_stop(&mut segments, depth, dt, gas);
                        gas = new_gas;
                    }
                }
                continue;
            }

            let ceiling = ceiling_for(
                &compartments,
                gf_low,
                gf_high,
                Some(first_stop),
                surface_pressure,
                water_density,
            );

            if ceiling <= next + CEILING_EPSILON {
                let duration = (depth - next) / config.ascent_rate;
                if duration > 0. {
                    let p0 = depth_to_pressure(depth, surface_pressure, water_density);
                    let p1 = depth_to_pressure(next, surface_pressure, water_density);
                    for c in compartments.iter_mut() {
                        c.apply_segment(p0, p1, duration, &gas);
                    }
                    push_oc_ascent(&mut segments, depth, next, duration, gas);
                }
                depth = next;
            } else {
                let dt = 1.0;
                apply_stop(&mut compartments, depth, dt, &gas, surface_pressure, water_density);
                push_oc_stop(&mut segments, depth, dt, gas);
            }
        }

        Ok(segments)
    }

    /// CCR deco schedule on a constant setpoint over a single diluent (§4.8).
    pub fn calculate_ccr_deco_stops(
        &self,
        gf_low: f64,
        gf_high: f64,
        current_depth: f64,
        diluent: &Gas,
        setpoint: f64,
        config: &DecoConfig,
        surface_pressure: f64,
    ) -> Result<alloc::vec::Vec<CcrSegment>, DecoError> {
        let water_density = self.water_density;
        let mut compartments = self.compartments.clone();
        let first_stop = anchor_first_stop(&compartments, gf_low, surface_pressure, water_density);

        let mut depth = current_depth;
        let mut segments: alloc::vec::Vec<CcrSegment> = alloc::vec::Vec::new();
        let mut iterations: u32 = 0;

        while depth > SURFACE_EPSILON {
            iterations += 1;
            if iterations > MAX_ITERATIONS {
                return Err(DecoError::MaxDurationExceeded);
            }

            let next = next_stop(depth, config);
            let ceiling = ceiling_for(
                &compartments,
                gf_low,
                gf_high,
                Some(first_stop),
                surface_pressure,
                water_density,
            );

            if ceiling <= next + CEILING_EPSILON {
                let duration = (depth - next) / config.ascent_rate;
                if duration > 0. {
                    let mid = (depth + next) / 2.0;
                    let p_mid = depth_to_pressure(mid, surface_pressure, water_density);
                    let gas = ccr_effective_gas(p_mid, setpoint, diluent)?;
                    let p0 = depth_to_pressure(depth, surface_pressure, water_density);
                    let p1 = depth_to_pressure(next, surface_pressure, water_density);
                    for c in compartments.iter_mut() {
                        c.apply_segment(p0, p1, duration, &gas);
                    }
                    push_ccr_ascent(&mut segments, depth, next, duration, setpoint);
                }
                depth = next;
            } else {
                let dt = 1.0;
                let p = depth_to_pressure(depth, surface_pressure, water_density);
                let gas = ccr_effective_gas(p, setpoint, diluent)?;
                for c in compartments.iter_mut() {
                    c.apply_segment(p, p, dt, &gas);
                }
                push_ccr_stop(&mut segments, depth, dt, setpoint);
            }
        }

        Ok(segments)
    }

    /// Total minutes to reach the surface on OC, including all stops (§4.7).
    pub fn time_to_surface(
        &self,
        gf_low: f64,
        gf_high: f64,
        current_depth: f64,
        bottom_gas: &Gas,
        deco_gases: &[Gas],
        config: &DecoConfig,
        surface_pressure: f64,
    ) -> Result<f64, DecoError> {
        let segments = self.calculate_deco_stops(
            gf_low,
            gf_high,
            current_depth,
            bottom_gas,
            deco_gases,
            config,
            surface_pressure,
        )?;
        Ok(segments.iter().map(|s| s.time).sum())
    }
}
