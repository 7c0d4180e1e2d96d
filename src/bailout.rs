//! Bailout planning: worst-case OC ascent if a planned CCR dive is aborted (§4.10).

use crate::config::DecoConfig;
use crate::engine::Engine;
use crate::error::DecoError;
use crate::gas::Gas;
use crate::segment::{CcrSegment, DiveSegment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of simulating a planned CCR profile and finding the depth along it
/// that would leave the diver with the longest open-circuit time to surface
/// if they bailed out right there.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BailoutAnalysis {
    pub worst_case_depth: f64,
    pub worst_case_tts: f64,
    pub ccr_segments_to_worst_case: alloc::vec::Vec<CcrSegment>,
    pub bailout_schedule: alloc::vec::Vec<DiveSegment>,
}

impl Engine {
    /// Simulate `ccr_profile` from the engine's current tissue state, snapshot
    /// tissue loading after each segment, and compute the OC bailout schedule
    /// from whichever snapshot yields the longest time to surface.
    pub fn calculate_bailout_plan(
        &self,
        ccr_profile: &[CcrSegment],
        diluent: &Gas,
        bailout_gases: &[Gas],
        gf_low: f64,
        gf_high: f64,
        config: &DecoConfig,
        surface_pressure: f64,
    ) -> Result<BailoutAnalysis, DecoError> {
        let mut sim = self.clone();
        let mut snapshots: alloc::vec::Vec<(f64, alloc::vec::Vec<crate::compartment::Compartment>)> =
            alloc::vec::Vec::new();

        for seg in ccr_profile {
            sim.add_ccr_segment(
                seg.start_depth,
                seg.end_depth,
                seg.time,
                diluent,
                seg.setpoint,
                surface_pressure,
            )?;
            snapshots.push((seg.end_depth, sim.compartments.clone()));
        }

        if snapshots.is_empty() {
            snapshots.push((0., self.compartments.clone()));
        }

        let primary_gas = bailout_gases.first().copied().unwrap_or_else(Gas::air);

        let mut worst_idx = 0usize;
        let mut worst_tts = f64::NEG_INFINITY;
        for (i, (depth, comps)) in snapshots.iter().enumerate() {
            let candidate = Engine::from_compartments(comps.clone(), self.water_density);
            let tts = candidate.time_to_surface(
                gf_low,
                gf_high,
                *depth,
                &primary_gas,
                bailout_gases,
                config,
                surface_pressure,
            )?;
            if tts > worst_tts {
                worst_tts = tts;
                worst_idx = i;
            }
        }

        let (worst_depth, worst_compartments) = snapshots[worst_idx].clone();
        let mut worst_engine = Engine::from_compartments(worst_compartments, self.water_density);

        let mut schedule: alloc::vec::Vec<DiveSegment> = alloc::vec::Vec::new();
        if config.troubleshooting_time > 0. {
            worst_engine.add_segment(
                worst_depth,
                worst_depth,
                config.troubleshooting_time,
                &primary_gas,
                surface_pressure,
            );
            schedule.push(DiveSegment::new(
                worst_depth,
                worst_depth,
                config.troubleshooting_time,
                primary_gas,
            ));
        }

        let ascent_schedule = worst_engine.calculate_deco_stops(
            gf_low,
            gf_high,
            worst_depth,
            &primary_gas,
            bailout_gases,
            config,
            surface_pressure,
        )?;
        schedule.extend(ascent_schedule);

        let worst_case_tts = schedule.iter().map(|s| s.time).sum();
        let ccr_segments_to_worst_case = if ccr_profile.is_empty() {
            alloc::vec::Vec::new()
        } else {
            ccr_profile[..=worst_idx].to_vec()
        };

        Ok(BailoutAnalysis {
            worst_case_depth: worst_depth,
            worst_case_tts,
            ccr_segments_to_worst_case,
            bailout_schedule: schedule,
        })
    }
}
