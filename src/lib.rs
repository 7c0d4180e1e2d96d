#![cfg_attr(feature = "no-std", no_std)]
extern crate alloc;

mod bailout;
mod compartment;
mod config;
mod deco;
mod engine;
mod error;
mod gas;
mod math;
mod pressure;
mod segment;
mod zhl_values;

pub use bailout::BailoutAnalysis;
pub use compartment::Compartment;
pub use config::{DecoConfig, GasSwitchMode};
pub use engine::Engine;
pub use error::DecoError;
pub use gas::{ccr_effective_gas, Gas};
pub use pressure::{depth_to_pressure, pressure_to_depth, DEFAULT_SURFACE_PRESSURE, DEFAULT_WATER_DENSITY};
pub use segment::{CcrSegment, DiveSegment};
pub use zhl_values::{ZHLCoefficients, ZHLParams, ZHL_16C_N2_HE_VALUES};

// Re-export Vec and vec macro from alloc for no-std consumers building on the public API.
pub use alloc::vec;
pub use alloc::vec::Vec;
