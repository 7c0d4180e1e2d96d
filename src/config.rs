#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gas-switch timing policy applied when the deco scheduler takes on a richer gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GasSwitchMode {
    /// Instant switch, no time logged.
    #[default]
    Disabled,
    /// At least `gas_switch_time` minutes are spent on the new gas before ascending further.
    Minimum,
    /// `gas_switch_time` minutes are spent on the old gas, then the switch happens.
    Additive,
}

/// Tunables for the ascent/deco scheduler (§3 DecoConfig).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoConfig {
    pub ascent_rate: f64,
    pub surface_rate: f64,
    pub stop_increment: f64,
    pub last_stop_depth: f64,
    pub gas_switch_time: f64,
    pub gas_switch_mode: GasSwitchMode,
    pub troubleshooting_time: f64,
}

impl Default for DecoConfig {
    fn default() -> Self {
        Self {
            ascent_rate: 9.,
            surface_rate: 3.,
            stop_increment: 3.,
            last_stop_depth: 3.,
            gas_switch_time: 1.,
            gas_switch_mode: GasSwitchMode::Disabled,
            troubleshooting_time: 0.,
        }
    }
}

impl DecoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ascent_rate(mut self, ascent_rate: f64) -> Self {
        self.ascent_rate = ascent_rate;
        self
    }

    pub fn with_surface_rate(mut self, surface_rate: f64) -> Self {
        self.surface_rate = surface_rate;
        self
    }

    pub fn with_stop_increment(mut self, stop_increment: f64) -> Self {
        self.stop_increment = stop_increment;
        self
    }

    pub fn with_last_stop_depth(mut self, last_stop_depth: f64) -> Self {
        self.last_stop_depth = last_stop_depth;
        self
    }

    pub fn with_gas_switch_time(mut self, gas_switch_time: f64) -> Self {
        self.gas_switch_time = gas_switch_time;
        self
    }

    pub fn with_gas_switch_mode(mut self, gas_switch_mode: GasSwitchMode) -> Self {
        self.gas_switch_mode = gas_switch_mode;
        self
    }

    pub fn with_troubleshooting_time(mut self, troubleshooting_time: f64) -> Self {
        self.troubleshooting_time = troubleshooting_time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecoConfig::default();
        assert_eq!(config.ascent_rate, 9.);
        assert_eq!(config.surface_rate, 3.);
        assert_eq!(config.stop_increment, 3.);
        assert_eq!(config.last_stop_depth, 3.);
        assert_eq!(config.gas_switch_time, 1.);
        assert_eq!(config.gas_switch_mode, GasSwitchMode::Disabled);
        assert_eq!(config.troubleshooting_time, 0.);
    }

    #[test]
    fn test_builder() {
        let config = DecoConfig::new()
            .with_ascent_rate(10.)
            .with_gas_switch_mode(GasSwitchMode::Additive)
            .with_troubleshooting_time(2.);
        assert_eq!(config.ascent_rate, 10.);
        assert_eq!(config.gas_switch_mode, GasSwitchMode::Additive);
        assert_eq!(config.troubleshooting_time, 2.);
    }
}
