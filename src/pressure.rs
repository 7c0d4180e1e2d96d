//! Hydrostatic conversion between depth (m) and absolute pressure (bar).

/// Water-vapour pressure in the lungs at 37°C (Buhlmann's value), bar.
pub const P_H2O: f64 = 0.0627;

/// Standard gravitational acceleration, m/s^2.
pub const GRAVITY: f64 = 9.80665;

/// Default salt-water density, kg/m^3.
pub const DEFAULT_WATER_DENSITY: f64 = 1030.0;

/// Default surface pressure at sea level, bar.
pub const DEFAULT_SURFACE_PRESSURE: f64 = 1.01325;

/// `P_surf + rho * g * d / 100000`.
pub fn depth_to_pressure(depth: f64, surface_pressure: f64, water_density: f64) -> f64 {
    surface_pressure + water_density * GRAVITY * depth / 100_000.
}

/// Inverse of [`depth_to_pressure`].
pub fn pressure_to_depth(pressure: f64, surface_pressure: f64, water_density: f64) -> f64 {
    (pressure - surface_pressure) * 100_000. / (water_density * GRAVITY)
}
