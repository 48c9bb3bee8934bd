/// Boltzmann constant in J/K (SI units).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Speed of light in vacuum in m/s (SI units).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
