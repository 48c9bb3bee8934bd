//! TOML scenario loading.
//!
//! A scenario file holds one or more model tables:
//!
//! ```toml
//! [link_budget]
//! optical_power_mw = 10.0
//! wavelength_nm = 1550.0
//! sensitivity_a_per_w = 0.8
//! dark_current_na = 10.0
//! bandwidth_ghz = 10.0
//! noise_temperature_k = 300.0
//! distance_m = 1000.0
//! medium = "air"
//! ```

use std::fs;

use serde::Deserialize;
use tracing::info;

use crate::amplifier::EdfaParams;
use crate::dispersion::DispersionParams;
use crate::error::{SimulationError, SimulationResult};
use crate::link::LinkBudgetParams;

/// A parsed scenario file. Each present table is run independently.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub link_budget: Option<LinkBudgetParams>,
    pub dispersion: Option<DispersionParams>,
    pub amplifier: Option<EdfaParams>,
}

impl Scenario {
    /// True if the file held no model table at all.
    pub fn is_empty(&self) -> bool {
        self.link_budget.is_none() && self.dispersion.is_none() && self.amplifier.is_none()
    }
}

/// Loads and parses a scenario file.
pub fn load_scenario(path: &str) -> SimulationResult<Scenario> {
    info!(path, "loading scenario");
    let content = fs::read_to_string(path)?;
    let scenario: Scenario = toml::from_str(&content)?;
    if scenario.is_empty() {
        return Err(SimulationError::Scenario(format!(
            "{path} contains no [link_budget], [dispersion], or [amplifier] table"
        )));
    }
    Ok(scenario)
}
