pub mod amplifier;
pub mod ber;
#[cfg(feature = "cli")]
pub mod cli;
pub mod constants;
pub mod dispersion;
mod error;
mod file;
pub mod link;
mod modulation;
pub mod plot;
pub mod units;

pub use amplifier::{EdfaParams, EdfaReport, GainPoint};
pub use dispersion::{DispersionParams, DispersionReport};
pub use error::{SimulationError, SimulationResult};
pub use file::{load_scenario, Scenario};
pub use link::{LinkBudgetParams, LinkBudgetReport, Medium};
pub use modulation::Modulation;

/// Reports for every model table present in a scenario.
#[derive(Clone, Debug, Default)]
pub struct ScenarioReports {
    pub link_budget: Option<LinkBudgetReport>,
    pub dispersion: Option<DispersionReport>,
    pub amplifier: Option<EdfaReport>,
}

// runs every model table in the scenario, failing atomically on the first
// validation error
pub fn run_scenario(scenario: &Scenario) -> SimulationResult<ScenarioReports> {
    let mut reports = ScenarioReports::default();
    if let Some(params) = &scenario.link_budget {
        reports.link_budget = Some(link::simulate(params)?);
    }
    if let Some(params) = &scenario.dispersion {
        reports.dispersion = Some(dispersion::simulate(params)?);
    }
    if let Some(params) = &scenario.amplifier {
        reports.amplifier = Some(amplifier::simulate(params)?);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_with_two_models() {
        let scenario: Scenario = toml::from_str(
            r#"
            [link_budget]
            optical_power_mw = 10.0
            wavelength_nm = 1550.0
            sensitivity_a_per_w = 0.8
            dark_current_na = 10.0
            bandwidth_ghz = 10.0
            noise_temperature_k = 300.0
            distance_m = 1000.0
            medium = "fiber"

            [amplifier]
            input_power_dbm = -20.0
            signal_wavelength_nm = 1550.0
            pump_power_mw = 100.0
            pump_wavelength_nm = 980.0
            fiber_length_m = 10.0
            er_concentration_ppm = 1000.0
            saturation_power_mw = 10.0
            "#,
        )
        .unwrap();
        let reports = run_scenario(&scenario).unwrap();
        assert!(reports.link_budget.is_some());
        assert!(reports.amplifier.is_some());
        assert!(reports.dispersion.is_none());
    }

    #[test]
    fn invalid_table_fails_whole_scenario() {
        let scenario: Scenario = toml::from_str(
            r#"
            [amplifier]
            input_power_dbm = -20.0
            signal_wavelength_nm = 1550.0
            pump_power_mw = 0.0
            pump_wavelength_nm = 980.0
            fiber_length_m = 10.0
            er_concentration_ppm = 1000.0
            saturation_power_mw = 10.0
            "#,
        )
        .unwrap();
        assert!(run_scenario(&scenario).is_err());
    }
}
