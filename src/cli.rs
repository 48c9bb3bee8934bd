use std::process;

use tracing_subscriber::EnvFilter;

use crate::amplifier::EdfaReport;
use crate::dispersion::DispersionReport;
use crate::link::LinkBudgetReport;
use crate::{load_scenario, plot, run_scenario, ScenarioReports};

pub struct Config {}

impl Config {
    pub fn run(args: &[String]) -> Result<Config, Box<dyn std::error::Error>> {
        if args.len() < 2 {
            return Err("not enough arguments".into());
        }

        if args.len() > 2 {
            return Err(
                "too many arguments, expecting only 2, such as `opticlink filepath`".into(),
            );
        }

        // Check for special flags
        match args[1].as_str() {
            "--version" | "-v" => {
                print_version();
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .ok();

        let cwd = std::env::current_dir()?;
        // cargo run arg[1], such as cargo run files/link_budget.toml
        // opticlink arg[1], such as opticlink files/link_budget.toml
        let file_path = args[1].clone();
        println!("Scenario Path: {}", file_path);
        let full_path_to_scenario = cwd.join(file_path);
        println!("Full Path: {}", full_path_to_scenario.display());

        let scenario = load_scenario(&full_path_to_scenario.display().to_string())?;
        let reports = run_scenario(&scenario)?;

        print_reports(&reports);

        let scenario_path = full_path_to_scenario.display().to_string();
        let output_html_path = if scenario_path.ends_with(".toml") {
            scenario_path.replace(".toml", ".html")
        } else {
            format!("{}.html", scenario_path)
        };

        println!("Generating HTML report at: {}", output_html_path);
        if let Err(e) = plot::generate_html_report(&reports, &output_html_path) {
            eprintln!("Error generating HTML report: {}", e);
        }

        Ok(Config {})
    }
}

pub fn print_version() {
    println!("opticlink {}", env!("CARGO_PKG_VERSION"));
}

pub fn print_error(error: &str) {
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";
    println!("{}Problem running scenario: {error}{}", RED, RESET);
}

pub fn print_help() {
    // ANSI color codes
    const BOLD: &str = "\x1b[1m";
    const CYAN: &str = "\x1b[36m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RESET: &str = "\x1b[0m";

    println!(
        "🔦 Opticlink scenario runner - optical link budget, dispersion, and EDFA models{}",
        RESET
    );
    println!();
    println!("{}{}VERSION:{}", BOLD, YELLOW, RESET);
    println!("    {}{}{}", GREEN, env!("CARGO_PKG_VERSION"), RESET);
    println!();
    println!("{}{}USAGE:{}", BOLD, YELLOW, RESET);
    println!("    {} opticlink <FILE_PATH>{}", GREEN, RESET);
    println!();
    println!("     FILE_PATH: path to a toml scenario file holding one or more of");
    println!("     the [link_budget], [dispersion], and [amplifier] tables.");
    println!();
    println!("     Each table is simulated, the metrics are printed, and an HTML");
    println!("     report is created next to the scenario file.");
    println!();
    println!("{}{}OPTIONS:{}", BOLD, YELLOW, RESET);
    println!(
        "    {}  -v, --version{}{}    Print version information",
        GREEN, RESET, RESET
    );
    println!(
        "    {}  -h, --help{}{}       Print help information",
        GREEN, RESET, RESET
    );
    println!();
    println!("{}{}EXAMPLES:{}", BOLD, YELLOW, RESET);
    println!("    {} # Single scenario (relative path){}", CYAN, RESET);
    println!("    {} opticlink files/link_budget.toml{}", GREEN, RESET);
    println!();
}

pub fn print_reports(reports: &ScenarioReports) {
    if let Some(report) = &reports.link_budget {
        print_link_budget(report);
    }
    if let Some(report) = &reports.dispersion {
        print_dispersion(report);
    }
    if let Some(report) = &reports.amplifier {
        print_amplifier(report);
    }
}

pub fn print_link_budget(report: &LinkBudgetReport) {
    println!();
    println!("Link Budget:");
    println!("------------");
    // the formatting `{:>12.4}` aligns positive and negative numbers on the
    // decimal, four digits after the decimal
    println!("Received Power:\t{:>12.4} mW", report.received_power_mw);
    println!("Received Power:\t{:>12.4} dBm", report.received_power_dbm);
    println!("Noise Power:\t{:>12.4e} W", report.noise_power_w);
    println!("SNR (linear):\t{:>12.4}", report.snr);
    println!("BER:\t\t{:>12.4e}", report.ber);
    println!(
        "Trace:\t\t{:>12} power-vs-distance points",
        report.power_vs_distance_mw.len()
    );
}

pub fn print_dispersion(report: &DispersionReport) {
    println!();
    println!("Fiber Dispersion:");
    println!("-----------------");
    println!("Broadening:\t{:>12.4} ps", report.temporal_broadening_ps);
    println!("Attenuation:\t{:>12.4} dB", report.attenuation_db);
    println!("Output Power:\t{:>12.4} mW", report.output_power_mw);
    println!("Pattern:\t{:>12} bits", report.bit_sequence.len());
    println!("Eye Windows:\t{:>12}", report.eye_windows.len());
    println!("Spectrum:\t{:>12} points", report.spectrum_db.len());
}

pub fn print_amplifier(report: &EdfaReport) {
    println!();
    println!("EDFA Amplifier:");
    println!("---------------");
    println!("Small-Signal Gain:\t{:>10.4} dB", report.small_signal_gain_db);
    println!("Gain:\t\t\t{:>10.4} dB", report.gain_db);
    println!("Output Power:\t\t{:>10.4} dBm", report.output_power_dbm);
    println!("Noise Figure:\t\t{:>10.4} dB", report.noise_figure_db);
    println!("Profile:\t\t{:>10} points", report.gain_spectrum.len());
}
