use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::amplifier::EdfaReport;
use crate::dispersion::DispersionReport;
use crate::link::LinkBudgetReport;
use crate::ScenarioReports;

// spectrum traces carry 1000 points; thin them for a readable table
const SPECTRUM_TABLE_STRIDE: usize = 20;

/// Writes an HTML report of every model run in the scenario: the scalar
/// metrics plus the numeric traces as tables.
pub fn generate_html_report(
    reports: &ScenarioReports,
    output_path_str: &str,
) -> Result<(), std::io::Error> {
    let path = Path::new(output_path_str);
    let mut file = File::create(path)?;

    writeln!(file, "<!DOCTYPE html>")?;
    writeln!(file, "<html>")?;
    writeln!(file, "<head>")?;
    writeln!(file, "<title>Optical Link Report</title>")?;
    writeln!(file, "<style>")?;
    writeln!(file, "table {{ border-collapse: collapse; }}")?;
    writeln!(file, ".metrics {{ width: auto; }}")?;
    writeln!(file, ".metrics td:nth-child(2) {{ text-align: right; }}")?;
    writeln!(
        file,
        "th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}"
    )?;
    writeln!(file, "th {{ background-color: #f2f2f2; }}")?;
    writeln!(file, "tr:nth-child(even) {{ background-color: #f9f9f9; }}")?;
    writeln!(file, "</style>")?;
    writeln!(file, "</head>")?;
    writeln!(file, "<body>")?;
    writeln!(file, "<h1>Optical Link Report</h1>")?;

    if let Some(report) = &reports.link_budget {
        write_link_budget(&mut file, report)?;
    }
    if let Some(report) = &reports.dispersion {
        write_dispersion(&mut file, report)?;
    }
    if let Some(report) = &reports.amplifier {
        write_amplifier(&mut file, report)?;
    }

    writeln!(file, "</body>")?;
    writeln!(file, "</html>")?;

    Ok(())
}

fn write_metric_row(
    file: &mut File,
    name: &str,
    value: f64,
    unit: &str,
) -> Result<(), std::io::Error> {
    writeln!(file, "<tr>")?;
    writeln!(file, "<td>{}</td>", name)?;
    if value != 0.0 && value.abs() < 1e-3 {
        writeln!(file, "<td>{:.3e}</td>", value)?;
    } else {
        writeln!(file, "<td>{:.4}</td>", value)?;
    }
    writeln!(file, "<td>{}</td>", unit)?;
    writeln!(file, "</tr>")?;
    Ok(())
}

fn write_link_budget(file: &mut File, report: &LinkBudgetReport) -> Result<(), std::io::Error> {
    writeln!(file, "<h2>Link Budget</h2>")?;
    writeln!(file, "<table class=\"metrics\">")?;
    writeln!(file, "<tr><th>Metric</th><th>Value</th><th>Unit</th></tr>")?;
    write_metric_row(file, "Received Power", report.received_power_mw, "mW")?;
    write_metric_row(file, "Received Power", report.received_power_dbm, "dBm")?;
    write_metric_row(file, "Noise Power", report.noise_power_w, "W")?;
    write_metric_row(file, "SNR", report.snr, "linear")?;
    write_metric_row(file, "BER", report.ber, "")?;
    writeln!(file, "</table>")?;
    writeln!(file, "<br>")?;

    writeln!(file, "<h3>Power vs Distance</h3>")?;
    writeln!(file, "<table>")?;
    writeln!(file, "<tr><th>Distance (m)</th><th>Power (mW)</th></tr>")?;
    for (distance, power) in &report.power_vs_distance_mw {
        writeln!(
            file,
            "<tr><td>{:.2}</td><td>{:.6}</td></tr>",
            distance, power
        )?;
    }
    writeln!(file, "</table>")?;
    Ok(())
}

fn write_dispersion(file: &mut File, report: &DispersionReport) -> Result<(), std::io::Error> {
    writeln!(file, "<h2>Fiber Dispersion</h2>")?;
    writeln!(file, "<table class=\"metrics\">")?;
    writeln!(file, "<tr><th>Metric</th><th>Value</th><th>Unit</th></tr>")?;
    write_metric_row(file, "Temporal Broadening", report.temporal_broadening_ps, "ps")?;
    write_metric_row(file, "Attenuation", report.attenuation_db, "dB")?;
    write_metric_row(file, "Output Power", report.output_power_mw, "mW")?;
    write_metric_row(file, "Pattern Length", report.bit_sequence.len() as f64, "bits")?;
    write_metric_row(file, "Eye Windows", report.eye_windows.len() as f64, "")?;
    writeln!(file, "</table>")?;
    writeln!(file, "<br>")?;

    writeln!(file, "<h3>Optical Spectrum (every {}th point)</h3>", SPECTRUM_TABLE_STRIDE)?;
    writeln!(file, "<table>")?;
    writeln!(file, "<tr><th>Frequency (THz)</th><th>Power (dB)</th></tr>")?;
    for (frequency, power_db) in report.spectrum_db.iter().step_by(SPECTRUM_TABLE_STRIDE) {
        writeln!(
            file,
            "<tr><td>{:.4}</td><td>{:.2}</td></tr>",
            frequency, power_db
        )?;
    }
    writeln!(file, "</table>")?;
    Ok(())
}

fn write_amplifier(file: &mut File, report: &EdfaReport) -> Result<(), std::io::Error> {
    writeln!(file, "<h2>EDFA Amplifier</h2>")?;
    writeln!(file, "<table class=\"metrics\">")?;
    writeln!(file, "<tr><th>Metric</th><th>Value</th><th>Unit</th></tr>")?;
    write_metric_row(file, "Small-Signal Gain", report.small_signal_gain_db, "dB")?;
    write_metric_row(file, "Gain", report.gain_db, "dB")?;
    write_metric_row(file, "Output Power", report.output_power_dbm, "dBm")?;
    write_metric_row(file, "Noise Figure", report.noise_figure_db, "dB")?;
    writeln!(file, "</table>")?;
    writeln!(file, "<br>")?;

    writeln!(file, "<h3>Gain and Noise Figure vs Wavelength</h3>")?;
    writeln!(file, "<table>")?;
    writeln!(
        file,
        "<tr><th>Wavelength (nm)</th><th>Gain (dB)</th><th>NF (dB)</th></tr>"
    )?;
    for point in &report.gain_spectrum {
        writeln!(
            file,
            "<tr><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
            point.wavelength_nm, point.gain_db, point.noise_figure_db
        )?;
    }
    writeln!(file, "</table>")?;
    Ok(())
}
