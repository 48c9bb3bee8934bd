// unit conversions applied at each model's parameter-ingestion boundary,
// see link.rs, dispersion.rs, and amplifier.rs for the consumers

pub fn db_to_linear(value: f64) -> f64 {
    rfconversions::power::db_to_linear(value)
}

pub fn linear_to_db(value: f64) -> f64 {
    10.0 * f64::log10(value)
}

// dBm is dB referenced to 1 mW, so the same exponent converts dBm to mW
pub fn dbm_to_milliwatts(value: f64) -> f64 {
    rfconversions::power::db_to_linear(value)
}

pub fn milliwatts_to_dbm(value: f64) -> f64 {
    rfconversions::power::watts_to_dbm(value * 1e-3)
}

pub fn gigahertz_to_hertz(value: f64) -> f64 {
    value * 1e9
}

pub fn nanoamps_to_amps(value: f64) -> f64 {
    value * 1e-9
}

pub fn kilometers_to_meters(value: f64) -> f64 {
    value * 1e3
}

pub fn nanometers_to_meters(value: f64) -> f64 {
    value * 1e-9
}

pub fn picoseconds_to_seconds(value: f64) -> f64 {
    value * 1e-12
}
