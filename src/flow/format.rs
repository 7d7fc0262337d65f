//! Readout formatting for the dashboard panels.
//!
//! Wire values are watts at integer precision; arrows encode direction
//! for the two signed readings (grid and battery).

/// Render a power value at integer watt precision.
pub fn watts(power_w: f64) -> String {
    format!("{}", power_w.round() as i64)
}

/// Generic signed power: `+n` / `-n` / `0`.
pub fn format_power(power_w: f64) -> String {
    if power_w > 0.0 {
        format!("+{}", watts(power_w))
    } else {
        watts(power_w)
    }
}

/// Grid power: importing (`> 0`) points into the house, exporting
/// (`< 0`) points out.
pub fn format_grid_power(power_w: f64) -> String {
    if power_w > 0.0 {
        format!("\u{25c0} {}", watts(power_w))
    } else if power_w < 0.0 {
        format!("{} \u{25b6}", watts(power_w.abs()))
    } else {
        "0".to_string()
    }
}

/// Battery power: charging (`> 0`) points down into the pack,
/// discharging (`< 0`) points up out of it.
pub fn format_battery_power(power_w: f64) -> String {
    if power_w > 0.0 {
        format!("\u{25bc} {}", watts(power_w))
    } else if power_w < 0.0 {
        format!("{} \u{25b2}", watts(power_w.abs()))
    } else {
        "0".to_string()
    }
}
