use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One flat reading from the inverter bridge, in its wire format.
///
/// Sign conventions:
/// - `battery_power`: positive = charging, negative = discharging
/// - `grid_power`: positive = importing from grid, negative = exporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Solar PV production in W (assumed >= 0)
    pub solar_production: f64,

    /// Battery state of charge in percent (0-100)
    pub battery_level: f64,

    /// Battery power in W
    pub battery_power: f64,

    /// Household consumption in W (assumed >= 0)
    pub house_consumption: f64,

    /// Grid power in W
    pub grid_power: f64,

    /// Timestamp reported by the bridge; absent readings fall back to
    /// the wall-clock time of receipt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Reading {
    pub fn new(
        solar_production: f64,
        battery_level: f64,
        battery_power: f64,
        house_consumption: f64,
        grid_power: f64,
    ) -> Self {
        Self {
            solar_production,
            battery_level,
            battery_power,
            house_consumption,
            grid_power,
            timestamp: None,
        }
    }

    /// Timestamp to display: the bridge's own if present, otherwise the
    /// moment the dashboard received the reading.
    pub fn display_timestamp(&self, received_at: DateTime<Utc>) -> DateTime<Utc> {
        self.timestamp.unwrap_or(received_at)
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reading {{ solar: {:.0}W, battery: {:.0}W @ {:.0}%, house: {:.0}W, grid: {:.0}W }}",
            self.solar_production,
            self.battery_power,
            self.battery_level,
            self.house_consumption,
            self.grid_power,
        )
    }
}
