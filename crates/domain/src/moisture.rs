//! Moisture classification and the automatic-watering decision.
//!
//! Both functions are pure: the coordinator and the telemetry service call
//! them with values resolved from the plant profile (or the defaults below)
//! and act on the result.

use serde::{Deserialize, Serialize};

/// Moisture percentage below which a plant counts as under-watered, used
/// when the profile does not override it.
pub const DEFAULT_MOISTURE_THRESHOLD: u8 = 30;

/// Moisture percentage at or below which the condition is urgent.
/// Fixed for the deployment, not configurable per plant.
pub const CRITICAL_MOISTURE_THRESHOLD: u8 = 20;

/// Classification of a moisture reading, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureLevel {
    Critical,
    Low,
    Normal,
}

impl MoistureLevel {
    /// Classify a reading against the low and critical thresholds.
    ///
    /// The critical check runs first, so a reading at or below the critical
    /// threshold is always `Critical` even though it also satisfies the low
    /// band. Configuration is assumed to keep `critical < threshold`; this
    /// function does not enforce it.
    #[must_use]
    pub fn classify(moisture_percent: u8, threshold_percent: u8, critical_percent: u8) -> Self {
        if moisture_percent <= critical_percent {
            Self::Critical
        } else if moisture_percent <= threshold_percent {
            Self::Low
        } else {
            Self::Normal
        }
    }

    /// Stable lowercase label used in records and responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Normal => "normal",
        }
    }
}

/// Decide whether a reading should raise an automatic watering command.
///
/// True iff auto-watering is enabled for the plant and the reading is at or
/// below the plant's threshold. The caller combines this with the
/// coordinator's queue operation.
#[must_use]
pub fn should_auto_water(moisture_percent: u8, threshold_percent: u8, enabled: bool) -> bool {
    enabled && moisture_percent <= threshold_percent
}
