//! User profile and validated settings updates.

use serde::{Deserialize, Serialize};

use crate::types::{BiologicalSex, ValidationError, require_positive};

/// Settings that drive every derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub body_weight_kg: f64,
    pub sex: BiologicalSex,
    /// Daily pure-alcohol allowance in grams.
    pub daily_limit_g: f64,
    /// Target minutes per drink.
    pub target_pace_min: f64,
    /// Hydration reminder interval in minutes.
    pub water_reminder_interval_min: u32,
    pub vibration_enabled: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            body_weight_kg: 77.0,
            sex: BiologicalSex::Male,
            daily_limit_g: 20.0,
            target_pace_min: 30.0,
            water_reminder_interval_min: 20,
            vibration_enabled: true,
        }
    }
}

impl UserProfile {
    /// Checks every numeric setting is usable as a divisor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("body weight", self.body_weight_kg)?;
        require_positive("daily limit", self.daily_limit_g)?;
        require_positive("target pace", self.target_pace_min)?;
        require_positive(
            "water reminder interval",
            f64::from(self.water_reminder_interval_min),
        )?;
        Ok(())
    }

    /// Applies a partial update, leaving the profile untouched if the result is invalid.
    pub fn apply(&mut self, update: &ProfileUpdate) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(weight) = update.body_weight_kg {
            next.body_weight_kg = weight;
        }
        if let Some(sex) = update.sex {
            next.sex = sex;
        }
        if let Some(limit) = update.daily_limit_g {
            next.daily_limit_g = limit;
        }
        if let Some(pace) = update.target_pace_min {
            next.target_pace_min = pace;
        }
        if let Some(interval) = update.water_reminder_interval_min {
            next.water_reminder_interval_min = interval;
        }
        if let Some(enabled) = update.vibration_enabled {
            next.vibration_enabled = enabled;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// A partial settings change. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub body_weight_kg: Option<f64>,
    pub sex: Option<BiologicalSex>,
    pub daily_limit_g: Option<f64>,
    pub target_pace_min: Option<f64>,
    pub water_reminder_interval_min: Option<u32>,
    pub vibration_enabled: Option<bool>,
}

impl ProfileUpdate {
    pub const fn is_empty(&self) -> bool {
        self.body_weight_kg.is_none()
            && self.sex.is_none()
            && self.daily_limit_g.is_none()
            && self.target_pace_min.is_none()
            && self.water_reminder_interval_min.is_none()
            && self.vibration_enabled.is_none()
    }
}
