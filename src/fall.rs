//! Tuning handed to the radar's fall-detection mode.

use core::time::Duration;

use crate::config::DeviceConfig;
use crate::validation::{ConfigError, Field};

/// How readily the radar flags a fall, 1 (least) to 5 (most)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sensitivity(u8);

impl Sensitivity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN && level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Sensitivity {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(ConfigError::SensitivityOutOfRange(level))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallDetectionSettings {
    /// Mounting height of the radar above the floor
    pub install_height_cm: u16,
    /// How long a person must stay down before a fall is reported
    pub time_threshold: Duration,
    /// How long the room must be empty before it is reported unmanned
    pub unmanned_time: Duration,
    /// How long a static presence must persist before it is confirmed
    pub residence_time: Duration,
    pub sensitivity: Sensitivity,
}

impl DeviceConfig {
    pub fn fall_detection(&self) -> Result<FallDetectionSettings, ConfigError> {
        if self.fall_install_height_cm == 0 {
            return Err(ConfigError::Zero(Field::FallInstallHeightCm));
        }

        let secs = |field: Field, value: u32| {
            if value == 0 {
                Err(ConfigError::Zero(field))
            } else {
                Ok(Duration::from_secs(value.into()))
            }
        };

        Ok(FallDetectionSettings {
            install_height_cm: self.fall_install_height_cm,
            time_threshold: secs(Field::FallTimeThresholdSecs, self.fall_time_threshold_secs)?,
            unmanned_time: secs(Field::FallUnmannedTimeSecs, self.fall_unmanned_time_secs)?,
            residence_time: secs(Field::FallResidenceTimeSecs, self.fall_residence_time_secs)?,
            sensitivity: Sensitivity::try_from(self.fall_sensitivity)?,
        })
    }
}
