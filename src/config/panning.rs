//! Stereo panning for all voices of all chip slots

use crate::{BridgeError, Result, MAX_SIDS, VOICES_PER_SID};

/// Number of panning values (one per voice per chip slot)
pub const PANNING_LEN: usize = MAX_SIDS * VOICES_PER_SID;

/// Validated panning configuration
///
/// 0.0 is fully left, 1.0 fully right. Values are laid out chip by chip,
/// voice by voice: index `sid * 3 + voice`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanningConfig {
    values: [f32; PANNING_LEN],
}

impl PanningConfig {
    /// Every voice centered
    pub fn centered() -> Self {
        PanningConfig {
            values: [0.5; PANNING_LEN],
        }
    }

    /// Validate a host supplied array
    ///
    /// Rejects anything that is not exactly [`PANNING_LEN`] finite values in
    /// `0.0..=1.0`; nothing is applied partially.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        if values.len() != PANNING_LEN {
            return Err(BridgeError::ConfigRejected(format!(
                "panning requires {} values ({} SIDs x {} voices), got {}",
                PANNING_LEN,
                MAX_SIDS,
                VOICES_PER_SID,
                values.len()
            )));
        }
        if let Some(pos) = values
            .iter()
            .position(|v| !v.is_finite() || !(0.0..=1.0).contains(v))
        {
            return Err(BridgeError::ConfigRejected(format!(
                "panning value {} at index {} is outside 0.0..=1.0",
                values[pos], pos
            )));
        }

        let mut config = [0.0; PANNING_LEN];
        config.copy_from_slice(values);
        Ok(PanningConfig { values: config })
    }

    /// Panning of one voice
    pub fn get(&self, sid_idx: usize, voice_idx: usize) -> Option<f32> {
        if sid_idx < MAX_SIDS && voice_idx < VOICES_PER_SID {
            Some(self.values[sid_idx * VOICES_PER_SID + voice_idx])
        } else {
            None
        }
    }

    /// All values in slot order
    pub fn values(&self) -> &[f32; PANNING_LEN] {
        &self.values
    }
}

impl Default for PanningConfig {
    fn default() -> Self {
        Self::centered()
    }
}

impl TryFrom<&[f32]> for PanningConfig {
    type Error = BridgeError;

    fn try_from(values: &[f32]) -> Result<Self> {
        PanningConfig::from_slice(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Vec<f32> {
        (0..PANNING_LEN).map(|i| i as f32 / 29.0).collect()
    }

    #[test]
    fn test_accepts_exact_length() {
        let values = ramp();
        let config = PanningConfig::from_slice(&values).unwrap();
        assert_eq!(&config.values()[..], &values[..]);
        assert_eq!(config.get(9, 2), Some(1.0));
        assert_eq!(config.get(0, 1), Some(values[1]));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            PanningConfig::from_slice(&[0.5; 29]),
            Err(BridgeError::ConfigRejected(_))
        ));
        assert!(PanningConfig::from_slice(&[0.5; 31]).is_err());
        assert!(PanningConfig::from_slice(&[]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut values = ramp();
        values[7] = 1.5;
        assert!(PanningConfig::from_slice(&values).is_err());
        values[7] = f32::NAN;
        assert!(PanningConfig::from_slice(&values).is_err());
    }

    #[test]
    fn test_out_of_range_slot() {
        let config = PanningConfig::centered();
        assert_eq!(config.get(10, 0), None);
        assert_eq!(config.get(0, 3), None);
    }
}
