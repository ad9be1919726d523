use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Largest cell coordinate the noise field is ever sampled at.
const MAX_COORDINATE: f64 = 4096.0;

/// Octave schedule for the layered noise generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Number of summed noise layers.
    pub octaves: u32,
    /// Frequency of the first octave, in cycles per cell.
    pub base_frequency: f64,
    /// Height contributed by the first octave at full noise output.
    pub base_amplitude: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub gain: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 20,
            base_frequency: 0.002,
            base_amplitude: 16.0,
            lacunarity: 2.5,
            gain: 0.5,
        }
    }
}

impl NoiseParams {
    /// Check that every octave samples at a finite coordinate and that the
    /// summed amplitudes stay finite, so no cell can come out as `inf` or NaN.
    pub fn validate(&self) -> Result<(), MapError> {
        let mut frequency = self.base_frequency;
        let mut amplitude = self.base_amplitude;
        let mut total_amplitude = 0.0_f64;
        for octave in 0..self.octaves {
            if !(frequency * MAX_COORDINATE).is_finite() {
                return Err(MapError::InvalidConfig(format!(
                    "noise frequency overflows at octave {octave} ({frequency})"
                )));
            }
            total_amplitude += amplitude.abs();
            if !total_amplitude.is_finite() {
                return Err(MapError::InvalidConfig(format!(
                    "noise amplitude overflows at octave {octave} ({amplitude})"
                )));
            }
            frequency *= self.lacunarity;
            amplitude *= self.gain;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(NoiseParams::default().validate(), Ok(()));
    }

    #[test]
    fn zero_octaves_is_valid_whatever_the_rest() {
        let params = NoiseParams { octaves: 0, base_amplitude: f64::NAN, ..NoiseParams::default() };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn growing_amplitude_overflow_is_rejected() {
        let params = NoiseParams { base_amplitude: 1e308, gain: 2.0, ..NoiseParams::default() };
        assert!(matches!(params.validate(), Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn frequency_overflow_is_rejected() {
        let params = NoiseParams { base_frequency: 1.0, lacunarity: 1e300, ..NoiseParams::default() };
        assert!(matches!(params.validate(), Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn nan_parameters_are_rejected() {
        let params = NoiseParams { gain: f64::NAN, ..NoiseParams::default() };
        assert!(params.validate().is_err());
        let params = NoiseParams { base_frequency: f64::NAN, ..NoiseParams::default() };
        assert!(params.validate().is_err());
    }
}
