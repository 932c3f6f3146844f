//! # Settings
//!
//! Practice and playback settings, read from YAML.
//!
//! ```yaml
//! tempo: 120
//! bars: 16
//! instrument: piano
//! volume: 0.5
//! seed: 42
//! ```
//!
//! Every key is optional. Values are range-checked after deserialization.

use crate::audio::{Instrument, SampleBank, DEFAULT_VOLUME};
use crate::error::TheoryError;
use crate::practice::{self, check_bars, DEFAULT_BARS};
use crate::rng::Rng;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_TEMPO: u16 = 120;
pub const MIN_TEMPO: u16 = 40;
pub const MAX_TEMPO: u16 = 240;

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    tempo: Option<u16>,
    bars: Option<usize>,
    instrument: Option<Instrument>,
    volume: Option<f64>,
    seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tempo: u16,
    pub bars: usize,
    pub instrument: Instrument,
    pub volume: f64,
    /// Fixed seed for reproducible sessions; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            bars: DEFAULT_BARS,
            instrument: Instrument::Guitar,
            volume: DEFAULT_VOLUME,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from YAML text. Empty text gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, TheoryError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| TheoryError::Config(e.to_string()))?;

        let tempo = raw.tempo.unwrap_or(DEFAULT_TEMPO);
        if !(MIN_TEMPO..=MAX_TEMPO).contains(&tempo) {
            return Err(TheoryError::Config(format!(
                "tempo must be between {} and {}, got {}",
                MIN_TEMPO, MAX_TEMPO, tempo
            )));
        }

        let bars = raw.bars.unwrap_or(DEFAULT_BARS);
        check_bars(bars)?;

        let volume = raw.volume.unwrap_or(DEFAULT_VOLUME);
        if !(0.0..=1.0).contains(&volume) {
            return Err(TheoryError::Config(format!(
                "volume must be between 0.0 and 1.0, got {}",
                volume
            )));
        }

        Ok(Self {
            tempo,
            bars,
            instrument: raw.instrument.unwrap_or(Instrument::Guitar),
            volume,
            seed: raw.seed,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TheoryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TheoryError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn beat_interval_ms(&self) -> f64 {
        practice::beat_interval_ms(self.tempo)
    }

    /// An empty sample bank at the configured master volume.
    pub fn sample_bank<B>(&self) -> SampleBank<B> {
        let mut bank = SampleBank::new();
        bank.set_master_volume(self.volume);
        bank
    }

    /// Generator for this session: seeded if a seed is configured, clock-seeded otherwise.
    pub fn rng(&self) -> Rng {
        match self.seed {
            Some(seed) => Rng::new(seed),
            None => Rng::from_time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        let settings = Settings::from_yaml("tempo: 90").unwrap();
        assert_eq!(settings.tempo, 90);
        assert_eq!(settings.bars, DEFAULT_BARS);
        assert_eq!(settings.instrument, Instrument::Guitar);
    }

    #[test]
    fn test_full_settings() {
        let yaml = "tempo: 150\nbars: 8\ninstrument: piano\nvolume: 0.25\nseed: 7\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(
            settings,
            Settings {
                tempo: 150,
                bars: 8,
                instrument: Instrument::Piano,
                volume: 0.25,
                seed: Some(7),
            }
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            Settings::from_yaml("tempo: 500"),
            Err(TheoryError::Config(_))
        ));
        assert!(Settings::from_yaml("bars: 0").is_err());
        assert!(matches!(
            Settings::from_yaml("bars: 18446744073709551615"),
            Err(TheoryError::Config(_))
        ));
        assert!(Settings::from_yaml("bars: 257").is_err());
        assert_eq!(Settings::from_yaml("bars: 256").unwrap().bars, 256);
        assert!(Settings::from_yaml("volume: 2.0").is_err());
    }

    #[test]
    fn test_bad_yaml() {
        assert!(Settings::from_yaml("instrument: banjo").is_err());
        assert!(Settings::from_yaml("tempo: [1, 2]").is_err());
        assert!(Settings::from_yaml("colour: red").is_err());
    }

    #[test]
    fn test_tempo_and_volume_applied() {
        let settings = Settings::from_yaml("tempo: 150\nvolume: 0.25").unwrap();
        assert_eq!(settings.beat_interval_ms(), 400.0);

        let mut bank: SampleBank<()> = settings.sample_bank();
        assert_eq!(bank.volume(), 0.25);
        bank.load_with(settings.instrument.sample_url(), |_| Ok::<_, ()>(()))
            .unwrap();
        let a4 = crate::note::PitchedNote::new(crate::note::NoteName::A, 4);
        assert_eq!(bank.cue(settings.instrument, a4).unwrap().gain, 0.25);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let settings = Settings::from_yaml("seed: 3").unwrap();
        assert_eq!(settings.rng().next_u64(), Rng::new(3).next_u64());
    }
}
