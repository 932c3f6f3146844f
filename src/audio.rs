//! # Sample Bank
//!
//! Owned audio state for hosts that play fretboard notes back through samples.
//!
//! A single recorded note per instrument is pitch-shifted by changing its playback rate.
//! The bank caches decoded samples by URL and holds the master volume. Hosts create one
//! bank when audio becomes available and pass it to whatever plays notes. Decoding and
//! output stay with the host: the bank is generic over the host's buffer type.
//!
//! ```
//! use fretwork::audio::{Instrument, SampleBank};
//! use fretwork::{NoteName, PitchedNote};
//!
//! let mut bank: SampleBank<Vec<f32>> = SampleBank::new();
//! bank.load_with(Instrument::Guitar.sample_url(), |_| Ok::<_, String>(vec![0.0; 4]))
//!     .unwrap();
//!
//! let cue = bank.cue(Instrument::Guitar, PitchedNote::new(NoteName::C, 5)).unwrap();
//! assert!((cue.playback_rate - 2.0).abs() < 1e-3);
//! ```

use crate::note::{NoteName, PitchedNote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recorded pitch of the guitar sample (C4)
pub const C4_GUITAR_SAMPLE_FREQUENCY: f64 = 261.63;

pub const DEFAULT_VOLUME: f64 = 0.8;

/// Sampled instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Guitar,
    Piano,
}

impl Instrument {
    pub const fn name(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Piano => "piano",
        }
    }

    pub const fn sample_url(self) -> &'static str {
        match self {
            Instrument::Guitar => "./sound/Guitar-C4.wav",
            Instrument::Piano => "./sound/PianoA4.wav",
        }
    }

    /// Pitch the sample was recorded at
    pub fn base_frequency(self) -> f64 {
        match self {
            Instrument::Guitar => C4_GUITAR_SAMPLE_FREQUENCY,
            Instrument::Piano => PitchedNote::new(NoteName::A, 4).frequency(),
        }
    }
}

/// Rate that shifts a sample recorded at `base_hz` to `target_hz`.
///
/// Returns 1.0 (no shift) when either frequency is zero.
pub fn playback_rate(target_hz: f64, base_hz: f64) -> f64 {
    if target_hz == 0.0 || base_hz == 0.0 {
        return 1.0;
    }
    target_hz / base_hz
}

/// A ready-to-play request for the host's audio layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    pub url: &'static str,
    pub playback_rate: f64,
    pub gain: f64,
}

/// Cache of decoded samples plus master volume
#[derive(Debug)]
pub struct SampleBank<B> {
    buffers: HashMap<String, B>,
    volume: f64,
}

impl<B> Default for SampleBank<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> SampleBank<B> {
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            volume: DEFAULT_VOLUME,
        }
    }

    /// Return the cached sample for `url`, calling `loader` only on the first request.
    ///
    /// A failed load caches nothing, so the next call tries again.
    pub fn load_with<E, F>(&mut self, url: &str, loader: F) -> Result<&B, E>
    where
        F: FnOnce(&str) -> Result<B, E>,
    {
        if !self.buffers.contains_key(url) {
            let buffer = loader(url)?;
            self.buffers.insert(url.to_string(), buffer);
        }
        // Present: either cached before or inserted above
        Ok(&self.buffers[url])
    }

    pub fn get(&self, url: &str) -> Option<&B> {
        self.buffers.get(url)
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.buffers.contains_key(url)
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Set the master volume, clamped to 0.0..=1.0.
    pub fn set_master_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    /// Prepare a playback request for `note`, or `None` if the instrument's sample has
    /// not been loaded.
    pub fn cue(&self, instrument: Instrument, note: PitchedNote) -> Option<Cue> {
        let url = instrument.sample_url();
        if !self.is_loaded(url) {
            return None;
        }
        Some(Cue {
            url,
            playback_rate: playback_rate(note.frequency(), instrument.base_frequency()),
            gain: self.volume,
        })
    }

    /// Cue without pitch shifting, for unpitched samples like the practice click.
    pub fn cue_unpitched(&self, url: &'static str) -> Option<Cue> {
        self.is_loaded(url).then(|| Cue {
            url,
            playback_rate: 1.0,
            gain: self.volume,
        })
    }
}

/// Sample used for the practice-mode beat
pub const CLICK_SAMPLE_URL: &str = "./sound/Closed-Hi-Hat.wav";
