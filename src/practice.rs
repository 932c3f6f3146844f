//! # Practice Mode
//!
//! Random chord progressions in a major key, played back one chord per bar.
//!
//! ## Progressions
//! Chords are drawn at random from the key's diatonic set. Drawing the IIm7 always yields
//! the full II-V-I cadence (IIm7, V7, Imaj7), so progressions lean on the most common
//! jazz cadence.
//!
//! ## Timing
//! A [`PracticeClock`] counts the beats and a [`PracticeSession`] turns its bar boundaries
//! into chords and voicings. The host's timer calls [`PracticeSession::tick`] once per
//! beat, every [`PracticeSession::beat_interval_ms`]. Four count-in clicks come first
//! (beats -4 to -1). Every fourth beat starts a bar: the session reports the chord to play
//! now, the chord coming next, and a voicing on a randomly chosen root string. After the
//! last bar it loops back to the first.
//!
//! ```
//! use fretwork::practice::PracticeSession;
//! use fretwork::rng::Rng;
//!
//! let mut session = PracticeSession::new(Rng::new(1), 16).unwrap();
//! let first = session.tick().unwrap();
//! assert!(first.count_in);
//! ```

use crate::audio::{Cue, Instrument, SampleBank, CLICK_SAMPLE_URL};
use crate::chord::{chord_voicing_any, ResolvedNote, RootString};
use crate::config::{Settings, DEFAULT_TEMPO};
use crate::diatonic::{diatonic_chords, DiatonicChord, ScaleType};
use crate::error::TheoryError;
use crate::note::{NoteName, CHROMATIC_SCALE};
use crate::rng::Rng;
use serde::Serialize;

pub const DEFAULT_BARS: usize = 16;
/// Longest loop a session accepts
pub const MAX_BARS: usize = 256;
pub const BEATS_PER_BAR: i32 = 4;
pub const COUNT_IN_BEATS: i32 = 4;

// Positions in the major diatonic set
const ONE: usize = 0;
const TWO: usize = 1;
const FIVE: usize = 4;

/// Milliseconds between beats at `tempo` BPM.
pub fn beat_interval_ms(tempo: u16) -> f64 {
    60_000.0 / f64::from(tempo.max(1))
}

/// Reject loop lengths outside `1..=MAX_BARS`.
pub fn check_bars(bars: usize) -> Result<(), TheoryError> {
    if bars == 0 || bars > MAX_BARS {
        return Err(TheoryError::Config(format!(
            "bars must be between 1 and {}, got {}",
            MAX_BARS, bars
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub key: NoteName,
    pub chords: Vec<DiatonicChord>,
}

/// Build a progression of at least `bars + 1` chords (one look-ahead) in a random major key.
///
/// A II-V-I expansion near the end can overshoot by up to two chords.
pub fn generate_progression(rng: &mut Rng, bars: usize) -> Result<Progression, TheoryError> {
    check_bars(bars)?;
    let key = CHROMATIC_SCALE[rng.below(CHROMATIC_SCALE.len())];
    let diatonic = diatonic_chords(key, ScaleType::Major)?;

    let mut chords = Vec::with_capacity(bars + 3);
    while chords.len() < bars + 1 {
        let pick = rng.below(diatonic.len());
        if pick == TWO {
            chords.push(diatonic[TWO].clone());
            chords.push(diatonic[FIVE].clone());
            chords.push(diatonic[ONE].clone());
        } else {
            chords.push(diatonic[pick].clone());
        }
    }

    Ok(Progression { key, chords })
}

/// Bar boundary reported by the clock, as indices into the progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Downbeat {
    /// `None` during the count-in
    pub current: Option<usize>,
    pub next: usize,
}

/// One beat from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    pub beat: i32,
    pub count_in: bool,
    pub click: bool,
    pub downbeat: Option<Downbeat>,
}

/// Beat counter for a looping practice session.
///
/// Counts in from beat -4, then runs bar after bar and wraps to bar one after the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeClock {
    beat: i32,
    bar_index: usize,
    bars: usize,
}

impl PracticeClock {
    pub fn new(bars: usize) -> Result<Self, TheoryError> {
        check_bars(bars)?;
        Ok(Self {
            beat: -COUNT_IN_BEATS,
            bar_index: 0,
            bars,
        })
    }

    pub fn bars(&self) -> usize {
        self.bars
    }

    /// Advance one beat. Every beat clicks.
    pub fn tick(&mut self) -> Beat {
        let beat = self.beat;
        let count_in = beat < 0;
        let downbeat = if beat.rem_euclid(BEATS_PER_BAR) != 0 {
            None
        } else if count_in {
            Some(Downbeat {
                current: None,
                next: 0,
            })
        } else {
            let current = self.bar_index;
            self.bar_index = (current + 1) % self.bars;
            Some(Downbeat {
                current: Some(current),
                next: self.bar_index,
            })
        };

        // Beats count within the loop, so the counter stays bounded
        self.beat += 1;
        if self.beat == self.bars as i32 * BEATS_PER_BAR {
            self.beat = 0;
        }

        Beat {
            beat,
            count_in,
            click: true,
            downbeat,
        }
    }
}

/// Emitted at the start of each bar, including the count-in bar
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChange {
    /// `None` during the count-in
    pub current: Option<String>,
    pub next: String,
    pub root_string: Option<u8>,
    pub voicing: Vec<ResolvedNote>,
}

impl BarChange {
    /// Playback requests for every note of the voicing.
    pub fn cues<B>(&self, bank: &SampleBank<B>, instrument: Instrument) -> Vec<Cue> {
        self.voicing
            .iter()
            .filter_map(|n| bank.cue(instrument, n.note))
            .collect()
    }
}

/// One beat of practice
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub beat: i32,
    pub count_in: bool,
    pub click: bool,
    pub bar: Option<BarChange>,
}

impl Tick {
    /// The metronome sample for this beat, if it clicks and the sample is loaded.
    pub fn click_cue<B>(&self, bank: &SampleBank<B>) -> Option<Cue> {
        if !self.click {
            return None;
        }
        bank.cue_unpitched(CLICK_SAMPLE_URL)
    }
}

/// A running practice loop: progression, clock and voicing lookup
#[derive(Debug, Clone)]
pub struct PracticeSession {
    progression: Progression,
    clock: PracticeClock,
    rng: Rng,
    tempo: u16,
    instrument: Instrument,
}

impl PracticeSession {
    pub fn new(mut rng: Rng, bars: usize) -> Result<Self, TheoryError> {
        let clock = PracticeClock::new(bars)?;
        let progression = generate_progression(&mut rng, bars)?;
        Ok(Self {
            progression,
            clock,
            rng,
            tempo: DEFAULT_TEMPO,
            instrument: Instrument::Guitar,
        })
    }

    /// Session with the loop length, seed, tempo and instrument from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, TheoryError> {
        let mut session = Self::new(settings.rng(), settings.bars)?;
        session.tempo = settings.tempo;
        session.instrument = settings.instrument;
        Ok(session)
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn tempo(&self) -> u16 {
        self.tempo
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Host timer period for this session.
    pub fn beat_interval_ms(&self) -> f64 {
        beat_interval_ms(self.tempo)
    }

    /// Advance one beat.
    pub fn tick(&mut self) -> Result<Tick, TheoryError> {
        let beat = self.clock.tick();
        let bar = match beat.downbeat {
            Some(downbeat) => Some(self.bar_change(downbeat)?),
            None => None,
        };
        Ok(Tick {
            beat: beat.beat,
            count_in: beat.count_in,
            click: beat.click,
            bar,
        })
    }

    fn bar_change(&mut self, downbeat: Downbeat) -> Result<BarChange, TheoryError> {
        let chords = &self.progression.chords;
        let next = chords[downbeat.next].chord_name.clone();
        let Some(current) = downbeat.current else {
            return Ok(BarChange {
                current: None,
                next,
                root_string: None,
                voicing: Vec::new(),
            });
        };
        let current = chords[current].chord_name.clone();

        let preferred = if self.rng.coin() {
            RootString::Sixth
        } else {
            RootString::Fifth
        };
        let (root_string, voicing) = chord_voicing_any(&current, preferred)?;

        Ok(BarChange {
            current: Some(current),
            next,
            root_string: Some(root_string.number()),
            voicing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{split_chord_name, Degree};

    #[test]
    fn test_progression_length() {
        for seed in 0..20 {
            let p = generate_progression(&mut Rng::new(seed), DEFAULT_BARS).unwrap();
            assert!(p.chords.len() >= DEFAULT_BARS + 1);
            assert!(p.chords.len() <= DEFAULT_BARS + 3);
        }
    }

    #[test]
    fn test_two_five_one_expansion() {
        for seed in 0..20 {
            let p = generate_progression(&mut Rng::new(seed), DEFAULT_BARS).unwrap();
            let degrees: Vec<&str> = p.chords.iter().map(|c| c.degree).collect();
            for (i, d) in degrees.iter().enumerate() {
                if *d == "IIm7" {
                    assert_eq!(degrees[i + 1], "V7");
                    assert_eq!(degrees[i + 2], "Imaj7");
                }
            }
        }
    }

    #[test]
    fn test_progression_stays_in_key() {
        let p = generate_progression(&mut Rng::new(8), 8).unwrap();
        let key = diatonic_chords(p.key, ScaleType::Major).unwrap();
        assert!(p.chords.iter().all(|c| key.contains(c)));
    }

    #[test]
    fn test_zero_bars_rejected() {
        assert!(generate_progression(&mut Rng::new(0), 0).is_err());
    }

    #[test]
    fn test_oversized_loop_rejected() {
        for bars in [MAX_BARS + 1, usize::MAX - 1, usize::MAX] {
            assert!(matches!(
                generate_progression(&mut Rng::new(1), bars),
                Err(TheoryError::Config(_))
            ));
            assert!(PracticeSession::new(Rng::new(1), bars).is_err());
            assert!(PracticeClock::new(bars).is_err());
        }
        let p = generate_progression(&mut Rng::new(1), MAX_BARS).unwrap();
        assert!(p.chords.len() > MAX_BARS);
    }

    #[test]
    fn test_clock_count_in_and_loop() {
        let mut clock = PracticeClock::new(2).unwrap();
        let beats: Vec<Beat> = (0..16).map(|_| clock.tick()).collect();
        assert!(beats.iter().all(|b| b.click));

        let numbers: Vec<i32> = beats.iter().map(|b| b.beat).collect();
        assert_eq!(
            numbers,
            [-4, -3, -2, -1, 0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3]
        );

        let downbeats: Vec<Downbeat> = beats.iter().filter_map(|b| b.downbeat).collect();
        assert_eq!(
            downbeats,
            [
                Downbeat { current: None, next: 0 },
                Downbeat { current: Some(0), next: 1 },
                Downbeat { current: Some(1), next: 0 },
                Downbeat { current: Some(0), next: 1 },
            ]
        );
    }

    #[test]
    fn test_session_from_settings() {
        let yaml = "tempo: 90\nbars: 4\ninstrument: piano\nseed: 6";
        let settings = Settings::from_yaml(yaml).unwrap();
        let mut session = PracticeSession::from_settings(&settings).unwrap();
        assert_eq!(session.tempo(), 90);
        assert_eq!(session.instrument(), Instrument::Piano);
        assert!((session.beat_interval_ms() - 666.666).abs() < 1e-2);

        let same = PracticeSession::new(Rng::new(6), 4).unwrap();
        assert_eq!(session.progression().key, same.progression().key);

        let downbeats = (0..(COUNT_IN_BEATS + BEATS_PER_BAR * 5))
            .filter_map(|_| session.tick().unwrap().bar)
            .count();
        assert_eq!(downbeats, 6);
    }

    #[test]
    fn test_count_in_then_bars() {
        let mut session = PracticeSession::new(Rng::new(4), DEFAULT_BARS).unwrap();
        let first_chord = session.progression().chords[0].chord_name.clone();

        let ticks: Vec<Tick> = (0..12).map(|_| session.tick().unwrap()).collect();
        assert!(ticks[..4].iter().all(|t| t.count_in));
        assert!(ticks[4..].iter().all(|t| !t.count_in));

        let count_in = ticks[0].bar.as_ref().unwrap();
        assert_eq!(count_in.current, None);
        assert_eq!(count_in.next, first_chord);
        assert!(ticks[1].bar.is_none());

        let bar_one = ticks[4].bar.as_ref().unwrap();
        assert_eq!(bar_one.current.as_deref(), Some(first_chord.as_str()));
        assert!(!bar_one.voicing.is_empty());
        assert!(ticks[8].bar.is_some());
    }

    #[test]
    fn test_loops_after_last_bar() {
        let bars = 4;
        let mut session = PracticeSession::new(Rng::new(9), bars).unwrap();
        let first_chord = session.progression().chords[0].chord_name.clone();
        let downbeats: Vec<BarChange> = (0..(COUNT_IN_BEATS + BEATS_PER_BAR * 5))
            .filter_map(|_| session.tick().unwrap().bar)
            .collect();
        // count-in, four bars, then bar one again
        assert_eq!(downbeats.len(), 6);
        assert_eq!(downbeats[4].next, first_chord);
        assert_eq!(downbeats[5].current.as_deref(), Some(first_chord.as_str()));
    }

    #[test]
    fn test_voicing_matches_current_chord() {
        let mut session = PracticeSession::new(Rng::new(21), DEFAULT_BARS).unwrap();
        for _ in 0..(COUNT_IN_BEATS + BEATS_PER_BAR * DEFAULT_BARS as i32) {
            let tick = session.tick().unwrap();
            let Some(bar) = tick.bar else { continue };
            let Some(current) = bar.current else { continue };
            let root = bar.voicing.iter().find(|n| n.degree == Degree::Root);
            let (root_text, _) = split_chord_name(&current).unwrap();
            assert_eq!(root.unwrap().note.name.as_str(), root_text);
        }
    }

    #[test]
    fn test_beat_interval() {
        assert_eq!(beat_interval_ms(120), 500.0);
        assert_eq!(beat_interval_ms(60), 1000.0);
    }

    #[test]
    fn test_cues_follow_voicing() {
        let mut bank: SampleBank<()> = SampleBank::new();
        bank.load_with(Instrument::Guitar.sample_url(), |_| Ok::<_, ()>(()))
            .unwrap();
        bank.load_with(CLICK_SAMPLE_URL, |_| Ok::<_, ()>(())).unwrap();

        let mut session = PracticeSession::new(Rng::new(2), DEFAULT_BARS).unwrap();
        let ticks: Vec<Tick> = (0..5).map(|_| session.tick().unwrap()).collect();
        assert!(ticks.iter().all(|t| t.click && t.click_cue(&bank).is_some()));

        let bar = ticks[4].bar.as_ref().unwrap();
        assert_eq!(bar.cues(&bank, Instrument::Guitar).len(), bar.voicing.len());
        assert!(bar.cues(&bank, Instrument::Piano).is_empty());
    }
}
