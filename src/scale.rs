//! # Scale Engine
//!
//! Scale templates and interval-to-note resolution.
//!
//! A scale template lists 1-based semitone offsets from the root: `1` is the root itself
//! and `12` is eleven semitones up, so the major scale's last step is its leading tone.
//! Index arithmetic is `(root + k - 1) mod 12`, so `13` comes back around to the root.
//!
//! ```
//! use fretwork::{scale_notes, NoteName, MAJOR_SCALE};
//!
//! let notes = scale_notes(NoteName::G, MAJOR_SCALE).unwrap();
//! let names: Vec<_> = notes.iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, ["G", "A", "B", "C", "D", "E", "F#"]);
//! ```

use crate::error::TheoryError;
use crate::note::NoteName;
use std::str::FromStr;

pub const MAJOR_SCALE: &[u8] = &[1, 3, 5, 6, 8, 10, 12];
pub const NATURAL_MINOR_SCALE: &[u8] = &[1, 3, 4, 6, 8, 9, 11];
pub const HARMONIC_MINOR_SCALE: &[u8] = &[1, 3, 4, 6, 8, 9, 12];
pub const MELODIC_MINOR_SCALE: &[u8] = &[1, 3, 4, 6, 8, 10, 12];
pub const IONIAN_SCALE: &[u8] = &[1, 3, 5, 6, 8, 10, 12];
pub const DORIAN_SCALE: &[u8] = &[1, 3, 4, 6, 8, 10, 11];
pub const PHRYGIAN_SCALE: &[u8] = &[1, 2, 4, 6, 8, 9, 11];
pub const LYDIAN_SCALE: &[u8] = &[1, 3, 5, 7, 8, 10, 12];
pub const MIXOLYDIAN_SCALE: &[u8] = &[1, 3, 5, 6, 8, 10, 11];
pub const AEOLIAN_SCALE: &[u8] = &[1, 3, 4, 6, 8, 9, 11];
pub const LOCRIAN_SCALE: &[u8] = &[1, 2, 4, 6, 7, 9, 11];
pub const WHOLE_TONE_SCALE: &[u8] = &[1, 3, 5, 7, 9, 11];
pub const DIMINISHED_SCALE: &[u8] = &[1, 3, 4, 6, 7, 9, 10, 12];
pub const MINOR_PENTATONIC_SCALE: &[u8] = &[1, 4, 6, 8, 11];
pub const MAJOR_PENTATONIC_SCALE: &[u8] = &[1, 3, 5, 8, 10];
pub const MAJOR_BLUES_SCALE: &[u8] = &[1, 3, 4, 5, 8, 10];
pub const MINOR_BLUES_SCALE: &[u8] = &[1, 4, 6, 7, 8, 11];
pub const BLUE_NOTE_SCALE: &[u8] = &[1, 3, 4, 5, 6, 7, 8, 10, 11, 12];

/// Named built-in scale templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    WholeTone,
    Diminished,
    MinorPentatonic,
    MajorPentatonic,
    MajorBlues,
    MinorBlues,
    BlueNote,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 18] = [
        ScaleKind::Major,
        ScaleKind::NaturalMinor,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
        ScaleKind::Ionian,
        ScaleKind::Dorian,
        ScaleKind::Phrygian,
        ScaleKind::Lydian,
        ScaleKind::Mixolydian,
        ScaleKind::Aeolian,
        ScaleKind::Locrian,
        ScaleKind::WholeTone,
        ScaleKind::Diminished,
        ScaleKind::MinorPentatonic,
        ScaleKind::MajorPentatonic,
        ScaleKind::MajorBlues,
        ScaleKind::MinorBlues,
        ScaleKind::BlueNote,
    ];

    pub const fn intervals(self) -> &'static [u8] {
        match self {
            ScaleKind::Major => MAJOR_SCALE,
            ScaleKind::NaturalMinor => NATURAL_MINOR_SCALE,
            ScaleKind::HarmonicMinor => HARMONIC_MINOR_SCALE,
            ScaleKind::MelodicMinor => MELODIC_MINOR_SCALE,
            ScaleKind::Ionian => IONIAN_SCALE,
            ScaleKind::Dorian => DORIAN_SCALE,
            ScaleKind::Phrygian => PHRYGIAN_SCALE,
            ScaleKind::Lydian => LYDIAN_SCALE,
            ScaleKind::Mixolydian => MIXOLYDIAN_SCALE,
            ScaleKind::Aeolian => AEOLIAN_SCALE,
            ScaleKind::Locrian => LOCRIAN_SCALE,
            ScaleKind::WholeTone => WHOLE_TONE_SCALE,
            ScaleKind::Diminished => DIMINISHED_SCALE,
            ScaleKind::MinorPentatonic => MINOR_PENTATONIC_SCALE,
            ScaleKind::MajorPentatonic => MAJOR_PENTATONIC_SCALE,
            ScaleKind::MajorBlues => MAJOR_BLUES_SCALE,
            ScaleKind::MinorBlues => MINOR_BLUES_SCALE,
            ScaleKind::BlueNote => BLUE_NOTE_SCALE,
        }
    }

    /// Kebab-case name used on the command line
    pub const fn name(self) -> &'static str {
        match self {
            ScaleKind::Major => "major",
            ScaleKind::NaturalMinor => "natural-minor",
            ScaleKind::HarmonicMinor => "harmonic-minor",
            ScaleKind::MelodicMinor => "melodic-minor",
            ScaleKind::Ionian => "ionian",
            ScaleKind::Dorian => "dorian",
            ScaleKind::Phrygian => "phrygian",
            ScaleKind::Lydian => "lydian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::Aeolian => "aeolian",
            ScaleKind::Locrian => "locrian",
            ScaleKind::WholeTone => "whole-tone",
            ScaleKind::Diminished => "diminished",
            ScaleKind::MinorPentatonic => "minor-pentatonic",
            ScaleKind::MajorPentatonic => "major-pentatonic",
            ScaleKind::MajorBlues => "major-blues",
            ScaleKind::MinorBlues => "minor-blues",
            ScaleKind::BlueNote => "blue-note",
        }
    }
}

impl FromStr for ScaleKind {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "minor" alone means natural minor, as in the diatonic generator
        let wanted = match s.trim() {
            "minor" => "natural-minor",
            other => other,
        };
        ScaleKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| TheoryError::UnknownScale(s.to_string()))
    }
}

/// Resolve a scale template against a root.
///
/// Each interval `k` maps to `(root + k - 1) mod 12`. The result keeps the order of
/// `intervals`. Interval `0` is rejected.
pub fn scale_notes(root: NoteName, intervals: &[u8]) -> Result<Vec<NoteName>, TheoryError> {
    intervals
        .iter()
        .map(|&interval| {
            if interval == 0 {
                return Err(TheoryError::InvalidInterval(interval));
            }
            Ok(root.transpose(interval as usize - 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::CHROMATIC_SCALE;

    #[test]
    fn test_major_scale_every_root() {
        for root in CHROMATIC_SCALE {
            let notes = scale_notes(root, MAJOR_SCALE).unwrap();
            assert_eq!(notes.len(), 7);
            assert_eq!(notes[0], root);
        }
    }

    #[test]
    fn test_c_major() {
        let notes = scale_notes(NoteName::C, MAJOR_SCALE).unwrap();
        assert_eq!(
            notes,
            vec![
                NoteName::C,
                NoteName::D,
                NoteName::E,
                NoteName::F,
                NoteName::G,
                NoteName::A,
                NoteName::B
            ]
        );
    }

    #[test]
    fn test_a_natural_minor() {
        let notes = scale_notes(NoteName::A, NATURAL_MINOR_SCALE).unwrap();
        let names: Vec<&str> = notes.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D", "E", "F", "G"]);
    }

    #[test]
    fn test_order_follows_intervals() {
        let notes = scale_notes(NoteName::C, &[8, 1, 5]).unwrap();
        assert_eq!(notes, vec![NoteName::G, NoteName::C, NoteName::E]);
    }

    #[test]
    fn test_intervals_wrap_past_octave() {
        // 13 is one octave above the root
        let notes = scale_notes(NoteName::D, &[13, 15]).unwrap();
        assert_eq!(notes, vec![NoteName::D, NoteName::E]);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert_eq!(
            scale_notes(NoteName::C, &[1, 0]),
            Err(TheoryError::InvalidInterval(0))
        );
    }

    #[test]
    fn test_scale_kind_names() {
        for kind in ScaleKind::ALL {
            assert_eq!(kind.name().parse::<ScaleKind>().unwrap(), kind);
            assert!(!kind.intervals().is_empty());
        }
        assert_eq!("minor".parse::<ScaleKind>().unwrap(), ScaleKind::NaturalMinor);
        assert!("bebop".parse::<ScaleKind>().is_err());
    }

    #[test]
    fn test_blue_note_length() {
        let notes = scale_notes(NoteName::E, BLUE_NOTE_SCALE).unwrap();
        assert_eq!(notes.len(), 10);
        assert_eq!(notes[9], NoteName::EFlat);
    }
}
