//! # Notes and Pitches
//!
//! Pitch classes ([`NoteName`]) and octave-qualified pitches ([`PitchedNote`]).
//!
//! ## Spelling
//! The 12 pitch classes are spelled `C C# D Eb E F F# G Ab A Bb B`: flats for every black
//! key except C#. Parsing accepts exactly these spellings; `Db` or `G#` are rejected.
//!
//! ## Pitched notes
//! A pitched note is written `E_4` (name, underscore, octave). Octaves follow scientific
//! pitch notation, so middle C is `C_4` and A4 is 440 Hz.

use crate::error::TheoryError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reference pitch for frequency calculation
pub const A4_FREQUENCY: f64 = 440.0;

/// Semitones from C0 up to A4
const A4_SEMITONES_FROM_C0: i32 = 4 * 12 + 9;

/// One of the 12 pitch classes, ordered by chromatic index (C = 0 .. B = 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NoteName {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "Eb")]
    EFlat,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "Ab")]
    AFlat,
    A,
    #[serde(rename = "Bb")]
    BFlat,
    B,
}

/// The chromatic scale starting at C
pub const CHROMATIC_SCALE: [NoteName; 12] = [
    NoteName::C,
    NoteName::CSharp,
    NoteName::D,
    NoteName::EFlat,
    NoteName::E,
    NoteName::F,
    NoteName::FSharp,
    NoteName::G,
    NoteName::AFlat,
    NoteName::A,
    NoteName::BFlat,
    NoteName::B,
];

impl NoteName {
    /// Chromatic index, 0 for C through 11 for B
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Note for a chromatic index; wraps modulo 12.
    pub const fn from_index(index: usize) -> Self {
        CHROMATIC_SCALE[index % 12]
    }

    /// The note `semitones` above this one, wrapping within the octave.
    pub const fn transpose(self, semitones: usize) -> Self {
        Self::from_index(self.index() + semitones)
    }

    /// Semitones from this note up to `other`, in 0..12.
    pub const fn interval_to(self, other: NoteName) -> usize {
        (other.index() + 12 - self.index()) % 12
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::CSharp => "C#",
            NoteName::D => "D",
            NoteName::EFlat => "Eb",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::FSharp => "F#",
            NoteName::G => "G",
            NoteName::AFlat => "Ab",
            NoteName::A => "A",
            NoteName::BFlat => "Bb",
            NoteName::B => "B",
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteName {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CHROMATIC_SCALE
            .iter()
            .copied()
            .find(|note| note.as_str() == s)
            .ok_or_else(|| TheoryError::InvalidRoot(s.to_string()))
    }
}

/// A pitch class with an octave, e.g. `E_4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchedNote {
    pub name: NoteName,
    pub octave: i8,
}

impl PitchedNote {
    pub const fn new(name: NoteName, octave: i8) -> Self {
        Self { name, octave }
    }

    /// Build a pitch from its semitone distance above C0.
    pub const fn from_semitones(semitones: i32) -> Self {
        Self {
            name: NoteName::from_index(semitones.rem_euclid(12) as usize),
            octave: semitones.div_euclid(12) as i8,
        }
    }

    /// Semitones above C0 (C0 = 0, A4 = 57).
    pub const fn semitones_from_c0(self) -> i32 {
        self.octave as i32 * 12 + self.name.index() as i32
    }

    /// Equal-tempered frequency in Hz, tuned to A4 = 440 Hz.
    ///
    /// ```
    /// use fretwork::{NoteName, PitchedNote};
    ///
    /// let a4 = PitchedNote::new(NoteName::A, 4);
    /// assert_eq!(a4.frequency(), 440.0);
    /// ```
    pub fn frequency(self) -> f64 {
        let from_a4 = self.semitones_from_c0() - A4_SEMITONES_FROM_C0;
        A4_FREQUENCY * 2f64.powf(from_a4 as f64 / 12.0)
    }
}

impl fmt::Display for PitchedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.name, self.octave)
    }
}

impl Serialize for PitchedNote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for PitchedNote {
    type Err = TheoryError;

    /// Accepts `E_4` and `E4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::InvalidNote(s.to_string());
        let split = s
            .find(|c: char| c == '_' || c == '-' || c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (name, rest) = s.split_at(split);
        let octave_text = rest.strip_prefix('_').unwrap_or(rest);
        let name: NoteName = name.parse().map_err(|_| invalid())?;
        let octave: i8 = octave_text.parse().map_err(|_| invalid())?;
        Ok(Self { name, octave })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromatic_order() {
        for (i, note) in CHROMATIC_SCALE.iter().enumerate() {
            assert_eq!(note.index(), i);
            assert_eq!(NoteName::from_index(i), *note);
        }
        assert!(NoteName::C < NoteName::B);
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!("C#".parse::<NoteName>().unwrap(), NoteName::CSharp);
        assert_eq!("Bb".parse::<NoteName>().unwrap(), NoteName::BFlat);
        assert!("Db".parse::<NoteName>().is_err());
        assert!("G#".parse::<NoteName>().is_err());
        assert!("".parse::<NoteName>().is_err());
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(NoteName::A.transpose(3), NoteName::C);
        assert_eq!(NoteName::B.transpose(1), NoteName::C);
        assert_eq!(NoteName::A.interval_to(NoteName::C), 3);
        assert_eq!(NoteName::C.interval_to(NoteName::A), 9);
    }

    #[test]
    fn test_pitched_note_text() {
        let e4: PitchedNote = "E_4".parse().unwrap();
        assert_eq!(e4, PitchedNote::new(NoteName::E, 4));
        assert_eq!(e4.to_string(), "E_4");

        let bb2: PitchedNote = "Bb2".parse().unwrap();
        assert_eq!(bb2, PitchedNote::new(NoteName::BFlat, 2));

        assert!("X_4".parse::<PitchedNote>().is_err());
        assert!("C_".parse::<PitchedNote>().is_err());
        assert!("C".parse::<PitchedNote>().is_err());
    }

    #[test]
    fn test_semitones() {
        assert_eq!(PitchedNote::new(NoteName::C, 0).semitones_from_c0(), 0);
        assert_eq!(PitchedNote::new(NoteName::A, 4).semitones_from_c0(), 57);
        assert_eq!(
            PitchedNote::from_semitones(57),
            PitchedNote::new(NoteName::A, 4)
        );
    }

    #[test]
    fn test_frequency() {
        let a5 = PitchedNote::new(NoteName::A, 5);
        assert!((a5.frequency() - 880.0).abs() < 1e-9);

        let c4 = PitchedNote::new(NoteName::C, 4);
        assert!((c4.frequency() - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&NoteName::FSharp).unwrap();
        assert_eq!(json, "\"F#\"");
        let json = serde_json::to_string(&PitchedNote::new(NoteName::EFlat, 3)).unwrap();
        assert_eq!(json, "\"Eb_3\"");
    }
}
