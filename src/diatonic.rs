//! # Diatonic Chord Generator
//!
//! Builds the seven diatonic seventh chords of a major or natural-minor key.
//!
//! Chord tones are picked from the key's own scale by stacking thirds: the chord on
//! position `i` takes scale positions `i`, `i + 2`, `i + 4` and `i + 6` (mod 7). Minor keys
//! reuse their relative major's scale, rotated so the minor root comes first.
//!
//! ```
//! use fretwork::{diatonic_chords, NoteName, ScaleType};
//!
//! let chords = diatonic_chords(NoteName::C, ScaleType::Major).unwrap();
//! let names: Vec<_> = chords.iter().map(|c| c.chord_name.as_str()).collect();
//! assert_eq!(names, ["Cmaj7", "Dm7", "Em7", "Fmaj7", "G7", "Am7", "Bm7b5"]);
//! ```

use crate::chord::ChordQuality;
use crate::error::TheoryError;
use crate::note::NoteName;
use crate::scale::{scale_notes, MAJOR_SCALE};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const MAJOR_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Major7,
    ChordQuality::Minor7,
    ChordQuality::Minor7,
    ChordQuality::Major7,
    ChordQuality::Dominant7,
    ChordQuality::Minor7,
    ChordQuality::HalfDiminished7,
];

const MAJOR_DEGREE_NAMES: [&str; 7] = [
    "Imaj7",
    "IIm7",
    "IIIm7",
    "IVmaj7",
    "V7",
    "VIm7",
    "VIIm7(b5)",
];

const MINOR_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Minor7,
    ChordQuality::HalfDiminished7,
    ChordQuality::Major7,
    ChordQuality::Minor7,
    ChordQuality::Minor7,
    ChordQuality::Major7,
    ChordQuality::Dominant7,
];

const MINOR_DEGREE_NAMES: [&str; 7] = [
    "Im7",
    "IIm7(b5)",
    "bIIImaj7",
    "IVm7",
    "Vm7",
    "bVImaj7",
    "bVII7",
];

/// Semitones from a minor root up to its relative major
const RELATIVE_MAJOR_OFFSET: usize = 3;

/// Key type for diatonic chord generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Major,
    /// Natural minor
    Minor,
}

impl ScaleType {
    pub const ALL: [ScaleType; 2] = [ScaleType::Major, ScaleType::Minor];

    pub const fn as_str(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Minor => "minor",
        }
    }

    fn tables(self) -> (&'static [ChordQuality; 7], &'static [&'static str; 7]) {
        match self {
            ScaleType::Major => (&MAJOR_QUALITIES, &MAJOR_DEGREE_NAMES),
            ScaleType::Minor => (&MINOR_QUALITIES, &MINOR_DEGREE_NAMES),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleType {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(ScaleType::Major),
            "minor" => Ok(ScaleType::Minor),
            other => Err(TheoryError::InvalidScaleType(other.to_string())),
        }
    }
}

/// One chord of a key
///
/// # Fields
/// - `degree`: Roman numeral with quality, e.g. `V7` or `bVImaj7`
/// - `chord_name`: Root spelling plus quality suffix, e.g. `G7`
/// - `notes`: Root, third, fifth, seventh in that order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiatonicChord {
    pub degree: &'static str,
    pub chord_name: String,
    pub quality: ChordQuality,
    pub notes: [NoteName; 4],
}

impl DiatonicChord {
    pub fn root(&self) -> NoteName {
        self.notes[0]
    }
}

/// The scale the key's chords are stacked from, starting on `root`.
fn key_scale(root: NoteName, scale_type: ScaleType) -> Result<Vec<NoteName>, TheoryError> {
    match scale_type {
        ScaleType::Major => scale_notes(root, MAJOR_SCALE),
        ScaleType::Minor => {
            let relative_major = root.transpose(RELATIVE_MAJOR_OFFSET);
            let mut notes = scale_notes(relative_major, MAJOR_SCALE)?;
            let start = notes.iter().position(|&n| n == root).ok_or_else(|| {
                TheoryError::RotationFailure {
                    root: root.to_string(),
                    relative_major: relative_major.to_string(),
                }
            })?;
            notes.rotate_left(start);
            Ok(notes)
        }
    }
}

/// Generate the seven diatonic seventh chords of a key, ordered I to VII.
pub fn diatonic_chords(
    root: NoteName,
    scale_type: ScaleType,
) -> Result<Vec<DiatonicChord>, TheoryError> {
    let scale = key_scale(root, scale_type)?;
    let (qualities, degree_names) = scale_type.tables();
    let len = scale.len();

    let chords = (0..len)
        .map(|i| {
            let notes = [
                scale[i],
                scale[(i + 2) % len],
                scale[(i + 4) % len],
                scale[(i + 6) % len],
            ];
            let quality = qualities[i];
            DiatonicChord {
                degree: degree_names[i],
                chord_name: format!("{}{}", notes[0], quality.suffix()),
                quality,
                notes,
            }
        })
        .collect();

    Ok(chords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::CHROMATIC_SCALE;

    fn names(chords: &[DiatonicChord]) -> Vec<&str> {
        chords.iter().map(|c| c.chord_name.as_str()).collect()
    }

    #[test]
    fn test_c_major_chords() {
        let chords = diatonic_chords(NoteName::C, ScaleType::Major).unwrap();
        assert_eq!(
            names(&chords),
            ["Cmaj7", "Dm7", "Em7", "Fmaj7", "G7", "Am7", "Bm7b5"]
        );
        let degrees: Vec<&str> = chords.iter().map(|c| c.degree).collect();
        assert_eq!(degrees, MAJOR_DEGREE_NAMES);
    }

    #[test]
    fn test_chord_tones_stack_thirds() {
        let chords = diatonic_chords(NoteName::C, ScaleType::Major).unwrap();
        assert_eq!(
            chords[4].notes,
            [NoteName::G, NoteName::B, NoteName::D, NoteName::F]
        );
        assert_eq!(
            chords[6].notes,
            [NoteName::B, NoteName::D, NoteName::F, NoteName::A]
        );
    }

    #[test]
    fn test_a_minor_chords() {
        let chords = diatonic_chords(NoteName::A, ScaleType::Minor).unwrap();
        assert_eq!(
            names(&chords),
            ["Am7", "Bm7b5", "Cmaj7", "Dm7", "Em7", "Fmaj7", "G7"]
        );
        assert_eq!(chords[2].degree, "bIIImaj7");

        let mut c_major = scale_notes(NoteName::C, MAJOR_SCALE).unwrap();
        c_major.rotate_left(5);
        let roots: Vec<NoteName> = chords.iter().map(|c| c.root()).collect();
        assert_eq!(roots, c_major);
    }

    #[test]
    fn test_every_key_has_seven_chords() {
        for root in CHROMATIC_SCALE {
            for scale_type in ScaleType::ALL {
                let chords = diatonic_chords(root, scale_type).unwrap();
                assert_eq!(chords.len(), 7);
                assert_eq!(chords[0].root(), root);
            }
        }
    }

    #[test]
    fn test_chord_qualities_match_intervals() {
        // Root-to-seventh spacing must agree with the quality table in every key
        for root in CHROMATIC_SCALE {
            for scale_type in ScaleType::ALL {
                for chord in diatonic_chords(root, scale_type).unwrap() {
                    let r = chord.root();
                    let shape: Vec<usize> =
                        chord.notes.iter().map(|&n| r.interval_to(n)).collect();
                    assert_eq!(shape, chord.quality.intervals(), "{}", chord.chord_name);
                }
            }
        }
    }

    #[test]
    fn test_flat_key_spelling() {
        let chords = diatonic_chords(NoteName::BFlat, ScaleType::Major).unwrap();
        assert_eq!(
            names(&chords),
            ["Bbmaj7", "Cm7", "Dm7", "Ebmaj7", "F7", "Gm7", "Am7b5"]
        );
    }

    #[test]
    fn test_scale_type_parse() {
        assert_eq!("major".parse::<ScaleType>().unwrap(), ScaleType::Major);
        assert_eq!(
            "dorian".parse::<ScaleType>(),
            Err(TheoryError::InvalidScaleType("dorian".to_string()))
        );
    }

    #[test]
    fn test_serialize_entry() {
        let chords = diatonic_chords(NoteName::G, ScaleType::Major).unwrap();
        let json = serde_json::to_value(&chords[4]).unwrap();
        assert_eq!(json["degree"], "V7");
        assert_eq!(json["chordName"], "D7");
        assert_eq!(json["quality"], "7");
        assert_eq!(json["notes"], serde_json::json!(["D", "F#", "A", "C"]));
    }
}
