//! # Fretboard
//!
//! The guitar's pitch grid in standard tuning (E A D G B E), frets 1 through 22.
//!
//! ## Indexing
//! - `string_index`: 0 is the 1st string (high E) .. 5 is the 6th string (low E)
//! - `fret_index`: 0 is fret 1 .. 21 is fret 22
//!
//! Open strings are not part of the grid.

use crate::error::TheoryError;
use crate::note::{NoteName, PitchedNote};
use serde::Serialize;

pub const STRING_COUNT: usize = 6;
pub const FRET_COUNT: usize = 22;

/// Open-string pitches, 1st string first
pub const STANDARD_TUNING: [PitchedNote; STRING_COUNT] = [
    PitchedNote::new(NoteName::E, 4),
    PitchedNote::new(NoteName::B, 3),
    PitchedNote::new(NoteName::G, 3),
    PitchedNote::new(NoteName::D, 3),
    PitchedNote::new(NoteName::A, 2),
    PitchedNote::new(NoteName::E, 2),
];

/// Pitch at every string and fret, evaluated at compile time
pub const FRETBOARD: [[PitchedNote; FRET_COUNT]; STRING_COUNT] = build_fretboard(STANDARD_TUNING);

const fn build_fretboard(
    tuning: [PitchedNote; STRING_COUNT],
) -> [[PitchedNote; FRET_COUNT]; STRING_COUNT] {
    let mut grid = [[PitchedNote::new(NoteName::C, 0); FRET_COUNT]; STRING_COUNT];
    let mut string = 0;
    while string < STRING_COUNT {
        let open = tuning[string].semitones_from_c0();
        let mut fret = 0;
        while fret < FRET_COUNT {
            grid[string][fret] = PitchedNote::from_semitones(open + fret as i32 + 1);
            fret += 1;
        }
        string += 1;
    }
    grid
}

/// Pitch at a position, if the position is on the modeled fretboard.
pub fn note_at(string_index: usize, fret_index: usize) -> Option<PitchedNote> {
    FRETBOARD.get(string_index)?.get(fret_index).copied()
}

/// Like [`note_at`], failing with `PositionOutOfRange`.
pub fn try_note_at(string_index: usize, fret_index: usize) -> Result<PitchedNote, TheoryError> {
    note_at(string_index, fret_index).ok_or(TheoryError::PositionOutOfRange {
        string_index,
        fret_index,
    })
}

/// Lowest fret index on a string that sounds the given pitch class.
pub fn find_fret(string_index: usize, name: NoteName) -> Option<usize> {
    FRETBOARD
        .get(string_index)?
        .iter()
        .position(|note| note.name == name)
}

/// A string/fret pair on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub string_index: usize,
    pub fret_index: usize,
}

/// Every position sounding the given pitch class, string by string.
pub fn positions_of(name: NoteName) -> Vec<Position> {
    FRETBOARD
        .iter()
        .enumerate()
        .flat_map(|(string_index, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, note)| note.name == name)
                .map(move |(fret_index, _)| Position {
                    string_index,
                    fret_index,
                })
        })
        .collect()
}
