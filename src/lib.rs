pub mod api;
pub mod audio;
pub mod chord;
pub mod config;
pub mod diatonic;
pub mod error;
pub mod fretboard;
pub mod note;
pub mod practice;
pub mod quiz;
pub mod rng;
pub mod scale;

pub use chord::{
    chord_voicing, chord_voicing_any, split_chord_name, ChordQuality, Degree, ResolvedNote,
    RootString,
};
pub use diatonic::{diatonic_chords, DiatonicChord, ScaleType};
pub use error::*;
pub use fretboard::FRETBOARD;
pub use note::{NoteName, PitchedNote, A4_FREQUENCY, CHROMATIC_SCALE};
pub use scale::*;
