//! # Quizzes
//!
//! UI-free logic for the two drills.
//!
//! ## Diatonic quiz
//! Pick a random key and degree, ask for the chord on that degree, and offer the twelve
//! chords of the right quality as shuffled options. [`QuizStats`] keeps the running score.
//!
//! ## Fretboard drill
//! The user taps a position and learns which note it is; [`FretboardPrompt`] holds what
//! the host needs to show and sound that note.

use crate::diatonic::{diatonic_chords, DiatonicChord, ScaleType};
use crate::error::TheoryError;
use crate::fretboard::try_note_at;
use crate::note::{NoteName, PitchedNote, CHROMATIC_SCALE};
use crate::rng::Rng;
use serde::Serialize;

/// A generated diatonic-chord question
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiatonicQuestion {
    pub root: NoteName,
    pub scale_type: ScaleType,
    /// Scale position 0-6
    pub degree_index: usize,
    pub prompt: String,
    /// Chord names to choose from, shuffled; contains the answer exactly once
    pub options: Vec<String>,
    /// The whole key, shown after answering
    pub chords: Vec<DiatonicChord>,
}

impl DiatonicQuestion {
    /// Random key, scale type and degree.
    pub fn generate(rng: &mut Rng) -> Result<Self, TheoryError> {
        let root = CHROMATIC_SCALE[rng.below(CHROMATIC_SCALE.len())];
        let scale_type = ScaleType::ALL[rng.below(ScaleType::ALL.len())];
        let degree_index = rng.below(7);
        Self::for_key(root, scale_type, degree_index, rng)
    }

    /// Question about a specific degree of a specific key; `rng` only shuffles options.
    pub fn for_key(
        root: NoteName,
        scale_type: ScaleType,
        degree_index: usize,
        rng: &mut Rng,
    ) -> Result<Self, TheoryError> {
        let chords = diatonic_chords(root, scale_type)?;
        let answer = &chords[degree_index % chords.len()];

        let mut options: Vec<String> = CHROMATIC_SCALE
            .iter()
            .map(|note| format!("{}{}", note, answer.quality.suffix()))
            .collect();
        rng.shuffle(&mut options);

        let prompt = format!(
            "What is the {} chord in {} {}?",
            answer.degree, root, scale_type
        );

        Ok(Self {
            root,
            scale_type,
            degree_index: degree_index % chords.len(),
            prompt,
            options,
            chords,
        })
    }

    pub fn answer(&self) -> &DiatonicChord {
        &self.chords[self.degree_index]
    }

    pub fn check(&self, chord_name: &str) -> bool {
        self.answer().chord_name == chord_name
    }
}

/// Running score for a quiz session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QuizStats {
    pub attempts: u32,
    pub correct: u32,
}

impl QuizStats {
    pub fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Percentage of correct answers; 0 before the first attempt.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.correct as f64 / self.attempts as f64 * 100.0
    }
}

/// What to show and play for a tapped fretboard position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardPrompt {
    pub string_index: usize,
    pub fret_index: usize,
    pub note: PitchedNote,
    /// Pitch class only, as printed on the fret mark
    pub display_name: NoteName,
    pub frequency: f64,
}

impl FretboardPrompt {
    pub fn at(string_index: usize, fret_index: usize) -> Result<Self, TheoryError> {
        let note = try_note_at(string_index, fret_index)?;
        Ok(Self {
            string_index,
            fret_index,
            note,
            display_name: note.name,
            frequency: note.frequency(),
        })
    }
}
