//! # Lenient API
//!
//! String-typed entry points for UI hosts. Instead of returning an error, each function
//! returns a [`Report`]: on failure `items` is empty and `diagnostics` says why. Callers
//! treat an empty report as total failure, never as a partial result.
//!
//! ## Functions
//! - [`scale_notes()`] - Notes of a named or explicit scale
//! - [`diatonic_chords()`] - The seven chords of a key
//! - [`chord_voicing()`] - Fretboard positions for a chord name and root string number
//! - [`chord_voicing_any()`] - Same, falling back to the other root string with a warning
//! - [`fretboard()`] - The full note grid, one item per string
//! - [`note_positions()`] - Every position sounding a pitch class
//! - [`progression()`] - A practice progression
//!
//! ```rust
//! use fretwork::api;
//!
//! let report = api::chord_voicing("Zm7", 6);
//! assert!(report.items.is_empty());
//! assert_eq!(report.diagnostics[0].message, "Root note 'Z' is not in the chromatic scale");
//! ```

use crate::chord::{self, Fallback, ResolvedNote, RootString};
use crate::diatonic::{self, DiatonicChord, ScaleType};
use crate::error::{Severity, TheoryError};
use crate::fretboard::{positions_of, Position, FRETBOARD};
use crate::note::{NoteName, PitchedNote};
use crate::practice::generate_progression;
use crate::rng::Rng;
use crate::scale::{self, ScaleKind};
use serde::Serialize;

/// A recorded failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
}

impl From<&TheoryError> for Diagnostic {
    fn from(e: &TheoryError) -> Self {
        Self {
            message: e.to_string(),
            severity: e.severity(),
        }
    }
}

/// Result items plus any diagnostics recorded while producing them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Report<T> {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl<T> From<Result<Vec<T>, TheoryError>> for Report<T> {
    fn from(result: Result<Vec<T>, TheoryError>) -> Self {
        match result {
            Ok(items) => Self {
                items,
                diagnostics: Vec::new(),
            },
            Err(e) => Self {
                items: Vec::new(),
                diagnostics: vec![Diagnostic::from(&e)],
            },
        }
    }
}

/// Notes of a built-in scale, e.g. `scale_notes("D", "dorian")`.
pub fn scale_notes(root: &str, scale_name: &str) -> Report<NoteName> {
    Report::from(named_scale(root, scale_name))
}

fn named_scale(root: &str, scale_name: &str) -> Result<Vec<NoteName>, TheoryError> {
    let root: NoteName = root.parse()?;
    let kind: ScaleKind = scale_name.parse()?;
    scale::scale_notes(root, kind.intervals())
}

/// Notes for explicit 1-based intervals.
pub fn scale_notes_from_intervals(root: &str, intervals: &[u8]) -> Report<NoteName> {
    Report::from(
        root.parse::<NoteName>()
            .and_then(|root| scale::scale_notes(root, intervals)),
    )
}

/// Diatonic seventh chords for `"major"` or `"minor"`.
pub fn diatonic_chords(root: &str, scale_type: &str) -> Report<DiatonicChord> {
    Report::from(key_chords(root, scale_type))
}

fn key_chords(root: &str, scale_type: &str) -> Result<Vec<DiatonicChord>, TheoryError> {
    let scale_type: ScaleType = scale_type.parse()?;
    let root: NoteName = root.parse()?;
    diatonic::diatonic_chords(root, scale_type)
}

/// Voicing for a chord rooted on string 6 or 5.
///
/// `RootNotOnString` comes back as a warning; the caller retries with the other string.
pub fn chord_voicing(chord_name: &str, root_string: u8) -> Report<ResolvedNote> {
    Report::from(
        RootString::try_from(root_string)
            .and_then(|root_string| chord::chord_voicing(chord_name, root_string)),
    )
}

/// Voicing on the preferred string, or on the other one if the root is not reachable.
///
/// A fallback is reported as a warning next to the items.
pub fn chord_voicing_any(chord_name: &str, preferred: u8) -> Report<ResolvedNote> {
    let preferred = match RootString::try_from(preferred) {
        Ok(preferred) => preferred,
        Err(e) => return Report::from(Err(e)),
    };
    fallback_report(chord::with_fallback(preferred, |s| {
        chord::chord_voicing(chord_name, s)
    }))
}

fn fallback_report(result: Result<Fallback, TheoryError>) -> Report<ResolvedNote> {
    match result {
        Ok((_, items, skipped)) => Report {
            items,
            diagnostics: skipped.iter().map(Diagnostic::from).collect(),
        },
        Err(e) => Report::from(Err(e)),
    }
}

/// Positions of a pitch class across the board, for the fretboard drill.
pub fn note_positions(note: &str) -> Report<Position> {
    Report::from(note.parse::<NoteName>().map(positions_of))
}

/// Every string of the board, high E first.
pub fn fretboard() -> Report<Vec<PitchedNote>> {
    Report {
        items: FRETBOARD.iter().map(|row| row.to_vec()).collect(),
        diagnostics: Vec::new(),
    }
}

/// Chords of a random major-key progression. `None` seeds from the clock.
pub fn progression(seed: Option<u64>, bars: usize) -> Report<DiatonicChord> {
    let mut rng = seed.map_or_else(Rng::from_time, Rng::new);
    Report::from(generate_progression(&mut rng, bars).map(|p| p.chords))
}
