use fretwork::api::{self, Diagnostic, Report};
use fretwork::Severity;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Serialize a report, falling back to an empty report that carries the serializer error
fn to_json<T: Serialize>(report: &Report<T>) -> String {
    serde_json::to_string(report).unwrap_or_else(|e| {
        let fallback: Report<()> = Report {
            items: Vec::new(),
            diagnostics: vec![Diagnostic {
                message: e.to_string(),
                severity: Severity::Error,
            }],
        };
        serde_json::to_string(&fallback)
            .unwrap_or_else(|_| r#"{"items":[],"diagnostics":[]}"#.to_string())
    })
}

/// Notes of a named scale, e.g. `scale_notes("A", "minor-pentatonic")`
#[wasm_bindgen]
pub fn scale_notes(root: &str, scale_name: &str) -> String {
    to_json(&api::scale_notes(root, scale_name))
}

/// Notes for explicit 1-based intervals
#[wasm_bindgen]
pub fn scale_notes_from_intervals(root: &str, intervals: &[u8]) -> String {
    to_json(&api::scale_notes_from_intervals(root, intervals))
}

/// The seven diatonic seventh chords of a major or minor key
#[wasm_bindgen]
pub fn diatonic_chords(root: &str, scale_type: &str) -> String {
    to_json(&api::diatonic_chords(root, scale_type))
}

/// Chord voicing anchored on string 6 or 5, falling back to the other string
#[wasm_bindgen]
pub fn chord_voicing(chord_name: &str, root_string: u8) -> String {
    to_json(&api::chord_voicing_any(chord_name, root_string))
}

/// The full note grid, high E string first
#[wasm_bindgen]
pub fn fretboard() -> String {
    to_json(&api::fretboard())
}

/// Every fretboard position sounding a pitch class
#[wasm_bindgen]
pub fn note_positions(note: &str) -> String {
    to_json(&api::note_positions(note))
}

/// A practice progression; a missing seed uses the clock
#[wasm_bindgen]
pub fn progression(seed: Option<u64>, bars: usize) -> String {
    to_json(&api::progression(seed, bars))
}
