//! # Chord Shape Resolver
//!
//! Maps a chord name onto the fretboard using movable barre-chord shapes.
//!
//! ## Pipeline
//! 1. Split the name into root and quality ([`split_chord_name`])
//! 2. Pick the shape for the quality on the requested root string
//! 3. Find the shape's root cell
//! 4. Anchor that cell at the lowest fret on its string sounding the root
//! 5. Project every other cell relative to the anchor
//!
//! Cells that land outside frets 1-22 are dropped, so a voicing near the nut can come
//! back with fewer notes than its shape.
//!
//! ```
//! use fretwork::{chord_voicing, RootString};
//!
//! let notes = chord_voicing("Cmaj7", RootString::Sixth).unwrap();
//! let text: Vec<String> = notes.iter().map(|n| n.note.to_string()).collect();
//! assert_eq!(text, ["G_4", "E_4", "B_3", "C_3"]);
//! ```

use crate::error::TheoryError;
use crate::fretboard::{find_fret, note_at, STRING_COUNT};
use crate::note::{NoteName, PitchedNote};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Chord qualities with fretboard shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChordQuality {
    /// Plain major triad, written with no suffix
    #[serde(rename = "")]
    Major,
    #[serde(rename = "maj7")]
    Major7,
    #[serde(rename = "m7")]
    Minor7,
    #[serde(rename = "7")]
    Dominant7,
    #[serde(rename = "m7b5")]
    HalfDiminished7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 5] = [
        ChordQuality::Major,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Dominant7,
        ChordQuality::HalfDiminished7,
    ];

    pub const fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Dominant7 => "7",
            ChordQuality::HalfDiminished7 => "m7b5",
        }
    }

    /// Semitones of each chord tone above the root
    pub const fn intervals(self) -> &'static [usize] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    /// Parse a bare suffix such as `m7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::ALL
            .iter()
            .copied()
            .find(|q| q.suffix() == s)
            .ok_or_else(|| TheoryError::UnrecognizedQuality(s.to_string()))
    }
}

/// Split a chord name into its root text and quality.
///
/// Any non-empty quality that ends the name wins over the plain major triad, checked in
/// the order `maj7`, `m7`, `7`, `m7b5`. The root text is returned unvalidated.
///
/// ```
/// use fretwork::{split_chord_name, ChordQuality};
///
/// assert_eq!(split_chord_name("F#m7").unwrap(), ("F#", ChordQuality::Minor7));
/// assert_eq!(split_chord_name("Bbmaj7").unwrap(), ("Bb", ChordQuality::Major7));
/// assert_eq!(split_chord_name("Eb").unwrap(), ("Eb", ChordQuality::Major));
/// ```
pub fn split_chord_name(chord_name: &str) -> Result<(&str, ChordQuality), TheoryError> {
    let quality = ChordQuality::ALL
        .iter()
        .copied()
        .filter(|q| *q != ChordQuality::Major)
        .find(|q| chord_name.ends_with(q.suffix()))
        .unwrap_or(ChordQuality::Major);
    let root = chord_name
        .strip_suffix(quality.suffix())
        .ok_or_else(|| TheoryError::UnrecognizedQuality(chord_name.to_string()))?;
    Ok((root, quality))
}

/// A note's role relative to the chord root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Degree {
    #[serde(rename = "R")]
    Root,
    #[serde(rename = "b3")]
    MinorThird,
    #[serde(rename = "3")]
    MajorThird,
    #[serde(rename = "b5")]
    DiminishedFifth,
    #[serde(rename = "5")]
    PerfectFifth,
    #[serde(rename = "b7")]
    MinorSeventh,
    #[serde(rename = "7")]
    MajorSeventh,
}

impl Degree {
    pub const fn label(self) -> &'static str {
        match self {
            Degree::Root => "R",
            Degree::MinorThird => "b3",
            Degree::MajorThird => "3",
            Degree::DiminishedFifth => "b5",
            Degree::PerfectFifth => "5",
            Degree::MinorSeventh => "b7",
            Degree::MajorSeventh => "7",
        }
    }

    pub const fn semitones(self) -> usize {
        match self {
            Degree::Root => 0,
            Degree::MinorThird => 3,
            Degree::MajorThird => 4,
            Degree::DiminishedFifth => 6,
            Degree::PerfectFifth => 7,
            Degree::MinorSeventh => 10,
            Degree::MajorSeventh => 11,
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// String carrying the shape's root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootString {
    /// Low E
    Sixth,
    /// A
    Fifth,
}

impl RootString {
    /// Guitarist's string number (6 or 5)
    pub const fn number(self) -> u8 {
        match self {
            RootString::Sixth => 6,
            RootString::Fifth => 5,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            RootString::Sixth => RootString::Fifth,
            RootString::Fifth => RootString::Sixth,
        }
    }

    fn shapes(self) -> &'static [(ChordQuality, Shape)] {
        match self {
            RootString::Sixth => &ROOT6_SHAPES,
            RootString::Fifth => &ROOT5_SHAPES,
        }
    }

    fn shape(self, quality: ChordQuality) -> Option<&'static Shape> {
        self.shapes()
            .iter()
            .find(|(q, _)| *q == quality)
            .map(|(_, shape)| shape)
    }
}

impl TryFrom<u8> for RootString {
    type Error = TheoryError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            6 => Ok(RootString::Sixth),
            5 => Ok(RootString::Fifth),
            other => Err(TheoryError::InvalidRootString(other)),
        }
    }
}

type Cell = Option<Degree>;

/// Degrees by string index (1st string first) and fret offset 0-3
type Shape = [[Cell; 4]; STRING_COUNT];

const __: Cell = None;
const R: Cell = Some(Degree::Root);
const MIN3: Cell = Some(Degree::MinorThird);
const MAJ3: Cell = Some(Degree::MajorThird);
const DIM5: Cell = Some(Degree::DiminishedFifth);
const P5: Cell = Some(Degree::PerfectFifth);
const MIN7: Cell = Some(Degree::MinorSeventh);
const MAJ7: Cell = Some(Degree::MajorSeventh);

static ROOT6_SHAPES: [(ChordQuality, Shape); 5] = [
    (
        ChordQuality::Major,
        [
            [__, R, __, __],
            [__, P5, __, __],
            [__, __, MAJ3, __],
            [__, __, __, R],
            [__, __, __, P5],
            [__, R, __, __],
        ],
    ),
    (
        ChordQuality::Major7,
        [
            [__, __, __, __],
            [__, P5, __, __],
            [__, __, MAJ3, __],
            [__, __, MAJ7, __],
            [__, __, __, __],
            [__, R, __, __],
        ],
    ),
    (
        ChordQuality::Minor7,
        [
            [__, __, __, __],
            [__, P5, __, __],
            [__, MIN3, __, __],
            [__, MIN7, __, __],
            [__, __, __, __],
            [__, R, __, __],
        ],
    ),
    (
        ChordQuality::Dominant7,
        [
            [__, __, __, __],
            [__, P5, __, __],
            [__, __, MAJ3, __],
            [__, MIN7, __, __],
            [__, __, __, __],
            [__, R, __, __],
        ],
    ),
    (
        ChordQuality::HalfDiminished7,
        [
            [__, __, __, __],
            [DIM5, __, __, __],
            [__, MIN3, __, __],
            [__, MIN7, __, __],
            [__, __, __, __],
            [__, R, __, __],
        ],
    ),
];

static ROOT5_SHAPES: [(ChordQuality, Shape); 5] = [
    (
        ChordQuality::Major,
        [
            [__, P5, __, __],
            [__, __, __, MAJ3],
            [__, __, __, R],
            [__, __, __, P5],
            [__, R, __, __],
            [__, P5, __, __],
        ],
    ),
    (
        ChordQuality::Major7,
        [
            [__, __, __, __],
            [__, __, __, MAJ3],
            [__, __, MAJ7, __],
            [__, __, __, P5],
            [__, R, __, __],
            [__, __, __, __],
        ],
    ),
    (
        ChordQuality::Minor7,
        [
            [__, __, __, __],
            [__, __, MIN3, __],
            [__, MIN7, __, __],
            [__, __, __, P5],
            [__, R, __, __],
            [__, __, __, __],
        ],
    ),
    (
        ChordQuality::Dominant7,
        [
            [__, __, __, __],
            [__, __, __, MAJ3],
            [__, MIN7, __, __],
            [__, __, __, P5],
            [__, R, __, __],
            [__, __, __, __],
        ],
    ),
    (
        ChordQuality::HalfDiminished7,
        [
            [__, __, __, __],
            [__, __, MIN3, __],
            [__, MIN7, __, __],
            [__, __, DIM5, __],
            [__, R, __, __],
            [__, __, __, __],
        ],
    ),
];

/// First root cell in string-then-offset order, as `(string_index, fret_offset)`.
fn find_root_cell(shape: &Shape) -> Option<(usize, usize)> {
    shape.iter().enumerate().find_map(|(string_index, row)| {
        row.iter()
            .position(|cell| *cell == R)
            .map(|offset| (string_index, offset))
    })
}

/// One fretted note of a voicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNote {
    pub note: PitchedNote,
    pub string_index: usize,
    pub fret_index: usize,
    pub degree: Degree,
}

/// Resolve a chord name to fretboard positions using the shape rooted on `root_string`.
///
/// # Errors
/// - `InvalidRoot` if the text before the quality is not a note name
/// - `NoShapeForQuality` / `MalformedTemplate` for missing or broken built-in shapes
/// - `RootNotOnString` if the anchor string cannot sound the root
pub fn chord_voicing(
    chord_name: &str,
    root_string: RootString,
) -> Result<Vec<ResolvedNote>, TheoryError> {
    let (root_text, quality) = split_chord_name(chord_name)?;
    let root: NoteName = root_text.parse()?;

    let shape = root_string
        .shape(quality)
        .ok_or_else(|| TheoryError::NoShapeForQuality {
            root_string: root_string.number(),
            quality: quality.suffix().to_string(),
        })?;

    let (root_row, root_offset) = find_root_cell(shape)
        .ok_or_else(|| TheoryError::MalformedTemplate(quality.suffix().to_string()))?;

    let anchor = find_fret(root_row, root).ok_or_else(|| TheoryError::RootNotOnString {
        root: root.to_string(),
        string_number: root_row as u8 + 1,
    })?;

    Ok(project(shape, anchor, root_offset))
}

/// Like [`chord_voicing`], retrying on the other root string when the preferred one
/// cannot carry the root. Returns the root string that produced the voicing.
pub fn chord_voicing_any(
    chord_name: &str,
    preferred: RootString,
) -> Result<(RootString, Vec<ResolvedNote>), TheoryError> {
    let (root_string, notes, _) = with_fallback(preferred, |s| chord_voicing(chord_name, s))?;
    Ok((root_string, notes))
}

/// Root string used, its notes, and the warning that forced a switch if there was one
pub(crate) type Fallback = (RootString, Vec<ResolvedNote>, Option<TheoryError>);

/// Run `resolve` on `preferred`, then on the other string if the first attempt fails with
/// `RootNotOnString` or comes back empty. Any other error is returned as is.
pub(crate) fn with_fallback<F>(preferred: RootString, resolve: F) -> Result<Fallback, TheoryError>
where
    F: Fn(RootString) -> Result<Vec<ResolvedNote>, TheoryError>,
{
    let skipped = match resolve(preferred) {
        Ok(notes) if !notes.is_empty() => return Ok((preferred, notes, None)),
        Ok(_) => None,
        Err(e @ TheoryError::RootNotOnString { .. }) => Some(e),
        Err(e) => return Err(e),
    };
    let fallback = preferred.other();
    Ok((fallback, resolve(fallback)?, skipped))
}

fn project(shape: &Shape, anchor: usize, root_offset: usize) -> Vec<ResolvedNote> {
    let mut notes = Vec::new();
    for (string_index, row) in shape.iter().enumerate() {
        for (offset, cell) in row.iter().enumerate() {
            let Some(degree) = *cell else { continue };
            // Shapes that hang off the nut lose the notes below fret 1
            let Some(fret_index) = (anchor + offset).checked_sub(root_offset) else {
                continue;
            };
            if let Some(note) = note_at(string_index, fret_index) {
                notes.push(ResolvedNote {
                    note,
                    string_index,
                    fret_index,
                    degree,
                });
            }
        }
    }
    notes
}
