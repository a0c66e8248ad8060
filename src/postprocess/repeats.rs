//! # Repeat Collapse
//!
//! Marks sections whose chords repeat an earlier section of the same kind and label, so
//! the display can hide chords the reader has already seen.
//!
//! ## Matching
//! Chord sequences are compared position by position; the distance is the number of
//! positions that differ, counting positions present in only one sequence. Each new
//! section is compared against every earlier distinct sequence in its group and the
//! closest one wins.
//!
//! ## Marking
//! - No earlier sequence, or best distance above the threshold: the sequence is stored
//!   and the section left alone
//! - Otherwise: the section gets `repeated-chords` and every differing or extra chord
//!   gets `force-shown`; a sequence that is not an exact repeat is stored as well
//!
//! ## Example
//! ```text
//! chorus 1:  G  D  Em C          stored
//! chorus 2:  G  D  Em D          repeated-chords, D force-shown
//! chorus 3:  G  D  Em C  G       repeated-chords, G force-shown (closest: chorus 1)
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{Document, NodeId};
use crate::preprocess::SectionKind;

use super::markers::SHORTHAND_SECTION_CLASS;

/// Default maximum number of differing chords for a section to count as a repeat
pub const MAX_CHORD_MATCH_DISTANCE: usize = 3;

pub const REPEATED_CHORDS_CLASS: &str = "repeated-chords";
pub const FORCE_SHOWN_CLASS: &str = "force-shown";

// "(2x) " prefix added to compressed recalls
static REPEAT_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d+x\)\s*").expect("repeat count pattern is valid"));

/// Per-position comparison of two chord sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// One entry per position of the longer sequence
    pub matches: Vec<bool>,
    pub distance: usize,
}

/// Options for [`collapse_repeats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatOptions {
    /// Group sections by their title as well as their kind
    pub use_labels: bool,
    pub max_distance: usize,
}

impl Default for RepeatOptions {
    fn default() -> Self {
        Self {
            use_labels: true,
            max_distance: MAX_CHORD_MATCH_DISTANCE,
        }
    }
}

/// A rendered verse, chorus or bridge with its chords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOccurrence {
    pub kind: SectionKind,
    pub label: String,
    pub chords: Vec<String>,
    pub node: NodeId,
    pub chord_nodes: Vec<NodeId>,
}

impl SectionOccurrence {
    /// Read a section element; `None` for anonymous and shorthand sections
    pub fn read(doc: &Document, node: NodeId, use_labels: bool) -> Option<Self> {
        if doc.has_class(node, SHORTHAND_SECTION_CLASS) {
            return None;
        }
        let kind = doc
            .classes(node)
            .iter()
            .find_map(|class| SectionKind::from_css_class(class))?;

        let title = doc
            .find_by_class(node, "section-title")
            .first()
            .map(|title| normalize_title(&doc.text_content(*title)))
            .filter(|title| !title.is_empty());
        let label = match title {
            Some(title) if use_labels => title,
            _ => kind.shorthand().to_string(),
        };

        let (chords, chord_nodes): (Vec<String>, Vec<NodeId>) = doc
            .find_by_class(node, "chord")
            .into_iter()
            .map(|chord| (doc.text_content(chord).trim().to_string(), chord))
            .filter(|(text, _)| !text.is_empty())
            .unzip();

        Some(Self {
            kind,
            label,
            chords,
            node,
            chord_nodes,
        })
    }
}

/// `"(2x) R1: "` → `"R1"`
fn normalize_title(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_suffix(':').unwrap_or(text).trim();
    REPEAT_COUNT.replace(text, "").trim().to_string()
}

/// Compare two chord sequences position by position
pub fn compare_chord_lists(first: &[String], second: &[String]) -> MatchResult {
    let length = first.len().max(second.len());
    let matches: Vec<bool> = (0..length)
        .map(|i| matches!((first.get(i), second.get(i)), (Some(a), Some(b)) if a == b))
        .collect();
    let distance = matches.iter().filter(|m| !**m).count();
    MatchResult { matches, distance }
}

/// Closest of `known` to `current`; the earliest wins a tie. `None` when `known` is empty.
pub fn find_best_match(current: &[String], known: &[Vec<String>]) -> Option<MatchResult> {
    known
        .iter()
        .map(|sequence| compare_chord_lists(sequence, current))
        .fold(None, |best: Option<MatchResult>, candidate| match best {
            Some(best) if best.distance <= candidate.distance => Some(best),
            _ => Some(candidate),
        })
}

/// Mark repeated sections and their differing chords in `doc`
pub fn collapse_repeats(doc: &mut Document, options: &RepeatOptions) {
    let occurrences: Vec<SectionOccurrence> = doc
        .find_by_class(doc.root(), "section")
        .into_iter()
        .filter_map(|node| SectionOccurrence::read(doc, node, options.use_labels))
        .collect();

    let mut seen: HashMap<(SectionKind, String), Vec<Vec<String>>> = HashMap::new();
    let mut marks: Vec<(NodeId, &'static str)> = Vec::new();

    for occurrence in occurrences {
        let group = (occurrence.kind, occurrence.label.clone());
        let known = seen.entry(group.clone()).or_default();

        match find_best_match(&occurrence.chords, known) {
            Some(best) if best.distance <= options.max_distance => {
                marks.push((occurrence.node, REPEATED_CHORDS_CLASS));
                marks.extend(
                    occurrence
                        .chord_nodes
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !best.matches.get(*i).copied().unwrap_or(false))
                        .map(|(_, node)| (*node, FORCE_SHOWN_CLASS)),
                );
                if best.distance > 0 {
                    known.push(occurrence.chords);
                }
            }
            _ => known.push(occurrence.chords),
        }

        // A labelled section also seeds the unlabelled group of its kind
        let default_group = (occurrence.kind, occurrence.kind.shorthand().to_string());
        if group != default_group && seen.get(&default_group).map_or(true, Vec::is_empty) {
            let sequences = seen.get(&group).cloned().unwrap_or_default();
            seen.insert(default_group, sequences);
        }
    }

    for (node, class) in marks {
        doc.add_class(node, class);
    }
}
