//! # Postprocess Module
//!
//! Passes over the formatted [`Document`](crate::dom::Document), run in this order:
//! 1. `notation` - chord leaves are re-printed in the display notation
//! 2. `markers` - marker comments become section classes and titles
//! 3. `repeats` - sections repeating earlier chords are marked `repeated-chords`,
//!    and their differing chords `force-shown`
//!
//! The marker and repeat passes read the whole tree before changing it.

mod markers;
mod notation;
mod repeats;

pub use markers::{
    apply_markers, EXPANDED_SECTION_CLASS, RECALLED_SECTION_CLASS, SHORTHAND_SECTION_CLASS,
    VARIANT_SECTION_CLASS,
};
pub use notation::convert_notation;
pub use repeats::{
    collapse_repeats, compare_chord_lists, find_best_match, MatchResult, RepeatOptions,
    SectionOccurrence, FORCE_SHOWN_CLASS, MAX_CHORD_MATCH_DISTANCE, REPEATED_CHORDS_CLASS,
};
