//! # Public API
//!
//! Entry points of the rendering pipeline.
//!
//! ## Functions
//! - [`render_song()`] - Render markup with the built-in ChordPro backend
//! - [`render_song_with()`] - Render with any [`SongBackend`]
//! - [`guess_key()`] / [`guess_key_or_default()`] - Best guess at the song's key
//!
//! ## Pipeline
//! 1. Expand recalls and variants (`preprocess`)
//! 2. Parse with the backend
//! 3. Resolve the transposition: semitones or target key, minus the capo
//! 4. Format with the backend, transposing every chord
//! 5. Re-print chords in the display notation
//! 6. Apply marker comments, then collapse repeated sections
//! 7. Serialize
//!
//! ## Example
//! ```rust
//! use chordbook::{render_song, RenderOptions};
//!
//! let options = RenderOptions { transpose: 2, ..RenderOptions::default() };
//! let rendered = render_song("[Am]One [F]two [C]three [G]four", &options);
//!
//! assert!(rendered.html.contains(r#"<span class="chord">Bm</span>"#));
//! assert!(rendered.warnings.is_empty());
//! ```

use tracing::debug;

use crate::backend::SongBackend;
use crate::chordpro::ChordProBackend;
use crate::config::RenderOptions;
use crate::error::{Warning, Warnings};
use crate::key::Key;
use crate::postprocess::{apply_markers, collapse_repeats, convert_notation};
use crate::preprocess::preprocess;
use crate::transpose::Transposition;

/// Output of one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSong {
    pub html: String,
    /// Everything that was recovered from, in the order it was found
    pub warnings: Vec<Warning>,
}

/// Render ChordPro markup to HTML with the built-in backend.
///
/// Never fails; see [`RenderedSong::warnings`] for what went wrong along the way.
pub fn render_song(markup: &str, options: &RenderOptions) -> RenderedSong {
    render_song_with(&ChordProBackend::new(options.input_notation), markup, options)
}

/// Render markup with a custom backend
pub fn render_song_with<B: SongBackend>(
    backend: &B,
    markup: &str,
    options: &RenderOptions,
) -> RenderedSong {
    let mut warnings = Warnings::new();

    let expanded = preprocess(markup, &options.preprocess_options(), &mut warnings);
    debug!("Preprocessed {} lines into {}", markup.lines().count(), expanded.lines().count());

    let song = backend.parse(&expanded);
    let transposition = resolve_transposition(backend, &song, options, &mut warnings);
    debug!(
        "Transposing by {} semitones (spelling {:?})",
        transposition.semitones(),
        transposition.spelling()
    );

    let mut doc = backend.format(&song, &transposition, &mut warnings);
    convert_notation(&mut doc, options.notation);
    apply_markers(&mut doc);
    collapse_repeats(&mut doc, &options.repeat_options());

    RenderedSong {
        html: doc.to_html(),
        warnings: warnings.into_vec(),
    }
}

/// The single transposition applied to every chord of a render, capo included.
///
/// Black keys are spelled the way the key the song ends up in is written, whichever way
/// the shift was requested. Without a known song key chords keep their own spelling.
fn resolve_transposition<B: SongBackend>(
    backend: &B,
    song: &B::Song,
    options: &RenderOptions,
    warnings: &mut Warnings,
) -> Transposition {
    let capo = options.capo.or_else(|| backend.capo(song)).unwrap_or(0);
    let source = options.source_key.or_else(|| backend.possible_key(song));

    let base = match (options.target_key, source) {
        (Some(target), Some(source)) => {
            debug!("Moving from key {} to {}", source, target);
            Transposition::between(&source, &target)
        }
        (Some(target), None) => {
            warnings.push(Warning::UnknownSourceKey {
                target: target.to_string_in(options.notation),
            });
            Transposition::identity()
        }
        (None, _) => Transposition::by(options.transpose),
    };

    let shifted = Transposition::by(base.semitones()).with_capo(capo);
    match source {
        Some(source) if !shifted.is_identity() => {
            shifted.with_spelling(shifted.apply_to_key(&source).spelling())
        }
        _ => shifted,
    }
}

/// Best guess at the key of `markup`: `{key}` if declared, else inferred from chords.
///
/// `None` when the song declares no usable key and has no recognizable chords.
pub fn guess_key(markup: &str, options: &RenderOptions) -> Option<Key> {
    guess_key_with(&ChordProBackend::new(options.input_notation), markup, options)
}

/// [`guess_key`] with a custom backend
pub fn guess_key_with<B: SongBackend>(
    backend: &B,
    markup: &str,
    options: &RenderOptions,
) -> Option<Key> {
    let mut warnings = Warnings::new();
    let expanded = preprocess(markup, &options.preprocess_options(), &mut warnings);
    let song = backend.parse(&expanded);
    backend.possible_key(&song)
}

/// [`guess_key`], falling back to C major
pub fn guess_key_or_default(markup: &str, options: &RenderOptions) -> Key {
    guess_key(markup, options).unwrap_or_default()
}
