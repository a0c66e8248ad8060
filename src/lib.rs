//! # chordbook
//!
//! Render ChordPro lead sheets to HTML: transpose, switch between English and Central
//! European chord names, expand recalled sections, and mark repeated chords.
//!
//! ```rust
//! use chordbook::{render_song, NotationConvention, RenderOptions};
//!
//! let source = r#"{start_of_chorus: R1}
//! [G]Glory, [D]glory
//! {end_of_chorus}
//! {chorus: R1}
//! "#;
//!
//! let options = RenderOptions {
//!     notation: NotationConvention::CentralEuropean,
//!     transpose: 4,
//!     ..RenderOptions::default()
//! };
//! let rendered = render_song(source, &options);
//!
//! assert!(rendered.html.contains(r#"<span class="chord">H</span>"#));
//! assert!(rendered.html.contains("recalled-section"));
//! ```

pub mod backend;
pub mod chord;
pub mod chordpro;
pub mod config;
pub mod dom;
pub mod error;
pub mod key;
mod markers;
pub mod postprocess;
pub mod preprocess;
pub mod render;
pub mod transpose;

pub use backend::SongBackend;
pub use chord::{Accidental, ChordSymbol, NotationConvention, Note, PitchClass};
pub use config::{RawRenderOptions, RenderOptions};
pub use error::{ChordError, ConfigError, Warning, Warnings};
pub use key::{Key, Mode};
pub use render::{
    guess_key, guess_key_or_default, guess_key_with, render_song, render_song_with, RenderedSong,
};
pub use transpose::{
    convert_chord_notation, semitones_between, transpose, transpose_chord_text, Transposition,
};
