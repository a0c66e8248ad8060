use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use chordbook::{guess_key, render_song, Key, NotationConvention, RenderOptions};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "chordbook")]
#[command(about = "Render ChordPro lead sheets to HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a song to HTML
    Render {
        /// ChordPro file
        file: PathBuf,

        /// Semitones to transpose by
        #[arg(short, long, allow_negative_numbers = true)]
        transpose: Option<i32>,

        /// Transpose to this key instead
        #[arg(long = "to-key")]
        to_key: Option<String>,

        /// Key the song is written in (default: {key} or a guess)
        #[arg(short, long)]
        key: Option<String>,

        /// Capo fret (default: {capo})
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
        capo: Option<i32>,

        /// Display notation (english, central-european)
        #[arg(short, long)]
        notation: Option<String>,

        /// Notation the chords are written in
        #[arg(long)]
        input_notation: Option<String>,

        /// YAML options file; command-line flags take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the declared or guessed key of a song
    Key {
        /// ChordPro file
        file: PathBuf,

        /// Notation the chords are written in
        #[arg(long)]
        input_notation: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            transpose,
            to_key,
            key,
            capo,
            notation,
            input_notation,
            config,
            output,
        } => {
            let mut options = match config {
                Some(path) => RenderOptions::from_file(&path).unwrap_or_else(|e| {
                    fail(&format!("Error loading options '{}': {}", path.display(), e))
                }),
                None => RenderOptions::default(),
            };

            if let Some(name) = input_notation {
                options.input_notation = parse_notation(&name);
            }
            if let Some(name) = notation {
                options.notation = parse_notation(&name);
            }
            if let Some(semitones) = transpose {
                options.transpose = semitones;
            }
            if let Some(text) = to_key {
                options.target_key = Some(parse_key(&text, options.input_notation));
            }
            if let Some(text) = key {
                options.source_key = Some(parse_key(&text, options.input_notation));
            }
            if capo.is_some() {
                options.capo = capo;
            }

            let source = read_source(&file);
            let rendered = render_song(&source, &options);
            if !rendered.warnings.is_empty() {
                warn!("{} warning(s) while rendering {}", rendered.warnings.len(), file.display());
            }

            match output {
                Some(path) => {
                    if let Err(e) = fs::write(&path, &rendered.html) {
                        fail(&format!("Error writing to '{}': {}", path.display(), e));
                    }
                    info!("Wrote {}", path.display());
                }
                None => println!("{}", rendered.html),
            }
        }
        Commands::Key {
            file,
            input_notation,
        } => {
            let mut options = RenderOptions::default();
            if let Some(name) = input_notation {
                options.input_notation = parse_notation(&name);
            }
            let source = read_source(&file);
            match guess_key(&source, &options) {
                Some(key) => println!("{}", key.to_string_in(options.input_notation)),
                None => fail("Could not determine the key"),
            }
        }
    }
}

fn read_source(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", path.display(), e)))
}

fn parse_notation(name: &str) -> NotationConvention {
    NotationConvention::from_name(name).unwrap_or_else(|| fail(&format!("Unknown notation '{}'", name)))
}

fn parse_key(text: &str, notation: NotationConvention) -> Key {
    Key::parse(text, notation).unwrap_or_else(|e| fail(&e.to_string()))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
