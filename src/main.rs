use chipwave::{demo, validate_input, ChipWave, Config};
use clap::Parser;
use std::path::PathBuf;

/// MIDI-to-Chiptune Rendering System
#[derive(Parser)]
#[command(name = "chipwave")]
#[command(about = "Render Standard MIDI files as 4-channel chiptune WAV audio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Input MIDI file; when omitted, a short demo tone is written instead
    input: Option<PathBuf>,

    /// Output WAV file (defaults to the input path with a .wav extension)
    output: Option<PathBuf>,

    /// Playback tempo in beats per minute
    #[arg(short, long)]
    tempo: Option<f64>,

    /// Custom configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate QA plots beside the output file
    #[arg(long)]
    qa: bool,

    /// Quiet output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = cli.config {
        chipwave::config::load_config(config_path)?
    } else {
        Config::default()
    };
    if let Some(tempo) = cli.tempo {
        config.playback.tempo_bpm = tempo;
    }
    if cli.qa {
        config.qa.enabled = true;
    }

    // With no input, write the demo tone and succeed
    let Some(input) = cli.input else {
        let path = cli
            .output
            .unwrap_or_else(|| PathBuf::from("demo_chiptune.wav"));
        demo::write_demo(&path, config.render.sample_rate)?;
        if !cli.quiet {
            println!("No input file given; wrote demo tone to {}", path.display());
        }
        return Ok(());
    };

    validate_input(&input)?;
    let output = cli.output.unwrap_or_else(|| input.with_extension("wav"));

    let renderer = ChipWave::new(config)?;

    if !cli.quiet {
        println!("Rendering {}...", input.display());
    }

    let report = renderer.render(&input, &output)?;

    if !cli.quiet {
        println!(
            "Parsed format {} file: {} tracks, {} ticks/quarter",
            report.format, report.track_count, report.ticks_per_quarter
        );
        println!(
            "Assembled {} notes spanning {:.2} s",
            report.note_count, report.total_duration
        );
        println!("Wrote {}", output.display());
    }

    Ok(())
}
