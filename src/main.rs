//! glyph-eyes CLI: generate eye frames and convert them to playback timelines.
//!
//! ## Usage
//!
//! ```bash
//! glyph-eyes generate --preset corrected --dst eyes.csv
//! glyph-eyes generate --config settings.toml --dst eyes.csv
//! glyph-eyes convert --src eyes.csv --dst eyes.json --loop --repeat 2
//! glyph-eyes slow --src eyes.csv --dst eyes_slow.csv --repeat 3
//! glyph-eyes preview --src eyes.csv --frame 0
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use glyph_eyes::{
    files, look_around, render_sequence, ConvertSettings, EyePreset, TimelineOptions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glyph-eyes", version, about = "LED-matrix eyes frame generator and timeline converter")]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the look-around animation to a CSV file
    Generate(GenerateArgs),
    /// Convert a CSV frame file into a JSON timeline
    Convert(ConvertArgs),
    /// Repeat every CSV row to slow down playback
    Slow(SlowArgs),
    /// Print a text preview of frames from a CSV file
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Geometry preset [default: corrected]
    #[arg(long)]
    preset: Option<EyePreset>,

    /// Settings TOML file; its `preset` applies unless --preset is given
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "glyph_eyes_animation_corrected.csv")]
    dst: PathBuf,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input CSV path
    #[arg(long, default_value = "glyph_eyes_animation_corrected.csv")]
    src: PathBuf,

    /// Output JSON path
    #[arg(long, default_value = "glyph_eyes_animation_slow.json")]
    dst: PathBuf,

    /// Settings TOML file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Duration per entry in milliseconds [default: 400]
    #[arg(long)]
    duration: Option<u64>,

    /// Easing label for every entry [default: easeInOutSine]
    #[arg(long)]
    easing: Option<String>,

    /// Set the loop flag in the document
    #[arg(long = "loop")]
    looping: bool,

    /// Entries emitted per input frame [default: 1]
    #[arg(long)]
    repeat: Option<usize>,
}

#[derive(Args, Debug)]
struct SlowArgs {
    /// Input CSV path
    #[arg(long, default_value = "glyph_eyes_animation_corrected.csv")]
    src: PathBuf,

    /// Output CSV path
    #[arg(long)]
    dst: PathBuf,

    /// Copies of each row
    #[arg(long, default_value_t = 2)]
    repeat: usize,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Input CSV path
    #[arg(long)]
    src: PathBuf,

    /// Only show this frame (0-based)
    #[arg(long)]
    frame: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Convert(args) => run_convert(&args),
        Commands::Slow(args) => run_slow(&args),
        Commands::Preview(args) => run_preview(&args),
    }
}

fn load_settings(config: Option<&Path>) -> Result<ConvertSettings> {
    match config {
        Some(path) => ConvertSettings::from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(ConvertSettings::default()),
    }
}

fn generate_preset(args: &GenerateArgs) -> Result<EyePreset> {
    if let Some(preset) = args.preset {
        return Ok(preset);
    }
    Ok(load_settings(args.config.as_deref())?.preset())
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let preset = generate_preset(args)?;
    let frames = render_sequence(&preset.geometry(), &look_around());
    files::write_frames_csv(&args.dst, &frames)
        .with_context(|| format!("failed to write {}", args.dst.display()))?;
    info!(%preset, frames = frames.len(), "generated look-around frames");
    Ok(())
}

fn convert_options(args: &ConvertArgs) -> Result<TimelineOptions> {
    let settings = load_settings(args.config.as_deref())?;
    let mut options = settings.timeline_options();
    if let Some(duration) = args.duration {
        options.duration_ms = duration;
    }
    if let Some(easing) = &args.easing {
        options.easing = easing.clone();
    }
    if args.looping {
        options.looping = true;
    }
    if let Some(repeat) = args.repeat {
        options.repeat = repeat;
    }
    Ok(options)
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let options = convert_options(args)?;
    let doc = files::convert_csv_to_json(&args.src, &args.dst, &options)
        .with_context(|| format!("failed to convert {}", args.src.display()))?;
    info!(
        entries = doc.len(),
        duration_ms = options.duration_ms,
        total_ms = doc.total_duration_ms,
        easing = %options.easing,
        looping = doc.looping,
        "converted"
    );
    Ok(())
}

fn run_slow(args: &SlowArgs) -> Result<()> {
    let (source, written) = files::slow_down_csv(&args.src, &args.dst, args.repeat)
        .with_context(|| format!("failed to slow down {}", args.src.display()))?;
    info!(source, written, repeat = args.repeat.max(1), "repeated frames");
    Ok(())
}

fn run_preview(args: &PreviewArgs) -> Result<()> {
    let frames = files::read_frames_csv(&args.src)
        .with_context(|| format!("failed to read {}", args.src.display()))?;

    let selected: Vec<(usize, &glyph_eyes::Frame)> = match args.frame {
        Some(i) if i < frames.len() => vec![(i, &frames[i])],
        Some(i) => bail!("frame {i} out of range ({} frames)", frames.len()),
        None => frames.iter().enumerate().collect(),
    };
    for (i, frame) in selected {
        println!("frame {i}:");
        print!("{}", frame.preview());
    }
    Ok(())
}
