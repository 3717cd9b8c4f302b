//! CLI tool for rendering slide deck descriptions to PowerPoint files.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use deck_core::naming::suggested_file_name;
use deck_core::{
    draft_presentation, presentation_from_model_output, DraftOptions, Intake, LayoutOptions, PayloadOptions,
    Presentation,
};
use deck_pptx::{render_presentation, PptxReader, RenderOptions};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Render JSON slide decks to .pptx files.
#[derive(Parser, Debug)]
#[command(name = "deck-render")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a deck description to a .pptx file
    Render(RenderArgs),
    /// Turn plain text into a draft deck description (JSON)
    Draft(DraftArgs),
    /// Print the slides, shapes and notes of a .pptx file
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input deck description (.json)
    input: PathBuf,

    /// Output file or directory (default: a name derived from the title, next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep slides of unknown type as blank slides instead of failing
    #[arg(long)]
    lenient: bool,

    /// Treat the input as raw model output (code fences, missing author, string content)
    #[arg(long)]
    from_model_output: bool,

    /// Author used when model output has none
    #[arg(long, requires = "from_model_output")]
    default_author: Option<String>,

    /// Date (YYYY-MM-DD) stamped onto title slides of model output
    #[arg(long, requires = "from_model_output")]
    stamp_date: Option<NaiveDate>,

    /// Title keyword marking an agenda slide (repeatable; replaces the defaults)
    #[arg(long = "agenda-keyword")]
    agenda_keywords: Vec<String>,

    /// Maximum characters per text field
    #[arg(long)]
    max_text_len: Option<usize>,

    /// Creation time (RFC 3339) recorded in the document properties
    #[arg(long)]
    created: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct DraftArgs {
    /// Input text file
    input: PathBuf,

    /// Output file (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cover date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Author of the drafted deck
    #[arg(long)]
    author: Option<String>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Input PowerPoint file (.pptx)
    input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &cli.command {
        Command::Render(args) => render(args, cli.verbose),
        Command::Draft(args) => draft(args),
        Command::Inspect(args) => inspect(args),
    }
}

/// Load and validate a deck description.
fn load_presentation(args: &RenderArgs) -> Result<Presentation> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let intake = if args.lenient { Intake::Lenient } else { Intake::Strict };

    let presentation = if args.from_model_output {
        let mut options = PayloadOptions::new().with_intake(intake);
        if let Some(author) = &args.default_author {
            options = options.with_default_author(author.clone());
        }
        if let Some(date) = args.stamp_date {
            options = options.with_stamp_date(date);
        }
        presentation_from_model_output(&raw, &options)
    } else {
        Presentation::from_json(&raw, intake)
    };

    presentation.with_context(|| format!("Invalid deck description in {}", args.input.display()))
}

fn render(args: &RenderArgs, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Processing: {}", args.input.display());
    }

    let presentation = load_presentation(args)?;

    let mut layout = LayoutOptions::new();
    if let Some(max) = args.max_text_len {
        layout = layout.with_max_text_len(max);
    }
    if !args.agenda_keywords.is_empty() {
        layout = layout.with_agenda_keywords(args.agenda_keywords.iter());
    }

    let mut options = RenderOptions::new();
    if let Some(created) = args.created {
        options = options.with_created(created);
    }

    let bytes = render_presentation(&presentation, &layout, &options)
        .with_context(|| format!("Failed to render {}", args.input.display()))?;

    let output_path = get_output_path(&args.input, args.output.as_ref(), &presentation.title)?;
    write_output(&output_path, &bytes)?;

    if verbose {
        eprintln!("  Rendered {} slides", presentation.slides.len());
        eprintln!("Written to: {}", output_path.display());
    }

    Ok(())
}

fn draft(args: &DraftArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut options = DraftOptions::new(date);
    if let Some(author) = &args.author {
        options = options.with_author(author.clone());
    }

    let presentation = draft_presentation(&text, &options);
    let json = serde_json::to_string_pretty(&presentation).context("Failed to serialize draft")?;

    match &args.output {
        Some(path) => write_output(path, format!("{}\n", json).as_bytes()),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

fn inspect(args: &InspectArgs) -> Result<()> {
    let file = File::open(&args.input).with_context(|| format!("Failed to open {}", args.input.display()))?;
    let summary = PptxReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Title:  {}", summary.title.as_deref().unwrap_or("-"));
    println!("Author: {}", summary.author.as_deref().unwrap_or("-"));
    for (idx, slide) in summary.slides.iter().enumerate() {
        println!("\n[{}] {}", idx + 1, slide.name);
        for shape in &slide.shapes {
            let text = shape.text.replace('\n', " / ");
            println!("  {} @ ({}, {}): {}", shape.name, shape.x, shape.y, text);
        }
        if let Some(notes) = &slide.notes {
            println!("  notes: {}", notes.replace('\n', " / "));
        }
    }

    Ok(())
}

/// Determine the output path for a rendered deck.
fn get_output_path(input_path: &Path, output: Option<&PathBuf>, title: &str) -> Result<PathBuf> {
    let suggested = || suggested_file_name(title, Local::now().naive_local());

    let output_path = match output {
        Some(path) if path.is_dir() => path.join(suggested()),
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
            }
            path.clone()
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(suggested()),
            None => PathBuf::from(suggested()),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
