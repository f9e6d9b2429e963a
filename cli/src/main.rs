//! slideaudit CLI - PowerPoint presentation analysis tool
//!
//! Reports hidden slides, animation/transition effects, and font usage
//! (checked against installed system fonts) for a .pptx file.

use clap::{Parser, Subcommand};
use colored::*;
use slideaudit::{analyze_file, FontCatalog, Report};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// PowerPoint structural and typographic analysis
#[derive(Parser)]
#[command(
    name = "slideaudit",
    version,
    about = "Analyze a PowerPoint presentation",
    long_about = "slideaudit - PowerPoint presentation analysis.\n\n\
                  Reports hidden slides, slides with animations or transitions,\n\
                  and every referenced font with its installed/missing status."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full text report: hidden slides, effects, and font usage
    Report {
        /// Input .pptx file
        input: PathBuf,

        /// Read the font catalog from a file (one family name per line)
        /// instead of enumerating system fonts
        #[arg(long)]
        fonts_from: Option<PathBuf>,
    },

    /// List hidden slides
    Hidden {
        /// Input .pptx file
        input: PathBuf,
    },

    /// List slides with animations or transitions
    Effects {
        /// Input .pptx file
        input: PathBuf,
    },

    /// Font usage with installed/missing status
    Fonts {
        /// Input .pptx file
        input: PathBuf,

        /// Read the font catalog from a file instead of system fonts
        #[arg(long)]
        fonts_from: Option<PathBuf>,
    },

    /// Emit the full report as JSON
    Json {
        /// Input .pptx file
        input: PathBuf,

        /// Read the font catalog from a file instead of system fonts
        #[arg(long)]
        fonts_from: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{} {}", "error:".red().bold(), msg);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Report { input, fonts_from } => {
            let report = analyze(&input, load_catalog(fonts_from.as_deref())?)?;
            print_faults(&report);
            print_hidden(&report);
            print_effects(&report);
            print_fonts(&report);
            Ok(())
        }
        Commands::Hidden { input } => {
            let report = analyze(&input, FontCatalog::empty())?;
            print_faults(&report);
            print_hidden(&report);
            Ok(())
        }
        Commands::Effects { input } => {
            let report = analyze(&input, FontCatalog::empty())?;
            print_faults(&report);
            print_effects(&report);
            Ok(())
        }
        Commands::Fonts { input, fonts_from } => {
            let report = analyze(&input, load_catalog(fonts_from.as_deref())?)?;
            print_faults(&report);
            print_fonts(&report);
            Ok(())
        }
        Commands::Json {
            input,
            fonts_from,
            output,
            compact,
        } => {
            let report = analyze(&input, load_catalog(fonts_from.as_deref())?)?;
            let json = if compact {
                serde_json::to_string(&report)
            } else {
                serde_json::to_string_pretty(&report)
            }
            .map_err(|e| format!("serializing report: {}", e))?;

            match output {
                Some(path) => fs::write(&path, json)
                    .map_err(|e| format!("writing {}: {}", path.display(), e))?,
                None => println!("{}", json),
            }
            Ok(())
        }
    }
}

fn analyze(input: &PathBuf, catalog: FontCatalog) -> Result<Report, String> {
    analyze_file(input, &catalog).map_err(|e| format!("{}: {}", input.display(), e))
}

/// Build the font catalog: either from a fixture file (one family name
/// per line) or from the OS font source.
fn load_catalog(fonts_from: Option<&std::path::Path>) -> Result<FontCatalog, String> {
    match fonts_from {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("reading font list {}: {}", path.display(), e))?;
            Ok(FontCatalog::from_names(
                content.lines().map(str::trim).filter(|l| !l.is_empty()),
            ))
        }
        None => {
            let source = font_kit::source::SystemSource::new();
            let families = source
                .all_families()
                .map_err(|e| format!("enumerating system fonts: {}", e))?;
            Ok(FontCatalog::from_names(families))
        }
    }
}

fn print_faults(report: &Report) {
    for fault in &report.unanalyzable_slides {
        eprintln!(
            "{} slide {} could not be analyzed ({}): {}",
            "warning:".yellow().bold(),
            fault.slide,
            fault.part,
            fault.reason
        );
    }
}

fn print_hidden(report: &Report) {
    println!("\n{}\n", "=== Hidden Slides ===".blue().bold());
    if report.hidden_slides.is_empty() {
        println!("(no hidden slides found)");
    } else {
        println!("Hidden slides: {}", join_indices(&report.hidden_slides));
    }
}

fn print_effects(report: &Report) {
    println!("\n{}\n", "=== Transitions and Animations ===".blue().bold());

    let transitions: Vec<usize> = report
        .effect_slides
        .iter()
        .filter(|e| e.kinds.contains(&slideaudit::EffectKind::Transition))
        .map(|e| e.slide)
        .collect();
    let animations: Vec<usize> = report
        .effect_slides
        .iter()
        .filter(|e| e.kinds.contains(&slideaudit::EffectKind::Animation))
        .map(|e| e.slide)
        .collect();

    if transitions.is_empty() {
        println!("(no transitions found)");
    } else {
        println!("Slides with transitions: {}", join_indices(&transitions));
    }
    if animations.is_empty() {
        println!("(no animations found)");
    } else {
        println!("Slides with animations: {}", join_indices(&animations));
    }
}

fn print_fonts(report: &Report) {
    println!("\n{}\n", "=== Font Usage ===".blue().bold());

    if report.catalog_empty {
        println!(
            "{}",
            "note: font catalog is empty; nothing could be verified as installed".yellow()
        );
    }

    if report.font_slides.is_empty() {
        println!("(no fonts used in presentation)");
        return;
    }

    for (font, slides) in &report.font_slides {
        // Pad before coloring so ANSI escapes don't skew the column.
        let status = if report.missing_fonts.contains(font) {
            format!("{:<10}", "Missing").red()
        } else {
            format!("{:<10}", "Installed").green()
        };
        let slides: Vec<usize> = slides.iter().copied().collect();
        println!("{:<32} {} slides {}", font, status, join_indices(&slides));
    }

    println!("\n{}", "Summary:".bold());
    println!("Total unique fonts: {}", report.font_count());
    println!("Missing fonts: {}", report.missing_fonts.len());
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
