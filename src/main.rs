//! # Slipmark CLI
//!
//! Command-line interface for laying out and printing receipt markup.
//!
//! ## Usage
//!
//! ```bash
//! # Lay out markup for 42 columns, tags kept
//! slipmark format receipt.txt
//!
//! # Show the visible text only, centered by default
//! slipmark --align center preview receipt.txt
//!
//! # Decode markup into styled runs (JSON)
//! slipmark runs receipt.txt
//!
//! # Draw commands as JSON, or a PNG of the receipt
//! slipmark print receipt.txt
//! slipmark print --png receipt.png receipt.txt
//!
//! # Templates
//! slipmark template save lunch menu.txt --description "Weekday menu"
//! slipmark template list
//! slipmark template export lunch lunch.txt
//!
//! # Read from stdin
//! echo "[CENTER]HELLO" | slipmark format -
//! ```
//!
//! Set `RUST_LOG=debug` to see font substitutions and other diagnostics.

use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use slipmark::{
    AppConfig, Composer, PrinterConfig, SlipmarkError,
    canvas,
    layout::{Alignment, CenterPadding, Overflow},
    markup::decode_runs,
    template::{Logo, TemplateStore},
};

/// Slipmark - Receipt markup layout and printing
#[derive(Parser, Debug)]
#[command(name = "slipmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

/// Settings that override the configuration file.
#[derive(Args, Debug)]
struct Overrides {
    /// Columns per line
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Alignment of lines without a directive (left, center, right)
    #[arg(long, global = true)]
    align: Option<Alignment>,

    /// Centering padding (leading, both)
    #[arg(long, global = true)]
    center: Option<CenterPadding>,

    /// Overlong left-aligned lines (keep, truncate, wrap)
    #[arg(long, global = true)]
    overflow: Option<Overflow>,

    /// Base font size in points
    #[arg(long, global = true)]
    font_size: Option<u32>,

    /// Line spacing multiplier
    #[arg(long, global = true)]
    line_spacing: Option<f32>,

    /// Font family for text outside [FONT=...]
    #[arg(long, global = true)]
    font: Option<String>,

    /// Template directory
    #[arg(long, global = true, value_name = "DIR")]
    templates: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out markup and print it with tags kept
    Format {
        /// Markup file, or - for stdin
        input: PathBuf,
    },

    /// Lay out markup and print the visible text
    Preview {
        /// Markup file, or - for stdin
        input: PathBuf,

        /// Print styled runs as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode markup into styled runs (JSON)
    Runs {
        /// Markup file, or - for stdin
        input: PathBuf,
    },

    /// Build print draw commands
    Print {
        /// Markup file, or - for stdin
        input: PathBuf,

        /// Output to PNG file instead of JSON draw commands
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Manage saved templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Subcommand, Debug)]
enum TemplateAction {
    /// List saved templates
    List,

    /// Save a markup file as a template
    Save {
        name: String,
        /// Markup file, or - for stdin
        input: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
        /// Logo image path
        #[arg(long)]
        logo: Option<String>,
        /// Logo width
        #[arg(long, requires = "logo")]
        logo_width: Option<u32>,
        /// Logo alignment
        #[arg(long, requires = "logo")]
        logo_alignment: Option<String>,
    },

    /// Print a template's markup
    Load { name: String },

    /// Show a template's metadata
    Info { name: String },

    /// Delete a template
    Delete { name: String },

    /// Write a template to an export file
    Export { name: String, file: PathBuf },

    /// Save an export file (or plain markup file) as a template
    Import { file: PathBuf, name: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SlipmarkError> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), &cli.overrides)?;
    let composer = Composer::from_config(&config);

    match cli.command {
        Commands::Format { input } => {
            print!("{}", composer.format(&read_input(&input)?));
        }

        Commands::Preview { input, json } => {
            let preview = composer.preview(&read_input(&input)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                print!("{}", preview.text());
            }
        }

        Commands::Runs { input } => {
            let runs = decode_runs(&read_input(&input)?);
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }

        Commands::Print { input, png } => {
            let job = composer.print(&read_input(&input)?)?;
            if job.clipped {
                eprintln!("Warning: receipt was clipped to the page height");
            }
            match png {
                Some(path) => {
                    let bytes = canvas::render_png(&job, &PrinterConfig::TSP100)?;
                    std::fs::write(&path, bytes)?;
                    println!("Saved to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&job)?),
            }
        }

        Commands::Template { action } => {
            run_template(TemplateStore::open(&config.template_dir)?, action)?;
        }
    }

    Ok(())
}

fn run_template(store: TemplateStore, action: TemplateAction) -> Result<(), SlipmarkError> {
    match action {
        TemplateAction::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No templates in {}", store.dir().display());
            }
            for name in names {
                println!("{}", name);
            }
        }

        TemplateAction::Save {
            name,
            input,
            description,
            logo,
            logo_width,
            logo_alignment,
        } => {
            let logo = logo.map(|path| {
                let mut logo = Logo::new(path);
                if let Some(width) = logo_width {
                    logo.width = width;
                }
                if let Some(alignment) = logo_alignment {
                    logo.alignment = alignment;
                }
                logo
            });
            store.save(&name, &read_input(&input)?, &description, logo)?;
            println!("Saved template '{}'", name);
        }

        TemplateAction::Load { name } => print!("{}", store.load(&name)?),

        TemplateAction::Info { name } => match store.info(&name) {
            Some(info) => {
                println!("Name: {}", info.display_name);
                println!("Description: {}", info.description);
                println!("Created: {}", info.formatted_date());
                if let Some(logo) = info.logo.as_ref().filter(|_| info.has_logo()) {
                    println!("Logo: {} ({} px, {})", logo.path, logo.width, logo.alignment);
                }
            }
            None => {
                return Err(SlipmarkError::Template(format!(
                    "no metadata for template '{name}'"
                )));
            }
        },

        TemplateAction::Delete { name } => {
            if !store.delete(&name)? {
                return Err(SlipmarkError::Template(format!("template '{name}' not found")));
            }
            println!("Deleted template '{}'", name);
        }

        TemplateAction::Export { name, file } => {
            store.export(&name, &file)?;
            println!("Exported '{}' to {}", name, file.display());
        }

        TemplateAction::Import { file, name } => {
            store.import(&file, &name)?;
            println!("Imported {} as '{}'", file.display(), name);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, SlipmarkError> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(width) = overrides.width {
        config.layout.max_width = width;
    }
    if let Some(align) = overrides.align {
        config.layout.default_alignment = align;
    }
    if let Some(center) = overrides.center {
        config.layout.center_padding = center;
    }
    if let Some(overflow) = overrides.overflow {
        config.layout.overflow = overflow;
    }
    if let Some(size) = overrides.font_size {
        config.render.font_size = size;
    }
    if let Some(spacing) = overrides.line_spacing {
        config.render.line_spacing = spacing;
    }
    if let Some(font) = &overrides.font {
        config.render.base_family = Some(font.clone());
    }
    if let Some(dir) = &overrides.templates {
        config.template_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Read a whole input file; `-` reads stdin.
fn read_input(path: &Path) -> Result<String, SlipmarkError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
