use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Find table rulings in rendered page bitmaps and prepare PDF pages for scanning.
#[derive(Debug, Parser)]
#[command(name = "tablines", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a rendered page image for horizontal and vertical rulings
    Scan {
        /// Grayscale or colour render of the page
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Render of the same page with text removed, used for the vertical pass
        #[arg(long, value_name = "IMAGE")]
        text_free: Option<PathBuf>,

        /// Resolution the image was rendered at; output is in page points (default: 144)
        #[arg(long, default_value_t = 144.0)]
        dpi: f64,

        /// Intensity jump that counts as an edge (default: 150)
        #[arg(long, default_value_t = 150)]
        threshold: u8,

        /// Horizontal runs must be longer than this many pixels (default: 100)
        #[arg(long, default_value_t = 100)]
        min_horizontal: u32,

        /// Vertical runs must be longer than this many pixels (default: 10)
        #[arg(long, default_value_t = 10)]
        min_vertical: u32,

        /// Snap and collapse the detected rulings before printing
        #[arg(long)]
        canonical: bool,

        /// Horizontal snap tolerance in points, with --canonical (default: 7.0)
        #[arg(long, default_value_t = 7.0, requires = "canonical")]
        snap_x: f64,

        /// Vertical snap tolerance in points, with --canonical (default: 7.0)
        #[arg(long, default_value_t = 7.0, requires = "canonical")]
        snap_y: f64,

        /// Write the image with detected rulings drawn over it
        #[arg(long, value_name = "PATH")]
        overlay: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Remove text-showing operators from a PDF page
    StripText {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Where to write the rewritten PDF
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
    },
}

/// Output format for detected rulings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
