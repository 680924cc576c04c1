use std::path::Path;

use image::DynamicImage;
use tablines_core::{CanonicalRulings, DEFAULT_COLLAPSE_EXPAND_AMOUNT, Ruling};
use tablines_detect::{RasterRulings, RasterSettings, scan_horizontal, scan_vertical, write_overlay};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::shared::open_gray;

/// Tolerances for `--canonical`; `None` prints the raw scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canonicalize {
    pub snap_x: f64,
    pub snap_y: f64,
}

pub fn run(
    image: &Path,
    text_free: Option<&Path>,
    dpi: f64,
    settings: &RasterSettings,
    canonical: Option<Canonicalize>,
    overlay: Option<&Path>,
    format: &OutputFormat,
) -> Result<(), i32> {
    if dpi.is_nan() || dpi <= 0.0 {
        eprintln!("Error: --dpi must be positive, got {dpi}");
        return Err(1);
    }

    let gray = open_gray(image)?;
    let horizontal = scan_horizontal(&gray, settings);
    let vertical = match text_free {
        Some(path) => {
            let stripped = open_gray(path)?;
            if stripped.dimensions() != gray.dimensions() {
                eprintln!(
                    "Error: text-free image is {:?}, expected {:?}",
                    stripped.dimensions(),
                    gray.dimensions()
                );
                return Err(1);
            }
            scan_vertical(&stripped, settings)
        }
        None => scan_vertical(&gray, settings),
    };
    debug!(horizontal = horizontal.len(), vertical = vertical.len(), "scanned image");

    let pixels = RasterRulings {
        horizontal,
        vertical,
    };

    if let Some(target) = overlay {
        let base = DynamicImage::ImageLuma8(gray).to_rgb8();
        write_overlay(base, &pixels, target).map_err(|e| {
            eprintln!("Error: failed to write overlay {}: {e}", target.display());
            1
        })?;
    }

    let mut rulings = pixels.scaled(72.0 / dpi);
    if let Some(Canonicalize { snap_x, snap_y }) = canonical {
        let canonical = CanonicalRulings::compute(
            &rulings.into_rulings(),
            snap_x,
            snap_y,
            DEFAULT_COLLAPSE_EXPAND_AMOUNT,
        );
        rulings = RasterRulings {
            horizontal: canonical.horizontal,
            vertical: canonical.vertical,
        };
    }

    match format {
        OutputFormat::Text => {
            print_group("horizontal", &rulings.horizontal);
            print_group("vertical", &rulings.vertical);
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "horizontal": rulings.horizontal,
                "vertical": rulings.vertical,
            });
            let line = serde_json::to_string(&obj).map_err(|e| {
                eprintln!("Error: failed to serialize rulings: {e}");
                1
            })?;
            println!("{line}");
        }
    }

    Ok(())
}

fn print_group(label: &str, rulings: &[Ruling]) {
    println!("--- {label} ({}) ---", rulings.len());
    for ruling in rulings {
        println!("{ruling}");
    }
}
