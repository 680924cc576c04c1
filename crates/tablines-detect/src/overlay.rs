//! Diagnostic overlay: detected rulings drawn over an RGB render.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tablines_core::Ruling;

use crate::error::DetectError;
use crate::raster::RasterRulings;

/// Colours cycled across rulings, horizontal rulings first.
pub const OVERLAY_PALETTE: [Rgb<u8>; 5] = [
    Rgb([27, 158, 119]),
    Rgb([217, 95, 2]),
    Rgb([117, 112, 179]),
    Rgb([231, 41, 138]),
    Rgb([102, 166, 30]),
];

/// Stroke width in pixels.
pub const OVERLAY_STROKE: u32 = 2;

/// Pixel rectangle covering `ruling` with the overlay stroke, centred on it.
fn stroke_rect(ruling: &Ruling) -> Option<Rect> {
    let half = (OVERLAY_STROKE / 2) as i32;
    let left = ruling.left().round() as i32;
    let top = ruling.top().round() as i32;
    let span = |from: f64, to: f64| (to - from).round().max(0.0) as u32 + 1;

    if ruling.horizontal() {
        let width = span(ruling.left(), ruling.right());
        Some(Rect::at(left, top - half).of_size(width, OVERLAY_STROKE))
    } else if ruling.vertical() {
        let height = span(ruling.top(), ruling.bottom());
        Some(Rect::at(left - half, top).of_size(OVERLAY_STROKE, height))
    } else {
        None
    }
}

/// Draw pixel-space `rulings` onto `image`.
pub fn draw_overlay(image: &mut RgbImage, rulings: &RasterRulings) {
    for (i, ruling) in rulings.horizontal.iter().chain(&rulings.vertical).enumerate() {
        if let Some(rect) = stroke_rect(ruling) {
            draw_filled_rect_mut(image, rect, OVERLAY_PALETTE[i % OVERLAY_PALETTE.len()]);
        }
    }
}

/// `<stem>-<page>.jpg` next to `document`.
pub fn overlay_path(document: &Path, page_number: u32) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    document.with_file_name(format!("{stem}-{page_number}.jpg"))
}

/// Draw `rulings` onto `base` and encode it to `target`; the format follows
/// the file extension.
pub fn write_overlay(
    mut base: RgbImage,
    rulings: &RasterRulings,
    target: &Path,
) -> Result<(), DetectError> {
    draw_overlay(&mut base, rulings);
    base.save(target)?;
    Ok(())
}
