//! Intensity-run scans that find ruling lines in a grayscale bitmap.
//!
//! A scan walks every column (horizontal pass) or row (vertical pass) and
//! triggers where a pixel jumps in intensity against its predecessor. From
//! the trigger it follows the edge along the perpendicular axis for as long
//! as the pixels keep contrasting with their neighbours across the edge and
//! keep matching the trigger pixel. Runs longer than the configured minimum
//! become rulings in pixel coordinates.

use image::GrayImage;
use tablines_core::Ruling;

/// Thresholds for the raster passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSettings {
    /// Minimum intensity difference (exclusive) that counts as an edge (default: 150).
    pub intensity_threshold: u8,
    /// Horizontal runs must be strictly longer than this many pixels (default: 100).
    pub min_horizontal_length: u32,
    /// Vertical runs must be strictly longer than this many pixels (default: 10).
    pub min_vertical_length: u32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            intensity_threshold: 150,
            min_horizontal_length: 100,
            min_vertical_length: 10,
        }
    }
}

/// Rulings found by the two raster passes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterRulings {
    pub horizontal: Vec<Ruling>,
    pub vertical: Vec<Ruling>,
}

impl RasterRulings {
    /// Multiply every coordinate by `factor`, e.g. `72.0 / dpi` to go from
    /// pixels to page points.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |r: Ruling| {
            Ruling::new(r.x1() * factor, r.y1() * factor, r.x2() * factor, r.y2() * factor)
        };
        Self {
            horizontal: self.horizontal.into_iter().map(scale).collect(),
            vertical: self.vertical.into_iter().map(scale).collect(),
        }
    }

    /// Horizontal rulings followed by vertical rulings.
    pub fn into_rulings(self) -> Vec<Ruling> {
        let mut all = self.horizontal;
        all.extend(self.vertical);
        all
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

#[inline]
fn luma(image: &GrayImage, x: u32, y: u32) -> u8 {
    image.get_pixel(x, y).0[0]
}

#[inline]
fn contrast(a: u8, b: u8) -> u8 {
    a.abs_diff(b)
}

/// Scan for horizontal rulings, column by column.
///
/// Row 0 only seeds the comparison and the last row is never scanned.
/// Accepted runs are recorded per row so that later columns inside a run
/// do not re-trigger it.
pub fn scan_horizontal(image: &GrayImage, settings: &RasterSettings) -> Vec<Ruling> {
    let (width, height) = image.dimensions();
    let threshold = settings.intensity_threshold;
    let mut rulings = Vec::new();
    if width == 0 || height == 0 {
        return rulings;
    }
    // Right end of the last accepted run per row. Columns are visited in
    // increasing order, so any accepted run in a row started at or before
    // the current column.
    let mut covered_until: Vec<Option<u32>> = vec![None; height as usize];

    for x in 0..width {
        let mut last = luma(image, x, 0);

        for y in 1..height.saturating_sub(1) {
            let curr = luma(image, x, y);

            if contrast(curr, last) > threshold
                && !covered_until[y as usize].is_some_and(|end| x <= end)
            {
                let mut line_x = x + 1;
                while line_x < width {
                    let pixel = luma(image, line_x, y);
                    let above = luma(image, line_x, y - 1);
                    if contrast(pixel, above) > threshold && contrast(curr, pixel) <= threshold {
                        line_x += 1;
                    } else {
                        break;
                    }
                }

                let end_x = line_x - 1;
                if end_x - x > settings.min_horizontal_length {
                    rulings.push(Ruling::horizontal_at(y as f64, x as f64, end_x as f64));
                    covered_until[y as usize] = Some(end_x);
                }
            }

            last = curr;
        }
    }

    rulings
}

/// Scan for vertical rulings, row by row.
///
/// Mirror image of [`scan_horizontal`]: column 0 seeds the comparison, the
/// last column is never scanned, and accepted runs are recorded per column.
pub fn scan_vertical(image: &GrayImage, settings: &RasterSettings) -> Vec<Ruling> {
    let (width, height) = image.dimensions();
    let threshold = settings.intensity_threshold;
    let mut rulings = Vec::new();
    if width == 0 || height == 0 {
        return rulings;
    }
    let mut covered_until: Vec<Option<u32>> = vec![None; width as usize];

    for y in 0..height {
        let mut last = luma(image, 0, y);

        for x in 1..width.saturating_sub(1) {
            let curr = luma(image, x, y);

            if contrast(curr, last) > threshold
                && !covered_until[x as usize].is_some_and(|end| y <= end)
            {
                let mut line_y = y + 1;
                while line_y < height {
                    let pixel = luma(image, x, line_y);
                    let left = luma(image, x - 1, line_y);
                    if contrast(pixel, left) > threshold && contrast(curr, pixel) <= threshold {
                        line_y += 1;
                    } else {
                        break;
                    }
                }

                let end_y = line_y - 1;
                if end_y - y > settings.min_vertical_length {
                    rulings.push(Ruling::vertical_at(x as f64, y as f64, end_y as f64));
                    covered_until[x as usize] = Some(end_y);
                }
            }

            last = curr;
        }
    }

    rulings
}
