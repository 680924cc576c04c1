use std::path::Path;

use tablines_detect::strip_text_operators;

use crate::shared::open_pdf;

pub fn run(file: &Path, page: u32, output: &Path) -> Result<(), i32> {
    let mut doc = open_pdf(file)?;

    let removed = strip_text_operators(&mut doc, page).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let mut buf = Vec::new();
    doc.save_to(&mut buf).map_err(|e| {
        eprintln!("Error: failed to encode PDF: {e}");
        1
    })?;
    std::fs::write(output, buf).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })?;

    println!(
        "Removed {removed} text operations from page {page} -> {}",
        output.display()
    );
    Ok(())
}
