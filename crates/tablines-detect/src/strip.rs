//! Remove text-showing operators from a page's content stream.
//!
//! Rendering a page after stripping leaves only its vector graphics, which
//! keeps glyph edges out of the vertical raster pass.

use lopdf::Document;
use lopdf::content::Content;
use tracing::debug;

use crate::error::DetectError;

/// Operators that paint glyphs: `Tj`, `TJ`, `'` and `"`.
pub const TEXT_SHOWING_OPERATORS: [&str; 4] = ["Tj", "TJ", "'", "\""];

/// Drop every text-showing operation (with its operands) from page
/// `page_number` (1-based) and write the content back.
///
/// Returns the number of operations removed. Text state operators such as
/// `BT`, `Tf` and `Td` are left alone; they paint nothing.
pub fn strip_text_operators(doc: &mut Document, page_number: u32) -> Result<usize, DetectError> {
    let page_id = doc
        .get_pages()
        .get(&page_number)
        .copied()
        .ok_or(DetectError::PageNotFound(page_number))?;

    let bytes = doc.get_page_content(page_id)?;
    let mut content = Content::decode(&bytes)?;

    let before = content.operations.len();
    content
        .operations
        .retain(|op| !TEXT_SHOWING_OPERATORS.contains(&op.operator.as_str()));
    let removed = before - content.operations.len();

    doc.change_page_content(page_id, content.encode()?)?;
    debug!(page = page_number, removed, "stripped text operators");
    Ok(removed)
}
