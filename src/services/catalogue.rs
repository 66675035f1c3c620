use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::domain::Movie;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 20.0;
const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 7.0;

#[derive(Debug, thiserror::Error)]
#[error("failed to render document: {0}")]
pub struct RenderError(String);

/// Turns lines of text into a printable document.
pub trait DocumentRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn render(&self, title: &str, lines: &[String]) -> Result<Vec<u8>, RenderError>;
}

/// The text of a catalogue: a header, then number and title, year and type
/// of every movie on their own lines.
pub fn catalogue_lines(query: &str, media: &[Movie]) -> Vec<String> {
    let mut lines = Vec::with_capacity(media.len() * 3 + 1);
    lines.push(format!("Movies Catalog for => {}", query));
    for (i, movie) in media.iter().enumerate() {
        lines.push(format!("{} {}", i + 1, movie.title));
        lines.push(movie.year.clone());
        lines.push(movie.kind.clone());
    }
    lines
}

/// Plain text PDF in the builtin Helvetica font, A4, one line per entry.
#[derive(Default)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, title: &str, lines: &[String]) -> Result<Vec<u8>, RenderError> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Catalogue");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| RenderError(format!("{:?}", err)))?;

        let lines_per_page = ((PAGE_HEIGHT.0 - 2.0 * MARGIN) / LINE_HEIGHT) as usize;
        for (page_number, page_lines) in lines.chunks(lines_per_page.max(1)).enumerate() {
            let layer = if page_number == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Catalogue");
                doc.get_page(page).get_layer(layer)
            };
            for (row, line) in page_lines.iter().enumerate() {
                let y = PAGE_HEIGHT.0 - MARGIN - row as f32 * LINE_HEIGHT;
                layer.use_text(line.as_str(), FONT_SIZE, Mm(MARGIN), Mm(y), &font);
            }
        }

        doc.save_to_bytes()
            .map_err(|err| RenderError(format!("{:?}", err)))
    }
}
