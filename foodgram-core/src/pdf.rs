//! PDF export of the consolidated shopping list.
//!
//! The first page carries a bold title; every ingredient follows on its own
//! line, continuing onto new pages when a page is full.

use crate::error::{FontError, RenderError};
use crate::shopping_list::ShoppingListLine;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::path::Path;

pub const TITLE: &str = "Shopping list for saved recipes";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_X_MM: f32 = 20.0;
const HEADER_Y_MM: f32 = 277.0;
const BODY_TOP_MM: f32 = 265.0;

const HEADER_FONT_SIZE: f32 = 16.0;
const FONT_SIZE: f32 = 14.0;
const LINE_HEIGHT_PT: f32 = 20.0;

/// Number of ingredient lines that fit between the body top and the bottom margin.
pub const LINES_PER_PAGE: usize = 34;

/// DejaVu Sans, shipped in `fonts/` and compiled in.
static DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

/// Face used for ingredient lines.
///
/// The title is fixed ASCII and always uses built-in Helvetica-Bold, so only
/// one TrueType face is ever embedded in a document.
#[derive(Debug, Clone)]
pub struct PdfFonts {
    /// `None` means built-in Helvetica, which only covers Latin text.
    body: Option<Vec<u8>>,
}

impl Default for PdfFonts {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PdfFonts {
    /// The compiled-in DejaVu Sans face.
    pub fn embedded() -> Self {
        Self::from_bytes(DEJAVU_SANS.to_vec())
    }

    /// Built-in Helvetica only; non-Latin names will not render.
    pub fn builtin() -> Self {
        Self { body: None }
    }

    pub fn from_bytes(body: Vec<u8>) -> Self {
        Self { body: Some(body) }
    }

    /// Read a TrueType face from disk.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Whether ingredient lines use an embedded TrueType face.
    pub fn is_unicode(&self) -> bool {
        self.body.is_some()
    }
}

/// Split the list into pages of display lines.
///
/// Always returns at least one page so the title is rendered for an empty cart.
pub fn paginate(lines: &[ShoppingListLine]) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }

    let text: Vec<String> = lines.iter().map(ShoppingListLine::display_line).collect();
    text.chunks(LINES_PER_PAGE).map(<[String]>::to_vec).collect()
}

/// Render the shopping list as PDF bytes.
pub fn render_shopping_list(
    lines: &[ShoppingListLine],
    fonts: &PdfFonts,
) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let regular = match fonts.body.as_deref() {
        Some(bytes) => doc.add_external_font(bytes)?,
        None => doc.add_builtin_font(BuiltinFont::Helvetica)?,
    };
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let pages = paginate(lines);
    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..pages.len() {
        targets.push(doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1"));
    }

    for (index, ((page, layer_index), page_lines)) in targets.into_iter().zip(pages).enumerate() {
        let layer = doc.get_page(page).get_layer(layer_index);

        if index == 0 {
            layer.use_text(
                TITLE,
                HEADER_FONT_SIZE,
                Mm(MARGIN_X_MM),
                Mm(HEADER_Y_MM),
                &bold,
            );
        }

        layer.begin_text_section();
        layer.set_font(&regular, FONT_SIZE);
        layer.set_line_height(LINE_HEIGHT_PT);
        layer.set_text_cursor(Mm(MARGIN_X_MM), Mm(BODY_TOP_MM));
        for line in page_lines {
            layer.write_text(line, &regular);
            layer.add_line_break();
        }
        layer.end_text_section();
    }

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;
    use lopdf::Object;

    fn lines(count: usize) -> Vec<ShoppingListLine> {
        (0..count)
            .map(|i| ShoppingListLine::new(format!("Item {:03}", i), "g", i as i64 + 1))
            .collect()
    }

    /// Operands of every `Tj` in the document, page by page.
    fn shown_strings(pdf: &[u8]) -> Vec<Vec<Vec<u8>>> {
        let doc = lopdf::Document::load_mem(pdf).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                content
                    .operations
                    .into_iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.into_iter().next() {
                        Some(Object::String(bytes, _)) => Some(bytes),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    /// Shown text per page, for documents set entirely in built-in fonts.
    fn latin_text(pdf: &[u8]) -> Vec<Vec<String>> {
        shown_strings(pdf)
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|bytes| String::from_utf8(bytes).unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_empty_list_is_header_only() {
        let pages = paginate(&[]);
        assert_eq!(pages, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_lines_formatted_in_order() {
        let pages = paginate(&[
            ShoppingListLine::new("Flour", "g", 500),
            ShoppingListLine::new("Salt", "g", 15),
        ]);
        assert_eq!(pages, vec![vec!["Flour (g) - 500", "Salt (g) - 15"]]);
    }

    #[test]
    fn test_overflow_continues_on_next_page() {
        let pages = paginate(&lines(LINES_PER_PAGE + 3));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), LINES_PER_PAGE);
        assert_eq!(pages[1].len(), 3);
        assert_eq!(pages[1][0], format!("Item {:03} (g) - {}", LINES_PER_PAGE, LINES_PER_PAGE + 1));
    }

    #[test]
    fn test_exactly_full_page() {
        let pages = paginate(&lines(LINES_PER_PAGE));
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_rendered_empty_list_shows_only_title() {
        let bytes = render_shopping_list(&[], &PdfFonts::builtin()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(latin_text(&bytes), vec![vec![TITLE.to_string()]]);
    }

    #[test]
    fn test_rendered_lines_follow_title_in_order() {
        let list = [
            ShoppingListLine::new("Flour", "g", 500),
            ShoppingListLine::new("Salt", "g", 15),
        ];
        let bytes = render_shopping_list(&list, &PdfFonts::builtin()).unwrap();
        assert_eq!(
            latin_text(&bytes),
            vec![vec![TITLE, "Flour (g) - 500", "Salt (g) - 15"]]
        );
    }

    #[test]
    fn test_title_only_on_first_page() {
        let bytes = render_shopping_list(&lines(LINES_PER_PAGE + 1), &PdfFonts::builtin()).unwrap();
        let pages = latin_text(&bytes);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0][0], TITLE);
        assert_eq!(pages[0].len(), LINES_PER_PAGE + 1);
        assert_eq!(pages[1], vec![format!("Item {:03} (g) - {}", LINES_PER_PAGE, LINES_PER_PAGE + 1)]);
    }

    #[test]
    fn test_cyrillic_names_render_with_embedded_font() {
        let line = ShoppingListLine::new("Соль", "г", 5);
        let bytes = render_shopping_list(&[line.clone()], &PdfFonts::embedded()).unwrap();
        let pages = shown_strings(&bytes);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0], TITLE.as_bytes());
        // Two-byte glyph ids; a glyph missing from the face would be dropped
        let glyphs = &pages[0][1];
        assert_eq!(glyphs.len(), 2 * line.display_line().chars().count());
        assert!(glyphs.chunks(2).all(|gid| gid != [0, 0]));
    }

    #[test]
    fn test_only_body_face_is_embedded() {
        let bytes = render_shopping_list(&lines(1), &PdfFonts::embedded()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let font_files = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| dict.has(b"FontFile2"))
            .count();
        assert_eq!(font_files, 1);
    }

    #[test]
    fn test_default_fonts_are_unicode() {
        assert!(PdfFonts::default().is_unicode());
        assert!(!PdfFonts::builtin().is_unicode());
    }

    #[test]
    fn test_missing_font_file_is_an_error() {
        let err = PdfFonts::load(Path::new("/nonexistent/regular.ttf")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/regular.ttf"));
    }
}
