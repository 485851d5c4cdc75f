use foodgram_core::pdf::{paginate, render_shopping_list, PdfFonts, LINES_PER_PAGE, TITLE};
use foodgram_core::shopping_list::{aggregate, ShoppingListLine};
use lopdf::content::Content;
use lopdf::{Document, Object};

/// Text shown on each page of a PDF set in built-in fonts, in drawing order.
fn page_text(pdf: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .into_iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.into_iter().next() {
                    Some(Object::String(bytes, _)) => String::from_utf8(bytes).ok(),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

/// Rows as loaded for a cart: (ingredient name, unit, amount) per recipe ingredient.
fn cart_rows() -> Vec<(String, String, i32)> {
    vec![
        // Recipe A
        ("Salt".to_string(), "g".to_string(), 5),
        ("Potato".to_string(), "kg".to_string(), 1),
        // Recipe B
        ("Salt".to_string(), "g".to_string(), 10),
        ("Dill".to_string(), "bunch".to_string(), 1),
    ]
}

#[test]
fn two_recipes_sharing_salt() {
    let lines = aggregate(cart_rows());
    assert_eq!(
        lines,
        vec![
            ShoppingListLine::new("Dill", "bunch", 1),
            ShoppingListLine::new("Potato", "kg", 1),
            ShoppingListLine::new("Salt", "g", 15),
        ]
    );

    let pages = paginate(&lines);
    assert_eq!(
        pages,
        vec![vec!["Dill (bunch) - 1", "Potato (kg) - 1", "Salt (g) - 15"]]
    );

    let pdf = render_shopping_list(&lines, &PdfFonts::builtin()).unwrap();
    assert_eq!(
        page_text(&pdf),
        vec![vec![TITLE, "Dill (bunch) - 1", "Potato (kg) - 1", "Salt (g) - 15"]]
    );
}

#[test]
fn empty_cart_exports_header_only() {
    let lines = aggregate(Vec::<(String, String, i32)>::new());
    assert!(lines.is_empty());
    assert_eq!(paginate(&lines), vec![Vec::<String>::new()]);

    let pdf = render_shopping_list(&lines, &PdfFonts::builtin()).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(page_text(&pdf), vec![vec![TITLE.to_string()]]);
}

#[test]
fn empty_cart_with_bundled_font_still_has_title() {
    let pdf = render_shopping_list(&[], &PdfFonts::embedded()).unwrap();
    assert_eq!(page_text(&pdf), vec![vec![TITLE.to_string()]]);
}

#[test]
fn long_cart_keeps_order_across_pages() {
    let rows: Vec<(String, String, i32)> = (0..LINES_PER_PAGE * 2 + 1)
        .map(|i| (format!("Ingredient {:04}", i), "g".to_string(), 1))
        .collect();
    let lines = aggregate(rows);
    let pages = paginate(&lines);

    assert_eq!(pages.len(), 3);
    let flattened: Vec<String> = pages.into_iter().flatten().collect();
    let expected: Vec<String> = lines.iter().map(ShoppingListLine::display_line).collect();
    assert_eq!(flattened, expected);

    let pdf = render_shopping_list(&lines, &PdfFonts::builtin()).unwrap();
    let shown = page_text(&pdf);
    assert_eq!(shown.len(), 3);
    assert_eq!(shown[0][0], TITLE);
    let rendered: Vec<String> = shown.into_iter().flatten().skip(1).collect();
    assert_eq!(rendered, expected);
}
