use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::domain::DocumentPage;

// Probed in order; a combined selector would always hit `body` first since
// it precedes its descendants in tree order.
static MAIN_CANDIDATES: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["div[role='main']", "main", "article", "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("static selector"))
        .collect()
});
static TEXT_BLOCKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, h1, h2, h3, h4, li, pre, dt, dd").expect("static selector"));
static PAGE_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("static selector"));

/// Pulls the readable text out of a documentation page.
///
/// Only block-level text elements inside the main content region are kept,
/// which leaves scripts, styles, and chrome (navigation, sidebars outside the
/// main region) behind. Blocks are joined as paragraphs.
pub fn extract_page(html: &str) -> DocumentPage {
    let document = Html::parse_document(html);

    let title = document
        .select(&PAGE_TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let root = MAIN_CANDIDATES
        .iter()
        .find_map(|selector| document.select(selector).next());

    let mut blocks = Vec::new();
    if let Some(root) = root {
        for element in root.select(&TEXT_BLOCKS) {
            let text: String = element.text().collect();
            let text = text.trim();
            if !text.is_empty() {
                blocks.push(text.to_string());
            }
        }
    }

    DocumentPage {
        title,
        text: blocks.join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head><title>5. Data Structures</title>
            <script>var tracked = true;</script>
          </head>
          <body>
            <nav><a href="index.html">Home</a></nav>
            <div role="main">
              <h1>Data Structures</h1>
              <p>Python lists are   mutable sequences.</p>
              <pre>items.append(42)</pre>
            </div>
          </body>
        </html>"#;

    #[test]
    fn test_extracts_title_and_main_blocks() {
        let page = extract_page(PAGE);
        assert_eq!(page.title, "5. Data Structures");
        assert!(page.text.contains("Data Structures"));
        assert!(page.text.contains("Python lists are   mutable sequences."));
        assert!(page.text.contains("items.append(42)"));
    }

    #[test]
    fn test_skips_scripts_and_navigation() {
        let page = extract_page(PAGE);
        assert!(!page.text.contains("tracked"));
        assert!(!page.text.contains("Home"));
    }

    #[test]
    fn test_no_main_region_falls_back_to_body() {
        let page = extract_page("<html><body><p>Plain body text.</p></body></html>");
        assert_eq!(page.text, "Plain body text.");
    }
}
