//! Typed document queries over parsed HTML.
//!
//! Extractors never touch `scraper` directly: they ask a [`Node`] for an
//! optional child element, and an element for a [`Field`], which tells apart
//! "element absent", "element present but empty" and "element with text".

use scraper::{ElementRef, Html, Selector};

use crate::{Result, SearchError};

/// Compiles a CSS selector, mapping failures to [`SearchError::Parse`].
pub fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector {:?}: {:?}", css, e)))
}

/// A value read from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// The element or attribute does not exist.
    Absent,
    /// The element or attribute exists but is empty after trimming.
    Empty,
    /// Trimmed, non-empty text.
    Text(String),
}

impl Field {
    fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Field::Empty
        } else {
            Field::Text(trimmed.to_string())
        }
    }

    /// Text for present elements (empty string when empty), `fallback` when absent.
    pub fn or_absent(self, fallback: &str) -> String {
        match self {
            Field::Absent => fallback.to_string(),
            Field::Empty => String::new(),
            Field::Text(text) => text,
        }
    }
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = Node<'a>> + 'a {
        self.html.select(selector).map(Node)
    }
}

/// Handle to one element of a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// First descendant matching `selector`, if any.
    pub fn select_one(&self, selector: &Selector) -> Option<Node<'a>> {
        self.0.select(selector).next().map(Node)
    }

    /// Trimmed text content of the element.
    pub fn text(&self) -> Field {
        Field::from_raw(&self.0.text().collect::<String>())
    }

    /// Value of attribute `name`, untrimmed when present.
    pub fn attr(&self, name: &str) -> Field {
        match self.0.value().attr(name) {
            None => Field::Absent,
            Some(value) if value.trim().is_empty() => Field::Empty,
            Some(value) => Field::Text(value.to_string()),
        }
    }

    /// Text of the first descendant matching `selector`.
    pub fn child_text(&self, selector: &Selector) -> Field {
        self.select_one(selector)
            .map_or(Field::Absent, |node| node.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <html><body>
            <div class="item">
                <a href="https://tc.gob.pe/a"> Title A </a>
                <p class="snippet">  </p>
            </div>
            <div class="item">
                <a href="">Empty link</a>
                <a>No link</a>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_compile_invalid_selector() {
        let result = compile("div[");
        assert!(matches!(result, Err(SearchError::Parse(_))));
    }

    #[test]
    fn test_select_all_document_order() {
        let doc = Document::parse(HTML);
        let items = compile("div.item").unwrap();
        assert_eq!(doc.select_all(&items).count(), 2);
    }

    #[test]
    fn test_text_trimmed() {
        let doc = Document::parse(HTML);
        let items = compile("div.item").unwrap();
        let anchor = compile("a").unwrap();
        let first = doc.select_all(&items).next().unwrap();
        assert_eq!(first.child_text(&anchor), Field::Text("Title A".into()));
    }

    #[test]
    fn test_present_but_empty_vs_absent() {
        let doc = Document::parse(HTML);
        let items = compile("div.item").unwrap();
        let snippet = compile(".snippet").unwrap();
        let nodes: Vec<_> = doc.select_all(&items).collect();
        assert_eq!(nodes[0].child_text(&snippet), Field::Empty);
        assert_eq!(nodes[1].child_text(&snippet), Field::Absent);
    }

    #[test]
    fn test_attr_variants() {
        let doc = Document::parse(HTML);
        let anchors = compile("a").unwrap();
        let nodes: Vec<_> = doc.select_all(&anchors).collect();
        assert_eq!(nodes[0].attr("href"), Field::Text("https://tc.gob.pe/a".into()));
        assert_eq!(nodes[1].attr("href"), Field::Empty);
        assert_eq!(nodes[2].attr("href"), Field::Absent);
    }

    #[test]
    fn test_field_or_absent() {
        assert_eq!(Field::Absent.or_absent("n/a"), "n/a");
        assert_eq!(Field::Empty.or_absent("n/a"), "");
        assert_eq!(Field::Text("x".into()).or_absent("n/a"), "x");
    }
}
