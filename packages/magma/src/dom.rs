//! Query helpers over a parsed `scraper` document.
//!
//! The extractors only need a handful of operations: first/all descendants
//! by selector, trimmed text, attributes and the child node list. Keeping
//! them here means every missing node surfaces as a `ParseError` naming the
//! selector instead of a panic deep inside an extractor.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{ParseError, ParseResult};

/// Parse raw markup. html5ever recovers from malformed input, so this never fails.
pub fn parse(markup: &str) -> Html {
    Html::parse_document(markup)
}

pub fn selector(css: &str) -> ParseResult<Selector> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector {
        selector: css.to_string(),
    })
}

/// First descendant matching `css`, if any.
pub fn first<'a>(scope: ElementRef<'a>, css: &str) -> ParseResult<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).next();
    Ok(found)
}

/// First descendant matching `css`, or a `MissingNode` error.
pub fn require<'a>(
    scope: ElementRef<'a>,
    css: &str,
    context: &'static str,
) -> ParseResult<ElementRef<'a>> {
    first(scope, css)?.ok_or_else(|| ParseError::MissingNode {
        context,
        selector: css.to_string(),
    })
}

/// All descendants matching `css`, in document order.
pub fn all<'a>(scope: ElementRef<'a>, css: &str) -> ParseResult<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).collect();
    Ok(found)
}

/// Concatenated descendant text, trimmed.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, if present.
pub fn text_of(scope: ElementRef<'_>, css: &str) -> ParseResult<Option<String>> {
    Ok(first(scope, css)?.map(text))
}

/// Trimmed attribute value.
pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(|v| v.trim().to_string())
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn tag_name<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// A direct child of an element: a text run or a nested element.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Text(&'a str),
    Element(ElementRef<'a>),
}

impl<'a> Child<'a> {
    /// Trimmed text content.
    pub fn text(&self) -> String {
        match self {
            Self::Text(raw) => raw.trim().to_string(),
            Self::Element(el) => text(*el),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(raw) => raw.trim().is_empty(),
            Self::Element(el) => el.text().all(|t| t.trim().is_empty()),
        }
    }

    pub fn as_element(&self) -> Option<ElementRef<'a>> {
        match self {
            Self::Element(el) => Some(*el),
            Self::Text(_) => None,
        }
    }
}

/// Direct child nodes, skipping comments and other non-content nodes.
pub fn children(el: ElementRef<'_>) -> Vec<Child<'_>> {
    el.children()
        .filter_map(|node| match node.value() {
            Node::Text(raw) => Some(Child::Text(&**raw)),
            Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
            _ => None,
        })
        .collect()
}

/// Direct element children only.
pub fn element_children(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap).collect()
}
