// src/core/html.rs
//! Thin query surface over a parsed HTML tree.
//!
//! Extractors only ever need: CSS-selector lookups, trimmed text, attribute
//! values and a parent pointer. Everything here is read-only; a `Document`
//! is built once per page and queried by reference.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// A parsed page. Parsing never fails: broken markup yields a (possibly empty) tree.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(raw: &str) -> Self {
        Self { html: Html::parse_document(raw) }
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Vec<Node<'_>> {
        match compile(css) {
            Some(sel) => self.html.select(&sel).map(Node::from).collect(),
            None => Vec::new(),
        }
    }

    pub fn select_first(&self, css: &str) -> Option<Node<'_>> {
        let sel = compile(css)?;
        self.html.select(&sel).next().map(Node::from)
    }
}

/// Borrowed handle to one element of a `Document`.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    el: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Node<'a> {
    fn from(el: ElementRef<'a>) -> Self {
        Self { el }
    }
}

impl<'a> Node<'a> {
    /// Lowercase tag name (`li`, `table`, ...).
    pub fn name(&self) -> &'a str {
        self.el.value().name()
    }

    /// Concatenated descendant text, trimmed at both ends.
    pub fn text(&self) -> String {
        let joined: String = self.el.text().collect();
        joined.trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.el.value().attr(name)
    }

    /// Nearest element parent. The document root is not an element, so the
    /// walk ends there with `None`.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.el.parent().and_then(ElementRef::wrap).map(Node::from)
    }

    /// Matching descendants (not including `self`), in document order.
    pub fn select(&self, css: &str) -> Vec<Node<'a>> {
        match compile(css) {
            Some(sel) => self.el.select(&sel).map(Node::from).collect(),
            None => Vec::new(),
        }
    }

    pub fn select_first(&self, css: &str) -> Option<Node<'a>> {
        let sel = compile(css)?;
        self.el.select(&sel).next().map(Node::from)
    }
}

fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = css, error = ?e, "invalid CSS selector; treating as no match");
            None
        }
    }
}
