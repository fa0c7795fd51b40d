use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::{Rc, Weak};

use crate::dom::{Document, Element, Rect, Viewport};

struct Node {
    tag: String,
    attrs: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    text: RefCell<String>,
    styles: RefCell<BTreeMap<String, String>>,
    css_text: RefCell<String>,
    children: RefCell<Vec<MemoryElement>>,
    parent: RefCell<Weak<Node>>,
    offset_top: Cell<f64>,
    offset_height: Cell<f64>,
    rect: Cell<Rect>,
}

/// An in-memory element tree node.
#[derive(Clone)]
pub struct MemoryElement(Rc<Node>);

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        if let Some(id) = self.attribute("id") {
            write!(f, " id={id:?}")?;
        }
        let classes = self.0.classes.borrow();
        if !classes.is_empty() {
            write!(f, " class={:?}", classes.join(" "))?;
        }
        write!(f, ">")
    }
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_ascii_lowercase(),
            attrs: RefCell::new(BTreeMap::new()),
            classes: RefCell::new(Vec::new()),
            text: RefCell::new(String::new()),
            styles: RefCell::new(BTreeMap::new()),
            css_text: RefCell::new(String::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            offset_top: Cell::new(0.0),
            offset_height: Cell::new(0.0),
            rect: Cell::new(Rect::default()),
        }))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    /// Adds each whitespace-separated class in `classes`.
    pub fn with_class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(self, child: MemoryElement) -> Self {
        self.append_child(&child);
        self
    }

    /// Sets the layout box used for `offset_top` / `offset_height`.
    pub fn with_offset(self, top: f64, height: f64) -> Self {
        self.set_offset(top, height);
        self
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            *self.0.classes.borrow_mut() = value.split_whitespace().map(str::to_owned).collect();
            return;
        }
        self.0.attrs.borrow_mut().insert(name.to_owned(), value.to_owned());
    }

    pub fn set_offset(&self, top: f64, height: f64) {
        self.0.offset_top.set(top);
        self.0.offset_height.set(height);
    }

    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    pub fn css_text(&self) -> String {
        self.0.css_text.borrow().clone()
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.children.borrow().clone()
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        self.0.parent.borrow().upgrade().map(MemoryElement)
    }

    fn descendants(&self, out: &mut Vec<MemoryElement>) {
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn select(&self, selector: &str) -> Vec<MemoryElement> {
        let group = SelectorGroup::parse(selector);
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.retain(|el| group.matches(el));
        all
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return Some(self.0.classes.borrow().join(" "));
        }
        self.0.attrs.borrow().get(name).cloned()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.classes.borrow_mut().push(class.to_owned());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }

    fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_owned();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .styles
            .borrow_mut()
            .insert(property.to_owned(), value.to_owned());
    }

    fn set_css_text(&self, css: &str) {
        *self.0.css_text.borrow_mut() = css.to_owned();
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(el) = cursor {
            if el == *self {
                return true;
            }
            cursor = el.parent();
        }
        false
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        self.select(selector)
    }

    fn append_child(&self, child: &Self) {
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    fn remove(&self) {
        let Some(parent) = self.parent() else { return };
        parent.0.children.borrow_mut().retain(|c| c != self);
        *self.0.parent.borrow_mut() = Weak::new();
    }

    fn offset_top(&self) -> f64 {
        self.0.offset_top.get()
    }

    fn offset_height(&self) -> f64 {
        self.0.offset_height.get()
    }

    fn bounding_rect(&self) -> Rect {
        self.0.rect.get()
    }
}

/// A `<html>` tree with a `<head>` and a `<body>`.
pub struct MemoryDocument {
    root: MemoryElement,
    head: MemoryElement,
    body: MemoryElement,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        let head = MemoryElement::new("head");
        let body = MemoryElement::new("body");
        let root = MemoryElement::new("html")
            .with_child(head.clone())
            .with_child(body.clone());
        Self { root, head, body }
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &MemoryElement {
        &self.root
    }

    pub fn head(&self) -> &MemoryElement {
        &self.head
    }

    /// Text of every injected `<style>` block, in insertion order.
    pub fn styles(&self) -> Vec<String> {
        self.head
            .children()
            .into_iter()
            .filter(|el| el.tag() == "style")
            .map(|el| el.text())
            .collect()
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.root
            .select("*")
            .into_iter()
            .find(|el| el.attribute("id").as_deref() == Some(id))
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.root.select(selector)
    }

    fn body(&self) -> Option<MemoryElement> {
        Some(self.body.clone())
    }

    fn create_element(&self, tag: &str) -> Option<MemoryElement> {
        Some(MemoryElement::new(tag))
    }

    fn inject_style(&self, css: &str) {
        let style = MemoryElement::new("style");
        style.set_text(css);
        self.head.append_child(&style);
    }
}

/// Scroll position plus a fixed set of matching media queries.
#[derive(Default)]
pub struct MemoryViewport {
    scroll_y: Cell<f64>,
    media: RefCell<HashSet<String>>,
    smooth_scrolls: RefCell<Vec<f64>>,
}

impl MemoryViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jumps without recording a smooth scroll. Callers emit the
    /// `Scroll` event themselves.
    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn set_media(&self, query: &str, matches: bool) {
        let mut media = self.media.borrow_mut();
        if matches {
            media.insert(query.to_owned());
        } else {
            media.remove(query);
        }
    }

    /// Targets of every `smooth_scroll_to` call so far.
    pub fn smooth_scrolls(&self) -> Vec<f64> {
        self.smooth_scrolls.borrow().clone()
    }
}

impl Viewport for MemoryViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.smooth_scrolls.borrow_mut().push(top);
        self.scroll_y.set(top.max(0.0));
    }

    fn matches_media(&self, query: &str) -> bool {
        self.media.borrow().contains(query)
    }
}

// Selector subset: comma-separated compounds of `tag`, `*`, `#id`, `.class`,
// `[attr]`, `[attr="v"]` and `[attr^="v"]`. No combinators.

struct SelectorGroup(Vec<Compound>);

#[derive(Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

impl SelectorGroup {
    fn parse(selector: &str) -> Self {
        Self(
            selector
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Compound::parse)
                .collect(),
        )
    }

    fn matches(&self, el: &MemoryElement) -> bool {
        self.0.iter().any(|c| c.matches(el))
    }
}

impl Compound {
    fn parse(src: &str) -> Self {
        let mut out = Compound::default();
        let mut rest = src;

        let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if !tag.is_empty() && tag != "*" {
            out.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let body = &rest[1..];
                    let end = body.find(['#', '.', '[']).unwrap_or(body.len());
                    let name = body[..end].to_owned();
                    if first == '#' {
                        out.id = Some(name);
                    } else {
                        out.classes.push(name);
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    out.attrs.push(AttrTest::parse(&rest[1..end]));
                    rest = rest.get(end + 1..).unwrap_or("");
                }
                _ => break,
            }
        }
        out
    }

    fn matches(&self, el: &MemoryElement) -> bool {
        if let Some(tag) = &self.tag {
            if el.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c)) && self.attrs.iter().all(|a| a.matches(el))
    }
}

impl AttrTest {
    fn parse(src: &str) -> Self {
        let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_owned();
        if let Some((name, value)) = src.split_once("^=") {
            AttrTest::Prefix(name.trim().to_owned(), unquote(value))
        } else if let Some((name, value)) = src.split_once('=') {
            AttrTest::Equals(name.trim().to_owned(), unquote(value))
        } else {
            AttrTest::Present(src.trim().to_owned())
        }
    }

    fn matches(&self, el: &MemoryElement) -> bool {
        match self {
            AttrTest::Present(name) => el.attribute(name).is_some(),
            AttrTest::Equals(name, value) => el.attribute(name).as_deref() == Some(value.as_str()),
            AttrTest::Prefix(name, value) => el
                .attribute(name)
                .is_some_and(|v| v.starts_with(value.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_subset() {
        let doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let link = MemoryElement::new("a").with_attr("href", "#about");
        let bare = MemoryElement::new("a").with_attr("href", "/shop");
        let section = MemoryElement::new("section").with_id("about");
        let card = MemoryElement::new("div").with_class("animate-card");
        body.append_child(&link);
        body.append_child(&bare);
        body.append_child(&section);
        body.append_child(&card);

        assert_eq!(doc.query_all("a[href^=\"#\"]"), vec![link]);
        assert_eq!(doc.query_all("section[id]"), vec![section.clone()]);
        assert_eq!(doc.query_all(".animate-card, .animate-gallery"), vec![card]);
        assert_eq!(doc.element_by_id("about"), Some(section));
        assert!(doc.query(".missing").is_none());
    }

    #[test]
    fn contains_walks_ancestors() {
        let inner = MemoryElement::new("span");
        let outer = MemoryElement::new("div").with_child(inner.clone());
        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!inner.contains(&outer));

        inner.remove();
        assert!(!outer.contains(&inner));
    }
}
