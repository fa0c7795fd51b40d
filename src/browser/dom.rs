use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node, NodeList, ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{Document, Element, Rect, Viewport};

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

impl Element for HtmlElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.class_list().toggle(class).unwrap_or(false)
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }

    fn set_css_text(&self, css: &str) {
        self.style().set_css_text(css);
    }

    fn contains(&self, other: &Self) -> bool {
        let this: &Node = self;
        let other: &Node = other;
        this.contains(Some(other))
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        self.query_selector_all(selector)
            .map(html_elements)
            .unwrap_or_default()
    }

    fn append_child(&self, child: &Self) {
        let this: &Node = self;
        let _ = this.append_child(child);
    }

    fn remove(&self) {
        let this: &web_sys::Element = self;
        this.remove();
    }

    fn offset_top(&self) -> f64 {
        f64::from(HtmlElement::offset_top(self))
    }

    fn offset_height(&self) -> f64 {
        f64::from(HtmlElement::offset_height(self))
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.get_bounding_client_rect();
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

pub struct BrowserDocument(pub web_sys::Document);

impl Document for BrowserDocument {
    type Element = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.0.get_element_by_id(id)?.dyn_into().ok()
    }

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        self.0
            .query_selector_all(selector)
            .map(html_elements)
            .unwrap_or_default()
    }

    fn body(&self) -> Option<HtmlElement> {
        self.0.body()
    }

    fn create_element(&self, tag: &str) -> Option<HtmlElement> {
        self.0.create_element(tag).ok()?.dyn_into().ok()
    }

    fn inject_style(&self, css: &str) {
        let (Ok(style), Some(head)) = (self.0.create_element("style"), self.0.head()) else {
            log::warn!("could not inject style block");
            return;
        };
        style.set_text_content(Some(css));
        let _ = head.append_child(&style);
    }
}

pub struct BrowserViewport(pub Window);

impl Viewport for BrowserViewport {
    fn scroll_y(&self) -> f64 {
        self.0.scroll_y().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.0.scroll_to_with_scroll_to_options(&options);
    }

    fn matches_media(&self, query: &str) -> bool {
        matches!(self.0.match_media(query), Ok(Some(list)) if list.matches())
    }
}
