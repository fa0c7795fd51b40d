//! The slice of the DOM the components touch.
//!
//! Components are written against these traits so the same code drives
//! `web_sys` elements in the browser and `headless` elements in
//! host tests.

/// Border box of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A handle to a live element. Clones refer to the same node.
pub trait Element: Clone + PartialEq + 'static {
    fn attribute(&self, name: &str) -> Option<String>;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&self, class: &str) -> bool;

    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn set_text(&self, text: &str);
    fn set_style(&self, property: &str, value: &str);
    fn set_css_text(&self, css: &str);

    /// True if `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;
    fn query_all(&self, selector: &str) -> Vec<Self>;

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    fn append_child(&self, child: &Self);
    /// Detaches the element from its parent.
    fn remove(&self);

    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;
    fn bounding_rect(&self) -> Rect;
}

pub trait Document {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    fn body(&self) -> Option<Self::Element>;
    fn create_element(&self, tag: &str) -> Option<Self::Element>;
    /// Appends a `<style>` block holding `css` to the document head.
    fn inject_style(&self, css: &str);
}

/// Window-level scroll position and media queries.
pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn smooth_scroll_to(&self, top: f64);
    fn matches_media(&self, query: &str) -> bool;
}
