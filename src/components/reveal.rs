use crate::dom::{Document, Element};
use crate::hooks::{class, select};
use crate::site::Page;
use crate::visibility::{ObserveOptions, VisibilityObserver};

pub const CARD_THRESHOLD: f64 = 0.1;
pub const CARD_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const HEADER_THRESHOLD: f64 = 0.3;
/// Extra entrance delay per `.animate-slide-in` child, in seconds.
pub const STAGGER_S: f64 = 0.1;

/// Scroll-triggered entrance animations.
///
/// Cards get `in-view` once and are then forgotten. Section headers stay
/// observed and re-apply their stagger every time they come back into
/// view; the delays are the same each time.
pub struct ScrollReveal<E> {
    pub cards: VisibilityObserver<E>,
    pub headers: VisibilityObserver<E>,
}

impl<E: Element> ScrollReveal<E> {
    pub fn install<D>(page: &Page<D>) -> Self
    where
        D: Document<Element = E> + 'static,
    {
        let source = page.intersections.as_ref();

        let cards = VisibilityObserver::one_shot(
            source,
            &ObserveOptions::threshold(CARD_THRESHOLD).with_root_margin(CARD_ROOT_MARGIN),
            |el: &E| el.add_class(class::IN_VIEW),
        );
        let animated = page.document.query_all(select::ANIMATED);
        for el in &animated {
            cards.observe(el);
        }

        let headers = VisibilityObserver::repeating(
            source,
            &ObserveOptions::threshold(HEADER_THRESHOLD),
            stagger_children,
        );
        let section_headers = page.document.query_all(select::SECTION_HEADER);
        for header in &section_headers {
            headers.observe(header);
        }

        log::debug!(
            "reveal watching {} elements and {} headers",
            animated.len(),
            section_headers.len()
        );
        Self { cards, headers }
    }
}

/// Starts each `.animate-slide-in` child of `header`, 0.1 s apart.
pub fn stagger_children<E: Element>(header: &E) {
    for (i, child) in header.query_all(select::SLIDE_IN).iter().enumerate() {
        child.set_style("animation-delay", &format!("{:.1}s", i as f64 * STAGGER_S));
        child.set_style("animation-play-state", "running");
    }
}
