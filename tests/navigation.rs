mod common;

use common::{div, Fixture};
use sandart_site::components::nav::{active_section, install_anchor_scrolling, Menu, NavController, SectionSpan};
use sandart_site::dispatch::Response;
use sandart_site::dom::Element;
use sandart_site::headless::MemoryElement;
use sandart_site::hooks::class;

struct Nav {
    fx: Fixture,
    header: MemoryElement,
    links: Vec<MemoryElement>,
}

fn link(href: &str) -> MemoryElement {
    MemoryElement::new("a").with_class("nav-link").with_attr("href", href)
}

fn section(id: &str, top: f64, height: f64) -> MemoryElement {
    MemoryElement::new("section").with_id(id).with_offset(top, height)
}

/// Header with three links and three stacked sections:
/// home [0, 600), about [600, 1000), gallery [1000, 1800).
fn page() -> Nav {
    let fx = Fixture::new();
    let links = vec![link("#home"), link("#about"), link("#gallery")];
    let mut nav = MemoryElement::new("nav").with_id("nav");
    for l in &links {
        nav = nav.with_child(l.clone());
    }
    let header = fx.add(
        MemoryElement::new("header")
            .with_id("header")
            .with_offset(0.0, 80.0)
            .with_child(div("hamburger").with_id("hamburger"))
            .with_child(nav),
    );
    fx.add(section("home", 0.0, 600.0));
    fx.add(section("about", 600.0, 400.0));
    fx.add(section("gallery", 1000.0, 800.0));
    Nav { fx, header, links }
}

fn active(nav: &Nav) -> Vec<usize> {
    nav.links
        .iter()
        .enumerate()
        .filter(|(_, l)| l.has_class(class::ACTIVE))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn active_section_uses_half_open_spans() {
    let spans = vec![
        SectionSpan { id: "a".into(), top: 0.0, height: 100.0 },
        SectionSpan { id: "b".into(), top: 100.0, height: 100.0 },
    ];
    assert_eq!(active_section(&spans, 0.0), Some(0));
    assert_eq!(active_section(&spans, 99.9), Some(0));
    assert_eq!(active_section(&spans, 100.0), Some(1));
    assert_eq!(active_section(&spans, 200.0), None);
    assert_eq!(active_section(&spans, -1.0), None);
}

#[test]
fn overlapping_sections_resolve_to_last_match() {
    let spans = vec![
        SectionSpan { id: "wide".into(), top: 0.0, height: 1000.0 },
        SectionSpan { id: "inner".into(), top: 200.0, height: 100.0 },
    ];
    assert_eq!(active_section(&spans, 250.0), Some(1));
    assert_eq!(active_section(&spans, 500.0), Some(0));
}

#[test]
fn highlight_follows_scroll_offset_plus_probe() {
    let nav = page();
    let controller = NavController::install(&nav.fx.page).expect("header present");

    for (scroll, expected) in [(0.0, vec![0]), (499.0, vec![0]), (500.0, vec![1]), (950.0, vec![2])] {
        nav.fx.scroll_to(scroll);
        nav.fx.clock.run_frame();
        assert_eq!(active(&nav), expected, "scroll {scroll}");
    }
    assert_eq!(controller.active_link(), Some(&nav.links[2]));

    // Past the last section nothing is highlighted.
    nav.fx.scroll_to(5000.0);
    nav.fx.clock.run_frame();
    assert!(active(&nav).is_empty());
}

#[test]
fn header_scrolled_past_fifty() {
    let nav = page();
    NavController::install(&nav.fx.page).expect("header present");

    nav.fx.scroll_to(50.0);
    nav.fx.clock.run_frame();
    assert!(!nav.header.has_class(class::SCROLLED));

    nav.fx.scroll_to(51.0);
    nav.fx.clock.run_frame();
    assert!(nav.header.has_class(class::SCROLLED));

    nav.fx.scroll_to(0.0);
    nav.fx.clock.run_frame();
    assert!(!nav.header.has_class(class::SCROLLED));
}

#[test]
fn scroll_bursts_coalesce_into_one_frame() {
    let nav = page();
    let controller = NavController::install(&nav.fx.page).expect("header present");

    for y in [10.0, 200.0, 650.0, 700.0] {
        nav.fx.scroll_to(y);
    }
    assert_eq!(nav.fx.clock.pending_frames(), 1);
    assert!(controller.is_frame_pending());

    // The frame reads the latest offset.
    nav.fx.clock.run_frame();
    assert!(!controller.is_frame_pending());
    assert_eq!(active(&nav), vec![1]);

    nav.fx.scroll_to(1200.0);
    assert_eq!(nav.fx.clock.pending_frames(), 1);
}

#[test]
fn refused_frame_does_not_stall_tracking() {
    let nav = page();
    let controller = NavController::install(&nav.fx.page).expect("header present");

    nav.fx.clock.refuse_frames(true);
    nav.fx.scroll_to(700.0);
    assert_eq!(nav.fx.clock.pending_frames(), 0);
    assert!(!controller.is_frame_pending());

    nav.fx.clock.refuse_frames(false);
    nav.fx.scroll_to(700.0);
    assert!(controller.is_frame_pending());
    nav.fx.clock.run_frame();
    assert_eq!(active(&nav), vec![1]);
    assert!(nav.header.has_class(class::SCROLLED));
}

#[test]
fn menu_toggle_link_and_outside_click() {
    let nav = page();
    let menu = Menu::install(&nav.fx.page).expect("menu present");
    let toggle = nav.fx.doc.root().query("#hamburger").expect("toggle");
    let outside = nav.fx.add(div("content"));

    nav.fx.click(&toggle);
    assert!(menu.is_open());
    assert!(toggle.has_class(class::ACTIVE));

    nav.fx.click(&toggle);
    assert!(!menu.is_open());

    nav.fx.click(&toggle);
    nav.fx.click(&nav.links[1]);
    assert!(!menu.is_open());
    assert!(!toggle.has_class(class::ACTIVE));

    nav.fx.click(&toggle);
    nav.fx.click(&outside);
    assert!(!menu.is_open());

    // Clicks inside the open menu but off any link keep it open.
    nav.fx.click(&toggle);
    let nav_root = nav.fx.doc.root().query("#nav").expect("nav");
    nav.fx.click(&nav_root);
    assert!(menu.is_open());
}

#[test]
fn anchors_scroll_below_the_header() {
    let nav = page();
    let top = nav.fx.add(MemoryElement::new("a").with_attr("href", "#"));
    let missing = nav.fx.add(MemoryElement::new("a").with_attr("href", "#nowhere"));
    let icon = MemoryElement::new("span");
    nav.links[1].append_child(&icon);

    assert_eq!(install_anchor_scrolling(&nav.fx.page), 4);

    assert_eq!(nav.fx.click(&icon), Response::PreventDefault);
    assert_eq!(nav.fx.viewport.smooth_scrolls(), vec![600.0 - 80.0]);

    assert_eq!(nav.fx.click(&top), Response::Continue);
    assert_eq!(nav.fx.click(&missing), Response::PreventDefault);
    assert_eq!(nav.fx.viewport.smooth_scrolls().len(), 1);
}
