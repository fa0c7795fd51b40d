mod common;

use common::{div, Fixture};
use sandart_site::components::gallery::{matches, GalleryFilter, ALL};
use sandart_site::dom::Element;
use sandart_site::headless::MemoryElement;
use sandart_site::hooks::class;

struct Gallery {
    fx: Fixture,
    buttons: Vec<MemoryElement>,
    items: Vec<MemoryElement>,
}

fn gallery() -> Gallery {
    let fx = Fixture::new();
    let buttons: Vec<_> = ["all", "wedding", "kids"]
        .iter()
        .map(|tag| fx.add(div("filter-btn").with_attr("data-filter", tag)))
        .collect();
    buttons[0].add_class(class::ACTIVE);
    let items: Vec<_> = ["wedding", "kids", "wedding", "corporate"]
        .iter()
        .map(|cat| fx.add(div("gallery-item").with_attr("data-category", cat)))
        .collect();
    Gallery { fx, buttons, items }
}

fn shown(g: &Gallery) -> Vec<usize> {
    g.items
        .iter()
        .enumerate()
        .filter(|(_, i)| i.style("display").as_deref() == Some("block"))
        .map(|(i, _)| i)
        .collect()
}

fn active_buttons(g: &Gallery) -> Vec<usize> {
    g.buttons
        .iter()
        .enumerate()
        .filter(|(_, b)| b.has_class(class::ACTIVE))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn tag_matching() {
    assert!(matches(ALL, None));
    assert!(matches(ALL, Some("kids")));
    assert!(matches("kids", Some("kids")));
    assert!(!matches("kids", Some("Kids")));
    assert!(!matches("kids", None));
}

#[test]
fn filter_shows_matching_items_only() {
    let g = gallery();
    let filter = GalleryFilter::install(&g.fx.page).expect("buttons present");
    assert_eq!(filter.selected(), ALL);

    g.fx.click(&g.buttons[1]);
    assert_eq!(shown(&g), vec![0, 2]);
    assert_eq!(g.items[1].style("display").as_deref(), Some("none"));
    assert_eq!(g.items[3].style("display").as_deref(), Some("none"));
    assert_eq!(active_buttons(&g), vec![1]);
    assert_eq!(filter.selected(), "wedding");

    g.fx.click(&g.buttons[2]);
    assert_eq!(shown(&g), vec![1]);
    assert_eq!(active_buttons(&g), vec![2]);

    g.fx.click(&g.buttons[0]);
    assert_eq!(shown(&g), vec![0, 1, 2, 3]);
    assert_eq!(active_buttons(&g), vec![0]);
    assert!(g
        .items
        .iter()
        .all(|i| i.style("animation").as_deref() == Some("scaleIn 0.4s ease forwards")));
}

#[test]
fn clicks_elsewhere_leave_filter_alone() {
    let g = gallery();
    let filter = GalleryFilter::install(&g.fx.page).expect("buttons present");
    g.fx.click(&g.buttons[2]);

    let other = g.fx.add(div("content"));
    g.fx.click(&other);
    assert_eq!(filter.selected(), "kids");
    assert_eq!(active_buttons(&g), vec![2]);
}

#[test]
fn button_without_tag_means_all() {
    let g = gallery();
    let bare = g.fx.add(div("filter-btn"));
    let filter = GalleryFilter::install(&g.fx.page).expect("buttons present");

    g.fx.click(&g.buttons[2]);
    g.fx.click(&bare);
    assert_eq!(filter.selected(), ALL);
    assert_eq!(shown(&g), vec![0, 1, 2, 3]);
    assert!(active_buttons(&g).is_empty());
    assert!(bare.has_class(class::ACTIVE));
}

#[test]
fn no_buttons_is_inert() {
    let fx = Fixture::new();
    fx.add(div("gallery-item").with_attr("data-category", "kids"));
    assert!(GalleryFilter::install(&fx.page).is_none());
}
