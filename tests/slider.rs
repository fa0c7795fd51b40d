mod common;

use common::{div, Fixture};
use sandart_site::components::slider::HeroSlider;
use sandart_site::dom::Element;
use sandart_site::headless::MemoryElement;
use sandart_site::hooks::class;

fn slides(fx: &Fixture, n: usize) -> Vec<MemoryElement> {
    (0..n).map(|_| fx.add(div("hero-slide"))).collect()
}

fn active_indices(slides: &[MemoryElement]) -> Vec<usize> {
    slides
        .iter()
        .enumerate()
        .filter(|(_, s)| s.has_class(class::ACTIVE))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn rotation_is_k_mod_n_with_one_active() {
    for n in 1..=4 {
        let fx = Fixture::new();
        let slides = slides(&fx, n);
        let slider = HeroSlider::install(&fx.page).expect("slides present");
        assert_eq!(active_indices(&slides), vec![0]);

        for k in 1..=10 {
            fx.clock.advance(5000.0);
            assert_eq!(slider.current(), k % n, "n={n} k={k}");
            assert_eq!(active_indices(&slides), vec![k % n], "n={n} k={k}");
        }
    }
}

#[test]
fn nothing_moves_between_ticks() {
    let fx = Fixture::new();
    let slides = slides(&fx, 3);
    HeroSlider::install(&fx.page).expect("slides present");

    fx.clock.advance(4999.0);
    assert_eq!(active_indices(&slides), vec![0]);
    fx.clock.advance(1.0);
    assert_eq!(active_indices(&slides), vec![1]);
}

#[test]
fn markup_active_slide_is_kept_and_extras_cleared() {
    let fx = Fixture::new();
    let slides = slides(&fx, 3);
    slides[1].add_class(class::ACTIVE);
    slides[2].add_class(class::ACTIVE);

    let slider = HeroSlider::install(&fx.page).expect("slides present");
    assert_eq!(slider.current(), 1);
    assert_eq!(active_indices(&slides), vec![1]);

    fx.clock.advance(5000.0);
    assert_eq!(active_indices(&slides), vec![2]);
}

#[test]
fn no_slides_is_inert() {
    let fx = Fixture::new();
    assert!(HeroSlider::install(&fx.page).is_none());
    assert_eq!(fx.clock.pending_timers(), 0);
}
