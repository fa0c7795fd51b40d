//! The capability bundle handed to every component, and the single entry
//! point that installs them all.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::{
    back_to_top::BackToTop,
    count_up::CountUpGroup,
    gallery::GalleryFilter,
    lifecycle::{self, LoadingSequencer},
    nav::{self, Menu, NavController},
    parallax::Parallax,
    particles::{self, ClickBursts},
    reveal::ScrollReveal,
    slider::HeroSlider,
};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::dispatch::{Dispatcher, EventKind, Response};
use crate::dom::{Document, Viewport};
use crate::schedule::Scheduler;
use crate::visibility::IntersectionSource;

pub type ElementOf<D> = <D as Document>::Element;

/// Everything a component may touch. Cloning shares the same page.
pub struct Page<D: Document> {
    pub document: Rc<D>,
    pub viewport: Rc<dyn Viewport>,
    pub scheduler: Rc<dyn Scheduler>,
    pub intersections: Rc<dyn IntersectionSource<ElementOf<D>>>,
    pub events: Rc<Dispatcher<ElementOf<D>>>,
    pub config: Rc<Config>,
    pub rng: Rc<RefCell<SmallRng>>,
}

impl<D: Document> Clone for Page<D> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            viewport: self.viewport.clone(),
            scheduler: self.scheduler.clone(),
            intersections: self.intersections.clone(),
            events: self.events.clone(),
            config: self.config.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<D: Document + 'static> Page<D> {
    pub fn new(
        document: Rc<D>,
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn Scheduler>,
        intersections: Rc<dyn IntersectionSource<ElementOf<D>>>,
        config: Config,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            document,
            viewport,
            scheduler,
            intersections,
            events: Rc::new(Dispatcher::new()),
            config: Rc::new(config),
            rng: Rc::new(RefCell::new(rng)),
        }
    }
}

/// Handles to the installed components. `None` means the component's
/// markup was missing (or its media gate closed) and it stayed inert.
pub struct Site<E> {
    pub loader: Option<Rc<LoadingSequencer<E>>>,
    pub nav: Option<Rc<NavController<E>>>,
    pub menu: Option<Rc<Menu<E>>>,
    pub slider: Option<Rc<HeroSlider<E>>>,
    pub hero_particles: usize,
    pub count_up: Option<Rc<CountUpGroup<E>>>,
    pub reveal: ScrollReveal<E>,
    pub gallery: Option<Rc<GalleryFilter<E>>>,
    pub contact_particles: usize,
    pub back_to_top: Option<Rc<BackToTop<E>>>,
    pub parallax: Option<Rc<Parallax<E>>>,
    pub click_bursts: Option<Rc<ClickBursts>>,
}

/// Installs every component once, in page order.
pub fn mount<D: Document + 'static>(page: &Page<D>) -> Site<ElementOf<D>> {
    particles::inject_keyframes(page);

    let loader = LoadingSequencer::install(page);
    let nav = NavController::install(page);
    let menu = Menu::install(page);
    nav::install_anchor_scrolling(page);
    let slider = HeroSlider::install(page);
    let hero_particles = particles::install_hero(page);
    let count_up = CountUpGroup::install(page);
    let reveal = ScrollReveal::install(page);
    let gallery = GalleryFilter::install(page);
    let contact_particles = particles::install_contact(page);
    let back_to_top = BackToTop::install(page);
    let parallax = Parallax::install(page);
    let click_bursts = ClickBursts::install(page);
    if let Some(nav) = &nav {
        install_relayout(page, nav.clone());
    }
    lifecycle::install_exit_fade(page);

    log::debug!(
        "site mounted: {} hero particles, {} contact particles",
        hero_particles,
        contact_particles
    );

    Site {
        loader,
        nav,
        menu,
        slider,
        hero_particles,
        count_up,
        reveal,
        gallery,
        contact_particles,
        back_to_top,
        parallax,
        click_bursts,
    }
}

/// Section geometry moves on resize; re-run the highlight once resizing
/// settles.
fn install_relayout<D: Document + 'static>(page: &Page<D>, nav: Rc<NavController<ElementOf<D>>>) {
    let debouncer = Debouncer::new(page.scheduler.clone(), page.config.resize_debounce_ms);
    let viewport = page.viewport.clone();
    page.events.subscribe(EventKind::Resize, move |_| {
        let nav = nav.clone();
        let viewport = viewport.clone();
        debouncer.trigger(move || nav.update(viewport.scroll_y()));
        Response::Continue
    });
}
