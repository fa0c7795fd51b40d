//! Decorative particles.
//!
//! Particles are plain descriptors drawn from an injected RNG; rendering
//! them is a separate step that turns a descriptor into a `div` with an
//! inline style.

use std::cell::Cell;
use std::f64::consts::TAU;
use std::fmt::Write as _;
use std::ops::Range;
use std::rc::Rc;

use rand::Rng;

use crate::dispatch::{EventKind, PageEvent, Response};
use crate::dom::{Document, Element};
use crate::hooks::id;
use crate::site::{ElementOf, Page};

pub const HERO_PALETTE: &[&str] = &["#FF6B9D", "#FFB347", "#F0E68C", "#98D8AA", "#87CEEB", "#DDA0DD"];

pub const CONTACT_PALETTE: &[&str] = &[
    "rgba(255, 107, 157, 0.3)",
    "rgba(255, 179, 71, 0.3)",
    "rgba(135, 206, 235, 0.3)",
    "rgba(152, 216, 170, 0.3)",
];

pub const CLICK_PALETTE: &[&str] = &["#FF6B9D", "#FFB347", "#87CEEB", "#98D8AA", "#DDA0DD"];

pub const SPARKS_PER_CLICK: usize = 8;

/// Parameter ranges for one family of ambient particles.
#[derive(Debug, Clone)]
pub struct AmbientStyle {
    pub count: usize,
    pub palette: &'static [&'static str],
    pub size: Range<f64>,
    pub opacity: Option<Range<f64>>,
    pub duration: Range<f64>,
    pub delay: Range<f64>,
    pub blur_px: Option<f64>,
    pub animation: &'static str,
}

pub const HERO: AmbientStyle = AmbientStyle {
    count: 30,
    palette: HERO_PALETTE,
    size: 5.0..15.0,
    opacity: Some(0.3..0.8),
    duration: 10.0..20.0,
    delay: 0.0..5.0,
    blur_px: None,
    animation: "floatParticle",
};

pub const CONTACT: AmbientStyle = AmbientStyle {
    count: 20,
    palette: CONTACT_PALETTE,
    size: 50.0..150.0,
    opacity: None,
    duration: 20.0..40.0,
    delay: 0.0..10.0,
    blur_px: Some(40.0),
    animation: "floatSlow",
};

/// A floating particle, positioned in percent of its container.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size: f64,
    pub color: &'static str,
    pub left: f64,
    pub top: f64,
    pub opacity: Option<f64>,
    pub duration: f64,
    pub delay: f64,
    pub blur_px: Option<f64>,
    pub animation: &'static str,
}

impl AmbientStyle {
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        Particle {
            size: rng.gen_range(self.size.clone()),
            color: pick(self.palette, rng),
            left: rng.gen_range(0.0..100.0),
            top: rng.gen_range(0.0..100.0),
            opacity: self.opacity.clone().map(|r| rng.gen_range(r)),
            duration: rng.gen_range(self.duration.clone()),
            delay: rng.gen_range(self.delay.clone()),
            blur_px: self.blur_px,
            animation: self.animation,
        }
    }
}

fn pick<R: Rng + ?Sized>(palette: &'static [&'static str], rng: &mut R) -> &'static str {
    palette[rng.gen_range(0..palette.len())]
}

impl Particle {
    pub fn css(&self) -> String {
        let mut css = format!(
            "position: absolute; width: {size:.2}px; height: {size:.2}px; background: {}; \
             border-radius: 50%; left: {:.2}%; top: {:.2}%; ",
            self.color,
            self.left,
            self.top,
            size = self.size,
        );
        if let Some(opacity) = self.opacity {
            let _ = write!(css, "opacity: {opacity:.2}; ");
        }
        if let Some(blur) = self.blur_px {
            let _ = write!(css, "filter: blur({blur}px); ");
        }
        let _ = write!(
            css,
            "pointer-events: none; animation: {} {:.2}s ease-in-out infinite; animation-delay: {:.2}s;",
            self.animation, self.duration, self.delay
        );
        css
    }
}

/// One particle of a click burst, fixed-positioned at the click point and
/// flying out by (`dx`, `dy`).
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub size: f64,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

/// `count` sparks evenly spaced around a circle, each with its own size
/// and speed.
pub fn burst<R: Rng + ?Sized>(x: f64, y: f64, color: &'static str, count: usize, rng: &mut R) -> Vec<Spark> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * TAU;
            let velocity = rng.gen_range(30.0..80.0);
            Spark {
                size: rng.gen_range(5.0..15.0),
                color,
                x,
                y,
                dx: angle.cos() * velocity,
                dy: angle.sin() * velocity,
            }
        })
        .collect()
}

impl Spark {
    pub fn css(&self) -> String {
        format!(
            "position: fixed; width: {size:.2}px; height: {size:.2}px; background: {}; \
             border-radius: 50%; left: {}px; top: {}px; pointer-events: none; z-index: 9999; \
             animation: clickParticle 0.6s ease-out forwards; --tx: {:.2}px; --ty: {:.2}px;",
            self.color,
            self.x,
            self.y,
            self.dx,
            self.dy,
            size = self.size,
        )
    }
}

/// Four-stop drift for hero particles. Offsets are drawn once and shared by
/// every particle using the animation.
pub fn float_keyframes<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut offset = || rng.gen_range(-25.0..25.0);
    let mut css = String::from("@keyframes floatParticle {\n  0%, 100% { transform: translate(0, 0) rotate(0deg); }\n");
    for (stop, deg) in [(25, 90), (50, 180), (75, 270)] {
        let (x, y) = (offset(), offset());
        let _ = writeln!(
            css,
            "  {stop}% {{ transform: translate({x:.2}px, {y:.2}px) rotate({deg}deg); }}"
        );
    }
    css.push('}');
    css
}

pub fn slow_keyframes<R: Rng + ?Sized>(rng: &mut R) -> String {
    let x = rng.gen_range(-50.0..50.0);
    let y = rng.gen_range(-50.0..50.0);
    format!(
        "@keyframes floatSlow {{\n  0%, 100% {{ transform: translate(0, 0); }}\n  \
         50% {{ transform: translate({x:.2}px, {y:.2}px); }}\n}}"
    )
}

pub const CLICK_KEYFRAMES: &str = "@keyframes clickParticle {
  0% { transform: translate(-50%, -50%) scale(1); opacity: 1; }
  100% { transform: translate(calc(-50% + var(--tx)), calc(-50% + var(--ty))) scale(0); opacity: 0; }
}";

pub fn inject_keyframes<D: Document>(page: &Page<D>) {
    let mut rng = page.rng.borrow_mut();
    page.document.inject_style(&float_keyframes(&mut *rng));
    page.document.inject_style(&slow_keyframes(&mut *rng));
    page.document.inject_style(CLICK_KEYFRAMES);
}

fn render<D: Document>(document: &D, parent: &ElementOf<D>, css: &str) -> Option<ElementOf<D>> {
    let node = document.create_element("div")?;
    node.set_css_text(css);
    parent.append_child(&node);
    Some(node)
}

fn fill<D: Document>(page: &Page<D>, container_id: &str, style: &AmbientStyle) -> usize {
    let Some(container) = page.document.element_by_id(container_id) else {
        log::debug!("no #{container_id}; particles skipped");
        return 0;
    };
    let mut rng = page.rng.borrow_mut();
    (0..style.count)
        .filter(|_| {
            let particle = style.spawn(&mut *rng);
            render(page.document.as_ref(), &container, &particle.css()).is_some()
        })
        .count()
}

/// Fills `#particles`. Returns how many were rendered.
pub fn install_hero<D: Document>(page: &Page<D>) -> usize {
    fill(page, id::PARTICLES, &HERO)
}

pub fn install_contact<D: Document>(page: &Page<D>) -> usize {
    fill(page, id::CONTACT_PARTICLES, &CONTACT)
}

/// Click-triggered sparks. Each click takes the next palette colour.
pub struct ClickBursts {
    color_index: Cell<usize>,
    live: Rc<Cell<usize>>,
}

impl Default for ClickBursts {
    fn default() -> Self {
        Self {
            color_index: Cell::new(0),
            live: Rc::new(Cell::new(0)),
        }
    }
}

impl ClickBursts {
    /// Desktop-width viewports without a reduced-motion preference only.
    pub fn install<D: Document + 'static>(page: &Page<D>) -> Option<Rc<Self>> {
        let config = &page.config;
        if !page.viewport.matches_media(&config.desktop_query)
            || page.viewport.matches_media(&config.reduced_motion_query)
        {
            log::debug!("click bursts disabled by media query");
            return None;
        }
        let body = page.document.body()?;
        let this = Rc::new(Self::default());

        let bursts = this.clone();
        let page = page.clone();
        let events = page.events.clone();
        events.subscribe(EventKind::Click, move |event| {
            if let PageEvent::Click { x, y, .. } = event {
                bursts.fire(&page, &body, *x, *y);
            }
            Response::Continue
        });
        Some(this)
    }

    fn fire<D: Document>(&self, page: &Page<D>, body: &ElementOf<D>, x: f64, y: f64) {
        let color = self.next_color();
        let sparks = burst(x, y, color, SPARKS_PER_CLICK, &mut *page.rng.borrow_mut());
        for spark in sparks {
            let Some(node) = render(page.document.as_ref(), body, &spark.css()) else {
                continue;
            };
            self.live.set(self.live.get() + 1);
            let live = self.live.clone();
            page.scheduler.set_timeout(
                page.config.click_particle_lifetime_ms,
                Box::new(move || {
                    node.remove();
                    live.set(live.get().saturating_sub(1));
                }),
            );
        }
    }

    pub fn next_color(&self) -> &'static str {
        let index = self.color_index.get();
        self.color_index.set(index + 1);
        CLICK_PALETTE[index % CLICK_PALETTE.len()]
    }

    /// Sparks rendered and not yet removed.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn ambient_parameters_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = HERO.spawn(&mut rng);
            assert!((5.0..15.0).contains(&p.size));
            assert!((0.0..100.0).contains(&p.left) && (0.0..100.0).contains(&p.top));
            assert!(p.opacity.is_some_and(|o| (0.3..0.8).contains(&o)));
            assert!(HERO_PALETTE.contains(&p.color));

            let c = CONTACT.spawn(&mut rng);
            assert!((50.0..150.0).contains(&c.size));
            assert!(c.opacity.is_none());
            assert!(c.css().contains("filter: blur(40px)"));
        }
    }

    #[test]
    fn burst_is_radial() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sparks = burst(100.0, 50.0, "#FF6B9D", 8, &mut rng);
        assert_eq!(sparks.len(), 8);
        // Index 0 points along +x, index 2 along +y.
        assert!(sparks[0].dx > 0.0 && sparks[0].dy.abs() < 1e-9);
        assert!(sparks[2].dy > 0.0 && sparks[2].dx.abs() < 1e-9);
        for s in &sparks {
            let speed = s.dx.hypot(s.dy);
            assert!((30.0..80.0).contains(&speed), "speed {speed}");
        }
    }
}
