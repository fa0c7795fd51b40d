//! Count-up of the hero statistics, started the first time the stats block
//! scrolls into view.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{Document, Element};
use crate::hooks::{attr, select};
use crate::schedule::Scheduler;
use crate::site::Page;
use crate::visibility::{ObserveOptions, VisibilityObserver};

/// Groups digits in threes with `,`: `1234567` → `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Progress of one counter, driven by frame timestamps.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration_ms: f64,
    started_at: Option<f64>,
    shown: Option<u64>,
}

impl CountUp {
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
            shown: None,
        }
    }

    /// Advances to `timestamp`. Returns the value to display if it changed
    /// since the last frame. The first call fixes the start time.
    pub fn frame(&mut self, timestamp: f64) -> Option<u64> {
        let start = *self.started_at.get_or_insert(timestamp);
        let progress = if self.duration_ms > 0.0 {
            ((timestamp - start) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let value = if progress >= 1.0 {
            self.target
        } else {
            ((self.target as f64 * progress).floor() as u64).min(self.target)
        };
        if self.shown == Some(value) {
            return None;
        }
        self.shown = Some(value);
        Some(value)
    }

    pub fn is_done(&self) -> bool {
        self.shown == Some(self.target)
    }
}

/// The `.stat-number` counters of the stats block, behind a one-shot latch.
pub struct CountUpGroup<E> {
    counters: Vec<(E, u64)>,
    duration_ms: f64,
    started: Cell<bool>,
    observer: RefCell<Option<VisibilityObserver<E>>>,
}

impl<E: Element> CountUpGroup<E> {
    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let Some(container) = page.document.query(select::HERO_STATS) else {
            log::debug!("no {}; count-up skipped", select::HERO_STATS);
            return None;
        };
        let counters = page
            .document
            .query_all(select::STAT_NUMBER)
            .into_iter()
            .filter_map(|el| {
                let raw = el.attribute(attr::TARGET)?;
                match raw.trim().parse::<u64>() {
                    Ok(target) => Some((el, target)),
                    Err(_) => {
                        log::warn!("ignoring counter with {}={raw:?}", attr::TARGET);
                        None
                    }
                }
            })
            .collect();

        let this = Rc::new(Self {
            counters,
            duration_ms: page.config.count_duration_ms,
            started: Cell::new(false),
            observer: RefCell::new(None),
        });

        let group = this.clone();
        let scheduler = page.scheduler.clone();
        let observer = VisibilityObserver::one_shot(
            page.intersections.as_ref(),
            &ObserveOptions::threshold(page.config.count_threshold),
            move |_| group.start(&scheduler),
        );
        observer.observe(&container);
        *this.observer.borrow_mut() = Some(observer);
        Some(this)
    }

    /// Starts every counter. Later calls do nothing.
    pub fn start(&self, scheduler: &Rc<dyn Scheduler>) {
        if self.started.replace(true) {
            return;
        }
        log::info!("count-up started for {} counters", self.counters.len());
        for (el, target) in &self.counters {
            animate(
                scheduler.clone(),
                el.clone(),
                CountUp::new(*target, self.duration_ms),
            );
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }
}

fn animate<E: Element>(scheduler: Rc<dyn Scheduler>, el: E, mut state: CountUp) {
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |timestamp| {
        if let Some(value) = state.frame(timestamp) {
            el.set_text(&format_thousands(value));
        }
        if !state.is_done() {
            animate(next, el, state);
        }
    }));
}
