//! Tunables for the page behaviour.
//!
//! Every field has a default, so a host page only needs to set what it
//! changes:
//!
//! ```js
//! window.sandartConfig = { slideIntervalMs: 7000, logLevel: "debug" };
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Delay between the window `load` event and hiding the overlay.
    pub loader_delay_ms: u32,
    /// Hard deadline for hiding the overlay, measured from start.
    pub loader_timeout_ms: u32,
    /// Scroll offset past which the header gets its `scrolled` style.
    pub scrolled_offset: f64,
    /// Added to the scroll offset when deciding which section is current.
    pub section_probe: f64,
    pub slide_interval_ms: u32,
    pub count_duration_ms: f64,
    /// Visible fraction of the stats block that starts the count-up.
    pub count_threshold: f64,
    pub back_to_top_offset: f64,
    pub click_particle_lifetime_ms: u32,
    pub resize_debounce_ms: u32,
    pub desktop_query: String,
    pub reduced_motion_query: String,
    /// Fixed particle seed; entropy when unset.
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loader_delay_ms: 1500,
            loader_timeout_ms: 3000,
            scrolled_offset: 50.0,
            section_probe: 100.0,
            slide_interval_ms: 5000,
            count_duration_ms: 2000.0,
            count_threshold: 0.5,
            back_to_top_offset: 300.0,
            click_particle_lifetime_ms: 600,
            resize_debounce_ms: 200,
            desktop_query: "(min-width: 768px)".into(),
            reduced_motion_query: "(prefers-reduced-motion: reduce)".into(),
            seed: None,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Parsed `log_level`, falling back to `Info` for unknown names.
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
