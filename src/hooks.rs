//! Element ids, class names and data attributes shared with the page markup.

pub mod id {
    pub const LOADER: &str = "loader";
    pub const HEADER: &str = "header";
    pub const HAMBURGER: &str = "hamburger";
    pub const NAV: &str = "nav";
    pub const PARTICLES: &str = "particles";
    pub const CONTACT_PARTICLES: &str = "contact-particles";
    pub const BACK_TO_TOP: &str = "backToTop";
}

pub mod select {
    pub const HERO: &str = ".hero";
    pub const HERO_CONTENT: &str = ".hero-content";
    pub const HERO_SLIDE: &str = ".hero-slide";
    pub const NAV_LINK: &str = ".nav-link";
    pub const SECTION: &str = "section[id]";
    pub const ANCHOR: &str = "a[href^=\"#\"]";
    pub const HERO_STATS: &str = ".hero-stats";
    pub const STAT_NUMBER: &str = ".stat-number[data-target]";
    pub const ANIMATED: &str = ".animate-card, .animate-timeline, .animate-gallery";
    pub const SECTION_HEADER: &str = ".section-header";
    pub const SLIDE_IN: &str = ".animate-slide-in";
    pub const FILTER_BUTTON: &str = ".filter-btn";
    pub const GALLERY_ITEM: &str = ".gallery-item";
}

/// State classes toggled by the components.
pub mod class {
    pub const ACTIVE: &str = "active";
    pub const SCROLLED: &str = "scrolled";
    pub const HIDDEN: &str = "hidden";
    pub const LOADING: &str = "loading";
    pub const IN_VIEW: &str = "in-view";
    pub const VISIBLE: &str = "visible";
}

pub mod attr {
    pub const HREF: &str = "href";
    pub const TARGET: &str = "data-target";
    pub const FILTER: &str = "data-filter";
    pub const CATEGORY: &str = "data-category";
}
