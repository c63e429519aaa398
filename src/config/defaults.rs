use std::time::Duration;

pub(super) const fn default_display_duration() -> Duration {
    Duration::ZERO
}

pub(super) const fn default_height() -> f64 {
    64.0
}

pub(super) const fn default_width() -> f64 {
    375.0
}

pub(super) const fn default_text_size() -> f64 {
    17.0
}

/// Standard show/hide duration of a navigation bar.
pub(super) const fn default_slide_duration() -> Duration {
    Duration::from_millis(200)
}
