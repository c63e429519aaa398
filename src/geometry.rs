//! Frames and the label margin policy.
//!
//! All values are in host layout units. The shade hangs from the top edge of
//! the overlay: `y = 0` when down, `y = -height` when hidden.

use serde::Serialize;

/// Margin the label tries to keep from the top and bottom shade edges.
pub const LABEL_MARGIN: f64 = 5.0;

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame of a shade tucked above the top edge.
    #[must_use]
    pub const fn hidden_shade(width: f64, height: f64) -> Self {
        Self::new(0.0, -height, width, height)
    }

    /// Same frame moved to vertical offset `y`.
    #[must_use]
    pub const fn at_y(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

/// Label placement inside the shade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LabelLayout {
    pub frame: Frame,
    pub font_size: f64,
}

impl LabelLayout {
    /// Lays out a label in a shade of `panel_height` for text of `text_size`.
    ///
    /// When the text does not fit, the font shrinks to the panel height and
    /// the margins vanish. Otherwise the label keeps up to [`LABEL_MARGIN`]
    /// above and below, and falls back to its natural height when the spare
    /// room is smaller than that.
    #[must_use]
    pub fn fit(panel_width: f64, panel_height: f64, text_size: f64) -> Self {
        let avail = (panel_height - text_size) / 2.0;
        let (height, font_size) = if avail < 0.0 {
            (panel_height, panel_height)
        } else if avail > LABEL_MARGIN {
            (panel_height - 2.0 * LABEL_MARGIN, text_size)
        } else {
            (text_size, text_size)
        };
        let width = (panel_width - 2.0 * LABEL_MARGIN).max(0.0);
        Self {
            frame: Frame::new(
                LABEL_MARGIN.min(panel_width / 2.0),
                (panel_height - height) / 2.0,
                width,
                height,
            ),
            font_size,
        }
    }

    /// Vertical margin between the label and the shade edges.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.frame.y
    }
}
