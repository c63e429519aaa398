//! The seam between the banner logic and the UI framework that draws it.
//!
//! A [`Host`] runs animations and receives a [`Scene`] snapshot whenever
//! something visible changes. Interpolation, windows, gestures recognition
//! and styling all live on the host side.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::geometry::{Frame, LabelLayout};
use crate::types::ShadeState;

/// Rendering backend for a banner.
pub trait Host: Send + Sync + 'static {
    /// Animates the shade to `target` over `duration`.
    ///
    /// Resolves to `true` when the animation ran to completion and `false`
    /// when the host interrupted or cancelled it.
    fn animate(&self, duration: Duration, target: Frame) -> impl Future<Output = bool> + Send;

    /// Called after every visible change with the complete banner state.
    fn present(&self, _scene: &Scene) {}
}

/// What the host should currently draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    /// Whether the always-on-top overlay surface is shown.
    pub visible: bool,
    pub container_height: f64,
    pub shade: Frame,
    pub state: ShadeState,
    pub label: LabelLayout,
    pub text: Option<String>,
}

/// Host without a screen: animations take their nominal time and scenes go
/// to the trace log.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Host for Headless {
    async fn animate(&self, duration: Duration, target: Frame) -> bool {
        trace!(?duration, y = target.y, "animating shade");
        sleep(duration).await;
        true
    }

    fn present(&self, scene: &Scene) {
        debug!(
            visible = scene.visible,
            state = %scene.state,
            y = scene.shade.y,
            height = scene.container_height,
            font_size = scene.label.font_size,
            label_margin = scene.label.margin(),
            text = scene.text.as_deref().unwrap_or(""),
            "scene"
        );
    }
}
