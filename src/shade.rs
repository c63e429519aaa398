//! The sliding panel that carries the banner.
//!
//! A [`Shade`] is either hidden above the top edge or down over the
//! application, and moves between the two only through a host animation.
//! A slide is accepted only from the matching stable state; every other
//! request is answered with `false` and leaves the shade untouched, so two
//! animations never compete for the panel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::geometry::Frame;
use crate::host::Host;
use crate::types::{Direction, ShadeState};

pub struct Shade<H> {
    host: Arc<H>,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: ShadeState,
    frame: Frame,
    slide_duration: Duration,
}

/// A slide that passed its guard and owns the in-flight state.
#[derive(Debug)]
pub(crate) struct Slide {
    direction: Direction,
    duration: Duration,
    target: Frame,
}

impl<H: Host> Shade<H> {
    pub fn new(host: Arc<H>, width: f64, height: f64, slide_duration: Duration) -> Self {
        Self {
            host,
            inner: Mutex::new(Inner {
                state: ShadeState::Hidden,
                frame: Frame::hidden_shade(width, height),
                slide_duration,
            }),
        }
    }

    pub fn state(&self) -> ShadeState {
        self.lock().state
    }

    /// True after a slide down completes and until a slide up completes.
    pub fn is_down(&self) -> bool {
        self.state().is_down()
    }

    pub fn is_sliding(&self) -> bool {
        self.state().is_sliding()
    }

    pub fn frame(&self) -> Frame {
        self.lock().frame
    }

    pub fn slide_duration(&self) -> Duration {
        self.lock().slide_duration
    }

    /// Applies to slides started after the call.
    pub fn set_slide_duration(&self, duration: Duration) {
        self.lock().slide_duration = duration;
    }

    /// Slides the shade into view.
    ///
    /// Only starts from [`ShadeState::Hidden`]. Returns `true` when the
    /// animation completed; an interrupted animation puts the shade back in
    /// `Hidden` and returns `false`, and so does a rejected request.
    pub async fn slide_down(&self) -> bool {
        self.slide(Direction::Down).await
    }

    /// Slides the shade out of view. Only starts from [`ShadeState::Down`].
    pub async fn slide_up(&self) -> bool {
        self.slide(Direction::Up).await
    }

    /// Swipe-up gesture on the panel.
    pub async fn swipe_up(&self) {
        let completed = self.slide_up().await;
        debug!(completed, "swipe-up handled");
    }

    async fn slide(&self, direction: Direction) -> bool {
        match self.begin(direction) {
            Some(slide) => self.run(slide).await,
            None => false,
        }
    }

    /// Checks the guard for `direction` and, when it holds, marks the shade
    /// as sliding.
    pub(crate) fn begin(&self, direction: Direction) -> Option<Slide> {
        let mut inner = self.lock();
        if inner.state != direction.origin() {
            debug!(%direction, state = %inner.state, "slide rejected");
            return None;
        }
        inner.state = direction.in_flight();
        let target_y = match direction {
            Direction::Down => 0.0,
            Direction::Up => -inner.frame.height,
        };
        debug!(%direction, duration = ?inner.slide_duration, "slide started");
        Some(Slide {
            direction,
            duration: inner.slide_duration,
            target: inner.frame.at_y(target_y),
        })
    }

    /// Runs a slide obtained from [`Shade::begin`] to its end.
    pub(crate) async fn run(&self, slide: Slide) -> bool {
        let mut flight = InFlight {
            inner: &self.inner,
            direction: slide.direction,
            settled: false,
        };
        let completed = self.host.animate(slide.duration, slide.target).await;
        flight.settle(completed, slide.target);
        completed
    }

    /// Resizes the panel while it is hidden and idle.
    pub(crate) fn resize(&self, height: f64) -> bool {
        let mut inner = self.lock();
        if inner.state != ShadeState::Hidden {
            return false;
        }
        inner.frame = Frame::hidden_shade(inner.frame.width, height);
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }
}

impl<H> std::fmt::Debug for Shade<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shade").field("inner", &*lock(&self.inner)).finish()
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the shade to its starting state if the animation future is
/// dropped before the host answers.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    direction: Direction,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(&mut self, completed: bool, target: Frame) {
        let mut inner = lock(self.inner);
        if completed {
            inner.state = self.direction.target();
            inner.frame = target;
        } else {
            inner.state = self.direction.origin();
        }
        self.settled = true;
        debug!(direction = %self.direction, completed, state = %inner.state, "slide finished");
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let mut inner = lock(self.inner);
            inner.state = self.direction.origin();
            debug!(direction = %self.direction, "slide abandoned");
        }
    }
}
