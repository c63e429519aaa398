//! Show/hide orchestration around a single [`Shade`].
//!
//! A [`Notifier`] is a cheap, cloneable handle. Clones drive the same banner,
//! which is how the auto-hide timer task reaches back into it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::geometry::LabelLayout;
use crate::host::{Host, Scene};
use crate::shade::Shade;
use crate::types::{Completion, Direction, ShadeState, TapHandler};

pub struct Notifier<H> {
    shared: Arc<Shared<H>>,
}

struct Shared<H> {
    host: Arc<H>,
    shade: Shade<H>,
    state: Mutex<State>,
}

struct State {
    display_duration: Duration,
    width: f64,
    text_size: f64,
    container: Container,
    label: LabelLayout,
    text: Option<String>,
    tap_handler: Option<TapHandler>,
    auto_hide: Option<AutoHide>,
    timers_armed: u64,
}

/// The overlay surface hosting the shade.
#[derive(Clone, Copy, Debug)]
struct Container {
    visible: bool,
    height: f64,
}

struct AutoHide {
    id: u64,
    handle: AbortHandle,
}

impl<H> Clone for Notifier<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<H: Host> Notifier<H> {
    pub fn new(host: H, config: &Config) -> Self {
        let host = Arc::new(host);
        let settings = &config.notifier;
        let shade = Shade::new(
            Arc::clone(&host),
            settings.width,
            settings.height,
            config.shade.slide_duration,
        );
        let state = State {
            display_duration: settings.display_duration,
            width: settings.width,
            text_size: settings.text_size,
            container: Container {
                visible: false,
                height: settings.height,
            },
            label: LabelLayout::fit(settings.width, settings.height, settings.text_size),
            text: None,
            tap_handler: None,
            auto_hide: None,
            timers_armed: 0,
        };
        Self {
            shared: Arc::new(Shared {
                host,
                shade,
                state: Mutex::new(state),
            }),
        }
    }

    pub fn host(&self) -> &H {
        &self.shared.host
    }

    pub fn shade(&self) -> &Shade<H> {
        &self.shared.shade
    }

    /// How long a banner stays down before hiding itself. Zero disables
    /// auto-hide.
    pub fn display_duration(&self) -> Duration {
        self.lock().display_duration
    }

    pub fn set_display_duration(&self, duration: Duration) {
        self.lock().display_duration = duration;
    }

    pub fn height(&self) -> f64 {
        self.lock().container.height
    }

    /// Resizes the banner.
    ///
    /// Only takes effect while the shade is hidden and idle; otherwise the
    /// value is dropped without notice, as are negative or non-finite values.
    /// Resizing rebuilds the overlay, which starts out hidden.
    pub fn set_height(&self, height: f64) {
        if !height.is_finite() || height < 0.0 {
            warn!(height, "ignoring invalid banner height");
            return;
        }
        let applied = {
            let mut state = self.lock();
            let applied = self.shared.shade.resize(height);
            if applied {
                state.label = LabelLayout::fit(state.width, height, state.text_size);
                state.container = Container {
                    visible: false,
                    height,
                };
            }
            applied
        };
        if applied {
            debug!(height, "banner resized");
            self.present();
        } else {
            debug!(height, state = %self.shared.shade.state(), "resize ignored while showing");
        }
    }

    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().container.visible
    }

    pub fn has_tap_handler(&self) -> bool {
        self.lock().tap_handler.is_some()
    }

    pub fn has_pending_auto_hide(&self) -> bool {
        self.lock().auto_hide.is_some()
    }

    pub fn label(&self) -> LabelLayout {
        self.lock().label
    }

    pub fn scene(&self) -> Scene {
        let state = self.lock();
        Scene {
            visible: state.container.visible,
            container_height: state.container.height,
            shade: self.shared.shade.frame(),
            state: self.shared.shade.state(),
            label: state.label,
            text: state.text.clone(),
        }
    }

    /// Shows `text` by sliding the shade down.
    ///
    /// The call is dropped when the shade is not hidden and idle: `completion`
    /// is never invoked and `None` is returned. Otherwise the outcome of the
    /// slide is passed to `completion` and returned.
    ///
    /// With a non-zero display duration a hide is scheduled once the slide
    /// settles, whatever its outcome, and that hide reports to the same
    /// `completion`. Must be awaited inside a tokio runtime. Dropping the
    /// future before the slide settles clears the banner again.
    pub async fn show(
        &self,
        text: impl Into<String>,
        handler: Option<TapHandler>,
        completion: Option<Completion>,
    ) -> Option<bool> {
        let text = text.into();
        let slide = {
            let mut state = self.lock();
            let Some(slide) = self.shared.shade.begin(Direction::Down) else {
                debug!(%text, "show dropped while the banner is busy");
                return None;
            };
            // A timer left by a swiped-away banner must not reach this one.
            if let Some(stale) = state.auto_hide.take() {
                stale.handle.abort();
                debug!(timer = stale.id, "stale auto-hide cancelled");
            }
            state.text = Some(text);
            state.tap_handler = handler;
            state.container.visible = true;
            slide
        };
        self.present();

        let mut rollback = ShowRollback {
            notifier: self,
            armed: true,
        };
        let success = self.shared.shade.run(slide).await;
        rollback.armed = false;
        if !success {
            self.lock().clear();
        }
        self.present();

        let delay = self.display_duration();
        if !delay.is_zero() {
            self.arm_auto_hide(delay, completion.clone());
        }
        info!(success, auto_hide = ?delay, "banner shown");
        if let Some(completion) = completion {
            completion(success);
        }
        Some(success)
    }

    /// Slides the shade up and clears the banner.
    ///
    /// Cancels a pending auto-hide. The cleanup runs even when the slide is
    /// rejected or interrupted; `completion` receives the slide outcome.
    pub async fn hide(&self, completion: Option<Completion>) -> bool {
        let pending = self.lock().auto_hide.take();
        if let Some(timer) = pending {
            timer.handle.abort();
            debug!(timer = timer.id, "auto-hide cancelled");
        }
        self.finish_hide(completion).await
    }

    /// Tap on the panel. Returns whether a handler ran.
    ///
    /// Only a shade that is down or sliding down can be tapped; a banner
    /// swiped out of view keeps its handler but no longer receives taps.
    pub fn tap(&self) -> bool {
        if !matches!(
            self.shared.shade.state(),
            ShadeState::Down | ShadeState::SlidingDown
        ) {
            return false;
        }
        let handler = self.lock().tap_handler.clone();
        match handler {
            Some(handler) => {
                debug!("tap handled");
                handler();
                true
            }
            None => false,
        }
    }

    /// Swipe-up on the panel. Slides the shade up without clearing the
    /// banner or touching the auto-hide timer.
    pub async fn swipe_up(&self) {
        self.shared.shade.swipe_up().await;
        self.present();
    }

    async fn finish_hide(&self, completion: Option<Completion>) -> bool {
        let success = self.shared.shade.slide_up().await;
        self.lock().clear();
        self.present();
        info!(success, "banner hidden");
        if let Some(completion) = completion {
            completion(success);
        }
        success
    }

    fn arm_auto_hide(&self, delay: Duration, completion: Option<Completion>) {
        let mut state = self.lock();
        state.timers_armed = state.timers_armed.wrapping_add(1);
        let id = state.timers_armed;
        let notifier = self.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            if notifier.claim_auto_hide(id) {
                debug!(timer = id, "auto-hide fired");
                notifier.finish_hide(completion).await;
            }
        });
        let previous = state.auto_hide.replace(AutoHide {
            id,
            handle: task.abort_handle(),
        });
        if let Some(previous) = previous {
            previous.handle.abort();
            debug!(timer = previous.id, "auto-hide superseded");
        }
        debug!(timer = id, ?delay, "auto-hide armed");
    }

    /// Detaches timer `id` so a later manual hide does not abort the hide it
    /// is about to run. Fails when the timer was superseded.
    fn claim_auto_hide(&self, id: u64) -> bool {
        let mut state = self.lock();
        if state.auto_hide.as_ref().is_some_and(|timer| timer.id == id) {
            state.auto_hide = None;
            true
        } else {
            false
        }
    }

    fn present(&self) {
        let scene = self.scene();
        self.shared.host.present(&scene);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears a show whose slide-down future was dropped before it settled.
struct ShowRollback<'a, H: Host> {
    notifier: &'a Notifier<H>,
    armed: bool,
}

impl<H: Host> Drop for ShowRollback<'_, H> {
    fn drop(&mut self) {
        if self.armed {
            self.notifier.lock().clear();
            self.notifier.present();
            debug!("show abandoned, banner cleared");
        }
    }
}

impl State {
    fn clear(&mut self) {
        self.container.visible = false;
        self.tap_handler = None;
        self.text = None;
    }
}

impl<H: Host> std::fmt::Debug for Notifier<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("scene", &self.scene())
            .field("display_duration", &self.display_duration())
            .finish_non_exhaustive()
    }
}
