#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_channel::{Receiver, Sender, unbounded};
use banner::config::Config;
use banner::geometry::Frame;
use banner::host::{Host, Scene};
use banner::notifier::Notifier;
use banner::types::{Completion, TapHandler};
use tokio::sync::oneshot;

/// Host whose animations wait until the test settles them.
pub struct ScriptedHost {
    animations: Sender<Animation>,
    scenes: Mutex<Vec<Scene>>,
}

/// An animation the host is running.
pub struct Animation {
    pub duration: Duration,
    pub target: Frame,
    reply: oneshot::Sender<bool>,
}

impl Animation {
    pub fn complete(self) {
        let _ = self.reply.send(true);
    }

    pub fn interrupt(self) {
        let _ = self.reply.send(false);
    }
}

impl ScriptedHost {
    pub fn new() -> (Self, Receiver<Animation>) {
        let (tx, rx) = unbounded();
        (
            Self {
                animations: tx,
                scenes: Mutex::new(Vec::new()),
            },
            rx,
        )
    }

    pub fn scenes(&self) -> Vec<Scene> {
        self.scenes.lock().unwrap().clone()
    }

    pub fn last_scene(&self) -> Option<Scene> {
        self.scenes.lock().unwrap().last().cloned()
    }
}

impl Host for ScriptedHost {
    async fn animate(&self, duration: Duration, target: Frame) -> bool {
        let (reply, answer) = oneshot::channel();
        let animation = Animation {
            duration,
            target,
            reply,
        };
        if self.animations.send(animation).await.is_err() {
            return false;
        }
        answer.await.unwrap_or(false)
    }

    fn present(&self, scene: &Scene) {
        self.scenes.lock().unwrap().push(scene.clone());
    }
}

pub fn scripted(config: &Config) -> (Notifier<ScriptedHost>, Receiver<Animation>) {
    let (host, animations) = ScriptedHost::new();
    (Notifier::new(host, config), animations)
}

pub fn auto_hiding(display: Duration) -> Config {
    let mut config = Config::default();
    config.notifier.display_duration = display;
    config
}

/// Completion that forwards every outcome it receives.
pub fn recorder() -> (Completion, Receiver<bool>) {
    let (tx, rx) = unbounded();
    let completion: Completion = Arc::new(move |success: bool| {
        tx.try_send(success).unwrap();
    });
    (completion, rx)
}

pub fn noop_tap() -> TapHandler {
    Arc::new(|| {})
}
