#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_channel::Receiver;
use banner::shade::Shade;
use banner::types::ShadeState;
use common::{Animation, ScriptedHost};

const SLIDE: Duration = Duration::from_millis(350);

fn shade() -> (Arc<Shade<ScriptedHost>>, Receiver<Animation>) {
    let (host, animations) = ScriptedHost::new();
    (
        Arc::new(Shade::new(Arc::new(host), 320.0, 64.0, SLIDE)),
        animations,
    )
}

async fn settle_down(shade: &Arc<Shade<ScriptedHost>>, animations: &Receiver<Animation>) {
    let task = tokio::spawn({
        let shade = Arc::clone(shade);
        async move { shade.slide_down().await }
    });
    animations.recv().await.unwrap().complete();
    assert!(task.await.unwrap());
}

#[tokio::test]
async fn slides_use_the_configured_duration_and_targets() {
    let (shade, animations) = shade();

    let down = tokio::spawn({
        let shade = Arc::clone(&shade);
        async move { shade.slide_down().await }
    });
    let animation = animations.recv().await.unwrap();
    assert_eq!(animation.duration, SLIDE);
    assert!(animation.target.y.abs() < f64::EPSILON);
    assert!((animation.target.width - 320.0).abs() < f64::EPSILON);
    animation.complete();
    assert!(down.await.unwrap());

    shade.set_slide_duration(Duration::from_millis(100));
    let up = tokio::spawn({
        let shade = Arc::clone(&shade);
        async move { shade.slide_up().await }
    });
    let animation = animations.recv().await.unwrap();
    assert_eq!(animation.duration, Duration::from_millis(100));
    assert!((animation.target.y + 64.0).abs() < f64::EPSILON);
    animation.complete();
    assert!(up.await.unwrap());
    assert_eq!(shade.state(), ShadeState::Hidden);
}

#[tokio::test]
async fn slide_up_is_rejected_while_sliding_up() {
    let (shade, animations) = shade();
    settle_down(&shade, &animations).await;

    let up = tokio::spawn({
        let shade = Arc::clone(&shade);
        async move { shade.slide_up().await }
    });
    let animation = animations.recv().await.unwrap();
    assert_eq!(shade.state(), ShadeState::SlidingUp);
    assert!(shade.is_down());
    assert!(shade.is_sliding());

    assert!(!shade.slide_up().await);
    assert!(!shade.slide_down().await);
    assert_eq!(shade.state(), ShadeState::SlidingUp);
    assert!(animations.is_empty());

    animation.complete();
    assert!(up.await.unwrap());
    assert!(!shade.is_down());
    assert!(!shade.is_sliding());
}

#[tokio::test]
async fn interrupted_slide_up_stays_down() {
    let (shade, animations) = shade();
    settle_down(&shade, &animations).await;

    let up = tokio::spawn({
        let shade = Arc::clone(&shade);
        async move { shade.slide_up().await }
    });
    animations.recv().await.unwrap().interrupt();

    assert!(!up.await.unwrap());
    assert_eq!(shade.state(), ShadeState::Down);
    assert!(shade.frame().y.abs() < f64::EPSILON);
}

#[tokio::test]
async fn swipe_is_ignored_unless_down() {
    let (shade, animations) = shade();

    shade.swipe_up().await;
    assert_eq!(shade.state(), ShadeState::Hidden);
    assert!(animations.is_empty());

    settle_down(&shade, &animations).await;
    let swipe = tokio::spawn({
        let shade = Arc::clone(&shade);
        async move { shade.swipe_up().await }
    });
    animations.recv().await.unwrap().complete();
    swipe.await.unwrap();
    assert_eq!(shade.state(), ShadeState::Hidden);
}
