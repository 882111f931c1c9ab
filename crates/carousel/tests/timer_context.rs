//! Controller on tokio timers
//!
//! Runs the interaction controller against real `TimerContext` tasks on a
//! paused tokio clock.

use std::time::Duration;

use carousel::{Edge, InteractionController, PointerEvent, Source, Tick, TimerContext};
use tokio::sync::mpsc;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn click_completes_on_tokio_timers() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctx: TimerContext<Tick> = TimerContext::new(tx).with_band_id("days");
    let mut controller = InteractionController::new(ctx, 0.0);
    let started = Instant::now();

    controller.handle_pointer(PointerEvent::mouse_down(Edge::Bottom));
    controller.handle_pointer(PointerEvent::Release);

    while controller.is_busy() {
        let envelope = rx.recv().await.expect("controller keeps the channel open");
        assert!(envelope.is_for("days"));
        assert_eq!(envelope.source, Source::Timer);
        controller.handle_tick(envelope.message);
    }

    assert_eq!(controller.offset(), 1.0);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(760) && elapsed < Duration::from_millis(800));
}

#[tokio::test(start_paused = true)]
async fn hold_repeats_until_release() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctx: TimerContext<Tick> = TimerContext::new(tx);
    let mut controller = InteractionController::new(ctx, 0.0);
    let started = Instant::now();

    controller.handle_pointer(PointerEvent::Enter(Edge::Top));
    controller.handle_pointer(PointerEvent::mouse_down(Edge::Top));

    while controller.offset() > -3.0 {
        let envelope = rx.recv().await.expect("controller keeps the channel open");
        controller.handle_tick(envelope.message);
    }
    controller.handle_pointer(PointerEvent::Release);

    assert_eq!(controller.offset(), -3.0);
    assert!(!controller.is_busy());
    assert!(started.elapsed() >= Duration::from_millis(1400));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err(), "repeat timer outlived the release");
}
