// Presenter lifecycle: immediate render, 1 s cadence, total cancellation

mod common;

use battmon::presenter::{DEFAULT_UPDATE_INTERVAL, Presenter};
use battmon::sampler::Sampler;
use common::{FakeSource, RecordingRenderer, full_status, test_device};
use tokio::time::{Duration, sleep};

fn presenter(source: FakeSource) -> (Presenter<FakeSource, RecordingRenderer>, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let p = Presenter::new(
        Sampler::new(source, test_device()),
        renderer.clone(),
        DEFAULT_UPDATE_INTERVAL,
    );
    (p, renderer)
}

#[tokio::test(start_paused = true)]
async fn test_visible_renders_immediately_then_every_second() {
    let (mut p, renderer) = presenter(FakeSource::new(Some(-250_000), Some(full_status())));
    assert!(!p.is_active());
    assert_eq!(renderer.count(), 0);

    p.on_visible();
    assert!(p.is_active());
    assert_eq!(renderer.count(), 1, "first frame is rendered synchronously");

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(renderer.count(), 2);

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(renderer.count(), 3);

    p.on_destroy();
}

#[tokio::test(start_paused = true)]
async fn test_hidden_cancels_pending_tick() {
    let (mut p, renderer) = presenter(FakeSource::new(Some(-250_000), Some(full_status())));
    p.on_visible();
    sleep(Duration::from_millis(999)).await;
    assert_eq!(renderer.count(), 1);

    // next tick is 1 ms away
    p.on_hidden();
    assert!(!p.is_active());
    sleep(Duration::from_secs(10)).await;
    assert_eq!(renderer.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_snapshot_taken_while_inactive() {
    let source = FakeSource::new(Some(-100_000), Some(full_status()));
    let (p, renderer) = presenter(source);
    sleep(Duration::from_secs(5)).await;
    assert_eq!(renderer.count(), 0);
    drop(p);
}

#[tokio::test(start_paused = true)]
async fn test_visible_twice_is_noop() {
    let (mut p, renderer) = presenter(FakeSource::new(None, None));
    p.on_visible();
    p.on_visible();
    assert_eq!(renderer.count(), 1);

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(renderer.count(), 2, "only one ticker may run");
    p.on_hidden();
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_hidden_keeps_extrema() {
    let source = FakeSource::new(Some(-400_000), Some(full_status()));
    let (mut p, renderer) = presenter(source.clone());
    p.on_visible();
    p.on_hidden();

    source.set_current_ua(Some(150_000));
    p.on_visible();
    assert_eq!(renderer.count(), 2);
    let last = renderer.frames.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.current_now_ma, -150);
    assert_eq!((last.min_current_ma, last.max_current_ma), (-150, 400));
    p.on_destroy();
}

#[tokio::test(start_paused = true)]
async fn test_reset_stats_applies_to_next_tick() {
    let source = FakeSource::new(Some(-400_000), Some(full_status()));
    let (mut p, renderer) = presenter(source.clone());
    p.on_visible();

    source.set_current_ua(Some(150_000));
    p.reset_stats();
    sleep(Duration::from_millis(1100)).await;

    let last = renderer.frames.lock().unwrap().last().cloned().unwrap();
    assert_eq!((last.min_current_ma, last.max_current_ma), (-150, -150));
    p.on_destroy();
}

#[tokio::test(start_paused = true)]
async fn test_with_renderer_exposes_renderer() {
    let (mut p, _renderer) = presenter(FakeSource::new(None, None));
    p.on_visible();
    let n = p.with_renderer(|r| r.count());
    assert_eq!(n, 1);
    p.on_destroy();
}
