// Polling presenter: renders one snapshot immediately when shown, then one per interval.
// Ticks self-reschedule (sleep after each render), so rendering delay adds drift.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use crate::power_repo::PowerSource;
use crate::render::Renderer;
use crate::sampler::Sampler;

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

struct Screen<S, R> {
    sampler: Sampler<S>,
    renderer: R,
    /// Cleared under the lock on stop, so a tick racing the stop cannot render.
    active: bool,
}

impl<S: PowerSource, R: Renderer> Screen<S, R> {
    fn refresh(&mut self) {
        let snapshot = self.sampler.snapshot();
        self.renderer.render(&snapshot);
    }
}

/// Lock without ever panicking: a poisoned lock still holds a usable sampler.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

enum State {
    Inactive,
    Active {
        handle: JoinHandle<()>,
        shutdown_tx: oneshot::Sender<()>,
    },
}

pub struct Presenter<S, R> {
    screen: Arc<Mutex<Screen<S, R>>>,
    interval: Duration,
    state: State,
}

impl<S, R> Presenter<S, R>
where
    S: PowerSource + Send + 'static,
    R: Renderer + Send + 'static,
{
    pub fn new(sampler: Sampler<S>, renderer: R, interval: Duration) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                sampler,
                renderer,
                active: false,
            })),
            interval,
            state: State::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Start polling: render now, then every interval. No-op while already active.
    /// Must be called inside a tokio runtime.
    pub fn on_visible(&mut self) {
        if self.is_active() {
            return;
        }
        {
            let mut screen = lock(&self.screen);
            screen.active = true;
            screen.refresh();
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = spawn_ticker(self.screen.clone(), self.interval, shutdown_rx);
        self.state = State::Active {
            handle,
            shutdown_tx,
        };
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "Presenter active");
    }

    /// Stop polling. Any pending tick is cancelled; no render happens after this returns.
    pub fn on_hidden(&mut self) {
        if let State::Active {
            handle,
            shutdown_tx,
        } = std::mem::replace(&mut self.state, State::Inactive)
        {
            lock(&self.screen).active = false;
            let _ = shutdown_tx.send(());
            handle.abort();
            tracing::debug!("Presenter inactive");
        }
    }

    pub fn on_destroy(&mut self) {
        self.on_hidden();
    }

    /// Clear the running min/max current.
    pub fn reset_stats(&self) {
        lock(&self.screen).sampler.reset();
    }

    /// Run `f` against the renderer (e.g. to inspect captured output).
    pub fn with_renderer<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut lock(&self.screen).renderer)
    }
}

impl<S, R> Drop for Presenter<S, R> {
    fn drop(&mut self) {
        if let State::Active { handle, .. } = &self.state {
            lock(&self.screen).active = false;
            handle.abort();
        }
    }
}

fn spawn_ticker<S, R>(
    screen: Arc<Mutex<Screen<S, R>>>,
    interval: Duration,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> JoinHandle<()>
where
    S: PowerSource + Send + 'static,
    R: Renderer + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => break,
                _ = sleep(interval) => {
                    let mut guard = lock(&screen);
                    if !guard.active {
                        break;
                    }
                    guard.refresh();
                }
            }
        }
    })
}
