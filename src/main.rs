use anyhow::Result;
use battmon::config::{AppConfig, OutputFormat};
use battmon::power_repo::{self, PowerSource};
use battmon::presenter::Presenter;
use battmon::render::{JsonRenderer, Renderer, TextRenderer};
use battmon::sampler::Sampler;
use battmon::version;
use std::io::IsTerminal;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

// Single-threaded: sampling, rendering and lifecycle all run on the main thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the frames; logs go to stderr
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting", version::banner());

    let app_config = AppConfig::load()?;

    let source: Box<dyn PowerSource + Send> = power_repo::open_power_source(
        Path::new(&app_config.source.power_supply_root),
        app_config.source.power_supply_name.as_deref(),
    );
    let sampler = Sampler::new(source, power_repo::read_device_info());
    let device = sampler.device();
    tracing::info!(
        device = %device.full_name(),
        os = %device.os_version,
        kernel = %device.kernel_version,
        "Device identity"
    );

    let locale = app_config.display.locale;
    let renderer: Box<dyn Renderer + Send> = match app_config.display.format {
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let clear = stdout.is_terminal();
            Box::new(TextRenderer::new(stdout, locale, clear))
        }
        OutputFormat::Json => Box::new(JsonRenderer::new(std::io::stdout(), locale)),
    };

    let mut presenter = Presenter::new(sampler, renderer, app_config.update_interval());
    presenter.on_visible();

    wait_for_shutdown(&presenter).await;

    tracing::info!("Received shutdown signal");
    presenter.on_destroy();
    Ok(())
}

/// Block until Ctrl-C or SIGTERM. SIGUSR1 resets the min/max current.
async fn wait_for_shutdown<S, R>(presenter: &Presenter<S, R>)
where
    S: PowerSource + Send + 'static,
    R: Renderer + Send + 'static,
{
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (mut sigterm, mut sigusr1) =
            match (signal(SignalKind::terminate()), signal(SignalKind::user_defined1())) {
                (Ok(t), Ok(u)) => (t, u),
                _ => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => return,
                _ = sigterm.recv() => return,
                _ = sigusr1.recv() => {
                    tracing::info!("Resetting current statistics");
                    presenter.reset_stats();
                }
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = presenter;
        let _ = tokio::signal::ctrl_c().await;
    }
}
