//! Sound Bind entry point.
//!
//! Wires together the storage, playback and input-capture adapters, starts
//! the two dispatcher loops, and then hands the main thread to the window.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_settings()           -- optional settings.toml
//!  └─ BindingStore::open()      -- soundbind_config.json
//!  └─ start services
//!       ├─ RdevInputSource      (hook thread)
//!       ├─ soundbind-keyboard   (dispatcher loop)
//!       └─ soundbind-mouse      (dispatcher loop)
//!  └─ eframe::run_native()      -- blocks until the window closes
//! ```
//!
//! Background threads are detached; returning from `main` ends the process.

use std::sync::Arc;

use eframe::egui;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use soundbind::application::{binding_store::BindingStore, dispatch::EventDispatcher};
use soundbind::infrastructure::{
    input_capture::{rdev_listener::RdevInputSource, InputSource},
    playback::rodio_player::RodioPlayer,
    storage::{
        bindings_file::JsonBindingFile,
        settings::{load_settings, AppSettings},
    },
    ui::{RfdDialogs, SoundBindApp, WINDOW_TITLE},
};

fn main() -> anyhow::Result<()> {
    // Settings are read before logging starts so `log_level` can seed the filter.
    let (settings, settings_error) = match load_settings() {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e)),
    };

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    if let Some(e) = settings_error {
        warn!("error loading settings, using defaults: {e}");
    }

    info!("Sound Bind starting");

    // Blocking pool for fire-and-forget playback tasks.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("soundbind-worker")
        .build()?;

    let store = Arc::new(BindingStore::open(Box::new(JsonBindingFile::new(
        &settings.bindings_file,
    ))));
    let player = Arc::new(RodioPlayer::new(settings.effective_volume()));
    let dispatcher = Arc::new(EventDispatcher::new(
        Arc::clone(&store),
        player,
        runtime.handle().clone(),
    ));

    // ── Input capture + dispatcher loops ──────────────────────────────────────
    let source = RdevInputSource::new();
    match source.start() {
        Ok(streams) => {
            dispatcher.spawn_loop("soundbind-keyboard", streams.keyboard)?;
            dispatcher.spawn_loop("soundbind-mouse", streams.mouse)?;
            info!("listening for keyboard and mouse input");
        }
        Err(e) => error!("input capture unavailable, sounds will not play: {e}"),
    }

    // ── Window ────────────────────────────────────────────────────────────────
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([640.0, 380.0])
            .with_min_inner_size([480.0, 260.0]),
        ..Default::default()
    };
    let app = SoundBindApp::new(Arc::clone(&store), dispatcher, Box::new(RfdDialogs));

    eframe::run_native(WINDOW_TITLE, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    source.stop();
    info!("Sound Bind stopped");

    // Do not wait for sounds that are still playing.
    runtime.shutdown_background();
    Ok(())
}
