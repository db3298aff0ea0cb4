//! The Sound Bind window.
//!
//! ```text
//! ┌ Sound Bind ───────────────────────────────────────────────────────┐
//! │ Configure sounds for keys and mouse buttons.                      │
//! │ ┌───────────────────────────────────────────────────────────────┐ │
//! │ │ Universal Sound: Not Set                                      │ │
//! │ │                                                               │ │
//! │ │ Key.a: /home/me/a.wav                                         │ │
//! │ │ Button.left: /home/me/click.wav                               │ │
//! │ └───────────────────────────────────────────────────────────────┘ │
//! │ [Set Universal Sound] [Add Key Sound] [Add Mouse Sound] [Clear]   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The listing is rebuilt from a store snapshot every frame, so bindings
//! captured by the dispatcher threads show up without any explicit refresh
//! message.  A slow repaint timer keeps frames coming while the window is idle.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, RichText, ScrollArea};
use soundbind_core::{BindingSet, Namespace};

use super::dialogs::DialogProvider;
use crate::application::{binding_store::BindingStore, dispatch::EventDispatcher};

/// Native window title.
pub const WINDOW_TITLE: &str = "Sound Bind";

/// How often an idle window re-reads the store.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Builds the text shown in the read-only listing pane.
///
/// Keyboard bindings are listed before mouse bindings, each in identifier order.
pub fn render_listing(bindings: &BindingSet) -> String {
    let mut text = format!(
        "Universal Sound: {}\n\n",
        bindings.universal().unwrap_or("Not Set")
    );
    for namespace in Namespace::ALL {
        for (id, path) in bindings.entries(namespace) {
            text.push_str(id);
            text.push_str(": ");
            text.push_str(path);
            text.push('\n');
        }
    }
    text
}

/// `eframe` application state.
pub struct SoundBindApp {
    store: Arc<BindingStore>,
    dispatcher: Arc<EventDispatcher>,
    dialogs: Box<dyn DialogProvider>,
}

impl SoundBindApp {
    pub fn new(
        store: Arc<BindingStore>,
        dispatcher: Arc<EventDispatcher>,
        dialogs: Box<dyn DialogProvider>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            dialogs,
        }
    }

    /// "Set Universal Sound": pick a file and make it the keyboard fallback.
    pub fn choose_universal_sound(&self) {
        if let Some(path) = self.dialogs.pick_sound("Select universal sound") {
            self.store.set_universal(&path.to_string_lossy());
        }
    }

    /// "Add Key Sound" / "Add Mouse Sound": pick a file, explain what to do
    /// next, then arm a capture for `namespace`.
    pub fn add_sound(&self, namespace: Namespace) {
        let Some(path) = self
            .dialogs
            .pick_sound(&format!("Select sound for {namespace}"))
        else {
            return;
        };

        match namespace {
            Namespace::Keyboard => self
                .dialogs
                .inform("Assign Key Sound", "Press the key to assign the sound."),
            Namespace::Mouse => self.dialogs.inform(
                "Assign Mouse Sound",
                "Click the mouse button to assign the sound.",
            ),
        }
        self.dispatcher
            .begin_capture(namespace, &path.to_string_lossy());
    }

    /// "Clear Sounds": remove every binding and the universal sound.
    pub fn clear_sounds(&self) {
        self.store.clear();
    }

    /// Current contents of the listing pane.
    pub fn listing(&self) -> String {
        render_listing(&self.store.snapshot())
    }

    /// One status line per namespace that is waiting for a capture press.
    fn pending_captures(&self) -> Vec<String> {
        Namespace::ALL
            .into_iter()
            .filter_map(|namespace| {
                let state = self.dispatcher.capture_state(namespace);
                state
                    .pending_path()
                    .map(|path| format!("Waiting for {namespace} input to bind {path}"))
            })
            .collect()
    }
}

impl eframe::App for SoundBindApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Set Universal Sound").clicked() {
                    self.choose_universal_sound();
                }
                if ui.button("Add Key Sound").clicked() {
                    self.add_sound(Namespace::Keyboard);
                }
                if ui.button("Add Mouse Sound").clicked() {
                    self.add_sound(Namespace::Mouse);
                }
                if ui.button("Clear Sounds").clicked() {
                    self.clear_sounds();
                }
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.label("Configure sounds for keys and mouse buttons.");
                ui.add_space(10.0);
            });

            for line in self.pending_captures() {
                ui.label(RichText::new(line).italics());
            }

            let listing = self.listing();
            ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut listing.as_str())
                        .desired_rows(12)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
            });
        });

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
