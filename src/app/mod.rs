// SPDX-License-Identifier: MPL-2.0
//! Demo application exercising the toast manager.
//!
//! The `App` struct owns a clone of the manager and a `ToastHost` mounted
//! over a small control panel. Buttons map one-to-one onto manager
//! operations: one per variant, promise-bound uploads that succeed or fail,
//! dismiss-all and a position picker.

mod message;
mod view;

pub use message::{Flags, Message};

use crate::ui::notifications::{
    PendingOperation, Position, PromiseMessages, ToastHost, ToastManager, ToastOptions, Variant,
};
use crate::ui::theming::{ColorScheme, ThemeMode};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// How long the simulated upload takes before settling.
const SIMULATED_UPLOAD: Duration = Duration::from_secs(2);

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 400;
pub const MIN_WINDOW_WIDTH: u32 = 650;

/// Root Iced application state.
pub struct App {
    manager: ToastManager,
    host: ToastHost,
    theme_mode: ThemeMode,
    /// Anchor used for toasts shown from the control panel.
    position: Position,
    /// Number of toasts shown so far, used to tell sample toasts apart.
    shown: u64,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("position", &self.position)
            .field("active", &self.host.toasts().len())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires a Fn boot; the flags are cheap to clone.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let host = ToastHost::new(flags.manager.clone())
            .with_scheme(ColorScheme::for_mode(flags.theme_mode));

        let mut app = App {
            manager: flags.manager,
            host,
            theme_mode: flags.theme_mode,
            position: flags.position,
            shown: 0,
        };

        if let Some(warning) = flags.config_warning {
            app.show(ToastOptions::warning("Settings not loaded").description(warning));
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.host.toasts().len() {
            0 => "Iced Toasts".to_string(),
            active => format!("Iced Toasts ({active})"),
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        self.host.subscription().map(Message::Toasts)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Show(variant) => {
                let options = sample_options(variant, self.shown + 1);
                self.show(options);
                Task::none()
            }
            Message::Promise { succeed } => {
                let operation = PendingOperation::new(
                    simulated_upload(succeed),
                    PromiseMessages::new("Uploading…", "Upload complete", "Upload failed"),
                );
                self.show(ToastOptions::promise(operation).description("holiday.png"));
                Task::none()
            }
            Message::DismissAll => {
                self.manager.dismiss_all();
                Task::none()
            }
            Message::PositionSelected(position) => {
                self.position = position;
                Task::none()
            }
            Message::Toasts(toast_message) => self.host.update(toast_message).map(Message::Toasts),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            host: &self.host,
            position: self.position,
        })
    }

    fn show(&mut self, options: ToastOptions) {
        match self.manager.show(options.position(self.position)) {
            Ok(_) => self.shown += 1,
            Err(err) => warn!(%err, "could not show toast"),
        }
    }
}

fn sample_options(variant: Variant, n: u64) -> ToastOptions {
    match variant {
        Variant::Success => ToastOptions::success(format!("Saved #{n}"))
            .description("Your changes have been written to disk."),
        Variant::Error => ToastOptions::error(format!("Export #{n} failed"))
            .description("The destination folder is read-only."),
        Variant::Warning => ToastOptions::warning(format!("Low disk space #{n}")),
        Variant::Info => ToastOptions::info(format!("Sync #{n} scheduled")),
        Variant::Loading => ToastOptions::loading(format!("Indexing #{n}"))
            .description("Stays until dismissed.")
            .persistent(),
    }
}

async fn simulated_upload(succeed: bool) -> Result<(), &'static str> {
    tokio::time::sleep(SIMULATED_UPLOAD).await;
    if succeed {
        Ok(())
    } else {
        Err("server unreachable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::ToastConfig;

    fn flags() -> Flags {
        Flags {
            manager: ToastManager::new(ToastConfig::default()).expect("test runs inside a runtime"),
            theme_mode: ThemeMode::Dark,
            position: Position::BottomRight,
            config_warning: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn show_uses_selected_position() {
        let (mut app, _) = App::new(flags());

        let _ = app.update(Message::PositionSelected(Position::TopCenter));
        let _ = app.update(Message::Show(Variant::Success));

        let toasts = app.manager.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].position(), Position::TopCenter);
        assert_eq!(toasts[0].variant(), Variant::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn config_warning_is_shown_at_startup() {
        let mut flags = flags();
        flags.config_warning = Some("bad toml".into());

        let (app, _) = App::new(flags);

        let toasts = app.manager.toasts();
        assert_eq!(toasts[0].variant(), Variant::Warning);
        assert_eq!(toasts[0].description(), Some("bad toml"));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_upload_settles_as_error() {
        let (mut app, _) = App::new(flags());

        let _ = app.update(Message::Promise { succeed: false });
        let id = app.manager.toasts()[0].id();
        assert_eq!(app.manager.get(id).unwrap().variant(), Variant::Loading);

        tokio::time::sleep(SIMULATED_UPLOAD + Duration::from_millis(10)).await;

        let toast = app.manager.get(id).unwrap();
        assert_eq!(toast.variant(), Variant::Error);
        assert_eq!(toast.title(), "Upload failed");
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_all_marks_toasts_exiting() {
        let (mut app, _) = App::new(flags());
        let _ = app.update(Message::Show(Variant::Info));
        let _ = app.update(Message::Show(Variant::Loading));

        let _ = app.update(Message::DismissAll);

        assert!(app.manager.toasts().iter().all(|toast| toast.is_exiting()));
    }
}
