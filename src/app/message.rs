// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::ui::notifications::{HostMessage, Position, ToastManager, Variant};
use crate::ui::theming::ThemeMode;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a sample toast of the given variant.
    Show(Variant),
    /// Show a loading toast bound to simulated work that succeeds or fails.
    Promise { succeed: bool },
    DismissAll,
    PositionSelected(Position),
    Toasts(HostMessage),
}

/// Runtime flags passed in from `main.rs`.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Manager shared between the application and its toast host.
    pub manager: ToastManager,
    pub theme_mode: ThemeMode,
    /// Anchor preselected in the position picker.
    pub position: Position,
    /// Problem found while loading `settings.toml`, shown as a warning toast.
    pub config_warning: Option<String>,
}
