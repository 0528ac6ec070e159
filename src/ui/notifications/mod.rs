// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Toasts appear temporarily to inform users
//! about actions (save success, errors, background work) without blocking
//! interaction.
//!
//! # Components
//!
//! - `notification` - `Toast`, `ToastOptions` and the `Variant`/`Position` enums
//! - `manager` - `ToastManager`, the shared list with timers and subscribers
//! - `host` - `ToastHost`, the overlay grouping toasts by anchor
//! - [`toast`] - Toast widget component for rendering a single toast
//!
//! # Usage
//!
//! ```ignore
//! use iced_toasts::ui::notifications::{ToastConfig, ToastHost, ToastManager, ToastOptions};
//!
//! // Create a manager inside a Tokio runtime
//! let manager = ToastManager::new(ToastConfig::default())?;
//!
//! // Show a toast from anywhere holding a clone
//! manager.show(ToastOptions::success("Image saved").description("photo.png"))?;
//!
//! // Mount a host in your application
//! let host = ToastHost::new(manager.clone());
//! let overlay = host.view().map(Message::Toasts);
//! ```
//!
//! # Lifecycle
//!
//! - A toast is shown, stays active for its duration, then starts exiting
//! - Exiting toasts are removed after the grace period (150 ms by default)
//! - Zero durations keep a toast until it is dismissed
//! - Promise-bound toasts stay loading until their operation settles

mod host;
mod manager;
mod notification;
pub mod toast;

pub use host::{group_by_position, Message as HostMessage, ToastHost};
pub use manager::{ToastConfig, ToastHandle, ToastManager, Unsubscribe};
pub use notification::{
    duration_from_millis, PendingOperation, Position, PromiseMessages, Toast, ToastId,
    ToastOptions, ToastStyle, Variant,
};
