// SPDX-License-Identifier: MPL-2.0
//! `iced_toasts` is a toast notification system for the Iced GUI framework.
//!
//! A [`ToastManager`](ui::notifications::ToastManager) owns the list of
//! active toasts, their auto-dismiss timers and any pending operation bound
//! to them. A [`ToastHost`](ui::notifications::ToastHost) mirrors that list
//! inside an Iced application and renders it grouped by screen anchor.
//!
//! The crate also ships a small demo application (`app`) and the
//! `settings.toml` handling it uses (`config`).

#![doc(html_root_url = "https://docs.rs/iced_toasts/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod ui;
