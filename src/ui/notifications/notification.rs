// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record owned by the manager, the
//! `ToastOptions` builder callers hand to [`show`](super::ToastManager::show),
//! and the small enums (`Variant`, `Position`) that drive styling and layout.

use crate::error::Error;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Unique identifier for a toast.
///
/// Identifiers are issued by a manager from a monotonically increasing
/// counter, so no two toasts alive in the same manager ever share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Semantic category of a toast. Determines default icon, colour and
/// auto-dismiss duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Success,
    Error,
    Warning,
    #[default]
    Info,
    /// Bound to a pending operation; never auto-dismisses on its own.
    Loading,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Success,
        Variant::Error,
        Variant::Warning,
        Variant::Info,
        Variant::Loading,
    ];

    /// Returns the default icon glyph.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Variant::Success => "\u{2714}",
            Variant::Error => "\u{2716}",
            Variant::Warning => "\u{26A0}",
            Variant::Info => "\u{2139}",
            Variant::Loading => "\u{231B}",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Warning => "warning",
            Variant::Info => "info",
            Variant::Loading => "loading",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| Error::InvalidVariant(s.to_string()))
    }
}

/// Screen anchor a toast is grouped and stacked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    /// All anchors, in the order the host lays them out.
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }

    #[must_use]
    pub fn horizontal(self) -> iced::alignment::Horizontal {
        use iced::alignment::Horizontal;
        match self {
            Position::TopLeft | Position::BottomLeft => Horizontal::Left,
            Position::TopCenter | Position::BottomCenter => Horizontal::Center,
            Position::TopRight | Position::BottomRight => Horizontal::Right,
        }
    }

    #[must_use]
    pub fn vertical(self) -> iced::alignment::Vertical {
        if self.is_top() {
            iced::alignment::Vertical::Top
        } else {
            iced::alignment::Vertical::Bottom
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| Error::InvalidPosition(s.to_string()))
    }
}

/// Visual overrides carried through to the toast widget untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToastStyle {
    /// Border and icon colour; replaces the variant colour.
    pub accent: Option<Color>,
    pub background: Option<Color>,
    pub text: Option<Color>,
    /// Fixed card width in logical pixels.
    pub width: Option<f32>,
}

/// A toast currently held by a manager.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    title: String,
    description: Option<String>,
    variant: Variant,
    position: Position,
    duration: Duration,
    dismissible: bool,
    created_at: Instant,
    is_exiting: bool,
    icon: Option<String>,
    class_name: Option<String>,
    style: Option<ToastStyle>,
    /// Bumped whenever the auto-dismiss timer is restarted; timers scheduled
    /// under an older epoch are ignored.
    epoch: u64,
}

impl Toast {
    pub(crate) fn new(
        id: ToastId,
        title: String,
        variant: Variant,
        position: Position,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            title,
            description: None,
            variant,
            position,
            duration,
            dismissible: true,
            created_at: Instant::now(),
            is_exiting: false,
            icon: None,
            class_name: None,
            style: None,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Zero means the toast stays until dismissed.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the auto-dismiss delay, or `None` for persistent toasts.
    #[must_use]
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        (!self.duration.is_zero()).then_some(self.duration)
    }

    #[must_use]
    pub fn is_dismissible(&self) -> bool {
        self.dismissible
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    #[must_use]
    pub fn style(&self) -> Option<&ToastStyle> {
        self.style.as_ref()
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn mark_exiting(&mut self) {
        self.is_exiting = true;
    }

    /// Moves the toast into a new variant with a new title and restarts its
    /// timer epoch.
    pub(crate) fn settle(&mut self, variant: Variant, title: String, duration: Duration) {
        self.variant = variant;
        self.title = title;
        self.duration = duration;
        self.epoch += 1;
    }

    pub(crate) fn apply_extras(&mut self, extras: Extras) {
        self.description = extras.description;
        self.dismissible = extras.dismissible;
        self.icon = extras.icon;
        self.class_name = extras.class_name;
        self.style = extras.style;
    }
}

/// Optional presentation fields copied from options onto a toast.
pub(crate) struct Extras {
    pub description: Option<String>,
    pub dismissible: bool,
    pub icon: Option<String>,
    pub class_name: Option<String>,
    pub style: Option<ToastStyle>,
}

/// Messages shown across the lifetime of a promise-bound toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromiseMessages {
    pub loading: String,
    pub success: String,
    pub error: String,
}

impl PromiseMessages {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// An asynchronous operation whose outcome drives a toast.
pub struct PendingOperation {
    future: BoxFuture<'static, Result<(), String>>,
    messages: PromiseMessages,
}

impl PendingOperation {
    /// Binds `future` to a toast. Only the outcome matters: the success value
    /// is discarded and the error is logged.
    pub fn new<F, T, E>(future: F, messages: PromiseMessages) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display,
    {
        Self {
            future: future
                .map(|outcome| outcome.map(|_| ()).map_err(|err| err.to_string()))
                .boxed(),
            messages,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &PromiseMessages {
        &self.messages
    }

    pub(crate) fn into_parts(self) -> (BoxFuture<'static, Result<(), String>>, PromiseMessages) {
        (self.future, self.messages)
    }
}

impl fmt::Debug for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingOperation")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

/// Everything a caller can say about a toast before it is shown.
#[derive(Debug)]
pub struct ToastOptions {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) variant: Variant,
    pub(crate) position: Option<Position>,
    pub(crate) duration: Option<Duration>,
    pub(crate) dismissible: Option<bool>,
    pub(crate) icon: Option<String>,
    pub(crate) class_name: Option<String>,
    pub(crate) style: Option<ToastStyle>,
    pub(crate) pending: Option<PendingOperation>,
}

impl ToastOptions {
    pub fn new(variant: Variant, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant,
            position: None,
            duration: None,
            dismissible: None,
            icon: None,
            class_name: None,
            style: None,
            pending: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Variant::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Variant::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Variant::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Variant::Info, title)
    }

    pub fn loading(title: impl Into<String>) -> Self {
        Self::new(Variant::Loading, title)
    }

    /// Options for a toast that follows `operation` from loading to
    /// success or error. The title comes from the operation's messages.
    pub fn promise(operation: PendingOperation) -> Self {
        let mut options = Self::new(Variant::Loading, operation.messages.loading.clone());
        options.pending = Some(operation);
        options
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the auto-dismiss delay. `Duration::ZERO` keeps the toast until
    /// it is dismissed.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Millisecond form of [`duration`](Self::duration); zero or negative
    /// values mean "never auto-dismiss".
    #[must_use]
    pub fn duration_ms(self, millis: i64) -> Self {
        self.duration(duration_from_millis(millis))
    }

    /// Keeps the toast until it is dismissed.
    #[must_use]
    pub fn persistent(self) -> Self {
        self.duration(Duration::ZERO)
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn style(mut self, style: ToastStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Attaches a pending operation to otherwise ordinary options. The
    /// toast is shown as loading regardless of the variant set here.
    #[must_use]
    pub fn with_promise(mut self, operation: PendingOperation) -> Self {
        self.pending = Some(operation);
        self
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn has_promise(&self) -> bool {
        self.pending.is_some()
    }
}

/// Converts signed milliseconds into a duration, clamping negatives to zero.
#[must_use]
pub fn duration_from_millis(millis: i64) -> Duration {
    u64::try_from(millis)
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO)
}
