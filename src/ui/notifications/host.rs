// SPDX-License-Identifier: MPL-2.0
//! Overlay that renders a manager's toasts grouped by screen anchor.
//!
//! The host mirrors the manager's list through a subscription and owns the
//! removal step of each exiting toast: once a toast is marked exiting, the
//! host schedules a single abortable removal after the grace period. The
//! scheduled task is aborted if the toast disappears first or the host is
//! dropped.

use super::manager::ToastManager;
use super::notification::{Position, Toast, ToastId};
use super::toast;
use crate::ui::design_tokens::spacing;
use crate::ui::theming::ColorScheme;
use futures_util::future::{self, AbortHandle};
use iced::futures::{SinkExt, Stream};
use iced::stream;
use iced::widget::{Column, Container, Stack};
use iced::{Element, Length, Subscription, Task};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc;
use tracing::trace;

/// Messages handled by [`ToastHost::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// A fresh copy of the manager's list.
    Snapshot(Vec<Toast>),
    /// The user pressed a toast's close button.
    Dismiss(ToastId),
    /// The exit grace period of a toast elapsed.
    Remove(ToastId),
}

/// Renders the toasts of one manager.
pub struct ToastHost {
    manager: ToastManager,
    only: Option<Position>,
    scheme: ColorScheme,
    toasts: Vec<Toast>,
    removals: HashMap<ToastId, PendingRemoval>,
}

/// Aborts a scheduled removal when dropped.
struct PendingRemoval(AbortHandle);

impl Drop for PendingRemoval {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl fmt::Debug for ToastHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastHost")
            .field("manager", &self.manager)
            .field("only", &self.only)
            .field("toasts", &self.toasts.len())
            .field("pending_removals", &self.removals.len())
            .finish()
    }
}

impl ToastHost {
    /// Creates a host showing every anchor, seeded with the manager's
    /// current list.
    #[must_use]
    pub fn new(manager: ToastManager) -> Self {
        let toasts = manager.toasts();
        Self {
            manager,
            only: None,
            scheme: ColorScheme::default(),
            toasts,
            removals: HashMap::new(),
        }
    }

    /// Restricts rendering to a single anchor.
    #[must_use]
    pub fn only(mut self, position: Position) -> Self {
        self.only = Some(position);
        self
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    #[must_use]
    pub fn manager(&self) -> &ToastManager {
        &self.manager
    }

    /// The list as last delivered by the manager.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Number of exiting toasts with a removal still scheduled.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// Streams the manager's list into the host, starting with the current
    /// one.
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::run_with(SnapshotFeed(self.manager.clone()), |feed| {
            snapshots(feed.0.clone())
        })
        .map(Message::Snapshot)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Snapshot(toasts) => self.apply_snapshot(toasts),
            Message::Dismiss(id) => {
                self.manager.dismiss(Some(id));
                Task::none()
            }
            Message::Remove(id) => {
                if self.removals.remove(&id).is_some() {
                    self.manager.remove(id);
                } else {
                    trace!(%id, "removal no longer pending");
                }
                Task::none()
            }
        }
    }

    /// Toasts grouped by anchor, skipping empty anchors and any filtered
    /// out by [`only`](Self::only).
    #[must_use]
    pub fn groups(&self) -> Vec<(Position, Vec<&Toast>)> {
        group_by_position(&self.toasts, self.only)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let layers: Vec<Element<'_, Message>> = self
            .groups()
            .into_iter()
            .map(|(position, toasts)| {
                let items: Vec<Element<'_, Message>> = toasts
                    .into_iter()
                    .map(|toast| toast::view(toast, &self.scheme))
                    .collect();

                Container::new(
                    Column::with_children(items)
                        .spacing(spacing::XS)
                        .align_x(position.horizontal()),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(position.horizontal())
                .align_y(position.vertical())
                .padding(spacing::MD)
                .into()
            })
            .collect();

        if layers.is_empty() {
            return Container::new(Column::new())
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn apply_snapshot(&mut self, toasts: Vec<Toast>) -> Task<Message> {
        // Dropping a handle aborts its task.
        self.removals.retain(|id, _| {
            toasts
                .iter()
                .any(|toast| toast.id() == *id && toast.is_exiting())
        });

        let newly_exiting: Vec<ToastId> = toasts
            .iter()
            .filter(|toast| toast.is_exiting() && !self.removals.contains_key(&toast.id()))
            .map(Toast::id)
            .collect();

        let grace = self.manager.config().grace_period;
        let mut tasks = Vec::with_capacity(newly_exiting.len());
        for id in newly_exiting {
            let (delay, abort) =
                future::abortable(async move { tokio::time::sleep(grace).await });
            let removal = Task::future(async move { delay.await.ok() })
                .and_then(move |()| Task::done(Message::Remove(id)));
            self.removals.insert(id, PendingRemoval(abort));
            tasks.push(removal);
        }

        self.toasts = toasts;
        Task::batch(tasks)
    }
}

/// Groups `toasts` by anchor in [`Position::ALL`] order, keeping insertion
/// order within each anchor.
#[must_use]
pub fn group_by_position(toasts: &[Toast], only: Option<Position>) -> Vec<(Position, Vec<&Toast>)> {
    Position::ALL
        .into_iter()
        .filter(|position| only.is_none_or(|only| only == *position))
        .filter_map(|position| {
            let group: Vec<&Toast> = toasts
                .iter()
                .filter(|toast| toast.position() == position)
                .collect();
            (!group.is_empty()).then_some((position, group))
        })
        .collect()
}

/// Subscription identity: one feed per manager.
#[derive(Hash)]
struct SnapshotFeed(ToastManager);

/// Every list the manager commits, starting with the current one. The
/// listener stays registered for as long as the stream is alive.
fn snapshots(manager: ToastManager) -> impl Stream<Item = Vec<Toast>> {
    stream::channel(16, move |mut output: iced::futures::channel::mpsc::Sender<Vec<Toast>>| async move {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _listener = manager.watch(move |toasts| {
            // The receiver only goes away with the stream.
            let _ = sender.send(toasts.to_vec());
        });

        while let Some(snapshot) = receiver.recv().await {
            if output.send(snapshot).await.is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
impl ToastHost {
    fn removal_handle(&self, id: ToastId) -> Option<AbortHandle> {
        self.removals.get(&id).map(|removal| removal.0.clone())
    }
}
