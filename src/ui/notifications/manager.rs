// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `ToastManager` owns the ordered list of active toasts, drives their
//! timed lifecycle (`active` → `exiting` → removed) on a Tokio runtime and
//! pushes a snapshot of the list to every subscriber after each change.
//!
//! The manager is a cheap, cloneable handle. Build one at startup and pass it
//! to whatever needs to raise toasts; every clone shares the same list.

use super::notification::{
    Extras, PromiseMessages, Position, Toast, ToastId, ToastOptions, Variant,
};
use crate::config::defaults;
use crate::error::{Error, Result};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

/// Runtime settings for a manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastConfig {
    /// Anchor used when options do not name one.
    pub position: Position,
    /// Delay between marking a toast exiting and purging it.
    pub grace_period: Duration,
    /// Whether toasts offer a close button unless options say otherwise.
    pub dismissible: bool,
    pub success_duration: Duration,
    pub error_duration: Duration,
    pub warning_duration: Duration,
    pub info_duration: Duration,
    pub loading_duration: Duration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            position: Position::default(),
            grace_period: Duration::from_millis(defaults::DEFAULT_GRACE_PERIOD_MS),
            dismissible: true,
            success_duration: Duration::from_millis(defaults::DEFAULT_SUCCESS_MS),
            error_duration: Duration::from_millis(defaults::DEFAULT_ERROR_MS),
            warning_duration: Duration::from_millis(defaults::DEFAULT_WARNING_MS),
            info_duration: Duration::from_millis(defaults::DEFAULT_INFO_MS),
            loading_duration: Duration::from_millis(defaults::DEFAULT_LOADING_MS),
        }
    }
}

impl ToastConfig {
    /// Returns the auto-dismiss delay used when options leave it unset.
    #[must_use]
    pub fn default_duration(&self, variant: Variant) -> Duration {
        match variant {
            Variant::Success => self.success_duration,
            Variant::Error => self.error_duration,
            Variant::Warning => self.warning_duration,
            Variant::Info => self.info_duration,
            Variant::Loading => self.loading_duration,
        }
    }
}

type Listener = dyn Fn(&[Toast]) + Send + Sync;

/// One committed state, addressed to the listeners registered at commit time.
struct Delivery {
    snapshot: Arc<[Toast]>,
    listeners: Vec<Weak<Listener>>,
}

impl Delivery {
    fn deliver(self) {
        let snapshot: &[Toast] = &self.snapshot;
        for listener in self.listeners.iter().filter_map(Weak::upgrade) {
            if std::panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot))).is_err() {
                warn!("toast listener panicked; continuing with remaining listeners");
            }
        }
    }
}

#[derive(Default)]
struct State {
    toasts: Vec<Toast>,
    listeners: Vec<Weak<Listener>>,
    next_id: u64,
    /// Commits waiting to be handed to listeners, oldest first.
    outbox: VecDeque<Delivery>,
    /// Set while some caller is draining `outbox`.
    dispatching: bool,
}

struct Shared {
    state: Mutex<State>,
    config: ToastConfig,
    runtime: Handle,
    instance: u64,
}

/// Handle to a shared list of toasts.
#[derive(Clone)]
pub struct ToastManager {
    shared: Arc<Shared>,
}

impl fmt::Debug for ToastManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastManager")
            .field("instance", &self.shared.instance)
            .field("toasts", &self.len())
            .finish()
    }
}

impl PartialEq for ToastManager {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for ToastManager {}

impl Hash for ToastManager {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shared.instance.hash(state);
    }
}

/// Returned by [`ToastManager::show`].
#[derive(Debug)]
pub struct ToastHandle {
    id: ToastId,
    settled: Option<oneshot::Receiver<()>>,
}

impl ToastHandle {
    /// Identity of the shown toast.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Whether the toast follows a pending operation.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.settled.is_some()
    }

    /// Resolves to the toast id once its pending operation has settled, or
    /// at once for toasts without one.
    pub async fn settled(self) -> ToastId {
        if let Some(settled) = self.settled {
            // A dropped sender means the runtime shut down; nothing left to wait for.
            let _ = settled.await;
        }
        self.id
    }
}

/// Keeps a listener registered. Dropping it, or calling
/// [`unsubscribe`](Self::unsubscribe), stops further deliveries.
#[must_use = "dropping the guard unsubscribes the listener"]
pub struct Unsubscribe {
    _listener: Arc<Listener>,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {}
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").finish_non_exhaustive()
    }
}

impl ToastManager {
    /// Creates a manager on the Tokio runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a runtime context.
    pub fn new(config: ToastConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|err| Error::NoRuntime(err.to_string()))?;
        Ok(Self::with_runtime(config, runtime))
    }

    /// Creates a manager whose timers and pending operations run on `runtime`.
    pub fn with_runtime(config: ToastConfig, runtime: Handle) -> Self {
        static INSTANCES: AtomicU64 = AtomicU64::new(0);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                config,
                runtime,
                instance: INSTANCES.fetch_add(1, Ordering::Relaxed),
            }),
        }
    }

    /// Settings the manager was built with.
    #[must_use]
    pub fn config(&self) -> &ToastConfig {
        &self.shared.config
    }

    /// Shows a toast and notifies subscribers.
    ///
    /// With a pending operation attached, the toast starts as
    /// [`Variant::Loading`] and is updated in place once the operation
    /// settles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTitle`] if no usable title was supplied.
    ///
    /// Once a bound operation settles, the auto-dismiss timer restarts with
    /// the duration set on `options`, or the settled variant's default when
    /// none was set.
    pub fn show(&self, options: ToastOptions) -> Result<ToastHandle> {
        let ToastOptions {
            title,
            description,
            variant,
            position,
            duration,
            dismissible,
            icon,
            class_name,
            style,
            pending,
        } = options;

        let (title, variant, pending) = match pending {
            Some(operation) => {
                let (future, messages) = operation.into_parts();
                let title = if messages.loading.trim().is_empty() {
                    title
                } else {
                    messages.loading.clone()
                };
                (title, Variant::Loading, Some((future, messages)))
            }
            None => (title, variant, None),
        };
        if title.trim().is_empty() {
            return Err(Error::MissingTitle);
        }

        let config = &self.shared.config;
        let initial_duration = if pending.is_some() {
            Duration::ZERO
        } else {
            duration.unwrap_or_else(|| config.default_duration(variant))
        };
        let position = position.unwrap_or(config.position);
        let extras = Extras {
            description,
            dismissible: dismissible.unwrap_or(config.dismissible),
            icon,
            class_name,
            style,
        };

        let (id, epoch) = {
            let mut state = self.lock();
            state.next_id += 1;
            let id = ToastId::from_raw(state.next_id);
            let mut toast = Toast::new(id, title, variant, position, initial_duration);
            toast.apply_extras(extras);
            let epoch = toast.epoch();
            state.toasts.push(toast);
            self.enqueue(&mut state);
            (id, epoch)
        };
        self.flush();
        debug!(%id, %variant, %position, "toast shown");

        if !initial_duration.is_zero() {
            self.schedule_expiry(id, epoch, initial_duration);
        }

        let settled = pending.map(|(future, messages)| self.bind(id, future, messages, duration));
        Ok(ToastHandle { id, settled })
    }

    /// Shows a success toast with default options.
    pub fn success(&self, title: impl Into<String>) -> Result<ToastHandle> {
        self.show(ToastOptions::success(title))
    }

    /// Shows an error toast with default options.
    pub fn error(&self, title: impl Into<String>) -> Result<ToastHandle> {
        self.show(ToastOptions::error(title))
    }

    /// Shows a warning toast with default options.
    pub fn warning(&self, title: impl Into<String>) -> Result<ToastHandle> {
        self.show(ToastOptions::warning(title))
    }

    /// Shows an info toast with default options.
    pub fn info(&self, title: impl Into<String>) -> Result<ToastHandle> {
        self.show(ToastOptions::info(title))
    }

    /// Marks a toast as exiting and schedules its removal after the grace
    /// period. Unknown or already exiting toasts are left alone.
    pub fn start_dismiss(&self, id: ToastId) {
        self.begin_exit(id, |_| true);
    }

    /// Starts dismissing `id`, or every active toast when `None`.
    pub fn dismiss(&self, id: Option<ToastId>) {
        match id {
            Some(id) => self.start_dismiss(id),
            None => {
                let active: Vec<ToastId> = self
                    .lock()
                    .toasts
                    .iter()
                    .filter(|toast| !toast.is_exiting())
                    .map(Toast::id)
                    .collect();
                for id in active {
                    self.start_dismiss(id);
                }
            }
        }
    }

    /// Starts dismissing every active toast.
    pub fn dismiss_all(&self) {
        self.dismiss(None);
    }

    /// Deletes a toast immediately, skipping the exit phase.
    pub fn remove(&self, id: ToastId) {
        let removed = {
            let mut state = self.lock();
            let before = state.toasts.len();
            state.toasts.retain(|toast| toast.id() != id);
            let removed = state.toasts.len() < before;
            if removed {
                self.enqueue(&mut state);
            }
            removed
        };
        if removed {
            self.flush();
            debug!(%id, "toast removed");
        }
    }

    /// Registers a listener called with the full list after every change.
    ///
    /// Listeners run outside the manager's lock and may call back into it.
    /// Delivery happens before the mutating call returns unless another
    /// thread is already dispatching; that thread then delivers it, still in
    /// commit order.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        let listener: Arc<Listener> = Arc::new(listener);
        self.lock().listeners.push(Arc::downgrade(&listener));
        Unsubscribe {
            _listener: listener,
        }
    }

    /// Like [`subscribe`](Self::subscribe), but first hands the listener the
    /// current list, ordered before any later change.
    pub fn watch<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        let listener: Arc<Listener> = Arc::new(listener);
        {
            let mut state = self.lock();
            state.listeners.push(Arc::downgrade(&listener));
            let snapshot: Arc<[Toast]> = state.toasts.clone().into();
            state.outbox.push_back(Delivery {
                snapshot,
                listeners: vec![Arc::downgrade(&listener)],
            });
        }
        self.flush();
        Unsubscribe {
            _listener: listener,
        }
    }

    /// Returns a snapshot of the active toasts in insertion order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    /// Returns a copy of the toast with `id`, if it is still active.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<Toast> {
        self.lock().toasts.iter().find(|toast| toast.id() == id).cloned()
    }

    /// Number of active toasts, exiting ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    /// Whether no toast is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().toasts.is_empty()
    }

    /// Number of listeners still registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock()
            .listeners
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues the current list for every live listener. Callers must
    /// [`flush`](Self::flush) once the lock is released.
    fn enqueue(&self, state: &mut State) {
        state.listeners.retain(|listener| listener.strong_count() > 0);
        let snapshot: Arc<[Toast]> = state.toasts.clone().into();
        let listeners = state.listeners.clone();
        state.outbox.push_back(Delivery {
            snapshot,
            listeners,
        });
    }

    /// Delivers queued commits in order. Only one caller drains at a time;
    /// commits made meanwhile, including re-entrant ones from listeners,
    /// are picked up by that caller.
    fn flush(&self) {
        let mut state = self.lock();
        if state.dispatching {
            return;
        }
        state.dispatching = true;
        loop {
            let Some(delivery) = state.outbox.pop_front() else {
                break;
            };
            drop(state);
            delivery.deliver();
            state = self.lock();
        }
        state.dispatching = false;
    }

    /// Moves `id` to the exiting state if `accept` agrees, then schedules
    /// its removal.
    fn begin_exit(&self, id: ToastId, accept: impl FnOnce(&Toast) -> bool) -> bool {
        {
            let mut state = self.lock();
            let Some(toast) = state.toasts.iter_mut().find(|toast| toast.id() == id) else {
                return false;
            };
            if toast.is_exiting() || !accept(toast) {
                return false;
            }
            toast.mark_exiting();
            self.enqueue(&mut state);
        }
        self.flush();
        debug!(%id, "toast exiting");
        self.schedule_removal(id);
        true
    }

    /// A timer only acts on the epoch it was scheduled under. Loading toasts
    /// start without a timer and settle once, so at most one timer per toast
    /// is live; the epoch keeps that true if a timer is ever restarted.
    fn schedule_expiry(&self, id: ToastId, epoch: u64, delay: Duration) {
        let shared = Arc::downgrade(&self.shared);
        self.shared.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let manager = ToastManager { shared };
            if !manager.begin_exit(id, |toast| toast.epoch() == epoch) {
                trace!(%id, epoch, "stale auto-dismiss timer ignored");
            }
        });
    }

    fn schedule_removal(&self, id: ToastId) {
        let shared = Arc::downgrade(&self.shared);
        let grace = self.shared.config.grace_period;
        self.shared.runtime.spawn(async move {
            tokio::time::sleep(grace).await;
            if let Some(shared) = shared.upgrade() {
                ToastManager { shared }.remove(id);
            }
        });
    }

    /// Spawns the pending operation and wires its outcome back into `id`.
    fn bind(
        &self,
        id: ToastId,
        future: BoxFuture<'static, std::result::Result<(), String>>,
        messages: PromiseMessages,
        explicit_duration: Option<Duration>,
    ) -> oneshot::Receiver<()> {
        let (done, settled) = oneshot::channel();
        let shared = Arc::downgrade(&self.shared);
        self.shared.runtime.spawn(async move {
            let outcome = AssertUnwindSafe(future)
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err("pending operation panicked".to_string()));
            if let Some(shared) = shared.upgrade() {
                ToastManager { shared }.settle(id, outcome, messages, explicit_duration);
            }
            let _ = done.send(());
        });
        settled
    }

    fn settle(
        &self,
        id: ToastId,
        outcome: std::result::Result<(), String>,
        messages: PromiseMessages,
        explicit_duration: Option<Duration>,
    ) {
        let (variant, title) = match outcome {
            Ok(()) => (Variant::Success, messages.success),
            Err(reason) => {
                debug!(%id, %reason, "pending operation failed");
                (Variant::Error, messages.error)
            }
        };
        let duration =
            explicit_duration.unwrap_or_else(|| self.shared.config.default_duration(variant));

        let epoch = {
            let mut state = self.lock();
            let Some(toast) = state
                .toasts
                .iter_mut()
                .find(|toast| toast.id() == id)
                .filter(|toast| !toast.is_exiting())
            else {
                trace!(%id, "pending operation settled after dismissal");
                return;
            };
            toast.settle(variant, title, duration);
            let epoch = toast.epoch();
            self.enqueue(&mut state);
            epoch
        };
        self.flush();
        debug!(%id, %variant, "toast settled");

        if !duration.is_zero() {
            self.schedule_expiry(id, epoch, duration);
        }
    }
}
