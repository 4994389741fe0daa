use super::{
    repository::DayStatusRepository, store::StatusMap, types::DayStatusError, utils::WeekWindow,
};
use crate::{
    api::{DateKey, DayStatusUpsert},
    components::toast::{NoticeKind, Notifier},
    utils::timeout::with_timeout,
};
use chrono::{DateTime, Utc};
use leptos::*;
use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    future::Future,
    rc::Rc,
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleStatus {
    Pending,
    Committed,
    RolledBack,
}

/// One optimistic flip of a day's holiday flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOp {
    pub key: DateKey,
    pub previous: bool,
    pub next: bool,
    pub status: ToggleStatus,
}

impl ToggleOp {
    pub fn record(&self, updated_at: DateTime<Utc>) -> DayStatusUpsert {
        DayStatusUpsert {
            date: self.key,
            is_holiday: self.next,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Caller lacks the admin capability; nothing changed.
    Denied,
    /// A write for this key is still in flight; nothing changed.
    Busy,
    Started(ToggleOp),
}

/// Write epoch observed when a bulk read was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadStamp(u64);

/// Owns the window's [`StatusMap`] and the set of keys with an unsettled write.
///
/// A key accepts at most one in-flight toggle. Further toggles on that key are
/// rejected until the first settles, so a rollback always restores the value
/// that was on screen when the write was issued.
///
/// Every `begin` and `settle` advances a write epoch. A read dispatched before a
/// key's latest epoch may predate that write, so `hydrate` leaves such keys alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleReconciler {
    statuses: StatusMap,
    in_flight: BTreeSet<DateKey>,
    epoch: u64,
    touched: BTreeMap<DateKey, u64>,
    window: Option<WeekWindow>,
}

impl ToggleReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    pub fn is_holiday(&self, key: &DateKey) -> bool {
        self.statuses.is_holiday(key)
    }

    pub fn is_pending(&self, key: &DateKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Capture before dispatching a read; hand it back to [`Self::hydrate`].
    pub fn stamp(&self) -> LoadStamp {
        LoadStamp(self.epoch)
    }

    fn touch(&mut self, key: DateKey) {
        self.epoch += 1;
        self.touched.insert(key, self.epoch);
    }

    fn written_since(&self, key: &DateKey, stamp: LoadStamp) -> bool {
        self.touched
            .get(key)
            .is_some_and(|epoch| *epoch > stamp.0)
    }

    /// Replaces the map with values read for `window`.
    ///
    /// Keys with a write in flight, or written after `stamp` was taken, keep
    /// their current value. In-flight keys outside `window` linger until they settle.
    pub fn hydrate(&mut self, window: &WeekWindow, loaded: StatusMap, stamp: LoadStamp) {
        let mut next = loaded;
        next.restrict_to(window);
        for key in window.keys() {
            if self.written_since(key, stamp) {
                next.set(*key, self.statuses.is_holiday(key));
            }
        }
        for key in &self.in_flight {
            next.set(*key, self.statuses.is_holiday(key));
        }
        let in_flight = &self.in_flight;
        self.touched
            .retain(|key, _| window.contains(key) || in_flight.contains(key));
        self.statuses = next;
        self.window = Some(*window);
    }

    pub fn begin(&mut self, key: DateKey, is_admin: bool) -> ToggleOutcome {
        if !is_admin {
            return ToggleOutcome::Denied;
        }
        if self.in_flight.contains(&key) {
            return ToggleOutcome::Busy;
        }
        let previous = self.statuses.is_holiday(&key);
        let next = !previous;
        self.statuses.set(key, next);
        self.in_flight.insert(key);
        self.touch(key);
        ToggleOutcome::Started(ToggleOp {
            key,
            previous,
            next,
            status: ToggleStatus::Pending,
        })
    }

    pub fn settle(&mut self, mut op: ToggleOp, result: &Result<(), DayStatusError>) -> ToggleOp {
        if op.status != ToggleStatus::Pending || !self.in_flight.remove(&op.key) {
            log::warn!("Ignoring settlement of {} that is not in flight", op.key);
            return op;
        }
        match result {
            Ok(()) => op.status = ToggleStatus::Committed,
            Err(_) => {
                self.statuses.set(op.key, op.previous);
                op.status = ToggleStatus::RolledBack;
            }
        }
        self.touch(op.key);
        if self.window.is_some_and(|window| !window.contains(&op.key)) {
            self.statuses.remove(&op.key);
            self.touched.remove(&op.key);
        }
        op
    }
}

/// Shared, mutable home of a [`ToggleReconciler`].
pub trait ReconcilerCell: Clone + 'static {
    fn with_reconciler<R>(&self, f: impl FnOnce(&mut ToggleReconciler) -> R) -> Option<R>;
}

impl ReconcilerCell for Rc<RefCell<ToggleReconciler>> {
    fn with_reconciler<R>(&self, f: impl FnOnce(&mut ToggleReconciler) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl ReconcilerCell for RwSignal<ToggleReconciler> {
    fn with_reconciler<R>(&self, f: impl FnOnce(&mut ToggleReconciler) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[derive(Clone)]
pub struct ToggleContext {
    pub repository: Rc<dyn DayStatusRepository>,
    pub notifier: Rc<dyn Notifier>,
    pub timeout: Duration,
}

/// Issues exactly one upsert for `op`, bounded by `limit`.
pub async fn persist(
    repository: &dyn DayStatusRepository,
    op: &ToggleOp,
    updated_at: DateTime<Utc>,
    limit: Duration,
) -> Result<(), DayStatusError> {
    match with_timeout(limit, repository.upsert_status(op.record(updated_at))).await {
        Some(Ok(())) => Ok(()),
        Some(Err(source)) => Err(DayStatusError::Persist {
            date: op.key,
            source,
        }),
        None => Err(DayStatusError::Timeout {
            date: op.key,
            after: limit,
        }),
    }
}

/// Applies the flip to `cell` immediately and returns the write still to be driven.
///
/// Returns `None` when the toggle was denied or the key is busy.
pub fn toggle<C: ReconcilerCell>(
    cell: &C,
    ctx: &ToggleContext,
    key: DateKey,
    is_admin: bool,
) -> Option<impl Future<Output = ToggleOp>> {
    let op = match cell.with_reconciler(|reconciler| reconciler.begin(key, is_admin))? {
        ToggleOutcome::Denied => {
            log::debug!("Toggle of {} ignored: admin capability missing", key);
            return None;
        }
        ToggleOutcome::Busy => {
            log::debug!("Toggle of {} ignored: previous write still in flight", key);
            return None;
        }
        ToggleOutcome::Started(op) => op,
    };

    let cell = cell.clone();
    let ctx = ctx.clone();
    Some(async move {
        let result = persist(ctx.repository.as_ref(), &op, Utc::now(), ctx.timeout).await;
        let settled = cell
            .with_reconciler(|reconciler| reconciler.settle(op.clone(), &result))
            .unwrap_or(op);
        match &result {
            Ok(()) => log::info!("Saved {} as holiday={}", settled.key, settled.next),
            Err(err) => {
                log::warn!("Rolled back {}: {}", settled.key, err);
                ctx.notifier.notify(NoticeKind::Error, err.to_string());
            }
        }
        settled
    })
}
