use crate::{
    api::{ApiError, DateKey, DayStatus, DayStatusUpsert},
    components::toast::{NoticeKind, Notifier},
    pages::week_calendar::repository::DayStatusRepository,
};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::{cell::RefCell, collections::VecDeque};

#[derive(Clone)]
enum FetchMode {
    Rows,
    Fail(ApiError),
    Stall,
    Hold,
}

#[derive(Clone)]
enum UpsertMode {
    Succeed,
    Fail(ApiError),
    Hold,
}

/// In-memory day status table. Upserts can be held and released one by one so
/// tests can observe the state between dispatch and settlement.
pub struct FakeDayStatusRepository {
    rows: RefCell<Vec<DayStatus>>,
    fetch_mode: RefCell<FetchMode>,
    upsert_mode: RefCell<UpsertMode>,
    fetch_calls: RefCell<Vec<Vec<DateKey>>>,
    upserts: RefCell<Vec<DayStatusUpsert>>,
    held: RefCell<VecDeque<oneshot::Sender<Result<(), ApiError>>>>,
    held_fetches: RefCell<VecDeque<oneshot::Sender<Result<Vec<DayStatus>, ApiError>>>>,
}

impl FakeDayStatusRepository {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<DayStatus>) -> Self {
        Self {
            rows: RefCell::new(rows),
            fetch_mode: RefCell::new(FetchMode::Rows),
            upsert_mode: RefCell::new(UpsertMode::Succeed),
            fetch_calls: RefCell::new(Vec::new()),
            upserts: RefCell::new(Vec::new()),
            held: RefCell::new(VecDeque::new()),
            held_fetches: RefCell::new(VecDeque::new()),
        }
    }

    pub fn fail_fetch(&self, error: ApiError) {
        *self.fetch_mode.borrow_mut() = FetchMode::Fail(error);
    }

    pub fn stall_fetch(&self) {
        *self.fetch_mode.borrow_mut() = FetchMode::Stall;
    }

    pub fn hold_fetches(&self) {
        *self.fetch_mode.borrow_mut() = FetchMode::Hold;
    }

    /// Answers the most recently dispatched held read.
    pub fn release_newest_fetch(&self, result: Result<Vec<DayStatus>, ApiError>) -> bool {
        let sender = self.held_fetches.borrow_mut().pop_back();
        sender.is_some_and(|sender| sender.send(result).is_ok())
    }

    /// Answers the oldest held read.
    pub fn release_oldest_fetch(&self, result: Result<Vec<DayStatus>, ApiError>) -> bool {
        let sender = self.held_fetches.borrow_mut().pop_front();
        sender.is_some_and(|sender| sender.send(result).is_ok())
    }

    pub fn fail_upserts(&self, error: ApiError) {
        *self.upsert_mode.borrow_mut() = UpsertMode::Fail(error);
    }

    pub fn hold_upserts(&self) {
        *self.upsert_mode.borrow_mut() = UpsertMode::Hold;
    }

    /// Settles the oldest held upsert. Returns false when nothing is waiting.
    pub fn release_next(&self, result: Result<(), ApiError>) -> bool {
        let sender = self.held.borrow_mut().pop_front();
        match sender {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }

    pub fn held_count(&self) -> usize {
        self.held.borrow().len()
    }

    pub fn upserts(&self) -> Vec<DayStatusUpsert> {
        self.upserts.borrow().clone()
    }

    pub fn fetch_calls(&self) -> Vec<Vec<DateKey>> {
        self.fetch_calls.borrow().clone()
    }

    pub fn stored(&self, key: &DateKey) -> Option<bool> {
        self.rows
            .borrow()
            .iter()
            .find(|row| row.date == *key)
            .map(|row| row.is_holiday)
    }

    fn apply(&self, record: &DayStatusUpsert) {
        let mut rows = self.rows.borrow_mut();
        rows.retain(|row| row.date != record.date);
        rows.push(DayStatus {
            date: record.date,
            is_holiday: record.is_holiday,
            updated_at: Some(record.updated_at),
        });
    }
}

#[async_trait(?Send)]
impl DayStatusRepository for FakeDayStatusRepository {
    async fn fetch_statuses(&self, keys: &[DateKey]) -> Result<Vec<DayStatus>, ApiError> {
        self.fetch_calls.borrow_mut().push(keys.to_vec());
        let mode = self.fetch_mode.borrow().clone();
        match mode {
            FetchMode::Rows => Ok(self
                .rows
                .borrow()
                .iter()
                .filter(|row| keys.contains(&row.date))
                .cloned()
                .collect()),
            FetchMode::Fail(error) => Err(error),
            FetchMode::Stall => futures::future::pending().await,
            FetchMode::Hold => {
                let (tx, rx) = oneshot::channel();
                self.held_fetches.borrow_mut().push_back(tx);
                rx.await
                    .unwrap_or_else(|_| Err(ApiError::unknown("held fetch was dropped")))
            }
        }
    }

    async fn upsert_status(&self, record: DayStatusUpsert) -> Result<(), ApiError> {
        self.upserts.borrow_mut().push(record.clone());
        let mode = self.upsert_mode.borrow().clone();
        let result = match mode {
            UpsertMode::Succeed => Ok(()),
            UpsertMode::Fail(error) => Err(error),
            UpsertMode::Hold => {
                let (tx, rx) = oneshot::channel();
                self.held.borrow_mut().push_back(tx);
                rx.await
                    .unwrap_or_else(|_| Err(ApiError::unknown("held upsert was dropped")))
            }
        };
        if result.is_ok() {
            self.apply(&record);
        }
        result
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == NoticeKind::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: String) {
        self.notices.borrow_mut().push((kind, message));
    }
}
