use super::{repository::DayStatusRepository, types::DayStatusError, utils::WeekWindow};
use crate::{
    api::{ApiError, DateKey, DayStatus},
    utils::timeout::with_timeout,
};
use std::{collections::BTreeMap, time::Duration};

/// Holiday flags for the visible window. Missing entries read as working days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    entries: BTreeMap<DateKey, bool>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = DayStatus>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| (record.date, record.is_holiday))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &DateKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    pub fn is_holiday(&self, key: &DateKey) -> bool {
        self.get(key).unwrap_or(false)
    }

    pub fn set(&mut self, key: DateKey, is_holiday: bool) {
        self.entries.insert(key, is_holiday);
    }

    pub fn holiday_count(&self, keys: &[DateKey]) -> usize {
        keys.iter().filter(|key| self.is_holiday(key)).count()
    }

    pub fn remove(&mut self, key: &DateKey) {
        self.entries.remove(key);
    }

    /// Drops every entry whose key is outside `window`.
    pub fn restrict_to(&mut self, window: &WeekWindow) {
        self.entries.retain(|key, _| window.contains(key));
    }
}

/// Single bulk read for the window, bounded by `limit`.
pub async fn load_statuses(
    repository: &dyn DayStatusRepository,
    window: &WeekWindow,
    limit: Duration,
) -> Result<StatusMap, DayStatusError> {
    log::debug!(
        "Loading day statuses for {} .. {}",
        window.first(),
        window.last()
    );
    match with_timeout(limit, repository.fetch_statuses(window.keys())).await {
        Some(Ok(records)) => {
            let mut statuses = StatusMap::from_records(records);
            statuses.restrict_to(window);
            Ok(statuses)
        }
        Some(Err(err)) => Err(DayStatusError::Load(err)),
        None => Err(DayStatusError::Load(ApiError::timeout(format!(
            "{}秒以内に応答がありませんでした。",
            limit.as_secs()
        )))),
    }
}
