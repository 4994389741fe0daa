use crate::api::{ApiClient, ApiError, DateKey, DayStatus, DayStatusUpsert};
use async_trait::async_trait;
use std::rc::Rc;

/// Remote access used by the week calendar: one bulk read, one upsert per toggle.
#[async_trait(?Send)]
pub trait DayStatusRepository {
    async fn fetch_statuses(&self, keys: &[DateKey]) -> Result<Vec<DayStatus>, ApiError>;

    async fn upsert_status(&self, record: DayStatusUpsert) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct WeekCalendarRepository {
    client: Rc<ApiClient>,
}

impl Default for WeekCalendarRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekCalendarRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl DayStatusRepository for WeekCalendarRepository {
    async fn fetch_statuses(&self, keys: &[DateKey]) -> Result<Vec<DayStatus>, ApiError> {
        self.client.list_day_statuses(keys).await
    }

    async fn upsert_status(&self, record: DayStatusUpsert) -> Result<(), ApiError> {
        self.client.upsert_day_status(&record).await
    }
}
