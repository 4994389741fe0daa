use crate::api::{ApiError, DateKey};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DayStatusError {
    #[error("休日設定を読み込めませんでした: {0}")]
    Load(ApiError),
    #[error("{date} の休日設定を保存できませんでした: {source}")]
    Persist { date: DateKey, source: ApiError },
    #[error("{date} の休日設定の保存がタイムアウトしました ({}秒)", .after.as_secs())]
    Timeout { date: DateKey, after: Duration },
}

impl DayStatusError {
    pub fn code(&self) -> &str {
        match self {
            Self::Load(err) => &err.code,
            Self::Persist { source, .. } => &source.code,
            Self::Timeout { .. } => "TIMEOUT",
        }
    }
}
