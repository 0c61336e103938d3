use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One emergency-button activation. Immutable once recorded.
///
/// `day_of_week` (0 = Sunday) and `hour` are always derivable from
/// `pressed_at`; they are stored redundantly so histogram queries never
/// re-parse timestamps. `gap_ms` is `None` iff no prior press exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PressEvent {
    pub id: String,
    pub pressed_at: DateTime<Utc>,
    pub day_of_week: u8,
    pub hour: u8,
    pub user_id: String,
    pub session_id: String,
    pub gap_ms: Option<u64>,
}

impl PressEvent {
    pub fn new(
        pressed_at: DateTime<Utc>,
        user_id: &str,
        session_id: &str,
        gap_ms: Option<u64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pressed_at,
            day_of_week: pressed_at.weekday().num_days_from_sunday() as u8,
            hour: pressed_at.hour() as u8,
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            gap_ms,
        }
    }
}
