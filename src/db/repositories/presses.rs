use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_day_of_week, parse_hour, to_i64, to_u64},
    models::PressEvent,
};

const PRESS_COLUMNS: &str = "id, pressed_at, day_of_week, hour, user_id, session_id, gap_ms";

fn row_to_press(row: &Row) -> Result<PressEvent> {
    let pressed_at: String = row.get("pressed_at")?;
    let day_of_week: i64 = row.get("day_of_week")?;
    let hour: i64 = row.get("hour")?;
    let gap_ms: Option<i64> = row.get("gap_ms")?;

    Ok(PressEvent {
        id: row.get("id")?,
        pressed_at: parse_datetime(&pressed_at, "pressed_at")?,
        day_of_week: parse_day_of_week(day_of_week)?,
        hour: parse_hour(hour)?,
        user_id: row.get("user_id")?,
        session_id: row.get("session_id")?,
        gap_ms: gap_ms.map(|ms| to_u64(ms, "gap_ms")).transpose()?,
    })
}

impl Database {
    pub async fn insert_press(&self, press: &PressEvent) -> Result<()> {
        let record = press.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO presses (id, pressed_at, day_of_week, hour, user_id, session_id, gap_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.pressed_at.to_rfc3339(),
                    record.day_of_week as i64,
                    record.hour as i64,
                    record.user_id,
                    record.session_id,
                    record.gap_ms.map(to_i64).transpose()?,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Full press history, oldest first.
    pub async fn list_presses(&self) -> Result<Vec<PressEvent>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PRESS_COLUMNS} FROM presses ORDER BY pressed_at ASC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut presses = Vec::new();
            while let Some(row) = rows.next()? {
                presses.push(row_to_press(row)?);
            }

            Ok(presses)
        })
        .await
    }

    /// Most recent press, used to derive the gap for the next one.
    pub async fn latest_press(&self) -> Result<Option<PressEvent>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PRESS_COLUMNS} FROM presses ORDER BY pressed_at DESC LIMIT 1"
            ))?;

            let mut rows = stmt.query([])?;
            let press = match rows.next()? {
                Some(row) => Some(row_to_press(row)?),
                None => None,
            };
            Ok(press)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn temp_database() -> Database {
        let path = std::env::temp_dir().join(format!("refocus-test-{}.sqlite3", Uuid::new_v4()));
        Database::new(path).expect("failed to open test database")
    }

    fn press_at_millis(millis: i64, gap_ms: Option<u64>) -> PressEvent {
        let pressed_at = Utc.timestamp_millis_opt(millis).single().unwrap();
        PressEvent::new(pressed_at, "local-user", "session-1", gap_ms)
    }

    #[tokio::test]
    async fn round_trip_preserves_order_and_fields() {
        let db = temp_database();

        let first = press_at_millis(1_760_000_000_000, None);
        let second = press_at_millis(1_760_000_005_123, Some(5_123));
        let third = press_at_millis(1_760_003_600_000, Some(3_594_877));

        // Insert out of order; listing must sort by pressed_at.
        db.insert_press(&second).await.unwrap();
        db.insert_press(&third).await.unwrap();
        db.insert_press(&first).await.unwrap();

        let history = db.list_presses().await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], first);
        assert_eq!(history[1], second);
        assert_eq!(history[2], third);
    }

    #[tokio::test]
    async fn latest_press_returns_most_recent() {
        let db = temp_database();
        assert!(db.latest_press().await.unwrap().is_none());

        let first = press_at_millis(1_760_000_000_000, None);
        let second = press_at_millis(1_760_000_009_000, Some(9_000));
        db.insert_press(&first).await.unwrap();
        db.insert_press(&second).await.unwrap();

        let latest = db.latest_press().await.unwrap().unwrap();
        assert_eq!(latest, second);
    }

    #[tokio::test]
    async fn empty_history_lists_empty() {
        let db = temp_database();
        assert!(db.list_presses().await.unwrap().is_empty());
    }
}
