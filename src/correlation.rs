use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One day of design-tool activity, for correlating press spikes with what
/// the user was building that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignActivity {
    pub date: NaiveDate,
    pub boards_created: u32,
    pub minutes_spent: u32,
    pub collaborators: u32,
}

/// Stub for the external correlation hook. A real integration would query
/// the design tool's activity API for the given date; until then this
/// returns randomized placeholder values and performs no network call.
pub fn design_activity_for(date: NaiveDate) -> DesignActivity {
    let mut rng = rand::thread_rng();

    DesignActivity {
        date,
        boards_created: rng.gen_range(0..5),
        minutes_spent: rng.gen_range(0..120),
        collaborators: rng.gen_range(0..3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_values_stay_in_range() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
        for _ in 0..50 {
            let activity = design_activity_for(date);
            assert_eq!(activity.date, date);
            assert!(activity.boards_created < 5);
            assert!(activity.minutes_spent < 120);
            assert!(activity.collaborators < 3);
        }
    }
}
