use serde::{Deserialize, Serialize};

use crate::analysis::report::PatternReport;

/// Busiest and quietest weekday pulled out of a report for the analytics
/// view. Ties resolve to the earliest day of the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsight {
    pub busiest_day: u8,
    pub busiest_count: u32,
    pub quietest_day: u8,
    pub quietest_count: u32,
}

pub fn weekday_insight(report: &PatternReport) -> PatternInsight {
    let mut busiest = &report.weekly[0];
    let mut quietest = &report.weekly[0];

    for bucket in &report.weekly[1..] {
        if bucket.count > busiest.count {
            busiest = bucket;
        }
        if bucket.count < quietest.count {
            quietest = bucket;
        }
    }

    PatternInsight {
        busiest_day: busiest.day_of_week,
        busiest_count: busiest.count,
        quietest_day: quietest.day_of_week,
        quietest_count: quietest.count,
    }
}
