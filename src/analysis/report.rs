use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    Normal,
    Excessive,
    Obsessive,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Normal => "normal",
            PatternKind::Excessive => "excessive",
            PatternKind::Obsessive => "obsessive",
        }
    }
}

impl Default for PatternKind {
    fn default() -> Self {
        PatternKind::Normal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub day_of_week: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    pub hour: u8,
    pub count: u32,
}

/// Derived aggregate over the full press history. Recomputed from scratch
/// on every change; owns no state of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    /// Always exactly 7 buckets, zero-filled.
    pub weekly: Vec<DayBucket>,
    /// Always exactly 24 buckets, zero-filled.
    pub hourly: Vec<HourBucket>,
    pub classification: PatternKind,
    pub total_presses: usize,
    pub average_gap_ms: f64,
}

impl PatternReport {
    pub fn empty() -> Self {
        Self {
            weekly: (0..7).map(|d| DayBucket { day_of_week: d, count: 0 }).collect(),
            hourly: (0..24).map(|h| HourBucket { hour: h, count: 0 }).collect(),
            classification: PatternKind::Normal,
            total_presses: 0,
            average_gap_ms: 0.0,
        }
    }
}
