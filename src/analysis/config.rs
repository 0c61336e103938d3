/// Tunable thresholds for press-pattern classification.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// A gap shorter than this counts as a rapid re-press.
    pub short_gap_ms: u64,

    /// More than this many rapid re-presses classifies as Excessive.
    pub short_gap_limit: usize,

    /// A weekly bucket exceeding this classifies as Obsessive.
    pub weekly_peak_limit: u32,

    /// When set, classification only considers presses within this many
    /// seconds of now. `None` means classification uses full history,
    /// which is the authoritative default; histograms and summary stats
    /// always cover full history either way.
    pub recent_window_secs: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            short_gap_ms: 15_000,
            short_gap_limit: 3,
            weekly_peak_limit: 5,
            recent_window_secs: None,
        }
    }
}
