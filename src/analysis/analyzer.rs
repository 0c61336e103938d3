use chrono::{Duration, Utc};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::report::{PatternKind, PatternReport};
use crate::db::models::PressEvent;

/// Main analysis function: transforms the ordered press history into a
/// pattern report. Pure except for the clock read when a recent window
/// is configured.
pub fn analyze(presses: &[PressEvent], config: &AnalysisConfig) -> PatternReport {
    let mut report = PatternReport::empty();
    report.total_presses = presses.len();

    // day_of_week and hour are range-checked when rows are read back, so
    // direct indexing is safe here.
    for press in presses {
        report.weekly[press.day_of_week as usize].count += 1;
        report.hourly[press.hour as usize].count += 1;
    }

    let gaps: Vec<u64> = presses.iter().filter_map(|press| press.gap_ms).collect();
    report.average_gap_ms = if gaps.is_empty() {
        0.0
    } else {
        gaps.iter().sum::<u64>() as f64 / gaps.len() as f64
    };

    report.classification = classify(presses, config);

    report
}

/// The single authoritative classification rule. First match wins:
/// Excessive, then Obsessive, then Normal.
fn classify(presses: &[PressEvent], config: &AnalysisConfig) -> PatternKind {
    let cutoff = config
        .recent_window_secs
        .map(|secs| Utc::now() - Duration::seconds(secs.min(i64::MAX as u64) as i64));

    let considered: Vec<&PressEvent> = match cutoff {
        Some(cutoff) => presses
            .iter()
            .filter(|press| press.pressed_at >= cutoff)
            .collect(),
        None => presses.iter().collect(),
    };

    let rapid_represses = considered
        .iter()
        .filter(|press| {
            press
                .gap_ms
                .map_or(false, |gap| gap < config.short_gap_ms)
        })
        .count();

    if rapid_represses > config.short_gap_limit {
        return PatternKind::Excessive;
    }

    let mut weekly = [0u32; 7];
    for press in &considered {
        weekly[press.day_of_week as usize] += 1;
    }

    if weekly.iter().any(|&count| count > config.weekly_peak_limit) {
        return PatternKind::Obsessive;
    }

    PatternKind::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    // 2026-08-17 09:00 UTC is a Monday.
    fn monday_morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 17, 9, 0, 0).unwrap()
    }

    fn press(pressed_at: DateTime<Utc>, gap_ms: Option<u64>) -> PressEvent {
        PressEvent::new(pressed_at, "local-user", "session-1", gap_ms)
    }

    #[test]
    fn empty_history_yields_empty_report() {
        let report = analyze(&[], &AnalysisConfig::default());

        assert_eq!(report.total_presses, 0);
        assert_eq!(report.average_gap_ms, 0.0);
        assert_eq!(report.classification, PatternKind::Normal);
        assert_eq!(report.weekly.len(), 7);
        assert_eq!(report.hourly.len(), 24);
        assert!(report.weekly.iter().all(|bucket| bucket.count == 0));
        assert!(report.hourly.iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn histogram_sums_equal_event_count() {
        let base = monday_morning();
        let presses: Vec<PressEvent> = (0..13)
            .map(|i| press(base + Duration::hours(i * 7), Some(20_000)))
            .collect();

        let report = analyze(&presses, &AnalysisConfig::default());

        let weekly_sum: u32 = report.weekly.iter().map(|bucket| bucket.count).sum();
        let hourly_sum: u32 = report.hourly.iter().map(|bucket| bucket.count).sum();
        assert_eq!(weekly_sum, 13);
        assert_eq!(hourly_sum, 13);
    }

    #[test]
    fn average_gap_ignores_gapless_presses() {
        let base = monday_morning();
        let presses = vec![
            press(base, None),
            press(base + Duration::seconds(5), Some(5_000)),
            press(base + Duration::hours(1), Some(3_600_000)),
        ];

        let report = analyze(&presses, &AnalysisConfig::default());

        assert_eq!(report.average_gap_ms, (5_000.0 + 3_600_000.0) / 2.0);
    }

    #[test]
    fn average_gap_over_zero_gaps_is_zero() {
        let presses = vec![press(monday_morning(), None)];
        let report = analyze(&presses, &AnalysisConfig::default());
        assert_eq!(report.average_gap_ms, 0.0);
    }

    #[test]
    fn monday_scenario_classifies_normal() {
        let base = monday_morning();
        let presses = vec![
            press(base, None),
            press(base + Duration::seconds(5), Some(5_000)),
            press(base + Duration::hours(1), Some(3_600_000)),
        ];

        let report = analyze(&presses, &AnalysisConfig::default());

        assert_eq!(report.weekly[1].count, 3);
        assert_eq!(report.hourly[9].count, 2);
        assert_eq!(report.hourly[10].count, 1);
        assert_eq!(report.classification, PatternKind::Normal);
    }

    #[test]
    fn four_rapid_represses_classify_excessive() {
        let base = monday_morning();
        let mut presses = vec![press(base, None)];
        for i in 1..=4 {
            presses.push(press(base + Duration::seconds(i * 10), Some(10_000)));
        }

        let report = analyze(&presses, &AnalysisConfig::default());
        assert_eq!(report.classification, PatternKind::Excessive);
    }

    #[test]
    fn excessive_ignores_weekly_distribution() {
        // Rapid re-presses spread over four different weekdays.
        let base = monday_morning();
        let mut presses = vec![press(base, None)];
        for i in 1..=4 {
            presses.push(press(base + Duration::days(i), Some(1_000)));
        }

        let report = analyze(&presses, &AnalysisConfig::default());
        assert_eq!(report.classification, PatternKind::Excessive);
    }

    #[test]
    fn six_slow_presses_on_one_weekday_classify_obsessive() {
        let base = monday_morning();
        let mut presses = vec![press(base, None)];
        for i in 1..6 {
            presses.push(press(base + Duration::minutes(i * 30), Some(1_800_000)));
        }

        let report = analyze(&presses, &AnalysisConfig::default());
        assert_eq!(report.weekly[1].count, 6);
        assert_eq!(report.classification, PatternKind::Obsessive);
    }

    #[test]
    fn excessive_wins_over_obsessive() {
        // Six same-day presses, four of them rapid: both rules match,
        // Excessive is checked first.
        let base = monday_morning();
        let mut presses = vec![press(base, None), press(base + Duration::minutes(30), Some(1_800_000))];
        for i in 1..=4 {
            presses.push(press(base + Duration::minutes(30) + Duration::seconds(i * 5), Some(5_000)));
        }

        let report = analyze(&presses, &AnalysisConfig::default());
        assert_eq!(report.classification, PatternKind::Excessive);
    }

    #[test]
    fn exactly_three_rapid_represses_stay_normal() {
        let base = monday_morning();
        let mut presses = vec![press(base, None)];
        for i in 1..=3 {
            presses.push(press(base + Duration::seconds(i * 10), Some(10_000)));
        }

        let report = analyze(&presses, &AnalysisConfig::default());
        assert_eq!(report.classification, PatternKind::Normal);
    }

    #[test]
    fn recent_window_excludes_old_rapid_represses() {
        let config = AnalysisConfig {
            recent_window_secs: Some(60),
            ..AnalysisConfig::default()
        };

        let old = Utc::now() - Duration::hours(2);
        let mut presses = vec![press(old, None)];
        for i in 1..=4 {
            presses.push(press(old + Duration::seconds(i * 5), Some(5_000)));
        }

        let report = analyze(&presses, &config);
        assert_eq!(report.classification, PatternKind::Normal);
        // Histograms still cover full history.
        assert_eq!(report.total_presses, 5);
        let weekly_sum: u32 = report.weekly.iter().map(|bucket| bucket.count).sum();
        assert_eq!(weekly_sum, 5);
    }

    #[test]
    fn recent_window_keeps_fresh_rapid_represses() {
        let config = AnalysisConfig {
            recent_window_secs: Some(60),
            ..AnalysisConfig::default()
        };

        let now = Utc::now();
        let mut presses = vec![press(now - Duration::seconds(50), None)];
        for i in 0..4 {
            presses.push(press(
                now - Duration::seconds(40 - i * 10),
                Some(10_000),
            ));
        }

        let report = analyze(&presses, &config);
        assert_eq!(report.classification, PatternKind::Excessive);
    }
}
