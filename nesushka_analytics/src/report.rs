use chrono::NaiveDate;

use nesushka_models::record::DayTotal;

use crate::words::top_words;

const TOP_WORDS_LIMIT: usize = 3;

/// Period summary for one user, derived entirely from stored records.
/// `trend` is the projected total change over the current period (OLS
/// slope times the number of days), not a per-day rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub current_avg: f64,
    pub previous_avg: f64,
    /// False when no data older than the current period exists; callers
    /// must not render a percent change against `previous_avg` then.
    pub has_previous: bool,
    pub trend: f64,
    pub max_day: DayTotal,
    pub min_day: DayTotal,
    pub top_words: Vec<(String, usize)>,
}

/// Computes the day-over-day summary for the most recent `window_days`
/// of aggregated history. `days` must be the user's entire history,
/// chronological, one entry per day — the previous-period comparison
/// needs data older than the window. Returns `None` when fewer than two
/// aggregated days exist (the minimum is fixed, not configurable).
pub fn compute(
    days: &[DayTotal],
    notes: &[(NaiveDate, String)],
    window_days: usize,
) -> Option<AnalyticsReport> {
    if days.len() < 2 || window_days == 0 {
        return None;
    }

    let window = window_days.min(days.len());
    let (older, current) = days.split_at(days.len() - window);
    let previous = &older[older.len().saturating_sub(window_days)..];

    let current_avg = mean(current);
    let previous_avg = if previous.is_empty() { 0.0 } else { mean(previous) };

    let trend = ols_slope(current) * current.len() as f64;

    let max_day = *current
        .iter()
        .reduce(|best, day| if day.total > best.total { day } else { best })
        .expect("current is never empty");
    let min_day = *current
        .iter()
        .reduce(|best, day| if day.total < best.total { day } else { best })
        .expect("current is never empty");

    let current_start = current[0].date;
    let current_notes = notes
        .iter()
        .filter(|(date, _)| *date >= current_start)
        .map(|(_, note)| note.as_str());

    Some(AnalyticsReport {
        current_avg,
        previous_avg,
        has_previous: !previous.is_empty(),
        trend,
        max_day,
        min_day,
        top_words: top_words(current_notes, TOP_WORDS_LIMIT),
    })
}

fn mean(days: &[DayTotal]) -> f64 {
    days.iter().map(|d| d.total as f64).sum::<f64>() / days.len() as f64
}

/// Ordinary-least-squares slope of total against day index 0..n-1.
fn ols_slope(days: &[DayTotal]) -> f64 {
    let n = days.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = mean(days);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, day) in days.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (day.total as f64 - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str, total: i64) -> DayTotal {
        DayTotal {
            date: s.parse().unwrap(),
            total,
        }
    }

    fn note(date: &str, text: &str) -> (NaiveDate, String) {
        (date.parse().unwrap(), text.to_string())
    }

    #[test]
    fn fewer_than_two_days_is_insufficient() {
        assert_eq!(compute(&[], &[], 7), None);
        assert_eq!(compute(&[day("2025-06-01", 10)], &[], 7), None);
    }

    #[test]
    fn two_days_is_enough() {
        let days = [day("2025-06-01", 10), day("2025-06-02", 12)];
        assert!(compute(&days, &[], 7).is_some());
    }

    #[test]
    fn rising_week_reference_numbers() {
        let days = [
            day("2025-06-01", 10),
            day("2025-06-02", 12),
            day("2025-06-03", 14),
            day("2025-06-04", 16),
        ];

        let report = compute(&days, &[], 4).unwrap();

        assert_eq!(report.current_avg, 13.0);
        assert_eq!(report.trend, 8.0); // 2 eggs/day over 4 days
        assert_eq!(report.max_day, day("2025-06-04", 16));
        assert_eq!(report.min_day, day("2025-06-01", 10));
        assert_eq!(report.previous_avg, 0.0);
        assert!(!report.has_previous);
    }

    #[test]
    fn previous_period_is_the_chunk_right_before_the_window() {
        let days = [
            day("2025-06-01", 4),
            day("2025-06-02", 6),
            day("2025-06-03", 10),
            day("2025-06-04", 20),
        ];

        let report = compute(&days, &[], 2).unwrap();

        assert_eq!(report.current_avg, 15.0);
        assert_eq!(report.previous_avg, 5.0);
        assert!(report.has_previous);
    }

    #[test]
    fn window_shrinks_to_available_history() {
        let days = [day("2025-06-01", 10), day("2025-06-02", 20)];

        let report = compute(&days, &[], 30).unwrap();

        assert_eq!(report.current_avg, 15.0);
        assert_eq!(report.previous_avg, 0.0);
        assert!(!report.has_previous);
    }

    #[test]
    fn extremes_tie_break_on_first_occurrence() {
        let days = [
            day("2025-06-01", 8),
            day("2025-06-02", 12),
            day("2025-06-03", 8),
            day("2025-06-04", 12),
        ];

        let report = compute(&days, &[], 4).unwrap();

        assert_eq!(report.max_day, day("2025-06-02", 12));
        assert_eq!(report.min_day, day("2025-06-01", 8));
    }

    #[test]
    fn flat_series_has_zero_trend() {
        let days = [
            day("2025-06-01", 9),
            day("2025-06-02", 9),
            day("2025-06-03", 9),
        ];

        let report = compute(&days, &[], 3).unwrap();
        assert_eq!(report.trend, 0.0);
    }

    #[test]
    fn note_mining_covers_only_the_current_period() {
        let days = [
            day("2025-06-01", 4),
            day("2025-06-02", 6),
            day("2025-06-03", 10),
            day("2025-06-04", 20),
        ];
        let notes = [
            note("2025-06-01", "старый корм"),
            note("2025-06-03", "корм хороший"),
            note("2025-06-04", "корм новый"),
            note("2025-06-04", "вода"),
        ];

        let report = compute(&days, &notes, 2).unwrap();

        assert_eq!(report.top_words[0], ("корм".to_string(), 2));
        assert_eq!(report.top_words.len(), 3);
    }
}
