use chrono::{NaiveDate, TimeDelta, Utc};
use teloxide::prelude::*;

use nesushka_analytics::AnalyticsReport;
use nesushka_models::record::{EggRecord, RecordId};
use nesushka_storage::EggRecordStorage;

use crate::{HandlerResult, SharedLogbook};

const DEFAULT_WINDOW_DAYS: usize = 7;

/// `[days]` argument shared by /stats and /analytics: empty means the
/// default window, anything else must be a positive integer.
pub(crate) fn parse_days(args: &str) -> Option<usize> {
    let args = args.trim();
    if args.is_empty() {
        return Some(DEFAULT_WINDOW_DAYS);
    }
    match args.parse::<usize>() {
        Ok(days) if days > 0 => Some(days),
        _ => None,
    }
}

/// Sums records per date, keeping the ids that contributed. Input must
/// be date-ordered, as the storage query returns it.
pub(crate) fn group_by_day(records: &[EggRecord]) -> Vec<(NaiveDate, i64, Vec<RecordId>)> {
    let mut days: Vec<(NaiveDate, i64, Vec<RecordId>)> = Vec::new();

    for record in records {
        match days.last_mut() {
            Some((date, total, ids)) if *date == record.date => {
                *total += record.count;
                ids.push(record.id);
            }
            _ => days.push((record.date, record.count, vec![record.id])),
        }
    }

    days
}

pub(crate) async fn show_stats(
    bot: Bot,
    logbook: SharedLogbook,
    args: String,
    msg: Message,
) -> HandlerResult {
    let Some(days) = parse_days(&args) else {
        bot.send_message(msg.chat.id, "Usage: /stats [days] (default 7)")
            .await?;
        return Ok(());
    };

    let today = Utc::now().date_naive();
    let from = today - TimeDelta::days(days as i64 - 1);
    let records = logbook
        .records()
        .records_between(msg.chat.id.0, from, today)
        .await?;

    if records.is_empty() {
        bot.send_message(msg.chat.id, "❌ No data for this period.")
            .await?;
        return Ok(());
    }

    let grouped = group_by_day(&records);
    let mut text = format!("📊 Your stats for the last {days} days:\n");
    let mut total = 0;
    for (date, day_total, ids) in &grouped {
        total += day_total;
        let ids = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!("📅 {date}: {day_total} eggs (ids: {ids})\n"));
    }
    text.push_str(&format!(
        "\nTotal: {total} eggs\nAverage: {:.1} eggs/day",
        total as f64 / grouped.len() as f64
    ));

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

pub(crate) fn render_report(report: &AnalyticsReport, days: usize) -> String {
    let arrow = if report.trend > 0.0 { '↑' } else { '↓' };
    let mut text = format!(
        "📈 Your analytics for the last {days} days:\n\n\
         ▪ Average: {:.1} eggs/day\n\
         ▪ Trend: {arrow} {:.1} eggs over the period\n\
         ▪ Record: {} eggs ({})\n\
         ▪ Minimum: {} eggs ({})\n",
        report.current_avg,
        report.trend.abs(),
        report.max_day.total,
        report.max_day.date,
        report.min_day.total,
        report.min_day.date,
    );

    // no percent change without a previous period to compare against
    if report.has_previous && report.previous_avg != 0.0 {
        let change = (report.current_avg - report.previous_avg) / report.previous_avg * 100.0;
        text.push_str(&format!("\n🔄 Change vs previous period: {change:+.1}%\n"));
    }

    if !report.top_words.is_empty() {
        text.push_str("\n🔍 Frequent note words:\n");
        for (word, count) in &report.top_words {
            text.push_str(&format!("- {word} ({count}×)\n"));
        }
    }

    text
}

pub(crate) async fn show_analytics(
    bot: Bot,
    logbook: SharedLogbook,
    args: String,
    msg: Message,
) -> HandlerResult {
    let Some(days) = parse_days(&args) else {
        bot.send_message(msg.chat.id, "Usage: /analytics [days] (default 7)")
            .await?;
        return Ok(());
    };

    let user_id = msg.chat.id.0;
    let totals = logbook.records().daily_totals(user_id).await?;
    let notes = logbook.records().dated_notes(user_id).await?;

    let reply = match nesushka_analytics::compute(&totals, &notes, days) {
        Some(report) => render_report(&report, days),
        None => "❌ Not enough data for analytics (log at least two days).".to_string(),
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
