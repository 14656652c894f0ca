use chrono::{NaiveDate, Utc};
use teloxide::prelude::*;

use nesushka_models::record::RecordId;
use nesushka_storage::{EditOutcome, EggRecordPatch, RemoveOutcome};

use crate::{HandlerResult, SharedLogbook};

const ENTRY_FORMAT_HELP: &str = "❌ Format error. Examples:\n\
    12 — log 12 eggs for today\n\
    12 2025-06-15 — log 12 eggs for June 15\n\
    12 today feed changed — log for today with a note";

/// A parsed quick-add message: `<count> [YYYY-MM-DD|today] [note…]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedEntry {
    pub date: NaiveDate,
    pub count: i64,
    pub notes: String,
}

/// The second word, when present, must be a date or the word "today"
/// (notes always come after the date part).
pub(crate) fn parse_entry(text: &str, today: NaiveDate) -> Option<ParsedEntry> {
    let mut words = text.split_whitespace();

    let count: i64 = words.next()?.parse().ok()?;
    if count < 0 {
        return None;
    }

    let rest: Vec<&str> = words.collect();
    let (date, note_words) = match rest.split_first() {
        None => (today, &rest[..]),
        Some((&first, note_words)) => {
            if first.eq_ignore_ascii_case("today") || first == "сегодня" {
                (today, note_words)
            } else {
                let date = NaiveDate::parse_from_str(first, "%Y-%m-%d").ok()?;
                (date, note_words)
            }
        }
    };

    Some(ParsedEntry {
        date,
        count,
        notes: note_words.join(" "),
    })
}

/// `/edit` arguments: `<id> <count> [YYYY-MM-DD] [note…]`. A third word
/// that does not parse as a date is treated as the start of the note.
pub(crate) fn parse_edit(args: &str) -> Option<(RecordId, EggRecordPatch)> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let (&id, rest) = words.split_first()?;
    let (&count, rest) = rest.split_first()?;

    let id: RecordId = id.parse().ok()?;
    let count: i64 = count.parse().ok()?;
    if count < 0 {
        return None;
    }

    let mut patch = EggRecordPatch {
        count: Some(count),
        ..Default::default()
    };

    let note_words = match rest.split_first() {
        Some((&first, tail)) => match NaiveDate::parse_from_str(first, "%Y-%m-%d") {
            Ok(date) => {
                patch.date = Some(date);
                tail
            }
            Err(_) => rest,
        },
        None => rest,
    };
    if !note_words.is_empty() {
        patch.notes = Some(note_words.join(" "));
    }

    Some((id, patch))
}

pub(crate) async fn send_add_hint(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Send the data as a plain message:\n\
         <count> [YYYY-MM-DD|today] [note]\n\n\
         Examples:\n\
         12 — log 12 eggs for today\n\
         12 2025-06-15 — log 12 eggs for June 15\n\
         12 today feed changed — log for today with a note",
    )
    .await?;
    Ok(())
}

/// Fallback for plain (non-command) messages: the quick-add form.
pub(crate) async fn quick_add(bot: Bot, logbook: SharedLogbook, msg: Message) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.starts_with('/') {
        return Ok(());
    }

    let Some(entry) = parse_entry(text, Utc::now().date_naive()) else {
        bot.send_message(msg.chat.id, ENTRY_FORMAT_HELP).await?;
        return Ok(());
    };

    let record = logbook
        .add(msg.chat.id.0, entry.date, entry.count, entry.notes)
        .await?;

    log::info!("User {} logged record {}", record.user_id, record.id);

    let mut reply = format!(
        "✅ Logged {} eggs for {}\nRecord id: {}",
        record.count, record.date, record.id
    );
    if !record.notes.is_empty() {
        reply.push_str(&format!("\nNote: {}", record.notes));
    }
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

pub(crate) async fn edit(
    bot: Bot,
    logbook: SharedLogbook,
    args: String,
    msg: Message,
) -> HandlerResult {
    let Some((id, patch)) = parse_edit(&args) else {
        bot.send_message(
            msg.chat.id,
            "Usage: /edit <id> <count> [date] [note]\n\
             Example: /edit 1 15 2025-06-20 new feed",
        )
        .await?;
        return Ok(());
    };

    let reply = match logbook.edit(msg.chat.id.0, id, patch).await? {
        EditOutcome::Updated(record) => {
            format!("✅ Record {} updated: {} eggs for {}", record.id, record.count, record.date)
        }
        EditOutcome::NotFound | EditOutcome::NotOwner => {
            "❌ Record not found or not yours.".to_string()
        }
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

pub(crate) async fn delete(
    bot: Bot,
    logbook: SharedLogbook,
    args: String,
    msg: Message,
) -> HandlerResult {
    let Ok(id) = args.trim().parse::<RecordId>() else {
        bot.send_message(msg.chat.id, "Usage: /delete <id>").await?;
        return Ok(());
    };

    let reply = match logbook.remove(msg.chat.id.0, id).await? {
        RemoveOutcome::Removed => format!("✅ Record {id} deleted."),
        RemoveOutcome::NotFound | RemoveOutcome::NotOwner => {
            "❌ Record not found or not yours.".to_string()
        }
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn bare_count_logs_for_today() {
        let entry = parse_entry("12", day("2025-06-01")).unwrap();
        assert_eq!(
            entry,
            ParsedEntry {
                date: day("2025-06-01"),
                count: 12,
                notes: String::new(),
            }
        );
    }

    #[test]
    fn explicit_date_and_note() {
        let entry = parse_entry("12 2025-06-15 корм поменяли", day("2025-06-01")).unwrap();
        assert_eq!(entry.date, day("2025-06-15"));
        assert_eq!(entry.count, 12);
        assert_eq!(entry.notes, "корм поменяли");
    }

    #[test]
    fn today_keyword_with_note() {
        let entry = parse_entry("7 today feed changed", day("2025-06-01")).unwrap();
        assert_eq!(entry.date, day("2025-06-01"));
        assert_eq!(entry.notes, "feed changed");

        let entry = parse_entry("7 сегодня корм", day("2025-06-01")).unwrap();
        assert_eq!(entry.notes, "корм");
    }

    #[test]
    fn note_without_date_keyword_is_rejected() {
        assert_eq!(parse_entry("12 корм поменяли", day("2025-06-01")), None);
    }

    #[test]
    fn negative_and_garbage_counts_are_rejected() {
        assert_eq!(parse_entry("-3", day("2025-06-01")), None);
        assert_eq!(parse_entry("dozen", day("2025-06-01")), None);
        assert_eq!(parse_entry("", day("2025-06-01")), None);
    }

    #[test]
    fn edit_with_count_only() {
        let (id, patch) = parse_edit("1 15").unwrap();
        assert_eq!(id, 1);
        assert_eq!(patch.count, Some(15));
        assert_eq!(patch.date, None);
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn edit_with_date_and_note() {
        let (id, patch) = parse_edit("1 15 2025-06-20 new feed").unwrap();
        assert_eq!(id, 1);
        assert_eq!(patch.count, Some(15));
        assert_eq!(patch.date, Some(day("2025-06-20")));
        assert_eq!(patch.notes, Some("new feed".to_string()));
    }

    #[test]
    fn edit_note_may_start_right_after_count() {
        let (_, patch) = parse_edit("1 15 new feed").unwrap();
        assert_eq!(patch.date, None);
        assert_eq!(patch.notes, Some("new feed".to_string()));
    }

    #[test]
    fn edit_requires_id_and_count() {
        assert!(parse_edit("").is_none());
        assert!(parse_edit("1").is_none());
        assert!(parse_edit("one 15").is_none());
        assert!(parse_edit("1 -5").is_none());
    }
}
