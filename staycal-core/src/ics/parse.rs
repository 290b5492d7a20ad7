//! Lenient ICS parsing into reserved date ranges.
//!
//! Feeds from booking platforms are read line by line rather than through a
//! strict RFC 5545 parser, so a single broken entry never hides the rest of
//! the calendar. Only DTSTART, DTEND, SUMMARY and UID are consumed.

use chrono::NaiveDate;
use icalendar::parser::{ParseString, unfold};

use crate::date_range::{DEFAULT_SUMMARY, DateRange, IdGenerator, summary_or_default};
use crate::date_utils::add_days;

/// An event block being accumulated between BEGIN:VEVENT and END:VEVENT.
struct PartialRange {
    id: String,
    summary: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    /// Depth of nested components (VALARM etc.) inside the event.
    nested: usize,
}

impl PartialRange {
    fn new(id: String) -> Self {
        PartialRange {
            id,
            summary: DEFAULT_SUMMARY.to_string(),
            start: None,
            end: None,
            nested: 0,
        }
    }

    /// Close the block. DTEND is the exclusive checkout day in the feed and
    /// becomes the last occupied night here.
    fn finish(self) -> Option<DateRange> {
        let start = self.start?;
        let end = self.end?;
        let end = if end > start { add_days(end, -1)? } else { end };

        let range = DateRange {
            id: self.id,
            start,
            end,
            summary: self.summary,
        };

        // The checkout day has to fit back into YYYYMMDD on export.
        if range.checkout_day().is_none() {
            return None;
        }
        Some(range)
    }
}

/// Parse ICS content into date ranges, in document order.
///
/// Never fails: blocks without a decodable DTSTART and DTEND are dropped.
/// Blocks without a usable UID get one from `ids`.
pub fn parse_ics(content: &str, ids: &mut impl IdGenerator) -> Vec<DateRange> {
    // Any of CRLF, LF or bare CR; unfolding expects CRLF.
    let normalized = content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\r\n");
    let unfolded = unfold(&normalized);

    let mut ranges = Vec::new();
    let mut current: Option<PartialRange> = None;
    let mut dropped = 0usize;

    for raw_line in unfolded.lines() {
        // Trailing blanks belong to the value (a summary may end in one)
        let line = raw_line.trim_start();

        if line.starts_with("BEGIN:VEVENT") {
            current = Some(PartialRange::new(ids.next_id()));
            continue;
        }

        if line.starts_with("END:VEVENT") {
            if let Some(partial) = current.take() {
                match partial.finish() {
                    Some(range) => ranges.push(range),
                    None => dropped += 1,
                }
            }
            continue;
        }

        let Some(partial) = current.as_mut() else {
            continue;
        };

        if line.starts_with("BEGIN:") {
            partial.nested += 1;
            continue;
        }
        if line.starts_with("END:") {
            partial.nested = partial.nested.saturating_sub(1);
            continue;
        }
        if partial.nested > 0 {
            continue;
        }

        apply_property(partial, line);
    }

    if dropped > 0 {
        tracing::debug!(dropped, "Dropped event blocks without usable DTSTART/DTEND");
    }
    tracing::debug!(count = ranges.len(), "Parsed date ranges from ICS");

    ranges
}

/// Assign a recognised property line to the partial record.
fn apply_property(partial: &mut PartialRange, line: &str) {
    let Some((name, value)) = line.split_once(':') else {
        return;
    };

    if name.starts_with("DTSTART") {
        partial.start = parse_date_value(value);
    } else if name.starts_with("DTEND") {
        partial.end = parse_date_value(value);
    } else if name.starts_with("SUMMARY") {
        partial.summary = summary_or_default(&unescape_text(value)).to_string();
    } else if name.starts_with("UID") {
        let id = unescape_text(value);
        // Keep the generated id rather than one that cannot be stored
        if id.chars().any(char::is_control) {
            tracing::debug!(uid = %value, "Ignoring UID with control characters");
        } else {
            partial.id = id;
        }
    }
}

/// Decode a DATE (`20250710`) or DATE-TIME (`20250710T140000[Z]`) value,
/// keeping only the calendar date.
pub(crate) fn parse_date_value(value: &str) -> Option<NaiveDate> {
    let v = value.trim();

    let digits = if v.len() == 8 {
        v
    } else if v.len() >= 15 && v.contains('T') {
        v.get(..8)?
    } else {
        return None;
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

/// Undo RFC 5545 TEXT escaping.
fn unescape_text(value: &str) -> String {
    ParseString::from(value).unescape_text().as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::SequentialIds;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(content: &str) -> Vec<DateRange> {
        parse_ics(content, &mut SequentialIds::new("gen"))
    }

    #[test_log::test]
    fn test_parse_all_day_event_converts_exclusive_end() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Tokeet//EN\r\n\
BEGIN:VEVENT\r\n\
UID:booking-42@tokeet\r\n\
DTSTART;VALUE=DATE:20250710\r\n\
DTEND;VALUE=DATE:20250714\r\n\
SUMMARY:Smith family\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        let range = &ranges[0];
        assert_eq!(range.id, "booking-42@tokeet");
        assert_eq!(range.start, date(2025, 7, 10));
        assert_eq!(range.end, date(2025, 7, 13));
        assert_eq!(range.summary, "Smith family");
    }

    #[test]
    fn test_parse_drops_block_without_dtend() {
        let ics = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
UID:incomplete\n\
DTSTART;VALUE=DATE:20250710\n\
END:VEVENT\n\
END:VCALENDAR\n";

        assert!(parse(ics).is_empty());
    }

    #[test]
    fn test_parse_defaults_uid_and_summary() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:20250801\n\
DTEND:20250803\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART:20250901\n\
DTEND:20250902\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].id, "gen-1");
        assert_eq!(ranges[1].id, "gen-2");
        assert!(ranges.iter().all(|r| r.summary == DEFAULT_SUMMARY));
        assert_eq!(ranges[1].start, ranges[1].end);
    }

    #[test]
    fn test_parse_accepts_bare_cr_line_endings() {
        let ics = "BEGIN:VCALENDAR\rBEGIN:VEVENT\rDTSTART:20250101\rDTEND:20250105\rEND:VEVENT\rEND:VCALENDAR";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end, date(2025, 1, 4));
    }

    #[test]
    fn test_parse_datetime_values_keep_date_part() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:20250310T150000Z\n\
DTEND;TZID=Europe/Paris:20250315T110000\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, date(2025, 3, 10));
        assert_eq!(ranges[0].end, date(2025, 3, 14));
    }

    #[test]
    fn test_parse_keeps_colons_in_summary_and_uid() {
        let ics = "BEGIN:VEVENT\n\
UID:urn:booking:77\n\
SUMMARY:Guest: Dupont (ref: A1)\n\
DTSTART:20250101\n\
DTEND:20250103\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges[0].id, "urn:booking:77");
        assert_eq!(ranges[0].summary, "Guest: Dupont (ref: A1)");
    }

    #[test]
    fn test_parse_drops_undecodable_dates() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:2025-01-01\n\
DTEND:20250103\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART:20251340\n\
DTEND:20251341\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART:2025010A\n\
DTEND:20250103\n\
END:VEVENT\n";

        assert!(parse(ics).is_empty());
    }

    #[test]
    fn test_parse_keeps_inverted_range_as_is() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:20250110\n\
DTEND:20250105\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, date(2025, 1, 10));
        assert_eq!(ranges[0].end, date(2025, 1, 5));
    }

    #[test]
    fn test_parse_zero_length_event_stays_single_day() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:20250110\n\
DTEND:20250110\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges[0].start, ranges[0].end);
    }

    #[test]
    fn test_parse_ignores_nested_alarm_properties() {
        let ics = "BEGIN:VEVENT\n\
UID:outer\n\
DTSTART;VALUE=DATE:20250601\n\
DTEND;VALUE=DATE:20250604\n\
BEGIN:VALARM\n\
UID:alarm-uid\n\
SUMMARY:Alarm text\n\
END:VALARM\n\
SUMMARY:Booked\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].id, "outer");
        assert_eq!(ranges[0].summary, "Booked");
    }

    #[test]
    fn test_parse_unfolds_continuation_lines() {
        let ics = "BEGIN:VEVENT\r\n\
DTSTART:20250601\r\n\
DTEND:20250602\r\n\
SUMMARY:A long\r\n  summary line\r\n\
END:VEVENT\r\n";

        let ranges = parse(ics);

        assert_eq!(ranges[0].summary, "A long summary line");
    }

    #[test]
    fn test_parse_unescapes_summary() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:20250601\n\
DTEND:20250602\n\
SUMMARY:Martin\\, Paul\\; 2 guests\\nlate arrival\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges[0].summary, "Martin, Paul; 2 guests\nlate arrival");
    }

    #[test]
    fn test_parse_keeps_trailing_blanks_in_summary() {
        let ics = "BEGIN:VEVENT\r\n\
UID:lead\r\n\
DTSTART:20250601\r\n\
DTEND:20250602\r\n\
SUMMARY:Smith \r\n\
END:VEVENT\r\n";

        let ranges = parse(ics);

        assert_eq!(ranges[0].id, "lead");
        assert_eq!(ranges[0].summary, "Smith ");
    }

    #[test]
    fn test_parse_blank_summary_falls_back_to_default() {
        let ics = "BEGIN:VEVENT\n\
DTSTART:20250601\n\
DTEND:20250602\n\
SUMMARY:   \n\
END:VEVENT\n";

        assert_eq!(parse(ics)[0].summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_parse_unescapes_uid() {
        let ics = "BEGIN:VEVENT\n\
UID:urn:booking\\;77\\,x\n\
DTSTART:20250601\n\
DTEND:20250602\n\
END:VEVENT\n";

        assert_eq!(parse(ics)[0].id, "urn:booking;77,x");
    }

    #[test]
    fn test_parse_replaces_uid_with_control_characters() {
        let ics = "BEGIN:VEVENT\n\
UID:first\\nsecond\n\
DTSTART:20250601\n\
DTEND:20250602\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges[0].id, "gen-1");
        assert!(ranges[0].validate().is_ok());
    }

    #[test]
    fn test_parse_drops_dates_without_four_digit_checkout() {
        let ics = "BEGIN:VEVENT\n\
UID:last-night\n\
DTSTART:99991231\n\
DTEND:99991231\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
UID:year-zero\n\
DTSTART:00001231\n\
DTEND:00010102\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
UID:kept\n\
DTSTART:99991230\n\
DTEND:99991231\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].id, "kept");
        assert_eq!(ranges[0].end, date(9999, 12, 30));
    }

    #[test]
    fn test_parse_ignores_properties_outside_events() {
        let ics = "BEGIN:VCALENDAR\n\
DTSTART:20250101\n\
SUMMARY:Calendar level\n\
X-WR-CALNAME:Villa\n\
END:VCALENDAR\n";

        assert!(parse(ics).is_empty());
    }

    #[test]
    fn test_parse_restarts_on_unterminated_block() {
        let ics = "BEGIN:VEVENT\n\
UID:lost\n\
DTSTART:20250101\n\
BEGIN:VEVENT\n\
UID:kept\n\
DTSTART:20250201\n\
DTEND:20250203\n\
END:VEVENT\n";

        let ranges = parse(ics);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].id, "kept");
    }

    #[test]
    fn test_parse_date_value_forms() {
        assert_eq!(parse_date_value("20250710"), Some(date(2025, 7, 10)));
        assert_eq!(parse_date_value(" 20250710 "), Some(date(2025, 7, 10)));
        assert_eq!(parse_date_value("20250710T120000"), Some(date(2025, 7, 10)));
        assert_eq!(parse_date_value("20250710T120000Z"), Some(date(2025, 7, 10)));
        assert_eq!(parse_date_value("2025071"), None);
        assert_eq!(parse_date_value("202507101200"), None);
        assert_eq!(parse_date_value(""), None);
    }
}
