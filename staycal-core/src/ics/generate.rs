//! ICS generation for exporting date ranges.

use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::date_range::{DateRange, summary_or_default};

pub const PRODID: &str = "-//staycal//Availability//EN";

/// Generate a full VCALENDAR for the ranges, stamped with the current time.
pub fn generate_ics(ranges: &[DateRange]) -> String {
    generate_ics_at(ranges, Utc::now())
}

/// Generate a full VCALENDAR using `stamp` for every DTSTAMP.
///
/// Each range's inclusive `end` is written back as the exclusive checkout
/// day (`end + 1`), the inverse of what the parser does. Ranges whose
/// checkout day has no four-digit year are skipped.
pub fn generate_ics_at(ranges: &[DateRange], stamp: DateTime<Utc>) -> String {
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();
    let mut cal = Calendar::new();

    for range in ranges {
        let Some(checkout) = range.checkout_day() else {
            tracing::warn!(id = %range.id, start = %range.start, end = %range.end, "Skipping range outside supported dates");
            continue;
        };

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&range.id);
        // A bare CR would end the content line early
        ics_event.summary(&summary_or_default(&range.summary).replace('\r', ""));
        ics_event.add_property("DTSTAMP", &dtstamp);
        add_date_property(&mut ics_event, "DTSTART", range.start);
        add_date_property(&mut ics_event, "DTEND", checkout);

        cal.push(ics_event.done());
    }

    let output = strip_ics_bloat(&cal.done().to_string());

    tracing::debug!(count = ranges.len(), "Generated ICS");
    output
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add an all-day `VALUE=DATE` property.
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, day: NaiveDate) {
    let mut prop = Property::new(name, day.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::SequentialIds;
    use crate::ics::parse_ics;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
    }

    fn make_range(id: &str, start: NaiveDate, end: NaiveDate, summary: &str) -> DateRange {
        DateRange {
            id: id.to_string(),
            start,
            end,
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_generate_writes_exclusive_end() {
        let range = make_range("booking-42", date(2025, 7, 10), date(2025, 7, 13), "Smith");

        let ics = generate_ics_at(&[range], stamp());

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20250710\r\n"),
            "DTSTART should be the arrival day. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20250714\r\n"),
            "DTEND should be the checkout day. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_block_layout() {
        let range = make_range("abc", date(2025, 12, 31), date(2025, 12, 31), "Owner stay");

        let ics = generate_ics_at(&[range], stamp());

        let expected = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//staycal//Availability//EN\r\n\
BEGIN:VEVENT\r\n\
DTEND;VALUE=DATE:20260101\r\n\
DTSTAMP:20250601T083000Z\r\n\
DTSTART;VALUE=DATE:20251231\r\n\
SUMMARY:Owner stay\r\n\
UID:abc\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        assert_eq!(ics, expected);
    }

    #[test]
    fn test_generate_empty_calendar() {
        let ics = generate_ics_at(&[], stamp());

        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//staycal//Availability//EN\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_generate_defaults_empty_summary() {
        let range = make_range("abc", date(2025, 1, 1), date(2025, 1, 2), "");

        let ics = generate_ics_at(&[range], stamp());

        assert!(ics.contains("SUMMARY:Reserved\r\n"));
    }

    #[test]
    fn test_generate_preserves_input_order() {
        let later = make_range("later", date(2025, 9, 1), date(2025, 9, 3), "B");
        let earlier = make_range("earlier", date(2025, 1, 1), date(2025, 1, 3), "A");

        let ics = generate_ics_at(&[later, earlier], stamp());

        let later_pos = ics.find("UID:later").unwrap();
        let earlier_pos = ics.find("UID:earlier").unwrap();
        assert!(later_pos < earlier_pos);
    }

    #[test]
    fn test_generate_escapes_and_folds_summary() {
        let summary = format!("Leap, year; stay\n{}", "é".repeat(60));
        let range = make_range("abc", date(2025, 7, 10), date(2025, 7, 10), &summary);

        let ics = generate_ics_at(&[range], stamp());

        assert!(ics.contains("SUMMARY:Leap\\, year\\; stay\\né"), "ICS:\n{}", ics);
        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "line too long ({}): {}", line.len(), line);
        }
        assert!(ics.split("\r\n").any(|line| line.starts_with(" é")), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_drops_carriage_returns_from_summary() {
        let range = make_range("abc", date(2025, 7, 10), date(2025, 7, 10), "Late\r check-in");

        let ics = generate_ics_at(&[range], stamp());

        assert!(ics.contains("SUMMARY:Late check-in\r\n"), "ICS:\n{}", ics);
    }

    #[test_log::test]
    fn test_generate_skips_range_without_four_digit_checkout() {
        let last_night = make_range("edge", date(9999, 12, 30), date(9999, 12, 31), "x");
        let kept = make_range("kept", date(9999, 12, 29), date(9999, 12, 30), "y");

        let ics = generate_ics_at(&[last_night, kept.clone()], stamp());

        assert!(!ics.contains("UID:edge"), "ICS:\n{}", ics);
        assert!(!ics.contains('+'), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND;VALUE=DATE:99991231\r\n"));
        assert_eq!(parse_ics(&ics, &mut SequentialIds::new("gen")), vec![kept]);
    }
}
