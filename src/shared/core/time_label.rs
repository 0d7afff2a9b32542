use chrono::NaiveTime;

pub const UNSPECIFIED_TIME: &str = "unspecified";

pub fn parse_time_slot(time_slot: &str) -> Option<NaiveTime> {
    let trimmed = time_slot.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

/// Formats a `HH:MM[:SS]` slot as a 12-hour label, e.g. `14:00` -> `2:00 PM`.
pub fn time_label(time_slot: &str) -> String {
    match parse_time_slot(time_slot) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => UNSPECIFIED_TIME.to_string(),
    }
}

/// `group - time`, skipping whichever half is missing.
pub fn group_time_label(group_name: &str, time_slot: &str) -> String {
    let time = parse_time_slot(time_slot).map(|_| time_label(time_slot));
    let parts: Vec<String> = [Some(group_name.trim().to_string()), time]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" - ")
    }
}
