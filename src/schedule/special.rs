use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// A dated special event from the configuration table.
///
/// `starts_at` is kept as the configured text. Recurring entries ("Every
/// Sunday") and entries whose date does not parse never count as past, so a
/// broken date keeps an event visible instead of hiding it.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SpecialEvent {
	pub id: u32,
	pub title: String,
	pub starts_at: String,
}

impl SpecialEvent {
	/// The parsed start instant, if the configured text is an actual date.
	/// Accepts `2025-08-27 09:00` and bare dates, which start at midnight.
	pub fn parsed_start(&self) -> Option<NaiveDateTime> {
		let text = self.starts_at.trim();

		NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M")
			.ok()
			.or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok())
			.or_else(|| {
				NaiveDate::parse_from_str(text, "%Y-%m-%d")
					.ok()
					.map(|date| date.and_time(chrono::NaiveTime::MIN))
			})
	}

	/// Whether the event's day is already over. Events stay visible through
	/// the end of their starting day.
	pub fn is_past(&self, now: NaiveDateTime) -> bool {
		if self.starts_at.to_lowercase().contains("every") {
			return false;
		}

		match self.parsed_start() {
			Some(start) => start.date() < now.date(),
			None => false,
		}
	}
}
