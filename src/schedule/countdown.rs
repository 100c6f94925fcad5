use crate::schedule::EventKind;
use crate::schedule::special::SpecialEvent;
use chrono::{Duration, NaiveDateTime};

/// The countdown string for a weekly service, recomputed from `now` on every
/// call. A service without a published slot renders the contact hint.
pub fn weekly_countdown(kind: Option<EventKind>, now: NaiveDateTime) -> String {
	let Some(kind) = kind else {
		return "Contact for schedule".to_string();
	};

	let delta = kind.rule().next_occurrence(now) - now;
	format_weekly_delta(delta)
}

fn format_weekly_delta(delta: Duration) -> String {
	if delta <= Duration::zero() {
		return "Happening now!".to_string();
	}

	let days = delta.num_days();
	let hours = delta.num_hours() % 24;
	let minutes = delta.num_minutes() % 60;

	if days > 0 {
		format!("{days}d {hours}h")
	} else if hours > 0 {
		format!("{hours}h {minutes}m")
	} else {
		format!("{minutes}m")
	}
}

/// The countdown string for a dated special event. Unknown ids and events
/// without a parseable date are still being announced.
pub fn special_countdown(events: &[SpecialEvent], id: u32, now: NaiveDateTime) -> String {
	let Some(start) = events
		.iter()
		.find(|event| event.id == id)
		.and_then(SpecialEvent::parsed_start)
	else {
		return "Coming soon".to_string();
	};

	let delta = start - now;
	if delta <= Duration::zero() {
		return "Event passed".to_string();
	}

	let days = delta.num_days();
	let hours = delta.num_hours() % 24;

	if days > 0 {
		format!("{days}d {hours}h")
	} else {
		format!("{hours}h")
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn at(text: &str) -> NaiveDateTime {
		NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").expect("Invalid test timestamp")
	}

	fn events() -> Vec<SpecialEvent> {
		vec![
			SpecialEvent {
				id: 5,
				title: "School of Ministry Launch".to_string(),
				starts_at: "2025-08-01 00:00".to_string(),
			},
			SpecialEvent {
				id: 7,
				title: "Marriage Conference".to_string(),
				starts_at: "2025-08-27 09:00".to_string(),
			},
			SpecialEvent {
				id: 9,
				title: "Ordination Service".to_string(),
				starts_at: "Fall 2025".to_string(),
			},
		]
	}

	#[test]
	fn should_render_days_and_hours_for_long_waits() {
		// Tuesday noon, next Sunday service is in 5 days and 7 hours
		assert_eq!(
			"5d 7h",
			weekly_countdown(Some(EventKind::Sunday1900), at("2025-08-05 12:00:00"))
		);
	}

	#[test]
	fn should_render_one_day_one_hour_for_a_twentyfive_hour_wait() {
		// Saturday 18:00, Sunday service starts 25 hours later
		assert_eq!(
			"1d 1h",
			weekly_countdown(Some(EventKind::Sunday1900), at("2025-08-02 18:00:00"))
		);
	}

	#[test]
	fn should_render_hours_and_minutes_below_a_day() {
		// Sunday 17:30, 90 minutes before the service
		assert_eq!(
			"1h 30m",
			weekly_countdown(Some(EventKind::Sunday1900), at("2025-08-03 17:30:00"))
		);
	}

	#[test]
	fn should_render_whole_minutes_below_an_hour() {
		assert_eq!(
			"5m",
			weekly_countdown(Some(EventKind::Sunday1900), at("2025-08-03 18:55:00"))
		);
	}

	#[test]
	fn should_render_zero_minutes_for_sub_minute_waits() {
		assert_eq!(
			"0m",
			weekly_countdown(Some(EventKind::Sunday1900), at("2025-08-03 18:59:15"))
		);
	}

	#[test]
	fn sunday_service_at_the_exact_start_should_be_happening_now() {
		assert_eq!(
			"Happening now!",
			weekly_countdown(Some(EventKind::Sunday1900), at("2025-08-03 19:00:00"))
		);
	}

	#[test]
	fn services_without_a_slot_should_point_at_the_office() {
		assert_eq!("Contact for schedule", weekly_countdown(None, at("2025-08-03 12:00:00")));
	}

	#[test]
	fn special_events_should_count_down_in_days_and_hours() {
		assert_eq!("21d 21h", special_countdown(&events(), 7, at("2025-08-05 12:00:00")));
	}

	#[test]
	fn special_events_on_the_same_day_should_count_down_in_hours() {
		assert_eq!("9h", special_countdown(&events(), 7, at("2025-08-27 00:00:00")));
	}

	#[test]
	fn passed_special_events_should_say_so() {
		assert_eq!("Event passed", special_countdown(&events(), 5, at("2025-08-05 12:00:00")));
	}

	#[test]
	fn unknown_special_events_should_be_coming_soon() {
		assert_eq!("Coming soon", special_countdown(&events(), 999, at("2025-08-05 12:00:00")));
	}

	#[test]
	fn special_events_without_a_parseable_date_should_be_coming_soon() {
		assert_eq!("Coming soon", special_countdown(&events(), 9, at("2025-08-05 12:00:00")));
	}
}
