use crate::schedule::EventKind;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};

/// Whether an instant exactly at the target time still counts as "today".
///
/// The Sunday service keeps the inclusive behavior the platform always had;
/// every other slot rolls over to next week at the stroke of its start time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
	Inclusive,
	Exclusive,
}

/// A weekly recurrence rule: weekday plus time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeeklyEventRule {
	pub weekday: Weekday,
	pub hour: u32,
	pub minute: u32,
	pub boundary: Boundary,
}

impl EventKind {
	pub fn rule(self) -> WeeklyEventRule {
		use EventKind::*;
		match self {
			Sunday1900 => WeeklyEventRule {
				weekday: Weekday::Sun,
				hour: 19,
				minute: 0,
				boundary: Boundary::Inclusive,
			},
			Monday1900 => WeeklyEventRule {
				weekday: Weekday::Mon,
				hour: 19,
				minute: 0,
				boundary: Boundary::Exclusive,
			},
			Wednesday2000 => WeeklyEventRule {
				weekday: Weekday::Wed,
				hour: 20,
				minute: 0,
				boundary: Boundary::Exclusive,
			},
			Thursday2030 => WeeklyEventRule {
				weekday: Weekday::Thu,
				hour: 20,
				minute: 30,
				boundary: Boundary::Exclusive,
			},
			Saturday1000 => WeeklyEventRule {
				weekday: Weekday::Sat,
				hour: 10,
				minute: 0,
				boundary: Boundary::Exclusive,
			},
		}
	}
}

impl WeeklyEventRule {
	fn target_time(&self) -> NaiveTime {
		NaiveTime::from_hms_opt(self.hour, self.minute, 0).expect("Weekly rules only carry valid times of day.")
	}

	/// The next occurrence of this rule at or after `now`.
	///
	/// Same weekday with the time of day still ahead (or exactly reached, for
	/// an inclusive rule) means today; otherwise the day difference is taken
	/// modulo one week, with zero mapping to a full week ahead.
	pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
		let target = self.target_time();
		let today = now.date();

		let still_today = match self.boundary {
			Boundary::Inclusive => now.time() <= target,
			Boundary::Exclusive => now.time() < target,
		};
		if today.weekday() == self.weekday && still_today {
			return today.and_time(target);
		}

		let target_weekday = i64::from(self.weekday.num_days_from_sunday());
		let current_weekday = i64::from(today.weekday().num_days_from_sunday());
		let days_until = match (target_weekday - current_weekday).rem_euclid(7) {
			0 => 7,
			days => days,
		};

		(today + Duration::days(days_until)).and_time(target)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn at(text: &str) -> NaiveDateTime {
		NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").expect("Invalid test timestamp")
	}

	#[test]
	fn should_pick_today_when_the_target_time_is_still_ahead() {
		// 2025-08-03 is a Sunday
		let next = EventKind::Sunday1900.rule().next_occurrence(at("2025-08-03 12:00:00"));

		assert_eq!(at("2025-08-03 19:00:00"), next);
	}

	#[test]
	fn sunday_rule_should_count_the_exact_start_time_as_today() {
		let next = EventKind::Sunday1900.rule().next_occurrence(at("2025-08-03 19:00:00"));

		assert_eq!(at("2025-08-03 19:00:00"), next);
	}

	#[test]
	fn monday_rule_should_roll_over_at_the_exact_start_time() {
		// 2025-08-04 is a Monday
		let next = EventKind::Monday1900.rule().next_occurrence(at("2025-08-04 19:00:00"));

		assert_eq!(at("2025-08-11 19:00:00"), next);
	}

	#[test]
	fn should_move_to_next_week_once_the_target_time_has_passed() {
		let next = EventKind::Sunday1900.rule().next_occurrence(at("2025-08-03 19:00:01"));

		assert_eq!(at("2025-08-10 19:00:00"), next);
	}

	#[test]
	fn should_count_forward_to_a_later_weekday() {
		// Monday towards Wednesday 20:00
		let next = EventKind::Wednesday2000.rule().next_occurrence(at("2025-08-04 09:00:00"));

		assert_eq!(at("2025-08-06 20:00:00"), next);
	}

	#[test]
	fn should_wrap_around_the_week_for_an_earlier_weekday() {
		// Friday towards the Thursday slot
		let next = EventKind::Thursday2030.rule().next_occurrence(at("2025-08-08 09:00:00"));

		assert_eq!(at("2025-08-14 20:30:00"), next);
	}

	#[test]
	fn rules_with_minutes_should_respect_the_minute_boundary() {
		// Thursday 20:15 is still before the 20:30 slot
		let rule = EventKind::Thursday2030.rule();

		assert_eq!(at("2025-08-07 20:30:00"), rule.next_occurrence(at("2025-08-07 20:15:00")));
		assert_eq!(at("2025-08-14 20:30:00"), rule.next_occurrence(at("2025-08-07 20:30:00")));
	}

	#[test]
	fn saturday_rule_should_roll_over_after_ten_in_the_morning() {
		// 2025-08-09 is a Saturday
		let next = EventKind::Saturday1000.rule().next_occurrence(at("2025-08-09 10:00:30"));

		assert_eq!(at("2025-08-16 10:00:00"), next);
	}
}
