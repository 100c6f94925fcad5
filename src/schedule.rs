use serde::Serialize;

pub mod countdown;
pub mod special;
pub mod weekly;

/// The fixed weekly service slots. The schedule itself never changes at
/// runtime; only "now" does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EventKind {
	#[serde(rename = "sunday-1900")]
	Sunday1900,
	#[serde(rename = "monday-1900")]
	Monday1900,
	#[serde(rename = "wednesday-2000")]
	Wednesday2000,
	#[serde(rename = "thursday-2030")]
	Thursday2030,
	#[serde(rename = "saturday-1000")]
	Saturday1000,
}

/// A recurring service as shown on the events page. Entries without a slot
/// have no published schedule yet and render as "Contact for schedule".
pub struct WeeklyService {
	pub title: &'static str,
	pub kind: Option<EventKind>,
}

pub const WEEKLY_SERVICES: &[WeeklyService] = &[
	WeeklyService {
		title: "Sunday Worship Service",
		kind: Some(EventKind::Sunday1900),
	},
	WeeklyService {
		title: "Monday Choir Practice",
		kind: Some(EventKind::Monday1900),
	},
	WeeklyService {
		title: "Wednesday Midweek Service",
		kind: Some(EventKind::Wednesday2000),
	},
	WeeklyService {
		title: "Thursday Bible Study",
		kind: Some(EventKind::Thursday2030),
	},
	WeeklyService {
		title: "Saturday Homeless Ministry",
		kind: Some(EventKind::Saturday1000),
	},
	WeeklyService {
		title: "Women's Bible Study",
		kind: None,
	},
];
