use chrono::{Duration, Local, NaiveDateTime};
use parking_lot::RwLock;
use std::sync::Arc;

/// Wall-clock handle.
///
/// The default clock reads the system time. The fixed variant serves a
/// controllable instant so countdown and visibility logic can be tested
/// deterministically.
#[derive(Clone, Default)]
pub struct Clock {
	fixed_now: Option<Arc<RwLock<NaiveDateTime>>>,
}

impl Clock {
	pub fn fixed(now: NaiveDateTime) -> Self {
		Self {
			fixed_now: Some(Arc::new(RwLock::new(now))),
		}
	}

	pub fn now(&self) -> NaiveDateTime {
		match &self.fixed_now {
			None => Local::now().naive_local(),
			Some(now) => *now.read(),
		}
	}

	pub fn advance(&self, by_duration: Duration) {
		let now = self.fixed_now.as_ref().expect("Can only be called in test mode.");
		*now.write() += by_duration;
	}
}
