use chrono::Duration;

pub mod registry;
pub mod session;
pub mod state;

/// Formats a playback position the way the player UI shows it: `"M:SS"` with
/// zero-padded seconds. Anything that is not a finite, non-negative number of
/// seconds renders as `"0:00"`.
pub fn format_time(seconds: f64) -> String {
	if !seconds.is_finite() || seconds < 0.0 {
		return "0:00".to_string();
	}

	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let whole_seconds = seconds as u64;
	format!("{}:{:02}", whole_seconds / 60, whole_seconds % 60)
}

/// Converts a seconds value reported by a media element into a duration.
/// Non-finite and negative values count as zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
	if !seconds.is_finite() || seconds <= 0.0 {
		return Duration::zero();
	}

	#[allow(clippy::cast_possible_truncation)]
	let milliseconds = (seconds * 1000.0) as i64;
	Duration::milliseconds(milliseconds)
}

/// Converts a signed seconds value (skip deltas) into a duration.
/// Non-finite values count as zero.
pub fn signed_seconds_to_duration(seconds: f64) -> Duration {
	if !seconds.is_finite() {
		return Duration::zero();
	}

	#[allow(clippy::cast_possible_truncation)]
	let milliseconds = (seconds * 1000.0) as i64;
	Duration::milliseconds(milliseconds)
}

#[allow(clippy::cast_precision_loss)]
pub fn duration_to_seconds(duration: Duration) -> f64 {
	duration.num_milliseconds() as f64 / 1000.0
}
