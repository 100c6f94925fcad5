use crate::playback::seconds_to_duration;
use chrono::Duration;

/// Server-side mirror of one chapter page's media element: the current
/// position, the duration once metadata has loaded, whether playback is
/// running and the volume level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
	position: Duration,
	duration: Option<Duration>,
	playing: bool,
	volume: f64,
}

/// Callbacks reported by the media element. They arrive at unpredictable
/// times relative to user input, including after the page is gone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEvent {
	MetadataLoaded { duration_seconds: f64 },
	TimeUpdate { position_seconds: f64 },
	Ended,
}

impl Default for PlaybackState {
	fn default() -> Self {
		Self {
			position: Duration::zero(),
			duration: None,
			playing: false,
			volume: 1.0,
		}
	}
}

impl PlaybackState {
	/// State for a freshly opened player, starting at a saved resume position.
	pub fn seeded(position: Duration) -> Self {
		Self {
			position: position.max(Duration::zero()),
			..Self::default()
		}
	}

	pub fn toggle_play_pause(&mut self) -> bool {
		self.playing = !self.playing;
		self.playing
	}

	/// Moves the position by `delta`, clamped between the start and the end of
	/// the medium. An unknown duration clamps to the start, like a media
	/// element that has not loaded its metadata yet.
	pub fn skip(&mut self, delta: Duration) {
		let end = self.duration.unwrap_or_else(Duration::zero);
		self.position = (self.position + delta).max(Duration::zero()).min(end);
	}

	/// Absolute jump from the progress slider. The slider already limits the
	/// value to the medium, so no further clamping happens here.
	pub fn seek_to(&mut self, position: Duration) {
		self.position = position;
	}

	pub fn set_volume(&mut self, level: f64) {
		if !level.is_finite() {
			return;
		}
		self.volume = level.clamp(0.0, 1.0);
	}

	pub fn apply(&mut self, event: MediaEvent) {
		match event {
			MediaEvent::MetadataLoaded { duration_seconds } => {
				self.duration = Some(seconds_to_duration(duration_seconds));
			}
			MediaEvent::TimeUpdate { position_seconds } => {
				self.position = seconds_to_duration(position_seconds);
			}
			MediaEvent::Ended => {
				self.playing = false;
			}
		}
	}

	pub fn position(&self) -> Duration {
		self.position
	}

	/// Duration of the medium, zero until the metadata-loaded event arrived.
	pub fn duration(&self) -> Duration {
		self.duration.unwrap_or_else(Duration::zero)
	}

	pub fn is_playing(&self) -> bool {
		self.playing
	}

	pub fn volume(&self) -> f64 {
		self.volume
	}
}
