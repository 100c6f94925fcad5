use crate::playback::state::PlaybackState;
use chrono::Duration;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

/// One page's audiobook player. Created when a chapter page mounts, torn down
/// when the page unmounts or the session goes idle.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSession {
	pub id: Uuid,
	pub student: Uuid,
	pub chapter: String,
	pub audio_source: String,
	pub state: PlaybackState,
	last_activity: Instant,
}

impl PlaybackSession {
	pub fn new(student: Uuid, chapter: String, audio_source: String, resume_position: Duration) -> Self {
		Self {
			id: Uuid::new_v4(),
			student,
			chapter,
			audio_source,
			state: PlaybackState::seeded(resume_position),
			last_activity: Instant::now(),
		}
	}

	pub fn touch(&mut self) {
		self.last_activity = Instant::now();
	}

	pub fn is_idle(&self, timeout: std::time::Duration) -> bool {
		self.last_activity.elapsed() >= timeout
	}
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
	#[error("Chapter slug was empty or whitespace-only.")]
	EmptyChapterSlug,
	#[error("Can't open another player, the session limit is reached.")]
	RegistryFull,
}
