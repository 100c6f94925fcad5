use crate::playback::session::{PlaybackSession, SessionError};
use crate::playback::state::MediaEvent;
use chrono::Duration;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// All currently open playback sessions, one per open chapter page.
///
/// Control operations on a session that no longer exists (page already torn
/// down, session swept) are silent no-ops and return `None`; a media-element
/// callback that arrives late must never be an error.
pub struct SessionRegistry {
	limit: usize,
	sessions: RwLock<HashMap<Uuid, PlaybackSession>>,
}

impl SessionRegistry {
	pub fn new(limit: usize) -> Self {
		Self {
			limit,
			sessions: RwLock::new(HashMap::new()),
		}
	}

	pub fn open(
		&self,
		student: Uuid,
		chapter: &str,
		audio_source: String,
		resume_position: Duration,
	) -> Result<PlaybackSession, SessionError> {
		if chapter.trim().is_empty() {
			return Err(SessionError::EmptyChapterSlug);
		}

		let mut sessions = self.sessions.write();
		if sessions.len() >= self.limit {
			return Err(SessionError::RegistryFull);
		}

		let session = PlaybackSession::new(student, chapter.trim().to_string(), audio_source, resume_position);
		sessions.insert(session.id, session.clone());
		Ok(session)
	}

	pub fn get(&self, id: Uuid) -> Option<PlaybackSession> {
		self.sessions.read().get(&id).cloned()
	}

	pub fn toggle_play_pause(&self, id: Uuid) -> Option<PlaybackSession> {
		self.update(id, |session| {
			session.state.toggle_play_pause();
		})
	}

	pub fn skip(&self, id: Uuid, delta: Duration) -> Option<PlaybackSession> {
		self.update(id, |session| session.state.skip(delta))
	}

	pub fn seek_to(&self, id: Uuid, position: Duration) -> Option<PlaybackSession> {
		self.update(id, |session| session.state.seek_to(position))
	}

	pub fn set_volume(&self, id: Uuid, level: f64) -> Option<PlaybackSession> {
		self.update(id, |session| session.state.set_volume(level))
	}

	pub fn apply_media_event(&self, id: Uuid, event: MediaEvent) -> Option<PlaybackSession> {
		self.update(id, |session| session.state.apply(event))
	}

	/// Tears the session down and returns its final state so the caller can
	/// persist the resume position.
	pub fn close(&self, id: Uuid) -> Option<PlaybackSession> {
		self.sessions.write().remove(&id)
	}

	/// Removes every session without activity for `timeout` and returns them
	/// for persistence.
	pub fn close_idle(&self, timeout: std::time::Duration) -> Vec<PlaybackSession> {
		let mut sessions = self.sessions.write();
		let idle_ids: Vec<_> = sessions
			.values()
			.filter(|session| session.is_idle(timeout))
			.map(|session| session.id)
			.collect();

		idle_ids
			.into_iter()
			.filter_map(|id| sessions.remove(&id))
			.collect()
	}

	pub fn len(&self) -> usize {
		self.sessions.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.sessions.read().is_empty()
	}

	fn update(&self, id: Uuid, operation: impl FnOnce(&mut PlaybackSession)) -> Option<PlaybackSession> {
		let mut sessions = self.sessions.write();
		let session = sessions.get_mut(&id)?;
		operation(session);
		session.touch();
		Some(session.clone())
	}
}
