use crate::store::error::StoreError;
use crate::store::models::{AudioProgress, Enrollment, NewEnrollment, NewQuizAttempt, QuizAttempt};
use async_trait::async_trait;
use static_assertions::assert_obj_safe;
use uuid::Uuid;

pub mod error;
pub mod models;
pub mod sqlite;

#[async_trait]
pub trait Store: Send + Sync {
	/// Every enrollment of a student, newest first.
	async fn student_enrollments(&self, student: Uuid) -> Result<Vec<Enrollment>, StoreError>;
	async fn create_enrollment(&self, enrollment: NewEnrollment) -> Result<Enrollment, StoreError>;
	/// Every quiz attempt of a student, most recent first. The grade
	/// aggregation relies on this order and never sorts itself.
	async fn student_quiz_attempts(&self, student: Uuid) -> Result<Vec<QuizAttempt>, StoreError>;
	async fn record_quiz_attempt(&self, attempt: NewQuizAttempt) -> Result<QuizAttempt, StoreError>;
	/// The saved listening position for a chapter, if there is one.
	async fn audio_progress(&self, student: Uuid, chapter: &str) -> Result<Option<AudioProgress>, StoreError>;
	async fn save_audio_progress(
		&self,
		student: Uuid,
		chapter: &str,
		position_seconds: f64,
	) -> Result<(), StoreError>;
}

assert_obj_safe!(Store);
