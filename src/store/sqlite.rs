use crate::store::Store;
use crate::store::error::{IntoStoreResult, StoreError};
use crate::store::models::{AudioProgress, Enrollment, NewEnrollment, NewQuizAttempt, QuizAttempt};
use async_trait::async_trait;
use sqlx::{SqlitePool, migrate, query, query_as};
use uuid::Uuid;

#[derive(Clone)]
pub struct SqliteStore {
	pool: SqlitePool,
}

impl SqliteStore {
	pub async fn new(database_url: &str) -> Result<Self, StoreError> {
		let pool = SqlitePool::connect(database_url)
			.await
			.connection_error("Failed to connect to database")?;
		let store = Self { pool };
		store.migrate().await?;

		Ok(store)
	}

	async fn migrate(&self) -> Result<(), StoreError> {
		migrate!().run(&self.pool).await.map_err(Into::into)
	}
}

#[async_trait]
impl Store for SqliteStore {
	async fn student_enrollments(&self, student: Uuid) -> Result<Vec<Enrollment>, StoreError> {
		query_as(
			r"SELECT * FROM enrollment
			WHERE student_uuid = ?1
			ORDER BY enrolled_at DESC",
		)
		.bind(student)
		.fetch_all(&self.pool)
		.await
		.map_err(Into::into)
	}

	async fn create_enrollment(
		&self,
		NewEnrollment {
			student_uuid,
			course_id,
			course_name,
			course_description,
			enrolled_at,
		}: NewEnrollment,
	) -> Result<Enrollment, StoreError> {
		let uuid = Uuid::new_v4();
		query_as(
			r"INSERT INTO enrollment (uuid, student_uuid, course_id, course_name, course_description, enrolled_at)
			VALUES (?1, ?2, ?3, ?4, ?5, ?6)
			RETURNING
				uuid,
				student_uuid,
				course_id,
				course_name,
				course_description,
				progress_percent,
				status,
				enrolled_at",
		)
		.bind(uuid)
		.bind(student_uuid)
		.bind(course_id)
		.bind(course_name)
		.bind(course_description)
		.bind(enrolled_at)
		.fetch_one(&self.pool)
		.await
		.map_err(Into::into)
	}

	async fn student_quiz_attempts(&self, student: Uuid) -> Result<Vec<QuizAttempt>, StoreError> {
		query_as(
			r"SELECT * FROM quiz_attempt
			WHERE student_uuid = ?1
			ORDER BY completed_at DESC",
		)
		.bind(student)
		.fetch_all(&self.pool)
		.await
		.map_err(Into::into)
	}

	async fn record_quiz_attempt(
		&self,
		NewQuizAttempt {
			student_uuid,
			course_id,
			quiz_title,
			score,
			passing_score,
			completed_at,
		}: NewQuizAttempt,
	) -> Result<QuizAttempt, StoreError> {
		let uuid = Uuid::new_v4();
		query_as(
			r"INSERT INTO quiz_attempt (uuid, student_uuid, course_id, quiz_title, score, passing_score, completed_at)
			VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
			RETURNING
				uuid,
				student_uuid,
				course_id,
				quiz_title,
				score,
				passing_score,
				completed_at",
		)
		.bind(uuid)
		.bind(student_uuid)
		.bind(course_id)
		.bind(quiz_title)
		.bind(score)
		.bind(passing_score)
		.bind(completed_at)
		.fetch_one(&self.pool)
		.await
		.map_err(Into::into)
	}

	async fn audio_progress(&self, student: Uuid, chapter: &str) -> Result<Option<AudioProgress>, StoreError> {
		query_as(
			r"SELECT * FROM audio_progress
			WHERE student_uuid = ?1 AND chapter = ?2",
		)
		.bind(student)
		.bind(chapter)
		.fetch_optional(&self.pool)
		.await
		.map_err(Into::into)
	}

	async fn save_audio_progress(
		&self,
		student: Uuid,
		chapter: &str,
		position_seconds: f64,
	) -> Result<(), StoreError> {
		let updated_at = chrono::Local::now().naive_local();
		query(
			r"INSERT INTO audio_progress (student_uuid, chapter, position_seconds, updated_at)
			VALUES (?1, ?2, ?3, ?4)
			ON CONFLICT (student_uuid, chapter) DO UPDATE SET
				position_seconds = excluded.position_seconds,
				updated_at = excluded.updated_at",
		)
		.bind(student)
		.bind(chapter)
		.bind(position_seconds)
		.bind(updated_at)
		.execute(&self.pool)
		.await?;

		Ok(())
	}
}
