use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(FromRow, Clone, Debug, PartialEq)]
pub struct Enrollment {
	pub uuid: Uuid,
	pub student_uuid: Uuid,
	pub course_id: i64,
	pub course_name: String,
	pub course_description: String,
	pub progress_percent: f64,
	pub status: EnrollmentStatus,
	pub enrolled_at: NaiveDateTime,
}

#[derive(sqlx::Type, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
	Active,
	Completed,
}

#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct NewEnrollment {
	pub student_uuid: Uuid,
	pub course_id: i64,
	#[builder(setter(into))]
	pub course_name: String,
	#[builder(default, setter(into))]
	pub course_description: String,
	pub enrolled_at: NaiveDateTime,
}

#[derive(FromRow, Clone, Debug, PartialEq)]
pub struct QuizAttempt {
	pub uuid: Uuid,
	pub student_uuid: Uuid,
	pub course_id: i64,
	pub quiz_title: String,
	/// Decimal fraction serialized to text, parsed with a zero fallback.
	pub score: String,
	/// Percent threshold; `None` means the platform default of 70.
	pub passing_score: Option<i64>,
	pub completed_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct NewQuizAttempt {
	pub student_uuid: Uuid,
	pub course_id: i64,
	#[builder(setter(into))]
	pub quiz_title: String,
	#[builder(setter(into))]
	pub score: String,
	#[builder(default)]
	pub passing_score: Option<i64>,
	pub completed_at: NaiveDateTime,
}

#[derive(FromRow, Clone, Debug, PartialEq)]
pub struct AudioProgress {
	pub student_uuid: Uuid,
	pub chapter: String,
	pub position_seconds: f64,
	pub updated_at: NaiveDateTime,
}
