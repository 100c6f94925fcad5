use crate::grades::summary::{CourseGradeSummary, OverallStatistics};
use crate::playback::duration_to_seconds;
use crate::playback::format_time;
use crate::playback::session::PlaybackSession;
use crate::playback::state::MediaEvent;
use crate::schedule::EventKind;
use crate::store::models::{Enrollment, EnrollmentStatus, QuizAttempt};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct StudentQuery {
	pub student: Uuid,
}

#[derive(Deserialize)]
pub struct CreateEnrollmentRequest {
	pub student: Uuid,
	pub course_id: i64,
	pub course_name: String,
	#[serde(default)]
	pub course_description: String,
}

/// Quiz submissions come from the quiz page. The score arrives as a decimal
/// fraction and historically shows up both as a number and as a string;
/// anything else counts as zero downstream.
#[derive(Deserialize)]
pub struct SubmitQuizAttemptRequest {
	pub student: Uuid,
	pub course_id: i64,
	#[serde(default)]
	pub quiz_title: String,
	#[serde(default = "default_score", deserialize_with = "score_from_json")]
	pub score: String,
	#[serde(default)]
	pub passing_score: Option<i64>,
	#[serde(default)]
	pub completed_at: Option<NaiveDateTime>,
}

fn default_score() -> String {
	"0".to_string()
}

fn score_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	Ok(match value {
		serde_json::Value::String(text) => text,
		serde_json::Value::Number(number) => number.to_string(),
		_ => default_score(),
	})
}

#[derive(Deserialize)]
pub struct OpenPlaybackSessionRequest {
	pub student: Uuid,
	pub chapter: String,
}

#[derive(Deserialize)]
pub struct SkipRequest {
	#[serde(default)]
	pub delta_seconds: f64,
}

#[derive(Deserialize)]
pub struct SeekRequest {
	#[serde(default)]
	pub position_seconds: f64,
}

#[derive(Deserialize)]
pub struct VolumeRequest {
	pub level: f64,
}

#[derive(Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MediaEventRequest {
	MetadataLoaded {
		#[serde(default)]
		duration_seconds: f64,
	},
	TimeUpdate {
		#[serde(default)]
		position_seconds: f64,
	},
	Ended,
}

impl From<MediaEventRequest> for MediaEvent {
	fn from(request: MediaEventRequest) -> Self {
		match request {
			MediaEventRequest::MetadataLoaded { duration_seconds } => MediaEvent::MetadataLoaded { duration_seconds },
			MediaEventRequest::TimeUpdate { position_seconds } => MediaEvent::TimeUpdate { position_seconds },
			MediaEventRequest::Ended => MediaEvent::Ended,
		}
	}
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CourseResponse {
	pub id: i64,
	pub name: String,
	pub description: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct EnrollmentResponse {
	pub id: Uuid,
	pub course: CourseResponse,
	pub progress_percent: f64,
	pub status: EnrollmentStatus,
	pub enrolled_at: NaiveDateTime,
}

impl From<Enrollment> for EnrollmentResponse {
	fn from(enrollment: Enrollment) -> Self {
		Self {
			id: enrollment.uuid,
			course: CourseResponse {
				id: enrollment.course_id,
				name: enrollment.course_name,
				description: enrollment.course_description,
			},
			progress_percent: enrollment.progress_percent,
			status: enrollment.status,
			enrolled_at: enrollment.enrolled_at,
		}
	}
}

#[derive(Serialize, Debug, PartialEq)]
pub struct QuizAttemptResponse {
	pub id: Uuid,
	pub course_id: i64,
	pub quiz_title: String,
	pub score: String,
	pub score_percent: f64,
	pub passing_score: Option<i64>,
	pub passed: bool,
	pub completed_at: NaiveDateTime,
}

impl From<QuizAttempt> for QuizAttemptResponse {
	fn from(attempt: QuizAttempt) -> Self {
		let score_percent = attempt.score_percent();
		let passed = attempt.is_passed();
		Self {
			id: attempt.uuid,
			course_id: attempt.course_id,
			quiz_title: attempt.quiz_title,
			score: attempt.score,
			score_percent,
			passing_score: attempt.passing_score,
			passed,
			completed_at: attempt.completed_at,
		}
	}
}

#[derive(Serialize, Debug, PartialEq)]
pub struct GpaResponse {
	pub gpa: f64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct GradesDashboardResponse {
	pub overall: OverallStatistics,
	pub courses: Vec<CourseGradesResponse>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CourseGradesResponse {
	pub course: CourseResponse,
	pub progress_percent: f64,
	pub status: EnrollmentStatus,
	pub summary: CourseGradeSummary,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ScheduleResponse {
	pub weekly: Vec<WeeklyCountdownResponse>,
	pub special: Vec<SpecialCountdownResponse>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct WeeklyCountdownResponse {
	pub title: String,
	pub kind: Option<EventKind>,
	pub countdown: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SpecialCountdownResponse {
	pub id: u32,
	pub title: String,
	pub starts_at: String,
	pub countdown: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct PlaybackSessionResponse {
	pub id: Uuid,
	pub chapter: String,
	pub audio_source: String,
	pub playing: bool,
	pub position_seconds: f64,
	pub duration_seconds: f64,
	pub volume: f64,
	/// Formatted for the player's time labels, e.g. "1:15".
	pub elapsed: String,
	pub total: String,
}

impl From<PlaybackSession> for PlaybackSessionResponse {
	fn from(session: PlaybackSession) -> Self {
		let position_seconds = duration_to_seconds(session.state.position());
		let duration_seconds = duration_to_seconds(session.state.duration());
		Self {
			id: session.id,
			chapter: session.chapter,
			audio_source: session.audio_source,
			playing: session.state.is_playing(),
			position_seconds,
			duration_seconds,
			volume: session.state.volume(),
			elapsed: format_time(position_seconds),
			total: format_time(duration_seconds),
		}
	}
}
