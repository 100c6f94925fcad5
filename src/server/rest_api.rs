use crate::context::ApplicationContext;
use crate::grades::summary::{CourseGradeSummary, OverallStatistics, grade_point_average};
use crate::playback::session::SessionError;
use crate::playback::{seconds_to_duration, signed_seconds_to_duration};
use crate::schedule::WEEKLY_SERVICES;
use crate::schedule::countdown::{special_countdown, weekly_countdown};
use crate::server::persist_resume_position;
use crate::server::rest_api::error::ApiErrorResponse;
use crate::server::rest_api::models::{
	CourseGradesResponse, CourseResponse, CreateEnrollmentRequest, EnrollmentResponse, GpaResponse,
	GradesDashboardResponse, MediaEventRequest, OpenPlaybackSessionRequest, PlaybackSessionResponse,
	QuizAttemptResponse, ScheduleResponse, SeekRequest, SkipRequest, SpecialCountdownResponse, StudentQuery,
	SubmitQuizAttemptRequest, VolumeRequest, WeeklyCountdownResponse,
};
use crate::server::rest_api::response::Created;
use crate::store::models::{NewEnrollment, NewQuizAttempt};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

mod error;
mod models;
mod response;

pub fn router() -> Router<ApplicationContext> {
	Router::new()
		.route("/enrollments/student", get(student_enrollments))
		.route("/enrollments", post(create_enrollment))
		.route("/quiz-attempts/student", get(student_quiz_attempts))
		.route("/quiz-attempts", post(submit_quiz_attempt))
		.route("/analytics/gpa", get(student_gpa))
		.route("/grades/student", get(student_grades))
		.route("/schedule/countdowns", get(schedule_countdowns))
		.route("/playback/sessions", post(open_playback_session))
		.route(
			"/playback/sessions/{id}",
			get(playback_session).delete(close_playback_session),
		)
		.route("/playback/sessions/{id}/toggle", post(toggle_play_pause))
		.route("/playback/sessions/{id}/skip", post(skip))
		.route("/playback/sessions/{id}/seek", post(seek_to))
		.route("/playback/sessions/{id}/volume", post(set_volume))
		.route("/playback/sessions/{id}/media-events", post(report_media_event))
}

async fn student_enrollments(
	State(application_context): State<ApplicationContext>,
	Query(StudentQuery { student }): Query<StudentQuery>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiErrorResponse> {
	let enrollments = application_context.store.student_enrollments(student).await?;

	Ok(Json(enrollments.into_iter().map(EnrollmentResponse::from).collect()))
}

async fn create_enrollment(
	State(application_context): State<ApplicationContext>,
	Json(request): Json<CreateEnrollmentRequest>,
) -> Result<Created<Json<EnrollmentResponse>>, ApiErrorResponse> {
	let enrollment = application_context
		.store
		.create_enrollment(
			NewEnrollment::builder()
				.student_uuid(request.student)
				.course_id(request.course_id)
				.course_name(request.course_name)
				.course_description(request.course_description)
				.enrolled_at(application_context.clock.now())
				.build(),
		)
		.await?;

	Ok(Created(Json(enrollment.into())))
}

async fn student_quiz_attempts(
	State(application_context): State<ApplicationContext>,
	Query(StudentQuery { student }): Query<StudentQuery>,
) -> Result<Json<Vec<QuizAttemptResponse>>, ApiErrorResponse> {
	let attempts = application_context.store.student_quiz_attempts(student).await?;

	Ok(Json(attempts.into_iter().map(QuizAttemptResponse::from).collect()))
}

async fn submit_quiz_attempt(
	State(application_context): State<ApplicationContext>,
	Json(request): Json<SubmitQuizAttemptRequest>,
) -> Result<Created<Json<QuizAttemptResponse>>, ApiErrorResponse> {
	let completed_at = request.completed_at.unwrap_or_else(|| application_context.clock.now());
	let attempt = application_context
		.store
		.record_quiz_attempt(
			NewQuizAttempt::builder()
				.student_uuid(request.student)
				.course_id(request.course_id)
				.quiz_title(request.quiz_title)
				.score(request.score)
				.passing_score(request.passing_score)
				.completed_at(completed_at)
				.build(),
		)
		.await?;

	Ok(Created(Json(attempt.into())))
}

async fn student_gpa(
	State(application_context): State<ApplicationContext>,
	Query(StudentQuery { student }): Query<StudentQuery>,
) -> Result<Json<GpaResponse>, ApiErrorResponse> {
	let attempts = application_context.store.student_quiz_attempts(student).await?;

	Ok(Json(GpaResponse {
		gpa: grade_point_average(&attempts),
	}))
}

/// The whole grades dashboard in one request: the overall statistics header
/// plus one card per enrollment. Everything is recomputed from the stored
/// records on every call.
async fn student_grades(
	State(application_context): State<ApplicationContext>,
	Query(StudentQuery { student }): Query<StudentQuery>,
) -> Result<Json<GradesDashboardResponse>, ApiErrorResponse> {
	let enrollments = application_context.store.student_enrollments(student).await?;
	let attempts = application_context.store.student_quiz_attempts(student).await?;

	let overall = OverallStatistics::new(enrollments.len(), &attempts);
	let courses = enrollments
		.into_iter()
		.map(|enrollment| {
			let course_attempts: Vec<_> = attempts
				.iter()
				.filter(|attempt| attempt.course_id == enrollment.course_id)
				.cloned()
				.collect();

			CourseGradesResponse {
				summary: CourseGradeSummary::from_attempts(&course_attempts),
				course: CourseResponse {
					id: enrollment.course_id,
					name: enrollment.course_name,
					description: enrollment.course_description,
				},
				progress_percent: enrollment.progress_percent,
				status: enrollment.status,
			}
		})
		.collect();

	Ok(Json(GradesDashboardResponse { overall, courses }))
}

/// Countdown strings for the events page, recomputed from "now" on every
/// request so polling clients always see a live value.
async fn schedule_countdowns(State(application_context): State<ApplicationContext>) -> Json<ScheduleResponse> {
	let now = application_context.clock.now();
	let special_events = &application_context.configuration.special_events;

	let weekly = WEEKLY_SERVICES
		.iter()
		.map(|service| WeeklyCountdownResponse {
			title: service.title.to_string(),
			kind: service.kind,
			countdown: weekly_countdown(service.kind, now),
		})
		.collect();

	let special = special_events
		.iter()
		.filter(|event| !event.is_past(now))
		.map(|event| SpecialCountdownResponse {
			id: event.id,
			title: event.title.clone(),
			starts_at: event.starts_at.clone(),
			countdown: special_countdown(special_events, event.id, now),
		})
		.collect();

	Json(ScheduleResponse { weekly, special })
}

async fn open_playback_session(
	State(application_context): State<ApplicationContext>,
	Json(request): Json<OpenPlaybackSessionRequest>,
) -> Result<Created<Json<PlaybackSessionResponse>>, ApiErrorResponse> {
	let chapter = request.chapter.trim();

	// A missing or unreadable resume position degrades to starting from the
	// beginning, it never blocks the player.
	let resume_position = match application_context.store.audio_progress(request.student, chapter).await {
		Ok(progress) => progress.map_or_else(Duration::zero, |progress| {
			seconds_to_duration(progress.position_seconds)
		}),
		Err(store_error) => {
			warn!("Failed to load audio progress, starting from the beginning: {store_error}");
			Duration::zero()
		}
	};

	let audio_source = format!("{}/{chapter}.mp3", application_context.configuration.audio_base_url);

	let session = application_context
		.sessions
		.open(request.student, chapter, audio_source, resume_position)
		.map_err(|session_error| match session_error {
			SessionError::EmptyChapterSlug => ApiErrorResponse::bad_request(session_error.to_string()),
			SessionError::RegistryFull => ApiErrorResponse::service_unavailable(session_error.to_string()),
		})?;

	Ok(Created(Json(session.into())))
}

async fn playback_session(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
) -> Result<Json<PlaybackSessionResponse>, ApiErrorResponse> {
	application_context
		.sessions
		.get(session_id)
		.map(|session| Json(session.into()))
		.ok_or_else(|| ApiErrorResponse::not_found("Playback session not found"))
}

async fn close_playback_session(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
) -> StatusCode {
	if let Some(session) = application_context.sessions.close(session_id) {
		persist_resume_position(&application_context, &session).await;
	}

	StatusCode::NO_CONTENT
}

async fn toggle_play_pause(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
) -> Response {
	match application_context.sessions.toggle_play_pause(session_id) {
		Some(session) => {
			if !session.state.is_playing() {
				persist_resume_position(&application_context, &session).await;
			}
			Json(PlaybackSessionResponse::from(session)).into_response()
		}
		None => ignored(session_id),
	}
}

async fn skip(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
	Json(request): Json<SkipRequest>,
) -> Response {
	let delta = signed_seconds_to_duration(request.delta_seconds);
	match application_context.sessions.skip(session_id, delta) {
		Some(session) => Json(PlaybackSessionResponse::from(session)).into_response(),
		None => ignored(session_id),
	}
}

async fn seek_to(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
	Json(request): Json<SeekRequest>,
) -> Response {
	let position = seconds_to_duration(request.position_seconds);
	match application_context.sessions.seek_to(session_id, position) {
		Some(session) => Json(PlaybackSessionResponse::from(session)).into_response(),
		None => ignored(session_id),
	}
}

async fn set_volume(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
	Json(request): Json<VolumeRequest>,
) -> Response {
	match application_context.sessions.set_volume(session_id, request.level) {
		Some(session) => Json(PlaybackSessionResponse::from(session)).into_response(),
		None => ignored(session_id),
	}
}

async fn report_media_event(
	State(application_context): State<ApplicationContext>,
	Path(session_id): Path<Uuid>,
	Json(request): Json<MediaEventRequest>,
) -> Response {
	match application_context.sessions.apply_media_event(session_id, request.into()) {
		Some(session) => Json(PlaybackSessionResponse::from(session)).into_response(),
		None => ignored(session_id),
	}
}

/// Controls and media callbacks for torn-down sessions are silent no-ops; a
/// late time-update from a page that already navigated away must not fail.
fn ignored(session_id: Uuid) -> Response {
	debug!("Ignoring control for unknown playback session {session_id}.");
	StatusCode::NO_CONTENT.into_response()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::clock::Clock;
	use crate::configuration::Configuration;
	use crate::grades::{GradeColor, LetterGrade};
	use crate::store::models::EnrollmentStatus;
	use chrono::NaiveDateTime;

	#[tokio::test]
	async fn grades_dashboard_should_aggregate_the_students_records() {
		let application_context = application_context().await;
		let student = Uuid::new_v4();
		enroll(&application_context, student, 1, "Acts in Action").await;
		submit(&application_context, student, 1, "0.5", "2025-08-01 10:00:00").await;
		submit(&application_context, student, 1, "0.7", "2025-08-02 10:00:00").await;
		submit(&application_context, student, 1, "0.9", "2025-08-03 10:00:00").await;

		let Json(dashboard) = student_grades(
			State(application_context.clone()),
			Query(StudentQuery { student }),
		)
		.await
		.expect("Failed to fetch grades");

		assert_eq!(1, dashboard.overall.total_courses);
		assert_eq!(3, dashboard.overall.total_quizzes);
		assert_eq!(2, dashboard.overall.total_passed);
		assert!((dashboard.overall.overall_average_percent - 70.0).abs() < f64::EPSILON);
		assert!((dashboard.overall.gpa - 2.8).abs() < f64::EPSILON);

		let course = &dashboard.courses[0];
		assert_eq!("Acts in Action", course.course.name);
		assert_eq!(EnrollmentStatus::Active, course.status);
		assert_eq!(LetterGrade::C, course.summary.letter_grade);
		assert_eq!(GradeColor::Yellow, course.summary.color);
		assert!((course.summary.latest_score_percent - 90.0).abs() < f64::EPSILON);
	}

	#[tokio::test]
	async fn grades_dashboard_should_only_count_attempts_of_the_courses_they_belong_to() {
		let application_context = application_context().await;
		let student = Uuid::new_v4();
		enroll(&application_context, student, 1, "Acts in Action").await;
		enroll(&application_context, student, 2, "Don't Be a Jonah").await;
		submit(&application_context, student, 1, "1", "2025-08-01 10:00:00").await;

		let Json(dashboard) = student_grades(
			State(application_context.clone()),
			Query(StudentQuery { student }),
		)
		.await
		.expect("Failed to fetch grades");

		let jonah = dashboard
			.courses
			.iter()
			.find(|course| course.course.id == 2)
			.expect("Course card missing");
		assert_eq!(0, jonah.summary.total_quizzes);
		assert_eq!(LetterGrade::F, jonah.summary.letter_grade);
	}

	#[tokio::test]
	async fn gpa_of_a_student_without_attempts_should_be_zero() {
		let application_context = application_context().await;

		let Json(response) = student_gpa(
			State(application_context.clone()),
			Query(StudentQuery { student: Uuid::new_v4() }),
		)
		.await
		.expect("Failed to fetch GPA");

		assert!(response.gpa.abs() < f64::EPSILON);
	}

	#[tokio::test]
	async fn countdowns_should_be_computed_from_the_current_instant() {
		// The fixed test clock reads Tuesday 2025-08-05 12:00.
		let application_context = application_context().await;

		let Json(schedule) = schedule_countdowns(State(application_context.clone())).await;

		let sunday = &schedule.weekly[0];
		assert_eq!("Sunday Worship Service", sunday.title);
		assert_eq!("5d 7h", sunday.countdown);

		let womens_study = schedule.weekly.last().expect("Weekly services missing");
		assert_eq!("Contact for schedule", womens_study.countdown);
	}

	#[tokio::test]
	async fn passed_special_events_should_be_hidden_and_future_ones_counted_down() {
		let application_context = application_context().await;

		let Json(schedule) = schedule_countdowns(State(application_context.clone())).await;

		assert_eq!(1, schedule.special.len());
		assert_eq!(7, schedule.special[0].id);
		assert_eq!("21d 21h", schedule.special[0].countdown);
	}

	#[tokio::test]
	async fn playback_session_should_drive_the_player_through_its_lifecycle() {
		let application_context = application_context().await;
		let student = Uuid::new_v4();

		let Created(Json(opened)) = open_playback_session(
			State(application_context.clone()),
			Json(OpenPlaybackSessionRequest {
				student,
				chapter: "acts-in-action-cp1".to_string(),
			}),
		)
		.await
		.expect("Failed to open session");

		assert_eq!("/uploads/textbook-audio/acts-in-action-cp1.mp3", opened.audio_source);
		assert!(opened.position_seconds.abs() < f64::EPSILON);
		assert_eq!("0:00", opened.elapsed);

		report_media_event(
			State(application_context.clone()),
			Path(opened.id),
			Json(MediaEventRequest::MetadataLoaded {
				duration_seconds: 300.0,
			}),
		)
		.await;

		skip(
			State(application_context.clone()),
			Path(opened.id),
			Json(SkipRequest { delta_seconds: 15.0 }),
		)
		.await;

		let session = application_context.sessions.get(opened.id).expect("Session disappeared");
		assert_eq!(Duration::seconds(15), session.state.position());

		skip(
			State(application_context.clone()),
			Path(opened.id),
			Json(SkipRequest { delta_seconds: -30.0 }),
		)
		.await;

		let session = application_context.sessions.get(opened.id).expect("Session disappeared");
		assert_eq!(Duration::zero(), session.state.position());
	}

	#[tokio::test]
	async fn pausing_should_save_the_resume_position() {
		let application_context = application_context().await;
		let student = Uuid::new_v4();
		let session_id = open(&application_context, student, "grow-ch1").await;

		report_media_event(
			State(application_context.clone()),
			Path(session_id),
			Json(MediaEventRequest::MetadataLoaded {
				duration_seconds: 300.0,
			}),
		)
		.await;
		seek_to(
			State(application_context.clone()),
			Path(session_id),
			Json(SeekRequest { position_seconds: 42.0 }),
		)
		.await;

		// play, then pause
		toggle_play_pause(State(application_context.clone()), Path(session_id)).await;
		toggle_play_pause(State(application_context.clone()), Path(session_id)).await;

		let progress = application_context
			.store
			.audio_progress(student, "grow-ch1")
			.await
			.expect("Failed to fetch progress")
			.expect("Progress not saved");
		assert!((progress.position_seconds - 42.0).abs() < f64::EPSILON);
	}

	#[tokio::test]
	async fn closing_should_save_the_resume_position_and_seed_the_next_session() {
		let application_context = application_context().await;
		let student = Uuid::new_v4();
		let session_id = open(&application_context, student, "grow-ch1").await;

		report_media_event(
			State(application_context.clone()),
			Path(session_id),
			Json(MediaEventRequest::TimeUpdate { position_seconds: 90.0 }),
		)
		.await;

		let status = close_playback_session(State(application_context.clone()), Path(session_id)).await;
		assert_eq!(StatusCode::NO_CONTENT, status);
		assert!(application_context.sessions.get(session_id).is_none());

		let reopened_id = open(&application_context, student, "grow-ch1").await;
		let session = application_context.sessions.get(reopened_id).expect("Session disappeared");
		assert_eq!(Duration::seconds(90), session.state.position());
	}

	#[tokio::test]
	async fn controls_for_unknown_sessions_should_answer_with_no_content() {
		let application_context = application_context().await;

		let response = skip(
			State(application_context.clone()),
			Path(Uuid::new_v4()),
			Json(SkipRequest { delta_seconds: 15.0 }),
		)
		.await;

		assert_eq!(StatusCode::NO_CONTENT, response.status());
	}

	#[tokio::test]
	async fn opening_a_session_for_a_blank_chapter_should_be_rejected() {
		let application_context = application_context().await;

		let result = open_playback_session(
			State(application_context.clone()),
			Json(OpenPlaybackSessionRequest {
				student: Uuid::new_v4(),
				chapter: " \t".to_string(),
			}),
		)
		.await;

		assert!(result.is_err());
	}

	async fn open(application_context: &ApplicationContext, student: Uuid, chapter: &str) -> Uuid {
		let Created(Json(opened)) = open_playback_session(
			State(application_context.clone()),
			Json(OpenPlaybackSessionRequest {
				student,
				chapter: chapter.to_string(),
			}),
		)
		.await
		.expect("Failed to open session");
		opened.id
	}

	async fn enroll(application_context: &ApplicationContext, student: Uuid, course_id: i64, name: &str) {
		create_enrollment(
			State(application_context.clone()),
			Json(CreateEnrollmentRequest {
				student,
				course_id,
				course_name: name.to_string(),
				course_description: String::new(),
			}),
		)
		.await
		.expect("Failed to enroll");
	}

	async fn submit(
		application_context: &ApplicationContext,
		student: Uuid,
		course_id: i64,
		score: &str,
		completed_at: &str,
	) {
		submit_quiz_attempt(
			State(application_context.clone()),
			Json(SubmitQuizAttemptRequest {
				student,
				course_id,
				quiz_title: "Chapter Quiz".to_string(),
				score: score.to_string(),
				passing_score: None,
				completed_at: Some(at(completed_at)),
			}),
		)
		.await
		.expect("Failed to submit attempt");
	}

	fn at(text: &str) -> NaiveDateTime {
		NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").expect("Invalid test timestamp")
	}

	async fn application_context() -> ApplicationContext {
		let configuration = Configuration::try_from(
			r#"
			address = "127.0.0.1:8000"
			log_filters = "info"
			database_url = "sqlite::memory:"
			audio_base_url = "/uploads/textbook-audio"
			session_limit = 16
			session_idle_timeout = "30m"
			session_sweep_interval = "1m"

			[[special_events]]
			id = 5
			title = "School of Ministry Launch"
			starts_at = "2025-08-01 00:00"

			[[special_events]]
			id = 7
			title = "Marriage Conference"
			starts_at = "2025-08-27 09:00"
			"#,
		)
		.expect("Failed to parse test configuration");

		ApplicationContext::new(configuration, Clock::fixed(at("2025-08-05 12:00:00")))
			.await
			.expect("Failed to create application context")
	}
}
