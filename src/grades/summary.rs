use crate::grades::{DEFAULT_PASSING_PERCENT, GradeColor, LetterGrade, parse_score};
use crate::store::models::QuizAttempt;
use serde::Serialize;

/// Per-course reduction of quiz attempts.
///
/// Attempts are expected most-recent-first, the order the store returns them
/// in; the first entry is the latest score and nothing is re-sorted here.
/// Everything is recomputed from the attempt list on every call, there is no
/// cached derived state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseGradeSummary {
	pub total_quizzes: usize,
	pub passed_quizzes: usize,
	pub average_score_percent: f64,
	pub highest_score_percent: f64,
	pub latest_score_percent: f64,
	pub letter_grade: LetterGrade,
	pub color: GradeColor,
}

impl CourseGradeSummary {
	pub fn from_attempts(attempts: &[QuizAttempt]) -> Self {
		let total_quizzes = attempts.len();
		let passed_quizzes = attempts.iter().filter(|attempt| attempt.is_passed()).count();

		let average_score_percent = if attempts.is_empty() {
			0.0
		} else {
			#[allow(clippy::cast_precision_loss)]
			let count = total_quizzes as f64;
			attempts.iter().map(QuizAttempt::score_percent).sum::<f64>() / count
		};

		let highest_score_percent = attempts
			.iter()
			.map(QuizAttempt::score_percent)
			.fold(0.0, f64::max);

		let latest_score_percent = attempts.first().map(QuizAttempt::score_percent).unwrap_or(0.0);

		Self {
			total_quizzes,
			passed_quizzes,
			average_score_percent,
			highest_score_percent,
			latest_score_percent,
			letter_grade: LetterGrade::from_percent(average_score_percent),
			color: GradeColor::from_percent(average_score_percent),
		}
	}
}

impl QuizAttempt {
	pub fn score_percent(&self) -> f64 {
		parse_score(&self.score) * 100.0
	}

	#[allow(clippy::cast_precision_loss)]
	pub fn passing_percent(&self) -> f64 {
		self.passing_score.map_or(DEFAULT_PASSING_PERCENT, |percent| percent as f64)
	}

	pub fn is_passed(&self) -> bool {
		self.score_percent() >= self.passing_percent()
	}
}

/// Grade point average on a 4.0 scale, rounded to two decimals. No attempts
/// means 0.0, never a division by zero.
pub fn grade_point_average(attempts: &[QuizAttempt]) -> f64 {
	if attempts.is_empty() {
		return 0.0;
	}

	#[allow(clippy::cast_precision_loss)]
	let count = attempts.len() as f64;
	let average_percent = attempts.iter().map(QuizAttempt::score_percent).sum::<f64>() / count;
	let gpa = average_percent / 100.0 * 4.0;

	(gpa * 100.0).round() / 100.0
}

/// The header block of the grades dashboard, reduced over every enrollment
/// and every attempt of a student.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverallStatistics {
	pub gpa: f64,
	pub total_courses: usize,
	pub total_quizzes: usize,
	pub total_passed: usize,
	pub overall_average_percent: f64,
}

impl OverallStatistics {
	pub fn new(total_courses: usize, attempts: &[QuizAttempt]) -> Self {
		let summary = CourseGradeSummary::from_attempts(attempts);

		Self {
			gpa: grade_point_average(attempts),
			total_courses,
			total_quizzes: summary.total_quizzes,
			total_passed: summary.passed_quizzes,
			overall_average_percent: summary.average_score_percent,
		}
	}
}
