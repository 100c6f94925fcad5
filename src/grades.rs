use serde::Serialize;

pub mod summary;

/// Quizzes without an explicit passing score pass at 70 percent.
pub const DEFAULT_PASSING_PERCENT: f64 = 70.0;

/// Letter grades with inclusive lower bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum LetterGrade {
	#[display("A")]
	A,
	#[display("B")]
	B,
	#[display("C")]
	C,
	#[display("D")]
	D,
	#[display("F")]
	F,
}

impl LetterGrade {
	pub fn from_percent(percent: f64) -> Self {
		if percent >= 90.0 {
			Self::A
		} else if percent >= 80.0 {
			Self::B
		} else if percent >= 70.0 {
			Self::C
		} else if percent >= 60.0 {
			Self::D
		} else {
			Self::F
		}
	}
}

/// Dashboard color band for a score, same thresholds the grade cards use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeColor {
	Green,
	Blue,
	Yellow,
	Red,
}

impl GradeColor {
	pub fn from_percent(percent: f64) -> Self {
		if percent >= 90.0 {
			Self::Green
		} else if percent >= 80.0 {
			Self::Blue
		} else if percent >= 70.0 {
			Self::Yellow
		} else {
			Self::Red
		}
	}
}

/// Quiz scores are stored as decimal-fraction text. Anything that does not
/// parse to a finite number counts as zero.
pub fn parse_score(raw: &str) -> f64 {
	raw.trim()
		.parse::<f64>()
		.ok()
		.filter(|score| score.is_finite())
		.unwrap_or(0.0)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn should_map_the_letter_grade_thresholds_inclusively() {
		assert_eq!(LetterGrade::A, LetterGrade::from_percent(90.0));
		assert_eq!(LetterGrade::B, LetterGrade::from_percent(89.9));
		assert_eq!(LetterGrade::B, LetterGrade::from_percent(80.0));
		assert_eq!(LetterGrade::C, LetterGrade::from_percent(70.0));
		assert_eq!(LetterGrade::D, LetterGrade::from_percent(60.0));
		assert_eq!(LetterGrade::F, LetterGrade::from_percent(59.9));
		assert_eq!(LetterGrade::F, LetterGrade::from_percent(0.0));
	}

	#[test]
	fn should_map_the_color_bands() {
		assert_eq!(GradeColor::Green, GradeColor::from_percent(95.0));
		assert_eq!(GradeColor::Blue, GradeColor::from_percent(85.0));
		assert_eq!(GradeColor::Yellow, GradeColor::from_percent(75.0));
		assert_eq!(GradeColor::Red, GradeColor::from_percent(65.0));
	}

	#[test]
	fn should_parse_valid_scores() {
		assert!((parse_score("0.85") - 0.85).abs() < f64::EPSILON);
		assert!((parse_score(" 1 ") - 1.0).abs() < f64::EPSILON);
	}

	#[test]
	fn should_parse_garbage_as_zero() {
		assert!(parse_score("").abs() < f64::EPSILON);
		assert!(parse_score("not-a-score").abs() < f64::EPSILON);
		assert!(parse_score("NaN").abs() < f64::EPSILON);
	}
}
