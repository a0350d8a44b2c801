//! Grading rule for mark records.
//!
//! Pure and deterministic: the total is the sum of the two component scores
//! (each pre-validated to 0..=100) and the letter grade is the first matching
//! descending threshold band. Recomputed on every save; client-supplied
//! totals or grades are ignored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// First matching descending band.
    pub fn from_total(total: i32) -> Self {
        match total {
            t if t >= 180 => Grade::APlus,
            t if t >= 160 => Grade::A,
            t if t >= 150 => Grade::AMinus,
            t if t >= 140 => Grade::BPlus,
            t if t >= 130 => Grade::B,
            t if t >= 120 => Grade::BMinus,
            t if t >= 110 => Grade::CPlus,
            t if t >= 100 => Grade::C,
            t if t >= 90 => Grade::CMinus,
            t if t >= 80 => Grade::DPlus,
            t if t >= 70 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// A total of 100 or more out of 200 counts as a pass.
pub const PASS_THRESHOLD: i32 = 100;

/// Compute `(total, grade)` from the two component scores.
pub fn compute_grade(assignment_marks: i32, exam_marks: i32) -> (i32, Grade) {
    let total = assignment_marks + exam_marks;
    (total, Grade::from_total(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_components() {
        let (total, grade) = compute_grade(90, 90);
        assert_eq!(total, 180);
        assert_eq!(grade, Grade::APlus);
    }

    #[test]
    fn low_total_is_f() {
        let (total, grade) = compute_grade(30, 35);
        assert_eq!(total, 65);
        assert_eq!(grade, Grade::F);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(Grade::from_total(180), Grade::APlus);
        assert_eq!(Grade::from_total(179), Grade::A);
        assert_eq!(Grade::from_total(160), Grade::A);
        assert_eq!(Grade::from_total(159), Grade::AMinus);
        assert_eq!(Grade::from_total(150), Grade::AMinus);
        assert_eq!(Grade::from_total(140), Grade::BPlus);
        assert_eq!(Grade::from_total(130), Grade::B);
        assert_eq!(Grade::from_total(120), Grade::BMinus);
        assert_eq!(Grade::from_total(110), Grade::CPlus);
        assert_eq!(Grade::from_total(100), Grade::C);
        assert_eq!(Grade::from_total(99), Grade::CMinus);
        assert_eq!(Grade::from_total(90), Grade::CMinus);
        assert_eq!(Grade::from_total(80), Grade::DPlus);
        assert_eq!(Grade::from_total(70), Grade::D);
        assert_eq!(Grade::from_total(69), Grade::F);
        assert_eq!(Grade::from_total(0), Grade::F);
    }

    #[test]
    fn every_total_lands_in_exactly_one_band() {
        for total in 0..=200 {
            // from_total is a total function over the valid range; the match
            // arms are ordered, so the first hit is the unique band.
            let grade = Grade::from_total(total);
            let expected = match total {
                180..=200 => Grade::APlus,
                160..=179 => Grade::A,
                150..=159 => Grade::AMinus,
                140..=149 => Grade::BPlus,
                130..=139 => Grade::B,
                120..=129 => Grade::BMinus,
                110..=119 => Grade::CPlus,
                100..=109 => Grade::C,
                90..=99 => Grade::CMinus,
                80..=89 => Grade::DPlus,
                70..=79 => Grade::D,
                _ => Grade::F,
            };
            assert_eq!(grade, expected, "total {}", total);
        }
    }

    #[test]
    fn grade_serializes_to_letter() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), r#""A+""#);
        assert_eq!(serde_json::to_string(&Grade::F).unwrap(), r#""F""#);
    }

    #[test]
    fn pass_threshold_matches_c_band() {
        assert!(PASS_THRESHOLD >= 100);
        assert_eq!(Grade::from_total(PASS_THRESHOLD), Grade::C);
    }
}
