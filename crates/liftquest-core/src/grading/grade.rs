//! The seven performance grades and their fixed metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Performance grade, ordered from lowest to highest.
///
/// Also used as the tier of a skill in the skill tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Challenger,
}

/// Descriptive metadata shown next to a grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeMeaning {
    pub description: &'static str,
    pub percentile: u8,
    pub health_benefit: &'static str,
    pub research_basis: &'static str,
}

impl Grade {
    /// All grades, lowest first.
    pub const ALL: [Grade; 7] = [
        Grade::Bronze,
        Grade::Silver,
        Grade::Gold,
        Grade::Platinum,
        Grade::Diamond,
        Grade::Master,
        Grade::Challenger,
    ];

    /// Fixed percentile anchor. A categorical label, not an interpolated percentile.
    pub fn percentile(self) -> u8 {
        match self {
            Grade::Bronze => 0,
            Grade::Silver => 25,
            Grade::Gold => 50,
            Grade::Platinum => 75,
            Grade::Diamond => 90,
            Grade::Master => 95,
            Grade::Challenger => 99,
        }
    }

    /// Experience multiplier applied to the base exercise value.
    pub fn exp_multiplier(self) -> f64 {
        match self {
            Grade::Bronze => 1.0,
            Grade::Silver => 1.2,
            Grade::Gold => 1.5,
            Grade::Platinum => 2.0,
            Grade::Diamond => 2.5,
            Grade::Master => 3.0,
            Grade::Challenger => 4.0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Grade::Bronze => "BRONZE",
            Grade::Silver => "SILVER",
            Grade::Gold => "GOLD",
            Grade::Platinum => "PLATINUM",
            Grade::Diamond => "DIAMOND",
            Grade::Master => "MASTER",
            Grade::Challenger => "CHALLENGER",
        }
    }

    pub fn name_ko(self) -> &'static str {
        match self {
            Grade::Bronze => "브론즈",
            Grade::Silver => "실버",
            Grade::Gold => "골드",
            Grade::Platinum => "플래티넘",
            Grade::Diamond => "다이아",
            Grade::Master => "마스터",
            Grade::Challenger => "챌린저",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Grade::Bronze => "#CD7F32",
            Grade::Silver => "#C0C0C0",
            Grade::Gold => "#FFD700",
            Grade::Platinum => "#E5E4E2",
            Grade::Diamond => "#B9F2FF",
            Grade::Master => "#9966FF",
            Grade::Challenger => "#FF4500",
        }
    }

    pub fn meaning(self) -> GradeMeaning {
        let (description, health_benefit, research_basis) = match self {
            Grade::Bronze => (
                "초보자 - 운동 시작 단계",
                "기본적인 건강 유지, 일상생활 활동성 향상",
                "ACSM 최소 권장 체력 수준",
            ),
            Grade::Silver => (
                "입문자 - 규칙적 운동 시작",
                "일상생활 활동성 향상, 근감소증 예방 시작",
                "일반 성인 평균 체력 수준",
            ),
            Grade::Gold => (
                "중급자 - 체력 향상 체감",
                "대사 건강 개선, 근감소증 예방, 부상 위험 감소",
                "NSCA 중급자 기준, 한국인 평균 체력",
            ),
            Grade::Platinum => (
                "상급자 - 뛰어난 체력",
                "운동 능력 향상, 부상 예방, 최적의 신체 기능",
                "NSCA 상급자 기준, 상위 25% 체력",
            ),
            Grade::Diamond => (
                "고급자 - 전문가 수준",
                "최적의 신체 기능, 경쟁력 있는 체력",
                "NSCA 고급자 기준, 상위 10% 체력",
            ),
            Grade::Master => (
                "마스터 - 엘리트 수준",
                "경쟁력 있는 체력, 최고 수준의 신체 능력",
                "NSCA 엘리트 기준, 상위 5% 체력",
            ),
            Grade::Challenger => (
                "챌린저 - 최상위 1%",
                "최고 수준의 신체 능력, 경쟁 선수 수준",
                "NSCA 최상위 기준, 상위 1% 체력",
            ),
        };
        GradeMeaning {
            description,
            percentile: self.percentile(),
            health_benefit,
            research_basis,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Grade::ALL
            .iter()
            .copied()
            .find(|g| g.code() == upper)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "grade".into(),
                message: format!("unknown grade '{s}'"),
            })
    }
}
