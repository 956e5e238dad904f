//! Guess feedback
//!
//! 추측한 선수와 정답 선수를 속성별로 비교한 결과.
//! JSON field names follow the browser client (camelCase keys, snake_case status values).

mod compare;

pub use compare::{compare_players, compare_players_at};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{DominantFoot, GuessedPlayer};

/// Three-tier status for nominal attributes: exact / same group / miss.
pub trait TieredStatus: Sized {
    const EXACT: Self;
    const SAME_GROUP: Self;
    const MISS: Self;

    /// Exact only when the whole guess is the answer; otherwise the group decides.
    fn classify(is_correct: bool, same_group: bool) -> Self {
        if is_correct {
            Self::EXACT
        } else if same_group {
            Self::SAME_GROUP
        } else {
            Self::MISS
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationalityStatus {
    Correct,
    SameContinent,
    Wrong,
}

impl TieredStatus for NationalityStatus {
    const EXACT: Self = NationalityStatus::Correct;
    const SAME_GROUP: Self = NationalityStatus::SameContinent;
    const MISS: Self = NationalityStatus::Wrong;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    Correct,
    SameCategory,
    Wrong,
}

impl TieredStatus for PositionStatus {
    const EXACT: Self = PositionStatus::Correct;
    const SAME_GROUP: Self = PositionStatus::SameCategory;
    const MISS: Self = PositionStatus::Wrong;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClubStatus {
    Correct,
    SameLeague,
    Wrong,
}

impl TieredStatus for ClubStatus {
    const EXACT: Self = ClubStatus::Correct;
    const SAME_GROUP: Self = ClubStatus::SameLeague;
    const MISS: Self = ClubStatus::Wrong;
}

/// Guessed height relative to the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightStatus {
    Taller,
    Correct,
    Shorter,
}

impl From<Ordering> for HeightStatus {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => HeightStatus::Taller,
            Ordering::Equal => HeightStatus::Correct,
            Ordering::Less => HeightStatus::Shorter,
        }
    }
}

/// Guessed career start relative to the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerStartStatus {
    Earlier,
    Correct,
    Later,
}

impl From<Ordering> for CareerStartStatus {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => CareerStartStatus::Earlier,
            Ordering::Equal => CareerStartStatus::Correct,
            Ordering::Greater => CareerStartStatus::Later,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootStatus {
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalityFeedback {
    pub status: NationalityStatus,
    /// Country name on a correct guess, a descriptive label otherwise.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFeedback {
    pub status: PositionStatus,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubFeedback {
    pub status: ClubStatus,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeFeedback {
    /// guessed.age - answer.age
    pub difference: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightFeedback {
    pub status: HeightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootFeedback {
    pub status: FootStatus,
    pub value: DominantFoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerStartFeedback {
    pub status: CareerStartStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u16>,
}

/// Result of comparing one guess against the answer.
///
/// `correct` is the only field that says whether the game is won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    pub correct: bool,
    pub nationality: NationalityFeedback,
    pub position: PositionFeedback,
    pub club: ClubFeedback,
    pub age: AgeFeedback,
    pub height: HeightFeedback,
    pub dominant_foot: FootFeedback,
    pub career_start: CareerStartFeedback,
    pub guessed_player: GuessedPlayer,
    pub timestamp: DateTime<Utc>,
}
