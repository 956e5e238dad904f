use chrono::{DateTime, Utc};

use super::{
    AgeFeedback, CareerStartFeedback, ClubFeedback, ClubStatus, FeedbackResult, FootFeedback,
    FootStatus, HeightFeedback, NationalityFeedback, NationalityStatus, PositionFeedback,
    PositionStatus, TieredStatus,
};
use crate::models::Player;

const SAME_CONTINENT_LABEL: &str = "Same continent";
const WRONG_COUNTRY_LABEL: &str = "Wrong country";

/// Compare a guess against the answer, stamped with the current time.
pub fn compare_players(guessed: &Player, answer: &Player) -> FeedbackResult {
    compare_players_at(guessed, answer, Utc::now())
}

/// Compare a guess against the answer.
///
/// Exact age / height / career start, the flag and the club logo are only
/// revealed when the guess is the answer itself. A wrong guess gets
/// comparative signals only.
pub fn compare_players_at(
    guessed: &Player,
    answer: &Player,
    timestamp: DateTime<Utc>,
) -> FeedbackResult {
    let is_correct = guessed.id == answer.id;

    let nationality_status =
        NationalityStatus::classify(is_correct, guessed.continent == answer.continent);
    let nationality_value = match nationality_status {
        NationalityStatus::Correct => guessed.nationality.clone(),
        NationalityStatus::SameContinent => SAME_CONTINENT_LABEL.to_string(),
        NationalityStatus::Wrong => WRONG_COUNTRY_LABEL.to_string(),
    };

    let foot_status = if guessed.dominant_foot == answer.dominant_foot {
        FootStatus::Correct
    } else {
        FootStatus::Wrong
    };

    FeedbackResult {
        correct: is_correct,
        nationality: NationalityFeedback {
            status: nationality_status,
            value: nationality_value,
            flag: guessed.nationality_image_url.clone().filter(|_| is_correct),
        },
        position: PositionFeedback {
            status: PositionStatus::classify(
                is_correct,
                guessed.position_category == answer.position_category,
            ),
            value: guessed.position.clone(),
        },
        club: ClubFeedback {
            status: ClubStatus::classify(is_correct, guessed.league == answer.league),
            value: guessed.club.clone(),
            logo: guessed.club_image_url.clone().filter(|_| is_correct),
        },
        age: AgeFeedback {
            difference: i32::from(guessed.age) - i32::from(answer.age),
            value: is_correct.then_some(guessed.age),
        },
        height: HeightFeedback {
            status: guessed.height.cmp(&answer.height).into(),
            value: is_correct.then_some(guessed.height),
        },
        dominant_foot: FootFeedback {
            status: foot_status,
            value: guessed.dominant_foot,
        },
        career_start: CareerStartFeedback {
            status: guessed.career_start.cmp(&answer.career_start).into(),
            value: is_correct.then_some(guessed.career_start),
        },
        guessed_player: guessed.guessed_projection(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{CareerStartStatus, HeightStatus};
    use crate::models::DominantFoot;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn player(id: u32) -> Player {
        Player {
            id,
            name: format!("Player {id}"),
            nationality: "England".to_string(),
            continent: "Europe".to_string(),
            position: "Striker".to_string(),
            position_category: "Attack".to_string(),
            club: "Arsenal".to_string(),
            league: "EPL".to_string(),
            age: 30,
            height: 180,
            dominant_foot: DominantFoot::Right,
            is_active: true,
            career_start: 2010,
            career_end: None,
            image_url: Some(format!("/img/{id}.png")),
            club_image_url: Some("/clubs/arsenal.png".to_string()),
            nationality_image_url: Some("/flags/eng.svg".to_string()),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_reference_example() {
        let guessed = player(1);
        let mut answer = player(2);
        answer.position = "Central Midfielder".to_string();
        answer.position_category = "Midfield".to_string();
        answer.age = 28;
        answer.height = 185;
        answer.dominant_foot = DominantFoot::Left;
        answer.career_start = 2012;

        let result = compare_players_at(&guessed, &answer, fixed_time());

        assert!(!result.correct);
        assert_eq!(result.nationality.status, NationalityStatus::SameContinent);
        assert_eq!(result.nationality.value, "Same continent");
        assert_eq!(result.position.status, PositionStatus::Wrong);
        assert_eq!(result.position.value, "Striker");
        assert_eq!(result.club.status, ClubStatus::SameLeague);
        assert_eq!(result.age.difference, 2);
        assert_eq!(result.height.status, HeightStatus::Shorter);
        assert_eq!(result.dominant_foot.status, FootStatus::Wrong);
        assert_eq!(result.career_start.status, CareerStartStatus::Earlier);
        assert_eq!(result.timestamp, fixed_time());
    }

    #[test]
    fn test_correct_guess_reveals_values() {
        let answer = player(9);
        let result = compare_players_at(&answer, &answer, fixed_time());

        assert!(result.correct);
        assert_eq!(result.nationality.value, "England");
        assert_eq!(result.nationality.flag.as_deref(), Some("/flags/eng.svg"));
        assert_eq!(result.club.logo.as_deref(), Some("/clubs/arsenal.png"));
        assert_eq!(result.age.value, Some(30));
        assert_eq!(result.height.value, Some(180));
        assert_eq!(result.career_start.value, Some(2010));
    }

    #[test]
    fn test_correct_guess_without_assets() {
        let mut answer = player(4);
        answer.nationality_image_url = None;
        answer.club_image_url = None;
        answer.image_url = None;

        let result = compare_players_at(&answer, &answer, fixed_time());
        let json = serde_json::to_value(&result).unwrap();

        assert!(result.correct);
        assert!(json["nationality"].get("flag").is_none());
        assert!(json["club"].get("logo").is_none());
        assert!(json["guessedPlayer"].get("imageUrl").is_none());
    }

    #[test]
    fn test_wrong_continent_label() {
        let guessed = player(1);
        let mut answer = player(2);
        answer.nationality = "Brazil".to_string();
        answer.continent = "South America".to_string();

        let result = compare_players_at(&guessed, &answer, fixed_time());

        assert_eq!(result.nationality.status, NationalityStatus::Wrong);
        assert_eq!(result.nationality.value, "Wrong country");
        assert_eq!(result.nationality.flag, None);
    }

    #[test]
    fn test_wire_format() {
        let guessed = player(1);
        let mut answer = player(2);
        answer.height = 175;
        answer.career_start = 2008;

        let json = serde_json::to_value(compare_players_at(&guessed, &answer, fixed_time())).unwrap();

        assert_eq!(json["correct"], false);
        assert_eq!(json["nationality"]["status"], "same_continent");
        assert_eq!(json["position"]["status"], "same_category");
        assert_eq!(json["club"]["status"], "same_league");
        assert_eq!(json["height"]["status"], "taller");
        assert_eq!(json["dominantFoot"]["status"], "correct");
        assert_eq!(json["dominantFoot"]["value"], "Right");
        assert_eq!(json["careerStart"]["status"], "later");
        assert_eq!(json["guessedPlayer"]["id"], 1);
        assert!(json["age"].get("value").is_none());
        assert!(json["timestamp"].as_str().unwrap().starts_with("2026-10-17T09:30:00"));
    }

    fn arb_player() -> impl Strategy<Value = Player> {
        (
            1u32..50,
            prop::sample::select(vec!["Europe", "Asia", "Africa"]),
            prop::sample::select(vec!["Attack", "Midfield", "Defense", "Goalkeeper"]),
            prop::sample::select(vec!["EPL", "La Liga", "Serie A"]),
            16u8..42,
            160u16..205,
            any::<bool>(),
            1995u16..2025,
            any::<bool>(),
        )
            .prop_map(
                |(id, continent, category, league, age, height, left, start, assets)| {
                    let mut p = player(id);
                    p.continent = continent.to_string();
                    p.position_category = category.to_string();
                    p.league = league.to_string();
                    p.age = age;
                    p.height = height;
                    p.dominant_foot = if left { DominantFoot::Left } else { DominantFoot::Right };
                    p.career_start = start;
                    if !assets {
                        p.nationality_image_url = None;
                        p.club_image_url = None;
                    }
                    p
                },
            )
    }

    proptest! {
        #[test]
        fn prop_self_comparison_is_all_correct(p in arb_player()) {
            let result = compare_players(&p, &p);
            prop_assert!(result.correct);
            prop_assert_eq!(result.nationality.status, NationalityStatus::Correct);
            prop_assert_eq!(result.position.status, PositionStatus::Correct);
            prop_assert_eq!(result.club.status, ClubStatus::Correct);
            prop_assert_eq!(result.age.difference, 0);
            prop_assert_eq!(result.height.status, HeightStatus::Correct);
            prop_assert_eq!(result.dominant_foot.status, FootStatus::Correct);
            prop_assert_eq!(result.career_start.status, CareerStartStatus::Correct);
        }

        #[test]
        fn prop_different_ids_never_correct(a in arb_player(), b in arb_player()) {
            prop_assume!(a.id != b.id);
            let result = compare_players(&a, &b);

            prop_assert!(!result.correct);
            prop_assert_eq!(
                result.nationality.status == NationalityStatus::SameContinent,
                a.continent == b.continent
            );
            prop_assert_eq!(
                result.nationality.status == NationalityStatus::Wrong,
                a.continent != b.continent
            );
            // hidden on a wrong guess
            prop_assert!(result.nationality.flag.is_none());
            prop_assert!(result.club.logo.is_none());
            prop_assert!(result.age.value.is_none());
            prop_assert!(result.height.value.is_none());
            prop_assert!(result.career_start.value.is_none());
        }

        #[test]
        fn prop_ordered_attributes_follow_values(a in arb_player(), b in arb_player()) {
            let result = compare_players(&a, &b);

            prop_assert_eq!(result.age.difference, i32::from(a.age) - i32::from(b.age));
            let expected_height = if a.height > b.height {
                HeightStatus::Taller
            } else if a.height < b.height {
                HeightStatus::Shorter
            } else {
                HeightStatus::Correct
            };
            prop_assert_eq!(result.height.status, expected_height);
            let expected_start = if a.career_start < b.career_start {
                CareerStartStatus::Earlier
            } else if a.career_start > b.career_start {
                CareerStartStatus::Later
            } else {
                CareerStartStatus::Correct
            };
            prop_assert_eq!(result.career_start.status, expected_start);
            prop_assert_eq!(
                result.dominant_foot.status == FootStatus::Correct,
                a.dominant_foot == b.dominant_foot
            );
        }
    }
}
