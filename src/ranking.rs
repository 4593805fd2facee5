use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::Scorecard;

pub const DEFAULT_LIMIT: usize = 10;

/// How many ranked scorecards to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLimit")]
pub enum ResultLimit {
    Count(usize),
    All,
}

impl ResultLimit {
    fn effective(self, len: usize) -> usize {
        match self {
            Self::Count(count) => count,
            Self::All => len,
        }
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self::Count(DEFAULT_LIMIT)
    }
}

impl FromStr for ResultLimit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<usize>()
            .map(Self::Count)
            .map_err(|_| Error::InvalidLimit(s.to_string()))
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{}", count),
            Self::All => f.write_str("all"),
        }
    }
}

impl Serialize for ResultLimit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Count(i64),
    // JS numbers can arrive as floats.
    Float(f64),
    Text(String),
}

impl TryFrom<RawLimit> for ResultLimit {
    type Error = Error;

    fn try_from(raw: RawLimit) -> Result<Self, Self::Error> {
        match raw {
            RawLimit::Count(count) => usize::try_from(count)
                .map(Self::Count)
                .map_err(|_| Error::InvalidLimit(count.to_string())),
            RawLimit::Float(count)
                if count >= 0.0 && count.fract() == 0.0 && count < usize::MAX as f64 =>
            {
                Ok(Self::Count(count as usize))
            }
            RawLimit::Float(count) => Err(Error::InvalidLimit(count.to_string())),
            RawLimit::Text(text) => text.parse(),
        }
    }
}

/// Order scorecards best first by score difference and keep the first `limit`.
///
/// The sort is stable, so scorecards with the same difference stay in the
/// order they were received.
pub fn rank(mut scorecards: Vec<Scorecard>, limit: ResultLimit) -> Vec<Scorecard> {
    scorecards.sort_by_key(|card| card.score_difference);
    let limit = limit.effective(scorecards.len());
    scorecards.truncate(limit);
    scorecards
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Dummy, Fake, Faker};

    #[derive(Debug, Dummy)]
    struct TestingCard {
        #[dummy(faker = "1..100000")]
        id: i64,
        #[dummy(faker = "45..80")]
        total_score: i32,
        #[dummy(faker = "-4..5")]
        score_difference: i32,
    }

    impl From<TestingCard> for Scorecard {
        fn from(value: TestingCard) -> Self {
            Self {
                id: value.id,
                player_name: "Par".to_string(),
                course_name: "Tali".to_string(),
                layout_name: "Main".to_string(),
                total_score: value.total_score,
                score_difference: value.score_difference,
                date: String::new(),
            }
        }
    }

    fn card(id: i64, score_difference: i32) -> Scorecard {
        Scorecard {
            id,
            player_name: String::new(),
            course_name: String::new(),
            layout_name: String::new(),
            total_score: 54 + score_difference,
            score_difference,
            date: String::new(),
        }
    }

    fn make_many_cards(amount: usize) -> Vec<Scorecard> {
        (0..amount)
            .map(|i| {
                let fake: TestingCard = Faker.fake();
                let mut card = Scorecard::from(fake);
                // Unique ids so tie order can be checked.
                card.id = i as i64;
                card
            })
            .collect()
    }

    fn differences(cards: &[Scorecard]) -> Vec<i32> {
        cards.iter().map(|card| card.score_difference).collect()
    }

    #[test]
    fn all_sorts_without_truncating() {
        let ranked = rank(vec![card(1, 3), card(2, -1), card(3, 0)], ResultLimit::All);
        assert_eq!(differences(&ranked), vec![-1, 0, 3]);
    }

    #[test]
    fn truncates_after_sorting() {
        let ranked = rank(
            vec![card(1, 4), card(2, 2), card(3, -2), card(4, 0)],
            ResultLimit::Count(2),
        );
        assert_eq!(differences(&ranked), vec![-2, 0]);
    }

    #[test]
    fn keeps_the_five_best_in_input_order_on_ties() {
        let cards = make_many_cards(10);
        let ranked = rank(cards.clone(), ResultLimit::Count(5));
        assert_eq!(ranked.len(), 5);

        let mut expected = cards;
        expected.sort_by_key(|card| card.score_difference);
        expected.truncate(5);
        assert_eq!(ranked, expected);

        for pair in ranked.windows(2) {
            assert!(pair[0].score_difference <= pair[1].score_difference);
            if pair[0].score_difference == pair[1].score_difference {
                assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn ties_keep_received_order() {
        let ranked = rank(
            vec![card(10, 1), card(11, -1), card(12, 1), card(13, -1)],
            ResultLimit::Count(3),
        );
        let ids: Vec<i64> = ranked.iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![11, 13, 10]);
    }

    #[test]
    fn ranking_all_is_idempotent() {
        for _ in 0..20 {
            let cards = make_many_cards(12);
            let once = rank(cards, ResultLimit::All);
            let twice = rank(once.clone(), ResultLimit::All);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn limit_larger_than_input() {
        let ranked = rank(vec![card(1, 2), card(2, 1)], ResultLimit::Count(10));
        assert_eq!(differences(&ranked), vec![1, 2]);
        assert!(rank(vec![], ResultLimit::All).is_empty());
        assert!(rank(vec![card(1, 0)], ResultLimit::Count(0)).is_empty());
    }

    #[test]
    fn parses_limits() {
        assert_eq!("all".parse::<ResultLimit>().unwrap(), ResultLimit::All);
        assert_eq!(" ALL ".parse::<ResultLimit>().unwrap(), ResultLimit::All);
        assert_eq!("25".parse::<ResultLimit>().unwrap(), ResultLimit::Count(25));
        assert!(matches!(
            "-3".parse::<ResultLimit>(),
            Err(Error::InvalidLimit(value)) if value == "-3"
        ));
        assert!("ten".parse::<ResultLimit>().is_err());
        assert!("".parse::<ResultLimit>().is_err());
    }

    #[test]
    fn deserializes_number_or_text() {
        let limit: ResultLimit = serde_json::from_str("5").unwrap();
        assert_eq!(limit, ResultLimit::Count(5));
        let limit: ResultLimit = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(limit, ResultLimit::All);
        let limit: ResultLimit = serde_json::from_str("\"20\"").unwrap();
        assert_eq!(limit, ResultLimit::Count(20));
        assert!(serde_json::from_str::<ResultLimit>("-1").is_err());
        assert_eq!(
            serde_json::from_str::<ResultLimit>("15.0").unwrap(),
            ResultLimit::Count(15)
        );
        assert!(serde_json::from_str::<ResultLimit>("2.5").is_err());
        assert!(serde_json::from_str::<ResultLimit>("1e300").is_err());
    }

    #[test]
    fn displays_like_the_form_value() {
        assert_eq!(ResultLimit::All.to_string(), "all");
        assert_eq!(ResultLimit::default().to_string(), "10");
    }
}
