use std::fmt;

use serde::Serialize;

/// How far over par a bogey went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BogeyType {
    Single,
    Double,
    Triple,
}

/// Named result of a single hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreCategory {
    HoleInOne,
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey(BogeyType),
    /// Four or more over par, and anything else that falls off the table.
    Ouch,
}

impl ScoreCategory {
    /// Classify a hole from its stroke count and par.
    ///
    /// An ace always wins, whatever the par of the hole is.
    pub const fn new(strokes: i32, par: i32) -> Self {
        if strokes == 1 {
            return Self::HoleInOne;
        }
        match par - strokes {
            3 => Self::Albatross,
            2 => Self::Eagle,
            1 => Self::Birdie,
            0 => Self::Par,
            -1 => Self::Bogey(BogeyType::Single),
            -2 => Self::Bogey(BogeyType::Double),
            -3 => Self::Bogey(BogeyType::Triple),
            _ => Self::Ouch,
        }
    }

    /// Class name the scorecard page styles a hole with.
    pub const fn css_class(&self) -> &'static str {
        use ScoreCategory::*;
        match self {
            HoleInOne => "hole-in-one",
            Albatross => "albatross",
            Eagle => "eagle",
            Birdie => "birdie",
            Par => "par",
            Bogey(bogey_type) => match bogey_type {
                BogeyType::Single => "bogey",
                BogeyType::Double => "double-bogey",
                BogeyType::Triple => "triple-bogey",
            },
            Ouch => "quatro-bogey",
        }
    }

    pub const fn label(&self) -> &'static str {
        use ScoreCategory::*;
        match self {
            HoleInOne => "Hole in One",
            Albatross => "Albatross",
            Eagle => "Eagle",
            Birdie => "Birdie",
            Par => "Par",
            Bogey(bogey_type) => match bogey_type {
                BogeyType::Single => "Bogey",
                BogeyType::Double => "Double Bogey",
                BogeyType::Triple => "Triple Bogey",
            },
            Ouch => "Quatro Bogey or Worse",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const fn classify(strokes: i32, par: i32) -> ScoreCategory {
    ScoreCategory::new(strokes, par)
}

/// Relative score as shown on a leaderboard: `+2`, `E` or `-3`.
pub fn format_score_difference(difference: i32) -> String {
    match difference {
        1.. => format!("+{}", difference),
        0 => "E".to_string(),
        _ => difference.to_string(),
    }
}
