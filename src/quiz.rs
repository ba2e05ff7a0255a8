//! The preference quiz: three fixed questions whose answers pick one of
//! four listening profiles by keyword lookup.

/// One selectable answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuizOption {
    /// Stable id collected into the answer set.
    pub id: &'static str,
    pub label: &'static str,
}

/// A quiz question with its four options.
#[derive(Debug, Copy, Clone)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [QuizOption; 4],
}

pub const QUESTIONS: [Question; 3] = [
    Question {
        prompt: "What is your primary goal for spiritual music?",
        options: [
            QuizOption {
                id: "meditation",
                label: "Deep Meditation",
            },
            QuizOption {
                id: "healing",
                label: "Emotional Healing",
            },
            QuizOption {
                id: "focus",
                label: "Enhanced Focus",
            },
            QuizOption {
                id: "peace",
                label: "Inner Peace",
            },
        ],
    },
    Question {
        prompt: "When do you prefer to listen to spiritual music?",
        options: [
            QuizOption {
                id: "morning",
                label: "Morning Meditation",
            },
            QuizOption {
                id: "evening",
                label: "Evening Relaxation",
            },
            QuizOption {
                id: "anytime",
                label: "Throughout the Day",
            },
            QuizOption {
                id: "night",
                label: "Before Sleep",
            },
        ],
    },
    Question {
        prompt: "What type of spiritual sounds resonate with you?",
        options: [
            QuizOption {
                id: "chanting",
                label: "Sacred Chanting",
            },
            QuizOption {
                id: "instruments",
                label: "Instrumental Music",
            },
            QuizOption {
                id: "nature",
                label: "Nature Sounds",
            },
            QuizOption {
                id: "frequencies",
                label: "Healing Frequencies",
            },
        ],
    },
];

/// A listening profile shown on the results screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResultProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
}

/// Pick the profile for a set of collected answer ids.
///
/// Branches are checked in order; the first matching keyword pair wins,
/// and anything else falls through to the Peaceful Explorer.
pub fn personalized_result(answers: &[&str]) -> ResultProfile {
    let has = |id: &str| answers.contains(&id);

    if has("meditation") || has("chanting") {
        ResultProfile {
            title: "The Meditative Soul",
            description: "You seek deep spiritual connection through traditional practices. \
                Sacred chanting and meditative music will guide your journey.",
            recommendation: "Start with our Meditation & Chanting collection",
        }
    } else if has("healing") || has("frequencies") {
        ResultProfile {
            title: "The Healing Seeker",
            description: "Your path focuses on emotional and spiritual healing. Therapeutic \
                frequencies and healing sounds will support your transformation.",
            recommendation: "Explore our Healing Frequencies playlist",
        }
    } else if has("focus") || has("instruments") {
        ResultProfile {
            title: "The Mindful Practitioner",
            description: "You use spiritual music to enhance focus and mindfulness. \
                Instrumental pieces and ambient sounds will elevate your practice.",
            recommendation: "Check out our Focus & Mindfulness selection",
        }
    } else {
        ResultProfile {
            title: "The Peaceful Explorer",
            description: "You seek overall peace and tranquility. A mix of nature sounds and \
                gentle melodies will create your perfect spiritual atmosphere.",
            recommendation: "Start with our Nature & Peace collection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meditation_or_chanting_wins_first() {
        assert_eq!(
            personalized_result(&["meditation", "morning", "nature"]).title,
            "The Meditative Soul"
        );
        assert_eq!(
            personalized_result(&["peace", "night", "chanting"]).title,
            "The Meditative Soul"
        );
        // Meditation outranks healing when both are present.
        assert_eq!(
            personalized_result(&["meditation", "evening", "frequencies"]).title,
            "The Meditative Soul"
        );
    }

    #[test]
    fn healing_branch_matches_either_keyword() {
        assert_eq!(
            personalized_result(&["healing", "anytime", "nature"]).title,
            "The Healing Seeker"
        );
        assert_eq!(
            personalized_result(&["peace", "morning", "frequencies"]).title,
            "The Healing Seeker"
        );
    }

    #[test]
    fn focus_branch_matches_instruments() {
        assert_eq!(
            personalized_result(&["focus", "night", "nature"]).title,
            "The Mindful Practitioner"
        );
        assert_eq!(
            personalized_result(&["peace", "evening", "instruments"]).title,
            "The Mindful Practitioner"
        );
    }

    #[test]
    fn everything_else_is_the_peaceful_explorer() {
        assert_eq!(
            personalized_result(&["peace", "anytime", "nature"]).title,
            "The Peaceful Explorer"
        );
        assert_eq!(personalized_result(&[]).title, "The Peaceful Explorer");
    }

    #[test]
    fn every_question_has_distinct_option_ids() {
        for q in &QUESTIONS {
            for (i, a) in q.options.iter().enumerate() {
                for b in &q.options[i + 1..] {
                    assert_ne!(a.id, b.id, "duplicate option in {:?}", q.prompt);
                }
            }
        }
    }
}
