//! Level-banded language lessons and vocabulary review picks.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyBand {
    pub fn for_level(level: u32) -> Self {
        if level <= 5 {
            DifficultyBand::Beginner
        } else if level <= 10 {
            DifficultyBand::Intermediate
        } else {
            DifficultyBand::Advanced
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: &'static str,
    pub content: &'static str,
    pub exercise: Exercise,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub kind: &'static str,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub answer: usize,
}

const BEGINNER_LESSONS: &[Lesson] = &[
    Lesson {
        title: "Basic Greetings",
        content: "How to greet people and introduce yourself in everyday situations.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "Which word is a greeting?",
            options: &["Hello", "Goodbye", "Thank you", "Please"],
            answer: 0,
        },
    },
    Lesson {
        title: "Numbers and Counting",
        content: "Counting from one to twenty and using numbers in simple sentences.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "What comes after 'twelve'?",
            options: &["eleven", "thirteen", "twenty", "ten"],
            answer: 1,
        },
    },
    Lesson {
        title: "Everyday Objects",
        content: "Naming common objects at home and in the classroom.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "Which one do you write with?",
            options: &["plate", "chair", "pen", "window"],
            answer: 2,
        },
    },
];

const INTERMEDIATE_LESSONS: &[Lesson] = &[
    Lesson {
        title: "Past Tense Stories",
        content: "Describing what happened yesterday using regular and irregular verbs.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "Choose the past tense of 'go':",
            options: &["goed", "gone", "went", "going"],
            answer: 2,
        },
    },
    Lesson {
        title: "Making Suggestions",
        content: "Polite ways to suggest plans: 'how about', 'why don't we', 'let's'.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "Complete: '___ we take a break?'",
            options: &["How about", "Why don't", "Let's", "What for"],
            answer: 1,
        },
    },
];

const ADVANCED_LESSONS: &[Lesson] = &[
    Lesson {
        title: "Conditional Nuance",
        content: "Mixed conditionals and how they change what a sentence implies.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "Pick the mixed conditional:",
            options: &[
                "If it rains, we stay in.",
                "If I had studied, I would be a doctor now.",
                "If I study, I will pass.",
                "When it rained, we stayed in.",
            ],
            answer: 1,
        },
    },
    Lesson {
        title: "Idioms at Work",
        content: "Common workplace idioms and when they sound natural.",
        exercise: Exercise {
            kind: "multipleChoice",
            question: "'Back to the drawing board' means:",
            options: &[
                "start over",
                "take a break",
                "draw a picture",
                "finish early",
            ],
            answer: 0,
        },
    },
];

static VOCABULARY_SETS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut sets: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    sets.insert(
        "basics",
        &["hello", "goodbye", "thank you", "please", "yes", "no"][..],
    );
    sets.insert(
        "food",
        &["apple", "banana", "water", "bread", "cheese", "rice"][..],
    );
    sets.insert(
        "travel",
        &["ticket", "station", "luggage", "passport", "departure", "arrival"][..],
    );
    sets
});

pub fn lessons_for(band: DifficultyBand) -> &'static [Lesson] {
    match band {
        DifficultyBand::Beginner => BEGINNER_LESSONS,
        DifficultyBand::Intermediate => INTERMEDIATE_LESSONS,
        DifficultyBand::Advanced => ADVANCED_LESSONS,
    }
}

/// Random lesson from the band matching the learner's English level.
pub fn generate_lesson(level: u32) -> Lesson {
    let band = DifficultyBand::for_level(level);
    let bank = lessons_for(band);
    bank.choose(&mut rand::thread_rng())
        .cloned()
        // banks are non-empty consts
        .unwrap_or_else(|| bank[0].clone())
}

/// Random sample of `count` words from the unit's vocabulary set; falls back
/// to the basics set for units without a dedicated list.
pub fn generate_vocabulary_review(unit: &str, count: usize) -> Vec<&'static str> {
    let words = VOCABULARY_SETS
        .get(unit)
        .or_else(|| VOCABULARY_SETS.get("basics"))
        .copied()
        .unwrap_or(&[]);
    words
        .choose_multiple(&mut rand::thread_rng(), count.min(words.len()))
        .copied()
        .collect()
}
