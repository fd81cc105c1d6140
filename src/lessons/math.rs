//! Math exercise generation: topic selection weighted toward weak topics,
//! with level-scaled operands and XP reward.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

const ARITHMETIC_TOPICS: &[&str] = &["addition", "subtraction", "multiplication", "division"];
const ALGEBRA_TOPICS: &[&str] = &["equations", "inequalities", "polynomials"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MathExercise {
    pub topic: String,
    pub problem: String,
    pub solution: String,
    pub difficulty: &'static str,
    pub xp_reward: u64,
}

pub fn difficulty_label(level: u32) -> &'static str {
    if level <= 3 {
        "easy"
    } else if level <= 7 {
        "medium"
    } else {
        "hard"
    }
}

/// Pick an exercise for the learner. A weak topic takes priority when it is
/// one we can generate problems for; otherwise the topic follows the level.
pub fn generate_exercise(level: u32, weak_topics: &BTreeSet<String>) -> MathExercise {
    generate_with_rng(level, weak_topics, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng>(
    level: u32,
    weak_topics: &BTreeSet<String>,
    rng: &mut R,
) -> MathExercise {
    let weak_arithmetic = weak_topics
        .iter()
        .find(|t| ARITHMETIC_TOPICS.contains(&t.as_str()));
    let weak_algebra = weak_topics
        .iter()
        .find(|t| ALGEBRA_TOPICS.contains(&t.as_str()));

    if let Some(topic) = weak_arithmetic {
        return arithmetic_exercise(level, topic.clone(), rng);
    }
    if let Some(topic) = weak_algebra {
        return algebra_exercise(level, topic.clone(), rng);
    }

    if level <= 3 {
        let topic = ARITHMETIC_TOPICS
            .choose(rng)
            .copied()
            .unwrap_or("addition")
            .to_string();
        arithmetic_exercise(level, topic, rng)
    } else {
        let topic = ALGEBRA_TOPICS
            .choose(rng)
            .copied()
            .unwrap_or("equations")
            .to_string();
        algebra_exercise(level, topic, rng)
    }
}

fn arithmetic_exercise<R: Rng>(level: u32, topic: String, rng: &mut R) -> MathExercise {
    let (problem, solution) = if level <= 3 {
        let a = rng.gen_range(1..=20);
        let b = rng.gen_range(1..=20);
        (format!("What is {a} + {b}?"), (a + b).to_string())
    } else {
        let a: i64 = rng.gen_range(1..=100);
        let b: i64 = rng.gen_range(1..=100);
        let c: i64 = rng.gen_range(1..=10);
        // Integer division, rounded down
        (format!("Calculate: ({a} × {b}) ÷ {c}"), ((a * b) / c).to_string())
    };

    MathExercise {
        topic,
        problem,
        solution,
        difficulty: difficulty_label(level),
        xp_reward: level as u64 * 5,
    }
}

fn algebra_exercise<R: Rng>(level: u32, topic: String, rng: &mut R) -> MathExercise {
    let x: i64 = rng.gen_range(1..=10);
    let a: i64 = rng.gen_range(2..=9);
    let b: i64 = rng.gen_range(1..=20);
    let c = a * x + b;

    MathExercise {
        topic,
        problem: format!("Solve for x: {a}x + {b} = {c}"),
        solution: x.to_string(),
        difficulty: difficulty_label(level),
        xp_reward: level as u64 * 5,
    }
}
