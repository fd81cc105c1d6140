//! Experience accounting: cumulative-XP level table, streak-tiered bonus XP,
//! and the award path that keeps global and per-subject totals consistent
//! with their derived levels.

use chrono::{DateTime, Utc};

use crate::leveling::types::*;

/// Cumulative XP required for each level; index i is the minimum XP for level i+1.
pub const LEVEL_THRESHOLDS: [u64; 10] = [0, 100, 300, 600, 1000, 1500, 2100, 2800, 3600, 4500];

/// Streak bonus tiers, highest threshold first. Order matters: a 100-day
/// streak must hit the 50-XP tier before the 7-day tier can swallow it.
const STREAK_TIERS: [(u32, u64); 3] = [(100, 50), (30, 25), (7, 10)];

/// Highest level whose threshold is covered by `xp`. Beyond the table the
/// progression continues linearly at the final delta (900 XP per level).
pub fn compute_level(xp: u64) -> u32 {
    let len = LEVEL_THRESHOLDS.len();
    let last = LEVEL_THRESHOLDS[len - 1];
    if xp >= last {
        let delta = last - LEVEL_THRESHOLDS[len - 2];
        return len as u32 + ((xp - last) / delta) as u32;
    }

    let mut level = 1;
    for (i, threshold) in LEVEL_THRESHOLDS.iter().enumerate().skip(1) {
        if xp >= *threshold {
            level = i as u32 + 1;
        } else {
            break;
        }
    }
    level
}

pub fn streak_bonus(streak_days: u32) -> u64 {
    for (min_days, bonus) in STREAK_TIERS {
        if streak_days >= min_days {
            return bonus;
        }
    }
    0
}

/// Award `base_amount` plus the streak bonus to the profile: global XP and
/// level always, subject XP and level when a subject is given. The two totals
/// move together under one `&mut` borrow, so a caller holding the profile
/// never observes one updated without the other.
pub fn award_xp(
    profile: &mut UserProfile,
    base_amount: i64,
    kind: ActivityKind,
    subject: Option<Subject>,
) -> Result<AwardResult, LevelingError> {
    if base_amount < 0 {
        return Err(LevelingError::InvalidArgument(format!(
            "xp amount must be non-negative, got {base_amount}"
        )));
    }

    let bonus = streak_bonus(profile.stats.current_streak);
    let total_awarded = base_amount as u64 + bonus;

    let previous_level = profile.stats.global_level;
    profile.stats.total_xp += total_awarded;
    profile.stats.global_level = compute_level(profile.stats.total_xp);
    let new_level = profile.stats.global_level;

    if let Some(subject) = subject {
        let progress = profile.subject_mut(subject);
        progress.xp += total_awarded;
        progress.level = compute_level(progress.xp);
    }

    tracing::debug!(
        user_id = %profile.user_id,
        kind = ?kind,
        total_awarded,
        new_level,
        "XP awarded"
    );

    Ok(AwardResult {
        total_awarded,
        previous_level,
        new_level,
        leveled_up: new_level > previous_level,
        subject,
    })
}

/// Roll the consecutive-day streak forward for an activity at `now`.
/// Same day: no change (except starting a first-ever streak). Next day:
/// extend. Any gap: reset to 1. `longest_streak` can never fall below
/// `current_streak`.
pub fn touch_streak(stats: &mut UserStats, now: DateTime<Utc>) {
    let today = now.date_naive();
    let last_day = stats.last_active_at.date_naive();

    if today == last_day {
        if stats.current_streak == 0 {
            stats.current_streak = 1;
        }
    } else if last_day.succ_opt() == Some(today) {
        stats.current_streak += 1;
    } else {
        stats.current_streak = 1;
    }

    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
    stats.last_active_at = now;
}

/// Consume one lesson slot for the day, rolling the counter over at the UTC
/// date boundary. Returns false when the subscription's daily limit is spent.
pub fn try_consume_daily_lesson(stats: &mut UserStats, limit: u32, now: DateTime<Utc>) -> bool {
    let today = now.date_naive();
    if stats.lessons_today_date != today {
        stats.lessons_today_date = today;
        stats.lessons_today = 0;
    }

    if stats.lessons_today >= limit {
        return false;
    }
    stats.lessons_today += 1;
    true
}

pub fn apply_stats_update(stats: &mut UserStats, update: &StatsUpdate) {
    if let Some(minutes) = update.add_learning_minutes {
        stats.total_learning_time_minutes += minutes;
    }
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
}

pub fn apply_progress_update(
    profile: &mut UserProfile,
    subject: Subject,
    update: &ProgressUpdate,
) -> Result<(), LevelingError> {
    if let Some(mastery) = update.mastery_percentage {
        if !(0.0..=100.0).contains(&mastery) || !mastery.is_finite() {
            return Err(LevelingError::InvalidArgument(format!(
                "mastery_percentage must be within 0-100, got {mastery}"
            )));
        }
    }

    let progress = profile.subject_mut(subject);
    if let Some(mastery) = update.mastery_percentage {
        progress.mastery_percentage = mastery;
    }
    if let Some(item) = &update.completed_item {
        progress.completed_items.push(item.clone());
    }
    if let Some(delta) = update.vocabulary_delta {
        progress.vocabulary_size += delta;
    }
    if let Some(unit) = &update.current_unit {
        progress.current_unit = unit.clone();
    }
    Ok(())
}

/// Pure read over the profile. Mastery is the arithmetic mean over the fixed
/// three-subject set; completed units are counted across all subjects.
pub fn build_summary(profile: &UserProfile, username: &str) -> ProfileSummary {
    let total_mastery: f64 = Subject::ALL
        .iter()
        .map(|s| profile.subject(*s).mastery_percentage)
        .sum();
    let completed_units = Subject::ALL
        .iter()
        .map(|s| profile.subject(*s).completed_items.len())
        .sum();

    ProfileSummary {
        user_id: profile.user_id.clone(),
        username: username.to_string(),
        global_level: profile.stats.global_level,
        english_level: profile.subject(Subject::English).level,
        math_level: profile.subject(Subject::Math).level,
        programming_level: profile.subject(Subject::Programming).level,
        total_xp: profile.stats.total_xp,
        current_streak: profile.stats.current_streak,
        longest_streak: profile.stats.longest_streak,
        learning_time_minutes: profile.stats.total_learning_time_minutes,
        vocabulary_size: profile.subject(Subject::English).vocabulary_size,
        mastery_percentage: total_mastery / Subject::ALL.len() as f64,
        completed_units,
    }
}
