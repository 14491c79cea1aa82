use chrono::{DateTime, Utc};

use super::types::{Achievement, AchievementProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    TotalRecipes,
    DistinctCuisines,
}

#[derive(Debug, Clone, Copy)]
struct AchievementRule {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    metric: Metric,
    target: usize,
}

const EARNABLE_RULES: &[AchievementRule] = &[
    AchievementRule {
        id: "first-recipe",
        title: "First Recipe",
        description: "Saved your first recipe",
        icon: "chef-hat",
        metric: Metric::TotalRecipes,
        target: 1,
    },
    AchievementRule {
        id: "getting-started",
        title: "Getting Started",
        description: "Saved 5 recipes",
        icon: "sparkles",
        metric: Metric::TotalRecipes,
        target: 5,
    },
    AchievementRule {
        id: "recipe-collector",
        title: "Recipe Collector",
        description: "Saved 10 recipes",
        icon: "book-open",
        metric: Metric::TotalRecipes,
        target: 10,
    },
    AchievementRule {
        id: "variety",
        title: "Variety",
        description: "Saved recipes from 3 different cuisines",
        icon: "globe",
        metric: Metric::DistinctCuisines,
        target: 3,
    },
    AchievementRule {
        id: "chef-in-the-making",
        title: "Chef in the Making",
        description: "Saved 20 recipes",
        icon: "award",
        metric: Metric::TotalRecipes,
        target: 20,
    },
];

#[derive(Debug, Clone, Copy)]
struct LockedRule {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    target: u32,
}

// Streak and weekly-goal data is not tracked, so these never complete.
const LOCKED_RULES: &[LockedRule] = &[
    LockedRule {
        id: "hot-streak",
        title: "Hot Streak",
        description: "Cook on 3 consecutive days",
        icon: "flame",
        target: 3,
    },
    LockedRule {
        id: "week-warrior",
        title: "Week Warrior",
        description: "Cook every day for a week",
        icon: "calendar",
        target: 7,
    },
    LockedRule {
        id: "goal-getter",
        title: "Goal Getter",
        description: "Hit your weekly cooking goal 4 weeks in a row",
        icon: "target",
        target: 4,
    },
];

/// `"{Month} {Year}"` label stamped on achievements earned in this computation.
pub fn earned_label(now: DateTime<Utc>) -> String {
    now.format("%B %Y").to_string()
}

/// Achievements whose thresholds are met, in definition order.
pub fn earned_achievements(
    total_recipes: usize,
    distinct_cuisines: usize,
    earned_on: &str,
) -> Vec<Achievement> {
    EARNABLE_RULES
        .iter()
        .filter(|rule| {
            let value = match rule.metric {
                Metric::TotalRecipes => total_recipes,
                Metric::DistinctCuisines => distinct_cuisines,
            };
            value >= rule.target
        })
        .map(|rule| Achievement {
            id: rule.id.to_owned(),
            title: rule.title.to_owned(),
            description: rule.description.to_owned(),
            icon: rule.icon.to_owned(),
            earned_date: earned_on.to_owned(),
        })
        .collect()
}

/// Earned achievements as completed progress entries, followed by the locked
/// streak and weekly-goal definitions at zero progress.
pub fn achievement_progress(earned: &[Achievement]) -> Vec<AchievementProgress> {
    let completed = earned.iter().map(|achievement| {
        let target = EARNABLE_RULES
            .iter()
            .find(|rule| rule.id == achievement.id)
            .map(|rule| rule.target as u32)
            .unwrap_or(1);
        AchievementProgress {
            id: achievement.id.clone(),
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            icon: achievement.icon.clone(),
            earned: true,
            earned_date: Some(achievement.earned_date.clone()),
            progress: target,
            target,
        }
    });

    let locked = LOCKED_RULES.iter().map(|rule| AchievementProgress {
        id: rule.id.to_owned(),
        title: rule.title.to_owned(),
        description: rule.description.to_owned(),
        icon: rule.icon.to_owned(),
        earned: false,
        earned_date: None,
        progress: 0,
        target: rule.target,
    });

    completed.chain(locked).collect()
}
