//! Milestone table for the streak reward popup.
//!
//! Two lookups with deliberately different semantics, preserved from
//! the original behavior: [`is_milestone`] (exact membership) is the
//! only thing that may trigger the popup, while [`achievement_for`]
//! (highest matching threshold, `>=`) only picks the presentation of
//! a popup that is already being shown.

/// Presentation for one reward tier: celebratory text plus the accent
/// and border colors of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub message: &'static str,
    pub color: &'static str,
    pub border_color: &'static str,
}

/// Streak values that trigger the reward popup, ascending.
pub const MILESTONES: [u32; 5] = [7, 39, 59, 72, 272];

const TIERS: [(u32, Achievement); 5] = [
    (
        272,
        Achievement {
            title: "Congratulation!",
            message: "272問連続正解達成！全てを知っている貴方には脱帽します。",
            color: "#FF00FF",
            border_color: "magenta",
        },
    ),
    (
        72,
        Achievement {
            title: "Congratulation!",
            message: "72問連続正解達成！貴方なら軍団長になれるでしょう！",
            color: "#FF0000",
            border_color: "red",
        },
    ),
    (
        59,
        Achievement {
            title: "Congratulation!",
            message: "59問連続正解！ここまで生き残ったことに涙が止まりません！",
            color: "#9932CC",
            border_color: "purple",
        },
    ),
    (
        39,
        Achievement {
            title: "Congratulation!",
            message: "39問連続正解！ここまで勝利し続けていただき、感謝しかありません！",
            color: "#1E90FF",
            border_color: "blue",
        },
    ),
    (
        7,
        Achievement {
            title: "Congratulation!",
            message: "7問連続正解！貴方の幸運は戦巧者にふさわしい！",
            color: "#32CD32",
            border_color: "green",
        },
    ),
];

/// Whether this streak value is exactly a reward threshold.
#[must_use]
pub fn is_milestone(streak: u32) -> bool {
    MILESTONES.contains(&streak)
}

/// The highest tier this streak has reached, or `None` below all
/// thresholds. Used for popup presentation only, never for gating.
#[must_use]
pub fn achievement_for(streak: u32) -> Option<&'static Achievement> {
    TIERS
        .iter()
        .find(|(threshold, _)| streak >= *threshold)
        .map(|(_, achievement)| achievement)
}
