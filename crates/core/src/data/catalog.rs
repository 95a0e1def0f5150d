//! 日记目标 / 类型目录

/// 表单中可选的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalOption {
    pub value: &'static str,
    pub emoji: &'static str,
}

pub const JOURNAL_GOALS: &[JournalOption] = &[
    JournalOption { value: "Standard Entry", emoji: "📝" },
    JournalOption { value: "Self-Reflection", emoji: "🪞" },
    JournalOption { value: "Stress Reduction", emoji: "😌" },
    JournalOption { value: "Problem Solving", emoji: "🧩" },
    JournalOption { value: "Goal Setting", emoji: "🎯" },
    JournalOption { value: "Boosting Memory", emoji: "🧠" },
    JournalOption { value: "Emotional Release", emoji: "💭" },
    JournalOption { value: "Enhancing Creativity", emoji: "🎨" },
    JournalOption { value: "Tracking Development", emoji: "📈" },
    JournalOption { value: "Improving Writing Skills", emoji: "✍️" },
    JournalOption { value: "Capturing Memories", emoji: "📸" },
];

pub const JOURNAL_TYPES: &[JournalOption] = &[
    JournalOption { value: "Standard", emoji: "📔" },
    JournalOption { value: "Gratitude Journal", emoji: "🙏" },
    JournalOption { value: "Bullet Journal", emoji: "•" },
    JournalOption { value: "Dream Journal", emoji: "💤" },
    JournalOption { value: "Travel Journal", emoji: "✈️" },
    JournalOption { value: "Art Journal", emoji: "🎭" },
    JournalOption { value: "Prayer Journal", emoji: "📿" },
    JournalOption { value: "Food Journal", emoji: "🍽️" },
    JournalOption { value: "Health and Wellness Journal", emoji: "💪" },
    JournalOption { value: "Project Journal", emoji: "📋" },
    JournalOption { value: "Learning Journal", emoji: "📚" },
    JournalOption { value: "Reading Journal", emoji: "📖" },
];

/// 目标对应的 emoji，未知目标返回 ✨
pub fn category_emoji(category: &str) -> &'static str {
    JOURNAL_GOALS
        .iter()
        .find(|option| option.value == category)
        .map(|option| option.emoji)
        .unwrap_or("✨")
}
