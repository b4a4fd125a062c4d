//! Self-assessment questionnaire.
//!
//! A fixed bank of yes/no questions, three per life category. Scoring gives
//! the share of "yes" and "no" answers per category so the user can see
//! where new habits would help most.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Life area a question belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Health,
    Productivity,
    Mindfulness,
    Learning,
    Relationships,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Productivity,
        Category::Mindfulness,
        Category::Learning,
        Category::Relationships,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Health => "Health",
            Category::Productivity => "Productivity",
            Category::Mindfulness => "Mindfulness",
            Category::Learning => "Learning",
            Category::Relationships => "Relationships",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    pub category: Category,
}

/// The question bank, in the order it is asked.
pub const QUESTIONS: [Question; 15] = [
    Question { id: 1, text: "Do you exercise regularly?", category: Category::Health },
    Question { id: 2, text: "Do you plan your day ahead?", category: Category::Productivity },
    Question { id: 3, text: "Do you meditate daily?", category: Category::Mindfulness },
    Question { id: 4, text: "Do you read books often?", category: Category::Learning },
    Question { id: 5, text: "Do you spend time with family?", category: Category::Relationships },
    Question { id: 6, text: "Do you eat healthy meals daily?", category: Category::Health },
    Question { id: 7, text: "Do you set daily goals?", category: Category::Productivity },
    Question { id: 8, text: "Do you practice gratitude?", category: Category::Mindfulness },
    Question { id: 9, text: "Do you engage in self-learning?", category: Category::Learning },
    Question { id: 10, text: "Do you call friends or family often?", category: Category::Relationships },
    Question { id: 11, text: "Do you drink enough water daily?", category: Category::Health },
    Question { id: 12, text: "Do you avoid procrastination?", category: Category::Productivity },
    Question { id: 13, text: "Do you take breaks to clear your mind?", category: Category::Mindfulness },
    Question { id: 14, text: "Do you take notes while learning?", category: Category::Learning },
    Question { id: 15, text: "Do you support your loved ones emotionally?", category: Category::Relationships },
];

/// Per-category result, whole-number percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub yes_percentage: u32,
    pub no_percentage: u32,
}

fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(total) * 100.0).round() as u32
}

/// Score answers given in question order.
///
/// `answers[i]` answers `QUESTIONS[i]`; missing answers count as "no" and
/// extra answers are ignored. Results come back in [`Category::ALL`] order.
pub fn score(answers: &[bool]) -> Vec<CategoryScore> {
    let mut tally: BTreeMap<Category, (u32, u32)> = BTreeMap::new();
    for (index, question) in QUESTIONS.iter().enumerate() {
        let entry = tally.entry(question.category).or_default();
        if answers.get(index).copied().unwrap_or(false) {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    Category::ALL
        .iter()
        .map(|&category| {
            let (yes, no) = tally.get(&category).copied().unwrap_or_default();
            CategoryScore {
                category,
                yes_percentage: percent(yes, yes + no),
                no_percentage: percent(no, yes + no),
            }
        })
        .collect()
}

/// Categories with the highest "no" share, in category order.
///
/// Empty when every category scored zero "no" answers.
pub fn suggested_categories(scores: &[CategoryScore]) -> Vec<Category> {
    let worst = scores.iter().map(|s| s.no_percentage).max().unwrap_or(0);
    if worst == 0 {
        return Vec::new();
    }
    scores
        .iter()
        .filter(|s| s.no_percentage == worst)
        .map(|s| s.category)
        .collect()
}
