//! Skill progression: experience with diminishing per-use returns, mapped to
//! discrete levels.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base experience for a successful use.
const SUCCESS_XP: f64 = 10.0;
/// Base experience for a failed use.
const FAILURE_XP: f64 = 3.0;
/// Per-use bonus increment and its cap.
const BONUS_PER_USE: f64 = 0.01;
const BONUS_CAP: f64 = 2.0;

/// Category given to skills that are provisioned on first use.
pub const DEFAULT_CATEGORY: &str = "communication";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Novice,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Ascending order.
    pub const ALL: [SkillLevel; 5] = [
        SkillLevel::Novice,
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    /// Minimum cumulative experience for this level.
    pub fn threshold(&self) -> f64 {
        match self {
            SkillLevel::Novice => 0.0,
            SkillLevel::Beginner => 100.0,
            SkillLevel::Intermediate => 500.0,
            SkillLevel::Advanced => 2000.0,
            SkillLevel::Expert => 10000.0,
        }
    }

    /// Highest level whose threshold is `<= experience`, scanning from the top.
    pub fn for_experience(experience: f64) -> SkillLevel {
        SkillLevel::ALL
            .iter()
            .rev()
            .find(|level| experience >= level.threshold())
            .copied()
            .unwrap_or(SkillLevel::Novice)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Novice => "Новичок",
            SkillLevel::Beginner => "Начинающий",
            SkillLevel::Intermediate => "Средний",
            SkillLevel::Advanced => "Продвинутый",
            SkillLevel::Expert => "Эксперт",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: String,
    pub experience: f64,
    pub level: SkillLevel,
    pub uses: u32,
    pub tags: Vec<String>,
}

impl Skill {
    pub fn new(name: &str, category: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            experience: 0.0,
            level: SkillLevel::Novice,
            uses: 0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// `min(1 + uses * 0.01, 2.0)`
    pub fn bonus(&self) -> f64 {
        (1.0 + self.uses as f64 * BONUS_PER_USE).min(BONUS_CAP)
    }
}

/// Named skills plus a running experience total.
#[derive(Debug, Clone)]
pub struct SkillLedger {
    skills: Vec<Skill>,
    index: HashMap<String, usize>,
    total_experience: f64,
}

impl Default for SkillLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillLedger {
    /// Ledger pre-populated with the default skill set.
    pub fn new() -> Self {
        let mut ledger = Self::empty();
        let defaults: [(&str, &str, &[&str]); 5] = [
            ("greeting", "communication", &["social"]),
            ("internet_search", "technical", &["web", "research"]),
            ("empathy", "communication", &["emotional"]),
            ("analysis", "technical", &["logic"]),
            ("creativity", "creative", &["creative"]),
        ];
        for (name, category, tags) in defaults {
            ledger.insert(Skill::new(name, category, tags));
        }
        ledger
    }

    /// Ledger with no skills at all.
    pub fn empty() -> Self {
        Self {
            skills: Vec::new(),
            index: HashMap::new(),
            total_experience: 0.0,
        }
    }

    fn insert(&mut self, skill: Skill) -> usize {
        let idx = self.skills.len();
        self.index.insert(skill.name.clone(), idx);
        self.skills.push(skill);
        idx
    }

    /// Record one use of `name`, provisioning it if unknown. Returns the XP granted.
    pub fn use_skill(&mut self, name: &str, success: bool) -> f64 {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                tracing::debug!("Provisioning unknown skill '{}'", name);
                self.insert(Skill::new(name, DEFAULT_CATEGORY, &[]))
            }
        };

        let skill = &mut self.skills[idx];
        let base = if success { SUCCESS_XP } else { FAILURE_XP };
        let xp = base * skill.bonus();

        skill.experience += xp;
        skill.uses += 1;
        let previous = skill.level;
        skill.level = SkillLevel::for_experience(skill.experience);
        if skill.level != previous {
            tracing::info!(
                "Skill '{}' leveled up: {:?} -> {:?} ({:.1} XP)",
                skill.name,
                previous,
                skill.level,
                skill.experience
            );
        }

        self.total_experience += xp;
        xp
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.index.get(name).map(|&idx| &self.skills[idx])
    }

    /// Skills in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn total_experience(&self) -> f64 {
        self.total_experience
    }

    /// Aggregate "character level": `floor(log10(total_xp + 1) * 2) + 1`.
    pub fn total_level(&self) -> u32 {
        let total = self.total_experience.max(0.0);
        ((total + 1.0).log10() * 2.0).floor() as u32 + 1
    }

    pub fn skills_by_category(&self, category: &str) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Human-readable listing of every skill plus the aggregate level.
    pub fn report(&self) -> String {
        let mut out = String::from("⚡ Навыки\n");
        for skill in &self.skills {
            out.push_str(&format!(
                "• {}: {} ({} XP)\n",
                skill.name,
                skill.level.label(),
                skill.experience as u64
            ));
        }
        out.push_str(&format!("🎯 Общий уровень: {}", self.total_level()));
        out
    }
}
