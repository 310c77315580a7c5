use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The guided assessment flavors the assistant can administer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    PersonalityType,
    StressLevel,
    Relationships,
    EmotionalIntelligence,
    Profession,
    StressProgression,
    Advice,
}

impl TestType {
    pub const ALL: [TestType; 7] = [
        TestType::PersonalityType,
        TestType::StressLevel,
        TestType::Relationships,
        TestType::EmotionalIntelligence,
        TestType::Profession,
        TestType::StressProgression,
        TestType::Advice,
    ];

    /// Stable machine-readable name, used on the CLI and in stored records.
    pub fn slug(&self) -> &'static str {
        match self {
            TestType::PersonalityType => "personality",
            TestType::StressLevel => "stress",
            TestType::Relationships => "relationships",
            TestType::EmotionalIntelligence => "emotional-intelligence",
            TestType::Profession => "profession",
            TestType::StressProgression => "stress-progression",
            TestType::Advice => "advice",
        }
    }

    /// Human-facing title shown above the dialogue.
    pub fn title(&self) -> &'static str {
        match self {
            TestType::PersonalityType => "Тест на тип личности",
            TestType::StressLevel => "Тест на уровень стресса",
            TestType::Relationships => "Анализ отношений",
            TestType::EmotionalIntelligence => "Эмоциональный интеллект",
            TestType::Profession => "Определение профессии",
            TestType::StressProgression => "Прогрессия стресса",
            TestType::Advice => "Попросить совета",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestType::ALL
            .iter()
            .copied()
            .find(|t| t.slug() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = TestType::ALL.iter().map(|t| t.slug()).collect();
                format!("unknown test type '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// The finalized outcome of one guided assessment dialogue.
///
/// Built exactly once when a test concludes and handed to the result sink;
/// immutable from then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub test_type: TestType,
    /// The model's final summarizing message.
    pub verdict: String,
    /// Number of answered questions (the priming exchange does not count).
    pub turn_count: u32,
    /// Question count doubling as a coarse score for aggregate views.
    pub score: u32,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl TestResult {
    pub fn new(test_type: TestType, verdict: String, turn_count: u32, details: String) -> Self {
        Self {
            test_type,
            verdict,
            turn_count,
            score: turn_count,
            details,
            created_at: Utc::now(),
        }
    }
}
