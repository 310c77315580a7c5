//! Conclusion detection heuristic.
//!
//! A reply is treated as the final conclusion when it mentions at least one
//! conclusion/recommendation term AND is long enough for its test flavor.
//! Both signals are required; this stays a heuristic. False negatives are
//! resolved by the question cap, false positives are accepted.

use mindgauge_common::TestType;

/// Terms whose presence (case-folded) marks a reply as a candidate
/// conclusion.
pub const CONCLUSION_KEYWORDS: [&str; 16] = [
    "заключение",
    "вывод",
    "рекомендации",
    "итог",
    "результат",
    "ваш тип",
    "ваш уровень",
    "подходящие профессии",
    "сильные стороны",
    "области для развития",
    "совет",
    "рекомендую",
    "следует",
    "стоит",
    "варианты решения",
    "практические шаги",
];

/// Minimum reply length (exclusive) for a conclusion, per test flavor.
/// Advice replies run shorter than full test verdicts.
fn length_threshold(test_type: TestType) -> usize {
    if test_type == TestType::Advice {
        300
    } else {
        400
    }
}

/// Classify an assistant reply as a conclusion.
pub fn is_conclusion(text: &str, test_type: TestType) -> bool {
    let lower = text.to_lowercase();
    let has_keyword = CONCLUSION_KEYWORDS.iter().any(|k| lower.contains(k));
    has_keyword && text.chars().count() > length_threshold(test_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Text of exactly `len` characters starting with the given prefix.
    fn text_of_length(prefix: &str, len: usize) -> String {
        let prefix_len = prefix.chars().count();
        assert!(prefix_len <= len);
        let mut text = prefix.to_string();
        text.extend(std::iter::repeat('а').take(len - prefix_len));
        assert_eq!(text.chars().count(), len);
        text
    }

    #[test]
    fn advice_boundary_at_300() {
        let hit = text_of_length("Ваши рекомендации: ", 301);
        assert!(is_conclusion(&hit, TestType::Advice));

        let miss = text_of_length("Ваши рекомендации: ", 299);
        assert!(!is_conclusion(&miss, TestType::Advice));

        // Exactly at the threshold is still not a conclusion.
        let exact = text_of_length("Ваши рекомендации: ", 300);
        assert!(!is_conclusion(&exact, TestType::Advice));
    }

    #[test]
    fn other_types_use_the_400_boundary() {
        let text = text_of_length("Заключение: ", 401);
        assert!(is_conclusion(&text, TestType::PersonalityType));

        let short = text_of_length("Заключение: ", 400);
        assert!(!is_conclusion(&short, TestType::PersonalityType));

        // 301 chars clears the advice threshold but not the test one.
        let advice_sized = text_of_length("Заключение: ", 301);
        assert!(is_conclusion(&advice_sized, TestType::Advice));
        assert!(!is_conclusion(&advice_sized, TestType::StressLevel));
    }

    #[test]
    fn keyword_match_is_case_folded() {
        let text = text_of_length("ВАШ ТИП личности определен. ", 500);
        assert!(is_conclusion(&text, TestType::PersonalityType));
    }

    #[test]
    fn length_alone_is_not_enough() {
        let text = text_of_length("Расскажите подробнее о вашем дне. ", 500);
        assert!(!is_conclusion(&text, TestType::PersonalityType));
    }

    #[test]
    fn keyword_alone_is_not_enough() {
        assert!(!is_conclusion("Краткий вывод.", TestType::PersonalityType));
    }
}
