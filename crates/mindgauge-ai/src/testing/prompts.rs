//! Prompt catalog for the guided assessments.
//!
//! All display strings are Russian, matching the audience of the service;
//! the per-type prompts instruct the model to ask one question at a time
//! and to close with an explicit conclusion.

use mindgauge_common::TestType;

/// Default assistant persona, prepended to every dialogue.
pub const DEFAULT_PERSONA: &str = "Ты психологический ассистент. Твоя задача - помогать пользователям с психологическими тестами, \
определением типа личности, уровнем стресса, анализом отношений, эмоционального интеллекта и подбором профессии. \
Будь дружелюбным, профессиональным и поддерживающим. Используй научный подход к психологии.";

/// Canned opener the orchestrator sends to prime the dialogue.
pub const OPENER: &str = "Привет! Готов начать тест.";

/// Verdict of last resort when no assistant turn exists to fall back on.
pub const FALLBACK_VERDICT: &str = "Тест завершен";

fn task_instruction(test_type: TestType) -> &'static str {
    match test_type {
        TestType::PersonalityType => {
            "Проведи тест на определение типа личности. Задавай по одному вопросу за раз \
             о предпочтениях, привычках и реакциях пользователя. После достаточного числа \
             ответов сделай заключение: опиши тип личности, сильные стороны и области для развития."
        }
        TestType::StressLevel => {
            "Проведи тест на уровень стресса. Задавай по одному вопросу за раз о сне, \
             самочувствии, нагрузке и эмоциональном состоянии. В конце сделай заключение: \
             оцени уровень стресса и дай рекомендации по его снижению."
        }
        TestType::Relationships => {
            "Проведи анализ отношений. Задавай по одному вопросу за раз о общении, доверии \
             и конфликтах. В конце сделай заключение с выводами и рекомендациями по улучшению отношений."
        }
        TestType::EmotionalIntelligence => {
            "Проведи тест на эмоциональный интеллект. Задавай по одному вопросу за раз о том, \
             как пользователь распознает и управляет эмоциями. В конце сделай заключение: \
             оцени уровень эмоционального интеллекта и подскажи области для развития."
        }
        TestType::Profession => {
            "Проведи тест на определение подходящей профессии. Задавай по одному вопросу за раз \
             об интересах, навыках и ценностях. В конце сделай заключение: назови подходящие \
             профессии и объясни выбор."
        }
        TestType::StressProgression => {
            "Проведи повторный замер уровня стресса для отслеживания динамики. Задавай по одному \
             вопросу за раз о текущем состоянии. В конце сделай заключение: оцени уровень стресса \
             по сравнению с обычным состоянием и дай рекомендации."
        }
        TestType::Advice => {
            "Пользователь хочет попросить совета. Задай несколько уточняющих вопросов по одному \
             за раз, чтобы понять ситуацию. Затем дай развернутый совет: варианты решения и \
             практические шаги."
        }
    }
}

/// System prompt for one assessment flavor: persona plus task instruction.
pub fn system_prompt(test_type: TestType) -> String {
    format!("{DEFAULT_PERSONA}\n\n{}", task_instruction(test_type))
}

/// Explicit conclusion request, issued when the question cap is reached
/// before the model volunteers a conclusion.
pub fn conclusion_prompt(test_type: TestType) -> &'static str {
    match test_type {
        TestType::PersonalityType => {
            "На основе моих ответов сделай заключение: определи мой тип личности, \
             опиши сильные стороны и области для развития."
        }
        TestType::StressLevel | TestType::StressProgression => {
            "На основе моих ответов сделай заключение: оцени мой уровень стресса \
             и дай рекомендации по его снижению."
        }
        TestType::Relationships => {
            "На основе моих ответов сделай заключение: подведи итог анализа отношений \
             и дай рекомендации по их улучшению."
        }
        TestType::EmotionalIntelligence => {
            "На основе моих ответов сделай заключение: оцени мой эмоциональный интеллект \
             и подскажи, что развивать."
        }
        TestType::Profession => {
            "На основе моих ответов сделай заключение: назови подходящие мне профессии \
             и объясни почему."
        }
        TestType::Advice => {
            "На основе всего, что я рассказал, дай развернутый совет: варианты решения \
             и практические шаги."
        }
    }
}
