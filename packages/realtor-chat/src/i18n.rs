use realtor_core::Language;
use serde_json::Value;
use std::collections::HashMap;

/// Number of quick-start questions on the welcome screen.
pub const SAMPLE_QUESTION_COUNT: usize = 4;

/// UI strings for every supported language.
#[derive(Clone, Debug)]
pub struct I18n {
    messages: HashMap<Language, HashMap<String, String>>,
}

impl I18n {
    pub fn load() -> Self {
        let messages = Language::ALL
            .into_iter()
            .map(|language| (language, load_messages(language)))
            .collect();
        Self { messages }
    }

    pub fn t(&self, language: Language, key: &str) -> String {
        self.messages
            .get(&language)
            .and_then(|messages| messages.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, language: Language, key: &str, params: &[(&str, &str)]) -> String {
        let mut value = self.t(language, key);
        for (param, replacement) in params {
            value = value.replace(&format!("{{{param}}}"), replacement);
        }
        value
    }

    /// Quick-start question `index` (1-based), if it exists.
    pub fn sample_question(&self, language: Language, index: usize) -> Option<String> {
        (1..=SAMPLE_QUESTION_COUNT)
            .contains(&index)
            .then(|| self.t(language, &format!("welcome.sample_{index}")))
    }
}

fn load_messages(language: Language) -> HashMap<String, String> {
    let raw = match language {
        Language::En => include_str!("../i18n/en.json"),
        Language::Zh => include_str!("../i18n/zh.json"),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect(),
        _ => HashMap::new(),
    }
}
