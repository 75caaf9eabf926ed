//! Turns raw document text into a weighted skill map.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::{
    compile, EXPERIENCE_PATTERNS, TECHNICAL_TOKEN_PATTERNS, VOCABULARY_PATTERNS,
};

/// Key used for the experience-years pseudo-skill.
pub const EXPERIENCE_KEY: &str = "experience";

/// Weight given to technical tokens found outside the static vocabulary.
const TECHNICAL_TOKEN_WEIGHT: f64 = 1.0;

static NON_KEYWORD_CHARS: Lazy<Regex> = Lazy::new(|| compile(r"[^a-z0-9\s+#.]"));

/// Matched keyword → weight for one document. Keys are lowercase and unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillMap(BTreeMap<String, f64>);

impl SkillMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keyword: impl Into<String>, weight: f64) {
        self.0.insert(keyword.into(), weight);
    }

    pub fn get(&self, keyword: &str) -> Option<f64> {
        self.0.get(keyword).copied()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains_key(keyword)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keywords in lexicographic order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn total_weight(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(String, f64)> for SkillMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lowercases and replaces everything except letters, digits, whitespace, `+`, `#`
/// and `.` with a space, so tokens like `c++`, `c#` and `node.js` survive.
pub fn normalize_text(text: &str) -> String {
    NON_KEYWORD_CHARS
        .replace_all(&text.to_lowercase(), " ")
        .into_owned()
}

/// Extracts the weighted keyword-presence map for a document.
///
/// Vocabulary keywords get their category weight, an `experience` entry is
/// added when a years-of-experience figure is present, and technical tokens
/// the vocabulary does not know about are kept at weight 1.0. Token capture
/// is deliberately loose and can produce noise such as `and + or`.
pub fn extract_skills(text: &str) -> SkillMap {
    let normalized = normalize_text(text);
    let mut skills = SkillMap::new();

    for compiled in VOCABULARY_PATTERNS.iter() {
        if compiled.pattern.is_match(&normalized) {
            skills.insert(compiled.entry.keyword, compiled.entry.weight);
        }
    }

    let years = extract_experience_years(&normalized);
    if years > 0 {
        skills.insert(EXPERIENCE_KEY, (years as f64 * 0.1).min(1.0));
    }

    for pattern in TECHNICAL_TOKEN_PATTERNS.iter() {
        for token in pattern.find_iter(&normalized) {
            if !skills.contains(token.as_str()) {
                skills.insert(token.as_str(), TECHNICAL_TOKEN_WEIGHT);
            }
        }
    }

    skills
}

/// Largest "N years" style figure mentioned anywhere in the text, or 0.
pub fn extract_experience_years(text: &str) -> u32 {
    EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
        .max()
        .unwrap_or(0)
}
