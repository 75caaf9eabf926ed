//! Static vocabulary tables used by the keyword extractor and the quality analyzers.
//!
//! Everything here is immutable and compiled once on first use, so concurrent
//! requests share a single copy of every table and regex.

use once_cell::sync::Lazy;
use regex::Regex;

/// One keyword category with the weight every member contributes to a skill map.
#[derive(Debug, Clone, Copy)]
pub struct KeywordCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub weight: f64,
}

/// A single flattened `(category, keyword, weight)` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocabularyEntry {
    pub category: &'static str,
    pub keyword: &'static str,
    pub weight: f64,
}

pub const SKILL_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "programming",
        keywords: &[
            "python",
            "java",
            "javascript",
            "typescript",
            "c++",
            "c#",
            "go",
            "rust",
            "swift",
            "kotlin",
        ],
        weight: 1.2,
    },
    KeywordCategory {
        name: "web_frameworks",
        keywords: &[
            "react", "angular", "vue", "django", "flask", "node", "express", "spring", "laravel",
        ],
        weight: 1.3,
    },
    KeywordCategory {
        name: "database",
        keywords: &[
            "sql",
            "mysql",
            "postgresql",
            "mongodb",
            "redis",
            "oracle",
            "sqlite",
        ],
        weight: 1.1,
    },
    KeywordCategory {
        name: "cloud_devops",
        keywords: &[
            "aws",
            "azure",
            "gcp",
            "docker",
            "kubernetes",
            "terraform",
            "jenkins",
            "ci/cd",
        ],
        weight: 1.4,
    },
    KeywordCategory {
        name: "data_science",
        keywords: &[
            "pandas",
            "numpy",
            "tensorflow",
            "pytorch",
            "scikit",
            "matplotlib",
            "seaborn",
            "machine learning",
        ],
        weight: 1.3,
    },
    KeywordCategory {
        name: "tools",
        keywords: &["git", "jira", "confluence", "slack", "figma", "photoshop"],
        weight: 1.0,
    },
];

pub const QUALIFICATION_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "degrees",
        keywords: &[
            "bachelor",
            "master",
            "phd",
            "doctorate",
            "btech",
            "mtech",
            "msc",
            "bsc",
            "mba",
            "bba",
        ],
        weight: 1.5,
    },
    KeywordCategory {
        name: "certifications",
        keywords: &[
            "certified",
            "certification",
            "aws certified",
            "pmp",
            "scrum master",
            "six sigma",
        ],
        weight: 1.2,
    },
];

/// Skills that earn a bonus when matched and a penalty when required but missing.
pub const HIGH_VALUE_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "machine learning",
];

pub const STRONG_ACTION_VERBS: &[&str] = &[
    "achieved",
    "implemented",
    "developed",
    "managed",
    "led",
    "optimized",
    "increased",
    "decreased",
    "improved",
    "created",
    "executed",
    "spearheaded",
    "orchestrated",
    "transformed",
    "revolutionized",
    "pioneered",
    "engineered",
    "architected",
];

pub const WEAK_ACTION_VERBS: &[&str] = &[
    "assisted",
    "helped",
    "participated",
    "supported",
    "worked on",
    "involved in",
];

/// Layout elements most parsers choke on. Matched as plain substrings.
pub const ATS_UNFRIENDLY_ELEMENTS: &[&str] = &[
    "table",
    "column",
    "image",
    "graphic",
    "chart",
    "infographic",
    "header",
    "footer",
    "text box",
    "textbox",
];

pub const REQUIRED_SECTIONS: &[&str] = &["summary", "experience", "education", "skills", "contact"];

/// Every skill and qualification entry, skills first, in table order.
pub static VOCABULARY: Lazy<Vec<VocabularyEntry>> = Lazy::new(|| {
    SKILL_CATEGORIES
        .iter()
        .chain(QUALIFICATION_CATEGORIES)
        .flat_map(|category| {
            category.keywords.iter().map(move |keyword| VocabularyEntry {
                category: category.name,
                keyword,
                weight: category.weight,
            })
        })
        .collect()
});

/// A vocabulary entry paired with its compiled whole-word matcher.
pub struct CompiledEntry {
    pub entry: VocabularyEntry,
    pub pattern: Regex,
}

/// Vocabulary matchers, compiled against the same normalization applied to input text.
pub static VOCABULARY_PATTERNS: Lazy<Vec<CompiledEntry>> = Lazy::new(|| {
    VOCABULARY
        .iter()
        .map(|entry| CompiledEntry {
            entry: *entry,
            pattern: whole_phrase(&crate::matching::keywords::normalize_text(entry.keyword)),
        })
        .collect()
});

/// Ordered experience-years phrasings. Group 1 always captures the number.
pub static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+)\s*\+?\s*years?",
        r"(?i)(\d+)\s*\+?\s*yrs?",
        r"(?i)experience.*(\d+)\s*years?",
        r"(?i)(\d+)\s*years?.*experience",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

/// Free-form technical tokens such as `html + css` or `python3`.
pub static TECHNICAL_TOKEN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\b[a-z]+\s*\+\s*[a-z]+\b", r"\b[a-z]{2,}\d+\b"]
        .iter()
        .map(|p| compile(p))
        .collect()
});

/// Achievement phrasings. Group 1 captures the metric itself.
pub static QUANTIFIABLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"increased by\s*(\d+%?)",
        r"decreased by\s*(\d+%?)",
        r"reduced by\s*(\d+%?)",
        r"improved by\s*(\d+%?)",
        r"saved\s*(\$?\d+)",
        r"achieved\s*(\d+%?)",
        r"managed\s*(\$?\d+)",
        r"led\s*team of\s*(\d+)",
        r"handled\s*(\d+)",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

pub static STRONG_VERB_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| word_patterns(STRONG_ACTION_VERBS));

pub static WEAK_VERB_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| word_patterns(WEAK_ACTION_VERBS));

fn word_patterns(words: &'static [&'static str]) -> Vec<(&'static str, Regex)> {
    words
        .iter()
        .map(|w| (*w, compile(&format!(r"(?i)\b{}\b", regex::escape(w)))))
        .collect()
}

/// Builds a matcher for `phrase` that rejects hits glued to a letter or digit.
///
/// `\b` cannot be used here: phrases like `c++` and `c#` end in non-word
/// characters, so a trailing `\b` would demand a letter right after them.
fn whole_phrase(phrase: &str) -> Regex {
    compile(&format!(
        r"(?:^|[^a-z0-9]){}(?:[^a-z0-9]|$)",
        regex::escape(phrase)
    ))
}

// All patterns are literals or escaped table entries.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static vocabulary pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_weights_positive() {
        assert!(VOCABULARY.iter().all(|e| e.weight > 0.0));
    }

    #[test]
    fn test_vocabulary_flattens_every_category() {
        let expected: usize = SKILL_CATEGORIES
            .iter()
            .chain(QUALIFICATION_CATEGORIES)
            .map(|c| c.keywords.len())
            .sum();
        assert_eq!(VOCABULARY.len(), expected);
        assert_eq!(VOCABULARY_PATTERNS.len(), expected);
    }

    #[test]
    fn test_high_value_skills_are_in_vocabulary() {
        for skill in HIGH_VALUE_SKILLS {
            assert!(
                VOCABULARY.iter().any(|e| e.keyword == *skill),
                "{skill} missing from vocabulary"
            );
        }
    }

    #[test]
    fn test_whole_phrase_handles_symbol_suffixes() {
        let cpp = whole_phrase("c++");
        assert!(cpp.is_match("i write c++ daily"));
        assert!(cpp.is_match("c++"));
        assert!(!cpp.is_match("abc++"));

        let go = whole_phrase("go");
        assert!(go.is_match("we use go and rust"));
        assert!(!go.is_match("google cloud"));
    }

    #[test]
    fn test_verb_patterns_are_case_insensitive() {
        let (_, led) = STRONG_VERB_PATTERNS
            .iter()
            .find(|(v, _)| *v == "led")
            .unwrap();
        assert!(led.is_match("Led a team"));
        assert!(!led.is_match("ledger"));
    }
}
