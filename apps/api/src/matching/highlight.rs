//! Wraps matched keywords in `<mark>` tags for side-by-side display.

use regex::RegexBuilder;
use serde::Serialize;
use tracing::warn;

use crate::matching::keywords::extract_skills;

const MARK_OPEN: &str = r#"<mark class="highlight">"#;
const MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, Serialize)]
pub struct HighlightResult {
    pub highlighted_resume: String,
    pub highlighted_jd: String,
    pub matched_keywords: Vec<String>,
}

/// Highlights the keywords the resume and job description have in common, in both texts.
pub fn highlight_matches(resume_text: &str, jd_text: &str) -> HighlightResult {
    let resume_skills = extract_skills(resume_text);
    let jd_skills = extract_skills(jd_text);
    let matched_keywords: Vec<String> = resume_skills
        .keywords()
        .filter(|k| jd_skills.contains(k))
        .map(String::from)
        .collect();

    HighlightResult {
        highlighted_resume: highlight_text(resume_text, &matched_keywords),
        highlighted_jd: highlight_text(jd_text, &matched_keywords),
        matched_keywords,
    }
}

/// Marks every case-insensitive, whole-word occurrence of any keyword, keeping the
/// original casing.
///
/// All keywords go into one alternation, longest first, so a single pass never
/// nests marks or highlights a shorter keyword inside a longer one. Word edges
/// are the same ones the extractor uses: any character outside `[a-z0-9]`.
pub fn highlight_text<S: AsRef<str>>(text: &str, keywords: &[S]) -> String {
    let mut ordered: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.is_empty())
        .collect();
    if ordered.is_empty() {
        return text.to_string();
    }
    ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    ordered.dedup();

    let alternation = ordered
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("(?:^|[^a-z0-9])({alternation})(?:[^a-z0-9]|$)");

    let pattern = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(pattern) => pattern,
        Err(e) => {
            // Only reachable when the alternation exceeds the regex size limit.
            warn!("Skipping keyword highlighting: {e}");
            return text.to_string();
        }
    };

    // The trailing edge is matched but not consumed, so it can open the next match.
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(keyword) = pattern.captures_at(text, pos).and_then(|caps| caps.get(1)) {
        out.push_str(&text[pos..keyword.start()]);
        out.push_str(MARK_OPEN);
        out.push_str(keyword.as_str());
        out.push_str(MARK_CLOSE);
        pos = keyword.end();
    }
    out.push_str(&text[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_case_insensitively() {
        let out = highlight_text("Python and AWS, python again", &["python", "aws"]);
        assert_eq!(
            out,
            r#"<mark class="highlight">Python</mark> and <mark class="highlight">AWS</mark>, <mark class="highlight">python</mark> again"#
        );
    }

    #[test]
    fn test_longest_keyword_wins() {
        let out = highlight_text("AWS Certified engineer", &["aws", "aws certified"]);
        assert_eq!(
            out,
            r#"<mark class="highlight">AWS Certified</mark> engineer"#
        );
    }

    #[test]
    fn test_symbol_keywords_are_escaped() {
        let out = highlight_text("C++ and C#", &["c++", "c#"]);
        assert_eq!(
            out,
            r#"<mark class="highlight">C++</mark> and <mark class="highlight">C#</mark>"#
        );
    }

    #[test]
    fn test_only_whole_words_are_marked() {
        let out = highlight_text("Google hired me years ago", &["go"]);
        assert_eq!(out, "Google hired me years ago");
    }

    #[test]
    fn test_adjacent_keywords_share_a_separator() {
        let out = highlight_text("Go go, GO.", &["go"]);
        assert_eq!(
            out,
            r#"<mark class="highlight">Go</mark> <mark class="highlight">go</mark>, <mark class="highlight">GO</mark>."#
        );
    }

    #[test]
    fn test_shorter_keyword_used_when_longer_is_not_whole() {
        let out = highlight_text("node.jsx", &["node", "node.js"]);
        assert_eq!(out, r#"<mark class="highlight">node</mark>.jsx"#);
    }

    #[test]
    fn test_highlight_matches_marks_shared_keywords_only() {
        let result = highlight_matches("Rust and Go services", "We need Go and Kotlin");
        assert_eq!(result.matched_keywords, vec!["go"]);
        assert_eq!(
            result.highlighted_resume,
            r#"Rust and <mark class="highlight">Go</mark> services"#
        );
        assert_eq!(
            result.highlighted_jd,
            r#"We need <mark class="highlight">Go</mark> and Kotlin"#
        );
    }

    #[test]
    fn test_no_keywords_returns_input() {
        let empty: [&str; 0] = [];
        assert_eq!(highlight_text("unchanged", &empty), "unchanged");
    }
}
