use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::llm::{prompts, LlmProvider};

/// Skills and technologies recognized by the non-LLM fallback path.
/// Matching is case-insensitive on whole tokens.
const KNOWN_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "Rust",
    "Go",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "SQL",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "Spring",
    "Docker",
    "Kubernetes",
    "Terraform",
    "AWS",
    "Azure",
    "GCP",
    "Git",
    "Linux",
    "GraphQL",
    "REST",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Kafka",
    "Spark",
    "Hadoop",
    "TensorFlow",
    "PyTorch",
    "Machine Learning",
    "Data Analysis",
    "DevOps",
    "CI/CD",
    "Agile",
    "Scrum",
    "Excel",
    "Communication",
    "Leadership",
];

/// Extracts skill/technology names from chat messages.
///
/// The model is asked for a JSON array; its reply is parsed leniently
/// by scanning for the first well-formed bracketed array rather than
/// requiring the whole reply to be JSON, with one second-chance pass
/// that normalizes quote artifacts. When the model path is
/// unavailable, errors, or yields nothing, a fixed keyword list takes
/// over.
pub struct SkillCaptureFilter {
    llm: LlmProvider,
}

impl SkillCaptureFilter {
    pub fn new(llm: LlmProvider) -> Self {
        Self { llm }
    }

    pub async fn extract(&self, message: &str) -> BTreeSet<String> {
        if message.trim().is_empty() {
            return BTreeSet::new();
        }

        if self.llm.is_available() {
            let prompt = prompts::skill_extraction_prompt(message);
            match self.llm.complete(&prompt, None).await {
                Ok(reply) => {
                    let skills = parse_skill_array(&reply);
                    if !skills.is_empty() {
                        return skills;
                    }
                    tracing::debug!("Skill extraction reply had no parseable array, using keyword fallback");
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Skill extraction call failed, using keyword fallback");
                }
            }
        }

        fallback_keywords(message)
    }
}

/// Find the first well-formed JSON string array anywhere in `reply`.
/// Retries once after normalizing smart quotes, single quotes, and
/// trailing commas.
fn parse_skill_array(reply: &str) -> BTreeSet<String> {
    if let Some(skills) = scan_for_array(reply) {
        return skills;
    }
    scan_for_array(&normalize_json_artifacts(reply)).unwrap_or_default()
}

fn scan_for_array(text: &str) -> Option<BTreeSet<String>> {
    static BRACKETED: OnceLock<Regex> = OnceLock::new();
    let bracketed = BRACKETED.get_or_init(|| Regex::new(r"\[[^\[\]]*\]").expect("static regex"));

    for candidate in bracketed.find_iter(text) {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(candidate.as_str()) {
            let skills: BTreeSet<String> = items
                .into_iter()
                .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
                .collect();
            if !skills.is_empty() {
                return Some(skills);
            }
        }
    }
    None
}

fn normalize_json_artifacts(text: &str) -> String {
    let mut out = text
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace('\'', "\"");

    // Trailing commas before a closing bracket defeat strict parsing.
    static TRAILING_COMMA: OnceLock<Regex> = OnceLock::new();
    let trailing = TRAILING_COMMA.get_or_init(|| Regex::new(r",\s*\]").expect("static regex"));
    out = trailing.replace_all(&out, "]").into_owned();
    out
}

fn fallback_keywords(message: &str) -> BTreeSet<String> {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        KNOWN_SKILLS
            .iter()
            .map(|skill| {
                let escaped = regex::escape(skill);
                let pattern =
                    format!(r"(?i)(?:^|[^A-Za-z0-9+#]){escaped}(?:$|[^A-Za-z0-9+#])");
                (*skill, Regex::new(&pattern).expect("skill pattern"))
            })
            .collect()
    });

    patterns
        .iter()
        .filter(|(_, pattern)| pattern.is_match(message))
        .map(|(skill, _)| skill.to_string())
        .collect()
}
