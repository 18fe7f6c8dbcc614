//! Response parsing for classification output.
//!
//! The classifier asks for bare JSON, but models routinely wrap it in
//! markdown code fences anyway. Parsing strips the fences, then runs a
//! strict serde deserialization into the tagged plan; anything that does
//! not validate becomes `Unrecognized` rather than an error.

use serde::Deserialize;

use crate::classifier::{ClassificationResult, Intent};

/// Wire format of the classifier's JSON reply.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WirePlan {
    Sql {
        query: String,
        #[serde(default)]
        explanation: String,
    },
    Document {
        #[serde(default)]
        intent: String,
        #[serde(default)]
        keywords: Vec<String>,
    },
}

/// Parses raw LLM output into a `ClassificationResult`.
///
/// Tolerates code-fence wrapping (with or without a "json" language tag),
/// and turns malformed JSON, a missing `type` field, or an unknown type
/// into `Unrecognized` carrying the original content.
pub fn parse_classification(content: &str) -> ClassificationResult {
    let stripped = strip_code_fences(content);

    match serde_json::from_str::<WirePlan>(stripped) {
        Ok(WirePlan::Sql { query, explanation }) => ClassificationResult::Sql { query, explanation },
        Ok(WirePlan::Document { intent, keywords }) => ClassificationResult::Document {
            intent: intent.trim().parse::<Intent>().ok(),
            keywords,
        },
        Err(_) => ClassificationResult::Unrecognized {
            raw: content.to_string(),
        },
    }
}

/// Extracts the content between the first pair of ``` fences, dropping a
/// leading "json" language tag. Returns the trimmed input when no fence
/// is present.
fn strip_code_fences(content: &str) -> &str {
    let Some(start) = content.find("```") else {
        return content.trim();
    };

    let after = &content[start + 3..];
    let inner = match after.find("```") {
        Some(end) => &after[..end],
        None => after,
    };

    let inner = inner.trim_start();
    let inner = inner
        .strip_prefix("json")
        .filter(|rest| rest.starts_with(|c: char| c.is_whitespace()))
        .unwrap_or(inner);

    inner.trim()
}
