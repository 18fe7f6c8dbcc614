//! Prompt construction for the intent classifier.
//!
//! Builds the single classification prompt embedding the schema summary
//! and the user question, with strict JSON output-format instructions.

use crate::db::SchemaSummary;
use crate::llm::Message;

/// System prompt template for the classification call.
const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are a query assistant that handles both structured and unstructured data.

For database-related questions:
- Use the provided schema to generate a valid SQL query.
- Follow clause order: SELECT, FROM, JOIN, WHERE, GROUP BY, ORDER BY, LIMIT.
- Only use tables and columns present in the schema.
- Reply in strict JSON:
  {"type": "sql", "query": "SELECT ...", "explanation": "..."}

For document or unstructured-data questions:
- Determine the user's intent: "summarize", "search", or "qa".
- Reply in strict JSON:
  {"type": "document", "intent": "summarize", "keywords": ["..."]}

Database schema (for reference):
{schema}

Important:
- Always reply with valid JSON only.
- Do NOT include markdown, code fences, or text outside the JSON object."#;

/// Builds the system prompt with the schema summary injected.
pub fn build_system_prompt(schema: &SchemaSummary) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{schema}", &schema.format_for_prompt())
}

/// Builds the complete message list for one classification call.
pub fn build_classification_messages(question: &str, schema: &SchemaSummary) -> Vec<Message> {
    vec![
        Message::system(build_system_prompt(schema)),
        Message::user(question),
    ]
}
