//! Prompt templates for the coaching features.
//!
//! Plain `format!()` interpolation keeps the placeholders checked at
//! compile time.

/// Prompt for the structured first-pass resume review.
///
/// The model is asked for exactly three strengths and three
/// improvements as a bare JSON object.
pub fn resume_feedback_prompt(resume_text: &str) -> String {
    format!(
        r#"You are an experienced HR recruiter and career coach.
Review the following resume text and provide feedback.
Instructions:
- Identify exactly 3 key strengths (skills, experiences, or achievements).
- Identify exactly 3 areas for improvement (clarity, formatting, missing skills, etc).
- Be concise and use simple language that a fresher can understand.
- You MUST ONLY respond with a valid JSON object. Do not include any other text, greetings, or explanations.
Output format:
{{
    "strengths": ["point 1", "point 2", "point 3"],
    "improvements": ["point 1", "point 2", "point 3"]
}}
Resume:
{resume_text}"#
    )
}

/// Prompt for an answer grounded in retrieved resume chunks.
///
/// Deliberately relaxed: resume questions should use the context,
/// general career questions may fall back to broader knowledge.
pub fn chat_answer_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are a helpful and professional resume assistant and career coach.
Answer the user's question. If the question is about the provided resume, use the context.
If the question is a general career or skill question, use your broader knowledge.

Context:
{context}

Question: {question}"#
    )
}

/// Prompt for extracting skill and technology names from a chat
/// message as a JSON array.
pub fn skill_extraction_prompt(message: &str) -> String {
    format!(
        r#"Extract the names of all concrete skills, technologies, tools, and frameworks mentioned in the following message.
Respond with ONLY a JSON array of strings. If nothing is mentioned, respond with [].
Example: ["Python", "Kubernetes", "public speaking"]

Message:
{message}"#
    )
}

/// Prompt for a structured career plan toward a stated goal.
pub fn career_plan_prompt(goal: &str) -> String {
    format!(
        r#"You are a career coach. Create a practical plan for reaching the goal below.
Respond with ONLY a valid JSON object in this shape:
{{
    "goal": "the goal restated",
    "milestones": [
        {{"title": "milestone name", "actions": ["action 1", "action 2"]}}
    ]
}}
Include 3 to 5 milestones.

Goal:
{goal}"#
    )
}

/// Prompt for a free-text success prediction for a resume against a
/// goal.
pub fn success_prediction_prompt(resume_text: &str, goal: &str) -> String {
    format!(
        r#"You are a career coach. Given the resume and the goal below, assess how likely this person is to reach the goal, what works in their favor, and what is missing. Answer in a few short paragraphs of plain text.

Goal:
{goal}

Resume:
{resume_text}"#
    )
}

/// Prompt for the profile comparison over everything a user has
/// ingested so far.
pub fn profile_comparison_prompt(documents: &str) -> String {
    format!(
        r#"You are a career coach. Below is everything this user has shared: uploaded resume text and skills mentioned in conversation. Compare the uploaded material with the conversational skills, point out gaps between what the resume shows and what the user apparently knows, and suggest what to add to the resume. Answer in plain text.

Ingested material:
{documents}"#
    )
}

/// System prompt for the search-enabled agent; the persona is caller
/// supplied.
pub fn agent_system_prompt(persona: Option<&str>) -> String {
    match persona {
        Some(persona) if !persona.trim().is_empty() => format!(
            "You are {persona}. Stay in that role while helping the user with their career."
        ),
        _ => "You are a pragmatic career advisor helping the user reason about their next move."
            .to_string(),
    }
}

/// User prompt for the agent: optional chat history and retrieved
/// resume context ahead of the query.
pub fn agent_query_prompt(query: &str, chat_history: Option<&str>, context: Option<&str>) -> String {
    let mut prompt = String::new();

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("Resume context:\n");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }

    if let Some(history) = chat_history.filter(|h| !h.trim().is_empty()) {
        prompt.push_str("Conversation so far:\n");
        prompt.push_str(history);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Question: ");
    prompt.push_str(query);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_prompt_embeds_the_resume() {
        let prompt = resume_feedback_prompt("Led team of 5");
        assert!(prompt.contains("Led team of 5"));
        assert!(prompt.contains("exactly 3 key strengths"));
        assert!(prompt.contains("\"strengths\""));
    }

    #[test]
    fn chat_prompt_embeds_context_and_question() {
        let prompt = chat_answer_prompt("chunk one\nchunk two", "What skills should I add?");
        assert!(prompt.contains("chunk one"));
        assert!(prompt.contains("What skills should I add?"));
    }

    #[test]
    fn skill_prompt_asks_for_an_array() {
        let prompt = skill_extraction_prompt("I know Rust");
        assert!(prompt.contains("JSON array"));
        assert!(prompt.contains("I know Rust"));
    }

    #[test]
    fn agent_prompt_is_composed_in_order() {
        let prompt = agent_query_prompt(
            "what next?",
            Some("user: hi"),
            Some("worked at a bank"),
        );
        let ctx = prompt.find("worked at a bank").unwrap();
        let history = prompt.find("user: hi").unwrap();
        let query = prompt.find("what next?").unwrap();
        assert!(ctx < history && history < query);
    }

    #[test]
    fn agent_prompt_skips_empty_sections() {
        let prompt = agent_query_prompt("what next?", None, None);
        assert!(!prompt.contains("Resume context"));
        assert!(!prompt.contains("Conversation so far"));
        assert!(prompt.starts_with("Question: "));
    }

    #[test]
    fn persona_feeds_the_system_prompt() {
        let system = agent_system_prompt(Some("a blunt engineering manager"));
        assert!(system.contains("a blunt engineering manager"));

        let default = agent_system_prompt(None);
        assert!(default.contains("career advisor"));
    }
}
