// All LLM prompt templates for the Interview module.
// Filled with `llm_client::prompts::render`; caller text is inserted verbatim.

/// Question generation. Replace: {persona}, {round_type}, {resume_text}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = "{persona} Based on the resume below, generate exactly 4 {round_type} interview questions. Number them clearly (1. 2. 3. 4.).

Resume:
{resume_text}

{round_type} Round Questions:";

/// Structured evaluation used with local scoring. Replace: {persona}, {question}, {candidate_answer}
pub const EVALUATION_PROMPT_TEMPLATE: &str = "{persona}

Evaluate the candidate's response to the following interview question and provide detailed, constructive feedback.

Question:
{question}

Answer:
{candidate_answer}

Give your response in the following structured format:

- Score (out of 10):
- Strengths:
- Weaknesses:
- Suggestions for improvement:";

/// Markdown-headed feedback whose score line is mined afterwards.
/// Replace: {persona}, {question}, {candidate_answer}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = "{persona}

Evaluate the candidate's response to the following interview question.

Question:
{question}

Answer:
{candidate_answer}

Give your feedback in the following format:

**Score (out of 10):**
[Provide a score]

**Strengths:**
[List the strengths of the answer]

**Areas to Improve:**
[List areas that need improvement]

**Suggestions for Improvement:**
[Provide specific suggestions]";
