// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file holds the personas those templates open with.

/// Persona for question generation.
pub const QUESTION_WRITER_PERSONA: &str = "You are an expert interviewer.";

/// Persona for every answer-evaluation prompt.
pub const EVALUATOR_PERSONA: &str = "You are a senior technical interviewer.";

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never re-scanned, so caller text containing
/// `{round_type}` or similar stays verbatim. Unknown placeholders are left
/// untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render("{resume}|{round}", &[("resume", "{round}"), ("round", "HR")]);
        assert_eq!(out, "{round}|HR");
    }

    #[test]
    fn test_render_keeps_unknown_and_unbalanced_braces() {
        assert_eq!(render("{x} {y", &[("z", "1")]), "{x} {y");
        assert_eq!(render("json: {}", &[]), "json: {}");
    }
}
