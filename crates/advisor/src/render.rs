//! Answer formatting shared by the rule classifier and the fallback path.

use nivesh_knowledge::{worked_example, Rule};

/// Educational disclaimer appended to rule answers and accepted remote answers.
pub const DISCLAIMER: &str = "This information is for educational purposes only and is not financial advice. Please consult a SEBI-registered investment adviser before making investment decisions.";

const RULE_SEPARATOR: &str = "\n\n---\n\n";

/// Render one rule as heading, description, application, example and disclaimer.
pub fn render_rule(rule: &Rule) -> String {
    format!(
        "# {}\n\n{}\n\n**Application:** {}\n\n**Example:** {}\n\n_{}_",
        rule.name,
        rule.description,
        rule.application,
        worked_example(rule.id),
        DISCLAIMER
    )
}

/// Render several rules separated by horizontal rules.
pub fn render_rules<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> String {
    rules
        .into_iter()
        .map(render_rule)
        .collect::<Vec<_>>()
        .join(RULE_SEPARATOR)
}

/// Append the disclaimer unless the text already carries it.
pub fn with_disclaimer(text: &str) -> String {
    if text.contains(DISCLAIMER) {
        text.to_string()
    } else {
        format!("{}\n\n_{}_", text, DISCLAIMER)
    }
}
