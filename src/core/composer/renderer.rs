use super::normalizer::Scenario;
use super::resolver::Context;
use super::templates::TemplateSet;

/// Template output before confidence, trace and version are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub assistant_message: String,
    pub action_taken: String,
    pub next_steps: Vec<String>,
}

pub fn render(scenario: Scenario, context: &Context, templates: &TemplateSet) -> Rendered {
    let template = templates.lookup(scenario);
    Rendered {
        assistant_message: substitute(&template.message, context),
        action_taken: substitute(&template.action, context),
        next_steps: template.next_steps.clone(),
    }
}

/// Replace every `{name}` with the matching slot, or nothing for unknown
/// names. Single pass: substituted values are never re-scanned.
pub fn substitute(template: &str, context: &Context) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_slot_name(&after[..close]) => {
                out.push_str(context.slot(&after[..close]).unwrap_or_default());
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_slot_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
