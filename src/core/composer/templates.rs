use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::normalizer::Scenario;

/// Message, action and follow-ups for one scenario. `message` and `action`
/// may contain `{slot}` placeholders; `next_steps` are literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub message: String,
    pub action: String,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl Template {
    pub fn new(message: &str, action: &str, next_steps: &[&str]) -> Self {
        Self {
            message: message.to_string(),
            action: action.to_string(),
            next_steps: next_steps.iter().map(ToString::to_string).collect(),
        }
    }

    /// Used when a set has no entry for the chosen scenario.
    pub fn generic() -> Self {
        Self::new("{response_text}", "Processed request.", &[])
    }
}

/// Scenario → template table plus the generic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    scenarios: BTreeMap<Scenario, Template>,
    generic: Template,
}

impl TemplateSet {
    pub fn builtin() -> Self {
        let mut set = Self::empty();
        set.insert(
            Scenario::Created,
            Template::new(
                "I've created a {task_type} task for you: {description}.",
                "Created {task_type} task with priority {priority}.",
                &["Review task details", "Modify if needed"],
            ),
        );
        set.insert(
            Scenario::Scheduled,
            Template::new(
                "I've scheduled your {task_type} for {datetime}.",
                "Scheduled {task_type} at {datetime}.",
                &["Check calendar", "Set reminder"],
            ),
        );
        set.insert(
            Scenario::Deferred,
            Template::new(
                "I've noted that down but haven't scheduled it yet.",
                "Deferred task creation.",
                &["Provide time to schedule", "Add more details"],
            ),
        );
        set.insert(
            Scenario::Failed,
            Template::new(
                "I encountered an issue while processing your request.",
                "Failed to execute task: {error_reason}.",
                &["Retry with clear instructions", "Check system status"],
            ),
        );
        set.insert(
            Scenario::ClarificationNeeded,
            Template::new(
                "I need a bit more information to proceed. {clarification_prompt}",
                "Requested clarification.",
                &["Provide missing details"],
            ),
        );
        set
    }

    /// A set holding only the generic template.
    pub fn empty() -> Self {
        Self {
            scenarios: BTreeMap::new(),
            generic: Template::generic(),
        }
    }

    pub fn insert(&mut self, scenario: Scenario, template: Template) -> Option<Template> {
        self.scenarios.insert(scenario, template)
    }

    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (Scenario, Template)>,
    ) -> Self {
        for (scenario, template) in overrides {
            self.insert(scenario, template);
        }
        self
    }

    pub fn get(&self, scenario: Scenario) -> Option<&Template> {
        self.scenarios.get(&scenario)
    }

    pub fn lookup(&self, scenario: Scenario) -> &Template {
        self.get(scenario).unwrap_or(&self.generic)
    }

    pub fn generic(&self) -> &Template {
        &self.generic
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_scenario() {
        let set = TemplateSet::builtin();
        for scenario in Scenario::ALL {
            assert!(set.get(scenario).is_some(), "missing {scenario}");
        }
    }

    #[test]
    fn empty_set_falls_back_to_generic() {
        let set = TemplateSet::empty();
        assert_eq!(set.lookup(Scenario::Failed), &Template::generic());
        assert_eq!(set.generic().message, "{response_text}");
    }

    #[test]
    fn overrides_replace_single_entries() {
        let custom = Template::new("Done: {description}", "Created.", &["Celebrate"]);
        let set = TemplateSet::builtin().with_overrides([(Scenario::Created, custom.clone())]);
        assert_eq!(set.lookup(Scenario::Created), &custom);
        assert_eq!(
            set.lookup(Scenario::Deferred).action,
            "Deferred task creation."
        );
    }

    #[test]
    fn template_deserializes_without_steps() {
        let t: Template = toml::from_str("message = \"m\"\naction = \"a\"\n").unwrap();
        assert!(t.next_steps.is_empty());
    }
}
