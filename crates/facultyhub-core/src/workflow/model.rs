use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An uploaded file collected by a workflow step.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    File(FileUpload),
}

impl FieldValue {
    /// Blank text counts as missing. Flags and files never do.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Flag(_) | Self::File(_) => false,
        }
    }
}

/// Values collected across all steps of a run, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowInput {
    fields: BTreeMap<String, FieldValue>,
}

impl WorkflowInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, FieldValue::Text(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of a field; `None` for missing or non-text fields.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn file(&self, name: &str) -> Option<&FileUpload> {
        match self.fields.get(name) {
            Some(FieldValue::File(file)) => Some(file),
            _ => None,
        }
    }

    /// True when the field exists and is not blank.
    pub fn is_filled(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|v| !v.is_blank())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

/// A validation rule over the collected input. Returns a message on failure.
pub type StepRule = Arc<dyn Fn(&WorkflowInput) -> Option<String> + Send + Sync>;

/// One step of a workflow.
#[derive(Clone)]
pub struct StepDefinition {
    pub name: String,
    pub required_fields: Vec<String>,
    rules: Vec<StepRule>,
}

impl StepDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.required_fields.push(field.into());
        self
    }

    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&WorkflowInput) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Validates `input` for this step. Missing required fields are
    /// reported first, in declaration order, then rule failures.
    pub fn validate(&self, input: &WorkflowInput) -> Vec<String> {
        let missing = self
            .required_fields
            .iter()
            .filter(|field| !input.is_filled(field))
            .map(|field| format!("Missing required field: {field}"));
        // Rules only run once every required field is present
        let mut failures: Vec<String> = missing.collect();
        if failures.is_empty() {
            failures.extend(self.rules.iter().filter_map(|rule| rule(input)));
        }
        failures
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("name", &self.name)
            .field("required_fields", &self.required_fields)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// What a failed submission leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryPolicy {
    /// The run stays open at the same step so the user can correct input.
    #[default]
    ResumeAtStep,
    /// The run is closed; the user has to start over.
    RestartRequired,
}

#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
    pub name: String,
    pub steps: Vec<StepDefinition>,
    pub recovery: RecoveryPolicy,
    /// Message shown when a submission fails without a server message.
    pub failure_fallback: String,
}

impl WorkflowDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            recovery: RecoveryPolicy::default(),
            failure_fallback: "Something went wrong.".to_string(),
        }
    }

    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    pub fn recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn failure_fallback(mut self, message: impl Into<String>) -> Self {
        self.failure_fallback = message.into();
        self
    }

    pub fn last_step_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowStatus {
    InProgress,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_reported_before_rules() {
        let step = StepDefinition::new("identity")
            .require("fullName")
            .require("email")
            .rule(|_| Some("rule ran".to_string()));

        let input = WorkflowInput::new().with_text("fullName", "  ");
        assert_eq!(
            step.validate(&input),
            vec![
                "Missing required field: fullName".to_string(),
                "Missing required field: email".to_string()
            ]
        );

        let input = input.with_text("fullName", "A").with_text("email", "a@x");
        assert_eq!(step.validate(&input), vec!["rule ran".to_string()]);
    }

    #[test]
    fn test_input_accessors() {
        let mut input = WorkflowInput::new().with_text("name", "x");
        input.set("isAdmin", FieldValue::Flag(true));
        input.set("avatar", FieldValue::File(FileUpload::new("a.png", vec![1, 2])));

        assert_eq!(input.text("name"), Some("x"));
        assert!(input.flag("isAdmin"));
        assert_eq!(input.file("avatar").unwrap().file_name, "a.png");
        assert!(input.text("avatar").is_none());
        assert!(input.is_filled("isAdmin"));
    }
}
