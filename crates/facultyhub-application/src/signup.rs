//! The four-step registration wizard.

use async_trait::async_trait;
use facultyhub_core::config::ClientConfig;
use facultyhub_core::notice::Notifier;
use facultyhub_core::workflow::{
    FieldValue, FileUpload, ProgressLog, StepDefinition, StepOutcome, WorkflowController,
    WorkflowDefinition, WorkflowInput, WorkflowSnapshot, WorkflowSubmitter,
};
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::FormPart;
use facultyhub_interaction::clients::AuthClient;
use serde_json::Value;
use std::sync::Arc;

/// Form field names, as the registration endpoint expects them.
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const DEPARTMENT: &str = "department";
    pub const DESIGNATION: &str = "designation";
    pub const RESEARCH_INTEREST: &str = "researchInterest";
    pub const IS_ADMIN: &str = "isAdmin";
    pub const AVATAR: &str = "avatar";
    pub const COVER_IMAGE: &str = "coverImage";
}

/// identity → password → professional → uploads.
pub fn signup_definition(config: &ClientConfig) -> WorkflowDefinition {
    let mut identity = StepDefinition::new("identity")
        .require(fields::FULL_NAME)
        .require(fields::USERNAME)
        .require(fields::EMAIL);
    if let Some(domain) = config.institution_email_domain.clone() {
        identity = identity.rule(move |input| {
            let email = input.text(fields::EMAIL).unwrap_or_default();
            (!email.contains(domain.as_str())).then(|| format!("Must use an {domain} email."))
        });
    }

    let min_length = config.min_password_length;
    let password = StepDefinition::new("password")
        .require(fields::PASSWORD)
        .require(fields::CONFIRM_PASSWORD)
        .rule(|input| {
            (input.text(fields::PASSWORD) != input.text(fields::CONFIRM_PASSWORD))
                .then(|| "Passwords do not match.".to_string())
        })
        .rule(move |input| {
            let length = input.text(fields::PASSWORD).map(|p| p.chars().count()).unwrap_or(0);
            (length < min_length)
                .then(|| format!("Password must be at least {min_length} characters."))
        });

    let professional = StepDefinition::new("professional")
        .require(fields::DEPARTMENT)
        .require(fields::DESIGNATION)
        .require(fields::RESEARCH_INTEREST);

    let uploads = StepDefinition::new("uploads")
        .require(fields::AVATAR)
        .require(fields::COVER_IMAGE);

    WorkflowDefinition::new("signup")
        .step(identity)
        .step(password)
        .step(professional)
        .step(uploads)
        .failure_fallback("Registration failed.")
}

/// Sends the collected input as one multipart registration form.
pub struct SignupSubmitter {
    auth: AuthClient,
}

impl SignupSubmitter {
    pub fn new(auth: AuthClient) -> Self {
        Self { auth }
    }

    fn form(input: &WorkflowInput) -> Vec<FormPart> {
        let mut parts: Vec<FormPart> = input
            .iter()
            .map(|(name, value)| match value {
                FieldValue::Text(text) => FormPart::text(name.as_str(), text.as_str()),
                FieldValue::Flag(flag) => FormPart::text(name.as_str(), flag.to_string()),
                FieldValue::File(upload) => FormPart::file(name.as_str(), upload.clone()),
            })
            .collect();
        if input.get(fields::IS_ADMIN).is_none() {
            parts.push(FormPart::text(fields::IS_ADMIN, "false"));
        }
        parts
    }
}

#[async_trait]
impl WorkflowSubmitter for SignupSubmitter {
    type Output = Value;

    async fn submit(&self, input: &WorkflowInput, _progress: &ProgressLog) -> Result<Value> {
        self.auth.register(Self::form(input)).await
    }
}

/// A running signup wizard.
pub struct SignupWizard {
    controller: WorkflowController<SignupSubmitter>,
    definition: Arc<WorkflowDefinition>,
    notifier: Arc<dyn Notifier>,
}

impl SignupWizard {
    pub fn new(
        definition: Arc<WorkflowDefinition>,
        auth: AuthClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let controller = WorkflowController::new(SignupSubmitter::new(auth));
        controller.start(definition.clone());
        Self {
            controller,
            definition,
            notifier,
        }
    }

    pub fn set_text(&self, field: &str, value: impl Into<String>) -> Result<()> {
        self.controller.set_text(field, value)
    }

    pub fn set_flag(&self, field: &str, value: bool) -> Result<()> {
        self.controller.set_field(field, FieldValue::Flag(value))
    }

    pub fn set_file(&self, field: &str, upload: FileUpload) -> Result<()> {
        self.controller.set_field(field, FieldValue::File(upload))
    }

    /// Advances one step; a validation failure is also reported as a notice.
    pub fn next(&self) -> Result<StepOutcome> {
        let outcome = self.controller.advance()?;
        if let StepOutcome::Invalid(message) = &outcome {
            self.notifier.error(message);
        }
        Ok(outcome)
    }

    pub fn back(&self) -> Result<usize> {
        self.controller.go_back()
    }

    /// Registers the account from the last step.
    pub async fn submit(&self) -> Result<Value> {
        match self.controller.submit().await {
            Ok(created) => {
                self.notifier.success("Account created successfully!");
                Ok(created)
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                let message = self
                    .controller
                    .snapshot()
                    .and_then(|s| s.error_message)
                    .unwrap_or_else(|| e.user_message(&self.definition.failure_fallback));
                self.notifier.error(&message);
                Err(e)
            }
        }
    }

    /// Starts over with empty input.
    pub fn restart(&self) {
        self.controller.start(self.definition.clone());
    }

    pub fn cancel(&self) {
        self.controller.cancel();
    }

    pub fn snapshot(&self) -> Option<WorkflowSnapshot> {
        self.controller.snapshot()
    }
}
