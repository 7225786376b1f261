use crate::domain::validation::ValidationError;
use crate::domain::value::{EmailAddress, SenderName, Subject, SystemTemplateId, TemplateId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Caller-supplied description of an email message.
///
/// Every field is optional so that per-campaign data can be layered over defaults with
/// [`EmailData::merged_over`]. The result is checked by [`EmailMessage::try_from`]:
/// - exactly one of `body`, `template_id`, `system_template_id` must be set,
/// - `sender_name` and `sender_email` are always required,
/// - `subject` is required with an inline `body`.
///
/// The target list is not part of this type; it is chosen by the campaign helpers.
pub struct EmailData {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub text_body: Option<String>,
    pub template_id: Option<TemplateId>,
    pub system_template_id: Option<SystemTemplateId>,
    pub categories: Option<Vec<String>>,
    pub lang: Option<String>,
}

impl EmailData {
    /// Fill every unset field from `defaults`. Fields set on `self` win.
    pub fn merged_over(self, defaults: &EmailData) -> EmailData {
        EmailData {
            sender_name: self.sender_name.or_else(|| defaults.sender_name.clone()),
            sender_email: self.sender_email.or_else(|| defaults.sender_email.clone()),
            subject: self.subject.or_else(|| defaults.subject.clone()),
            body: self.body.or_else(|| defaults.body.clone()),
            text_body: self.text_body.or_else(|| defaults.text_body.clone()),
            template_id: self.template_id.or(defaults.template_id),
            system_template_id: self.system_template_id.or(defaults.system_template_id),
            categories: self.categories.or_else(|| defaults.categories.clone()),
            lang: self.lang.or_else(|| defaults.lang.clone()),
        }
    }

    fn content_mode_count(&self) -> usize {
        [
            self.body.is_some(),
            self.template_id.is_some(),
            self.system_template_id.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailContent {
    /// Inline HTML body.
    Body(String),
    Template(TemplateId),
    SystemTemplate(SystemTemplateId),
}

impl EmailContent {
    /// Form field name used by `createEmailMessage` for inline HTML (`body`).
    pub const BODY_FIELD: &'static str = "body";
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated email message content and sender identity.
pub struct EmailMessage {
    pub(crate) sender_name: SenderName,
    pub(crate) sender_email: EmailAddress,
    pub(crate) subject: Option<Subject>,
    pub(crate) content: EmailContent,
    pub(crate) text_body: Option<String>,
    pub(crate) categories: Vec<String>,
    pub(crate) lang: Option<String>,
}

impl TryFrom<EmailData> for EmailMessage {
    type Error = ValidationError;

    fn try_from(data: EmailData) -> Result<Self, Self::Error> {
        let found = data.content_mode_count();
        if found != 1 {
            return Err(ValidationError::ContentMode { found });
        }

        let mut missing = Vec::new();
        if data.sender_name.is_none() {
            missing.push(SenderName::FIELD);
        }
        if data.sender_email.is_none() {
            missing.push("sender_email");
        }
        if data.body.is_some() && data.subject.is_none() {
            missing.push(Subject::FIELD);
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingEmailFields { fields: missing });
        }

        let content = match (data.body, data.template_id, data.system_template_id) {
            (Some(body), _, _) => {
                if body.trim().is_empty() {
                    return Err(ValidationError::Empty {
                        field: EmailContent::BODY_FIELD,
                    });
                }
                EmailContent::Body(body)
            }
            (None, Some(id), _) => EmailContent::Template(id),
            (None, None, Some(id)) => EmailContent::SystemTemplate(id),
            (None, None, None) => return Err(ValidationError::ContentMode { found: 0 }),
        };

        Ok(Self {
            sender_name: SenderName::new(data.sender_name.unwrap_or_default())?,
            sender_email: EmailAddress::new(data.sender_email.unwrap_or_default())?,
            subject: data.subject.map(Subject::new).transpose()?,
            content,
            text_body: data.text_body,
            categories: data.categories.unwrap_or_default(),
            lang: data.lang,
        })
    }
}

impl EmailMessage {
    pub fn sender_name(&self) -> &SenderName {
        &self.sender_name
    }

    pub fn sender_email(&self) -> &EmailAddress {
        &self.sender_email
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    pub fn content(&self) -> &EmailContent {
        &self.content
    }
}
