use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    InvalidEmail {
        input: String,
    },
    InvalidUrl {
        input: String,
    },
    UnknownMethod {
        name: String,
    },
    UnknownLanguage {
        input: String,
    },
    ReservedField {
        name: String,
    },
    TooManyRecipients {
        max: usize,
        actual: usize,
    },
    /// Recipient at `index` does not share the key set of the first recipient.
    InconsistentFields {
        index: usize,
    },
    /// Email data must select exactly one of `body`, `template_id`, `system_template_id`.
    ContentMode {
        found: usize,
    },
    MissingEmailFields {
        fields: Vec<&'static str>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidEmail { input } => write!(f, "invalid email address: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid url: {input}"),
            Self::UnknownMethod { name } => write!(f, "unknown API method: {name}"),
            Self::UnknownLanguage { input } => write!(f, "unsupported language: {input}"),
            Self::ReservedField { name } => write!(f, "field name is reserved: {name}"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InconsistentFields { index } => write!(
                f,
                "recipient #{index} has a different set of fields than recipient #0"
            ),
            Self::ContentMode { found } => write!(
                f,
                "exactly one of body, template_id, system_template_id is required (found {found})"
            ),
            Self::MissingEmailFields { fields } => {
                write!(f, "missing email data field(s): {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}
