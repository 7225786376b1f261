use std::collections::BTreeSet;

use crate::domain::validation::ValidationError;
use crate::domain::value::{EmailAddress, FieldName};

/// Contact fields managed by UniSender itself. They are never created and cannot be set
/// through [`Recipient::with_field`].
pub const SYSTEM_FIELDS: &[&str] = &[
    "delete",
    "tags",
    "email",
    "email_status",
    "email_availability",
    "email_list_ids",
    "email_subscribe_times",
    "email_unsubscribed_list_ids",
    "email_excluded_list_ids",
];

/// Maximum number of rows accepted by a single `importContacts` call.
pub const IMPORT_CONTACTS_MAX_ROWS: usize = 10_000;

pub fn is_system_field(name: &str) -> bool {
    SYSTEM_FIELDS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One contact to import: an email address plus extra field values, in insertion order.
pub struct Recipient {
    email: EmailAddress,
    fields: Vec<(FieldName, String)>,
}

impl Recipient {
    pub fn new(email: EmailAddress) -> Self {
        Self {
            email,
            fields: Vec::new(),
        }
    }

    /// Add or replace an extra field value.
    ///
    /// System field names (including `email`) are rejected.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = FieldName::new(name)?;
        if is_system_field(name.as_str()) {
            return Err(ValidationError::ReservedField {
                name: name.as_str().to_owned(),
            });
        }
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
        Ok(self)
    }

    /// Build a recipient from a flat key/value record. The `email` key is required.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut email = None;
        let mut extra = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            if key.trim() == EmailAddress::FIELD {
                email = Some(EmailAddress::new(value)?);
            } else {
                extra.push((key, value.into()));
            }
        }
        let email = email.ok_or(ValidationError::Empty {
            field: EmailAddress::FIELD,
        })?;
        extra
            .into_iter()
            .try_fold(Self::new(email), |recipient, (key, value)| {
                recipient.with_field(key, value)
            })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn fields(&self) -> &[(FieldName, String)] {
        &self.fields
    }

    pub fn get(&self, name: &FieldName) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    fn key_set(&self) -> BTreeSet<&FieldName> {
        self.fields.iter().map(|(name, _)| name).collect()
    }
}

#[derive(Debug, Clone)]
/// A validated, non-empty batch of recipients sharing one key set.
///
/// Column order follows the first recipient's field order.
pub struct RecipientBatch<'a> {
    field_names: Vec<FieldName>,
    recipients: &'a [Recipient],
}

impl<'a> RecipientBatch<'a> {
    pub const FIELD: &'static str = "recipients";

    pub fn new(recipients: &'a [Recipient]) -> Result<Self, ValidationError> {
        let Some(first) = recipients.first() else {
            return Err(ValidationError::Empty { field: Self::FIELD });
        };
        if recipients.len() > IMPORT_CONTACTS_MAX_ROWS {
            return Err(ValidationError::TooManyRecipients {
                max: IMPORT_CONTACTS_MAX_ROWS,
                actual: recipients.len(),
            });
        }

        let expected = first.key_set();
        if let Some(index) = recipients.iter().position(|r| r.key_set() != expected) {
            return Err(ValidationError::InconsistentFields { index });
        }

        Ok(Self {
            field_names: first.fields.iter().map(|(name, _)| name.clone()).collect(),
            recipients,
        })
    }

    /// Extra field names (the email key excluded).
    pub fn field_names(&self) -> &[FieldName] {
        &self.field_names
    }

    pub fn recipients(&self) -> &'a [Recipient] {
        self.recipients
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Values of one recipient in column order: email, then each field name.
    pub fn row(&self, recipient: &Recipient) -> Vec<String> {
        std::iter::once(recipient.email().as_str().to_owned())
            .chain(
                self.field_names
                    .iter()
                    .map(|name| recipient.get(name).unwrap_or_default().to_owned()),
            )
            .collect()
    }
}
