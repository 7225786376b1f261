use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::domain::validation::ValidationError;

fn non_empty_trimmed(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// UniSender API key (`api_key`).
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Form field name used by UniSender (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Platform tag (`platform`) sent with every request so UniSender can attribute API usage.
///
/// Invariant: non-empty after trimming.
pub struct Platform(String);

impl Platform {
    /// Form field name used by UniSender (`platform`).
    pub const FIELD: &'static str = "platform";

    /// Create a validated [`Platform`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated platform tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Language of API messages. Part of the request path (`/{lang}/api/...`).
pub enum Lang {
    Ru,
    #[default]
    En,
    Ua,
    It,
    Da,
    De,
    Es,
    Fr,
    Nl,
    Pl,
    Pt,
    Tr,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Ua => "ua",
            Self::It => "it",
            Self::Da => "da",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Nl => "nl",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::Tr => "tr",
        }
    }
}

impl FromStr for Lang {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Self::Ru,
            "en" => Self::En,
            "ua" => Self::Ua,
            "it" => Self::It,
            "da" => Self::Da,
            "de" => Self::De,
            "es" => Self::Es,
            "fr" => Self::Fr,
            "nl" => Self::Nl,
            "pl" => Self::Pl,
            "pt" => Self::Pt,
            "tr" => Self::Tr,
            _ => {
                return Err(ValidationError::UnknownLanguage {
                    input: s.to_owned(),
                });
            }
        };
        Ok(lang)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Email address of a recipient or sender.
///
/// Invariant: trimmed, a single `@` with non-empty local part and domain, no whitespace.
/// Deliverability is checked by UniSender, not here.
pub struct EmailAddress(String);

impl EmailAddress {
    /// Column name of the email address in contact imports (`email`).
    pub const FIELD: &'static str = "email";

    /// Create a validated [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(value.into(), Self::FIELD)?;
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !value.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ValidationError::InvalidEmail { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Name of a contact field (for example `name` or `city`).
///
/// Invariant: non-empty after trimming.
pub struct FieldName(String);

impl FieldName {
    /// Form field name used by `createField` (`name`).
    pub const FIELD: &'static str = "name";

    /// Create a validated [`FieldName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated field name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Title of a mailing list.
///
/// Invariant: non-empty after trimming.
pub struct ListTitle(String);

impl ListTitle {
    /// Form field name used by `createList` (`title`).
    pub const FIELD: &'static str = "title";

    /// Create a validated [`ListTitle`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated title.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender display name (`sender_name`).
///
/// Invariant: non-empty after trimming.
pub struct SenderName(String);

impl SenderName {
    /// Form field name used by `createEmailMessage` (`sender_name`).
    pub const FIELD: &'static str = "sender_name";

    /// Create a validated [`SenderName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated sender name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message subject line (`subject`).
///
/// Invariant: non-empty after trimming. The original value is preserved.
pub struct Subject(String);

impl Subject {
    /// Form field name used by `createEmailMessage` (`subject`).
    pub const FIELD: &'static str = "subject";

    /// Create a validated [`Subject`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the subject as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Campaign timezone (`timezone`).
///
/// Invariant: non-empty after trimming. [`Timezone::utc`] is the sentinel that makes
/// UniSender read `start_time` as UTC.
pub struct Timezone(String);

impl Timezone {
    /// Form field name used by `createCampaign` (`timezone`).
    pub const FIELD: &'static str = "timezone";

    const UTC: &'static str = "UTC";

    /// Create a validated [`Timezone`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value.into(), Self::FIELD)?))
    }

    pub fn utc() -> Self {
        Self(Self::UTC.to_owned())
    }

    pub fn is_utc(&self) -> bool {
        self.0 == Self::UTC
    }

    /// Borrow the validated timezone.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Scheduled campaign start (`start_time`), kept as naive date-time.
///
/// Converting from a zoned [`DateTime`] keeps the wall-clock time of its own zone; pair it
/// with [`Timezone::utc`] when the value was taken in UTC.
pub struct StartTime(NaiveDateTime);

impl StartTime {
    /// Form field name used by `createCampaign` (`start_time`).
    pub const FIELD: &'static str = "start_time";

    /// Text form expected by UniSender.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M";

    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn value(self) -> NaiveDateTime {
        self.0
    }

    /// Render as `YYYY-MM-DD HH:MM`.
    pub fn to_wire(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl From<NaiveDateTime> for StartTime {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for StartTime {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.naive_local())
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            #[doc = concat!("Form field name used by UniSender (`", $field, "`).")]
            pub const FIELD: &'static str = $field;

            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Mailing list id returned by `createList` / `getLists`.
    ListId,
    "list_id"
);
numeric_id!(
    /// Contact field id returned by `createField` / `getFields`.
    FieldId,
    "id"
);
numeric_id!(
    /// Message id returned by `createEmailMessage`.
    MessageId,
    "message_id"
);
numeric_id!(
    /// Campaign id returned by `createCampaign`.
    CampaignId,
    "campaign_id"
);
numeric_id!(
    /// Id of a template saved in the account.
    TemplateId,
    "template_id"
);
numeric_id!(
    /// Id of a platform-provided system template.
    SystemTemplateId,
    "system_template_id"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Contact field type accepted by `createField`.
pub enum FieldType {
    #[default]
    String,
    Text,
    Number,
    Date,
    Bool,
}

impl FieldType {
    /// Form field name used by `createField` (`type`).
    pub const FIELD: &'static str = "type";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Raw UniSender error code, as reported in the response envelope.
///
/// Codes are usually strings (`invalid_api_key`); numeric codes are kept as their decimal text.
pub struct ErrorCode(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownErrorCode {
    Unspecified,
    InvalidApiKey,
    AccessDenied,
    UnknownMethod,
    InvalidArg,
    NotEnoughMoney,
    RetryLater,
    ApiCallLimitExceededForApiKey,
    ApiCallLimitExceededForIp,
    FieldAlreadyExists,
}

impl ErrorCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn known_kind(&self) -> Option<KnownErrorCode> {
        let kind = match self.0.as_str() {
            "unspecified" => KnownErrorCode::Unspecified,
            "invalid_api_key" => KnownErrorCode::InvalidApiKey,
            "access_denied" => KnownErrorCode::AccessDenied,
            "unknown_method" => KnownErrorCode::UnknownMethod,
            "invalid_arg" => KnownErrorCode::InvalidArg,
            "not_enough_money" => KnownErrorCode::NotEnoughMoney,
            "retry_later" => KnownErrorCode::RetryLater,
            "api_call_limit_exceeded_for_api_key" => {
                KnownErrorCode::ApiCallLimitExceededForApiKey
            }
            "api_call_limit_exceeded_for_ip" => KnownErrorCode::ApiCallLimitExceededForIp,
            "field_already_exists" => KnownErrorCode::FieldAlreadyExists,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.known_kind(),
            Some(KnownErrorCode::InvalidApiKey | KnownErrorCode::AccessDenied)
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self.known_kind(),
            Some(
                KnownErrorCode::RetryLater
                    | KnownErrorCode::ApiCallLimitExceededForApiKey
                    | KnownErrorCode::ApiCallLimitExceededForIp
            )
        )
    }

    /// Matched on the code only, so the check does not depend on the response language.
    pub fn is_duplicate_field(&self) -> bool {
        self.known_kind() == Some(KnownErrorCode::FieldAlreadyExists)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
