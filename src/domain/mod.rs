//! Domain layer: strong types with validation and invariants (no I/O).

mod campaign;
mod email;
mod method;
mod params;
mod recipient;
mod request;
mod response;
mod validation;
mod value;

pub use campaign::{CampaignData, CampaignDefaults, CampaignEntry};
pub use email::{EmailContent, EmailData, EmailMessage};
pub use method::ApiMethod;
pub use params::{ParamValue, Params};
pub use recipient::{
    IMPORT_CONTACTS_MAX_ROWS, Recipient, RecipientBatch, SYSTEM_FIELDS, is_system_field,
};
pub use request::{CreateCampaign, CreateEmailMessage, CreateField, CreateList, ImportContacts};
pub use response::{
    CreateCampaignResponse, CreateEmailMessageResponse, Field, ImportContactsResponse,
    ImportLogEntry, MailingList,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, CampaignId, EmailAddress, ErrorCode, FieldId, FieldName, FieldType, KnownErrorCode,
    Lang, ListId, ListTitle, MessageId, Platform, SenderName, StartTime, Subject,
    SystemTemplateId, TemplateId, Timezone,
};
