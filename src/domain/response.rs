use crate::domain::value::{CampaignId, ErrorCode, FieldId, ListId, MessageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailingList {
    pub id: ListId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    /// Field type as reported by UniSender (`string`, `number`, ...).
    pub field_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportContactsResponse {
    pub total: u64,
    pub inserted: u64,
    pub updated: u64,
    pub deleted: u64,
    pub new_emails: u64,
    pub invalid: u64,
    pub log: Vec<ImportLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-row problem reported by `importContacts`; `index` is the zero-based data row.
pub struct ImportLogEntry {
    pub index: Option<u64>,
    pub code: Option<ErrorCode>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmailMessageResponse {
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCampaignResponse {
    pub campaign_id: CampaignId,
    pub status: Option<String>,
    /// Number of contacts the campaign will be sent to.
    pub count: Option<u64>,
}
