use crate::domain::campaign::CampaignData;
use crate::domain::email::EmailMessage;
use crate::domain::recipient::RecipientBatch;
use crate::domain::value::{EmailAddress, FieldName, FieldType, ListId, ListTitle, MessageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateList {
    title: ListTitle,
}

impl CreateList {
    pub fn new(title: ListTitle) -> Self {
        Self { title }
    }

    pub fn title(&self) -> &ListTitle {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateField {
    name: FieldName,
    field_type: FieldType,
}

impl CreateField {
    pub fn new(name: FieldName, field_type: FieldType) -> Self {
        Self { name, field_type }
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Tabular `importContacts` payload: one header row of field names, one row per contact.
pub struct ImportContacts {
    field_names: Vec<String>,
    rows: Vec<Vec<String>>,
    overwrite_lists: bool,
}

impl ImportContacts {
    pub const EMAIL_STATUS: &'static str = "email_status";
    pub const EMAIL_LIST_IDS: &'static str = "email_list_ids";
    pub const STATUS_ACTIVE: &'static str = "active";

    /// Subscribe every recipient of `batch` to `list_id` as an active contact.
    ///
    /// Columns: `email`, the batch's extra fields in order, `email_status`, `email_list_ids`.
    pub fn subscribe(batch: &RecipientBatch<'_>, list_id: ListId) -> Self {
        let field_names = std::iter::once(EmailAddress::FIELD.to_owned())
            .chain(batch.field_names().iter().map(|f| f.as_str().to_owned()))
            .chain([Self::EMAIL_STATUS.to_owned(), Self::EMAIL_LIST_IDS.to_owned()])
            .collect();

        let list_id = list_id.to_string();
        let rows = batch
            .recipients()
            .iter()
            .map(|recipient| {
                let mut row = batch.row(recipient);
                row.push(Self::STATUS_ACTIVE.to_owned());
                row.push(list_id.clone());
                row
            })
            .collect();

        Self {
            field_names,
            rows,
            overwrite_lists: true,
        }
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn overwrite_lists(&self) -> bool {
        self.overwrite_lists
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `createEmailMessage` payload: validated message plus the list chosen by the client.
pub struct CreateEmailMessage {
    message: EmailMessage,
    list_id: ListId,
}

impl CreateEmailMessage {
    pub fn new(message: EmailMessage, list_id: ListId) -> Self {
        Self { message, list_id }
    }

    pub fn message(&self) -> &EmailMessage {
        &self.message
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `createCampaign` payload: caller options plus the message created just before.
pub struct CreateCampaign {
    message_id: MessageId,
    data: CampaignData,
}

impl CreateCampaign {
    pub fn new(message_id: MessageId, data: CampaignData) -> Self {
        Self { message_id, data }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn data(&self) -> &CampaignData {
        &self.data
    }
}
