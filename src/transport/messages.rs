use serde::Deserialize;
use serde_json::Value;

use super::envelope::{TransportError, TransportId};
use crate::domain::{
    CreateEmailMessage, CreateEmailMessageResponse, EmailContent, ListId, MessageId, Params,
    SenderName, Subject, SystemTemplateId, TemplateId,
};

#[derive(Debug, Clone, Deserialize)]
struct CreateEmailMessageJson {
    message_id: TransportId,
}

pub fn encode_create_email_message_params(request: &CreateEmailMessage) -> Params {
    let message = request.message();
    let mut params = Params::new()
        .with(SenderName::FIELD, message.sender_name.as_str())
        .with("sender_email", message.sender_email.as_str());
    params.insert_opt(Subject::FIELD, message.subject.as_ref().map(Subject::as_str));

    match &message.content {
        EmailContent::Body(body) => params.insert(EmailContent::BODY_FIELD, body.as_str()),
        EmailContent::Template(id) => params.insert(TemplateId::FIELD, id.value()),
        EmailContent::SystemTemplate(id) => params.insert(SystemTemplateId::FIELD, id.value()),
    }

    params.insert_opt("text_body", message.text_body.as_deref());
    params.insert(ListId::FIELD, request.list_id().value());
    if !message.categories.is_empty() {
        params.insert("categories", message.categories.join(","));
    }
    params.insert_opt("lang", message.lang.as_deref());
    params
}

pub fn decode_create_email_message_result(
    result: Value,
) -> Result<CreateEmailMessageResponse, TransportError> {
    let parsed: CreateEmailMessageJson = serde_json::from_value(result)?;
    Ok(CreateEmailMessageResponse {
        message_id: MessageId::new(parsed.message_id.into_u64(MessageId::FIELD)?),
    })
}
