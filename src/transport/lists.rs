use serde::Deserialize;
use serde_json::Value;

use super::envelope::{TransportError, TransportId};
use crate::domain::{CreateList, ListId, ListTitle, MailingList, Params};

#[derive(Debug, Clone, Deserialize)]
struct ListJson {
    id: TransportId,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CreateListJson {
    id: TransportId,
}

pub fn encode_get_lists_params() -> Params {
    Params::new()
}

pub fn encode_create_list_params(request: &CreateList) -> Params {
    Params::new().with(ListTitle::FIELD, request.title().as_str())
}

pub fn decode_get_lists_result(result: Value) -> Result<Vec<MailingList>, TransportError> {
    let parsed: Vec<ListJson> = serde_json::from_value(result)?;
    parsed
        .into_iter()
        .map(|list| {
            Ok(MailingList {
                id: ListId::new(list.id.into_u64(ListId::FIELD)?),
                title: list.title,
            })
        })
        .collect()
}

pub fn decode_create_list_result(result: Value) -> Result<ListId, TransportError> {
    let parsed: CreateListJson = serde_json::from_value(result)?;
    Ok(ListId::new(parsed.id.into_u64(ListId::FIELD)?))
}
