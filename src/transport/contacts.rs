use serde::Deserialize;
use serde_json::Value;

use super::envelope::{TransportCount, TransportError};
use crate::domain::{
    ErrorCode, ImportContacts, ImportContactsResponse, ImportLogEntry, ParamValue, Params,
};

#[derive(Debug, Clone, Deserialize)]
struct ImportContactsJson {
    #[serde(default)]
    total: Option<TransportCount>,
    #[serde(default)]
    inserted: Option<TransportCount>,
    #[serde(default)]
    updated: Option<TransportCount>,
    #[serde(default)]
    deleted: Option<TransportCount>,
    #[serde(default)]
    new_emails: Option<TransportCount>,
    #[serde(default)]
    invalid: Option<TransportCount>,
    #[serde(default)]
    log: Vec<ImportLogJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct ImportLogJson {
    #[serde(default)]
    index: Option<TransportCount>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn count(value: Option<TransportCount>, field: &'static str) -> Result<u64, TransportError> {
    Ok(value
        .map(|value| value.into_u64(field))
        .transpose()?
        .unwrap_or_default())
}

pub fn encode_import_contacts_params(request: &ImportContacts) -> Params {
    Params::new()
        .with("field_names", request.field_names().to_vec())
        .with(
            "data",
            request
                .rows()
                .iter()
                .map(|row| row.to_vec().into())
                .collect::<Vec<ParamValue>>(),
        )
        .with("overwrite_lists", request.overwrite_lists())
}

pub fn decode_import_contacts_result(
    result: Value,
) -> Result<ImportContactsResponse, TransportError> {
    let parsed: ImportContactsJson = serde_json::from_value(result)?;
    Ok(ImportContactsResponse {
        total: count(parsed.total, "total")?,
        inserted: count(parsed.inserted, "inserted")?,
        updated: count(parsed.updated, "updated")?,
        deleted: count(parsed.deleted, "deleted")?,
        new_emails: count(parsed.new_emails, "new_emails")?,
        invalid: count(parsed.invalid, "invalid")?,
        log: parsed
            .log
            .into_iter()
            .map(|entry| {
                Ok(ImportLogEntry {
                    index: entry.index.map(|i| i.into_u64("index")).transpose()?,
                    code: entry.code.map(ErrorCode::new),
                    message: entry.message,
                })
            })
            .collect::<Result<_, TransportError>>()?,
    })
}
