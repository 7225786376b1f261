use serde::Deserialize;
use serde_json::Value;

use super::envelope::{TransportError, TransportId};
use crate::domain::{CreateField, Field, FieldId, FieldName, FieldType, Params};

#[derive(Debug, Clone, Deserialize)]
struct FieldJson {
    id: TransportId,
    name: String,
    #[serde(default, rename = "type")]
    field_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CreateFieldJson {
    id: TransportId,
}

pub fn encode_get_fields_params() -> Params {
    Params::new()
}

pub fn encode_create_field_params(request: &CreateField) -> Params {
    Params::new()
        .with(FieldName::FIELD, request.name().as_str())
        .with(FieldType::FIELD, request.field_type().as_str())
}

pub fn decode_get_fields_result(result: Value) -> Result<Vec<Field>, TransportError> {
    let parsed: Vec<FieldJson> = serde_json::from_value(result)?;
    parsed
        .into_iter()
        .map(|field| {
            Ok(Field {
                id: FieldId::new(field.id.into_u64("field id")?),
                name: field.name,
                field_type: field.field_type,
            })
        })
        .collect()
}

pub fn decode_create_field_result(result: Value) -> Result<FieldId, TransportError> {
    let parsed: CreateFieldJson = serde_json::from_value(result)?;
    Ok(FieldId::new(parsed.id.into_u64("field id")?))
}
