//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod campaigns;
mod contacts;
mod envelope;
mod fields;
mod form;
mod lists;
mod messages;

pub use campaigns::{decode_create_campaign_result, encode_create_campaign_params};
pub use contacts::{decode_import_contacts_result, encode_import_contacts_params};
pub use envelope::{TransportError, decode_envelope};
pub use fields::{
    decode_create_field_result, decode_get_fields_result, encode_create_field_params,
    encode_get_fields_params,
};
pub use form::{flatten_params, method_url};
pub use lists::{
    decode_create_list_result, decode_get_lists_result, encode_create_list_params,
    encode_get_lists_params,
};
pub use messages::{decode_create_email_message_result, encode_create_email_message_params};
