//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod campaign;
#[cfg(test)]
mod fake;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::domain::{
    ApiKey, ApiMethod, CreateCampaign, CreateCampaignResponse, CreateEmailMessage,
    CreateEmailMessageResponse, CreateField, CreateList, ErrorCode, Field, FieldId,
    ImportContacts, ImportContactsResponse, Lang, ListId, MailingList, Params, Platform,
    ValidationError,
};
use crate::transport::{self, TransportError};

const DEFAULT_BASE_URL: &str = "https://api.unisender.com";
const FORMAT_FIELD: &str = "format";
const RESPONSE_FORMAT: &str = "json";

/// Parameters always set by the client; caller-supplied values for them are dropped.
const RESERVED_PARAMS: &[&str] = &[ApiKey::FIELD, FORMAT_FIELD];

const API_KEY_ENV: &str = "UNISENDER_API_KEY";
const PLATFORM_ENV: &str = "UNISENDER_PLATFORM";
const BASE_URL_ENV: &str = "UNISENDER_BASE_URL";
const LANG_ENV: &str = "UNISENDER_LANG";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication for UniSender API calls: a static API key.
pub struct Auth {
    api_key: ApiKey,
}

impl Auth {
    /// Create [`Auth`] and validate that the key is non-empty after trimming.
    pub fn api_key(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(value)?,
        })
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coarse classification of [`UnisenderError`].
pub enum ErrorKind {
    /// Caller input was rejected before any network call.
    Validation,
    /// Connection failure, timeout, non-2xx HTTP status or undecodable body.
    Transport,
    /// UniSender reported an error for a well-formed request.
    RemoteApi,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`UnisenderClient`].
///
/// Use [`UnisenderError::kind`] to tell validation, transport and remote failures apart.
pub enum UnisenderError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// UniSender returned an `error` envelope.
    #[error("API error {code}: {message}")]
    Api { code: ErrorCode, message: String },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A campaign of a batch failed; earlier campaigns of the batch were already created.
    #[error("campaign #{index} failed: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<UnisenderError>,
    },
}

impl UnisenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Parse(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::RemoteApi,
            Self::Batch { source, .. } => source.kind(),
        }
    }

    /// Remote error code, if UniSender reported one.
    pub fn api_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            Self::Batch { source, .. } => source.api_code(),
            _ => None,
        }
    }
}

fn parse_error(err: TransportError) -> UnisenderError {
    UnisenderError::Parse(Box::new(err))
}

#[derive(Debug, Clone)]
/// Builder for [`UnisenderClient`].
///
/// Use this when you need to customize the endpoint, language, platform tag, timeout, or
/// user-agent.
pub struct UnisenderClientBuilder {
    auth: Auth,
    base_url: String,
    lang: Lang,
    platform: Option<Platform>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl UnisenderClientBuilder {
    /// Create a builder with the default endpoint, English API messages and no platform tag.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            lang: Lang::default(),
            platform: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Configure from environment variables.
    ///
    /// `UNISENDER_API_KEY` is required; `UNISENDER_PLATFORM`, `UNISENDER_BASE_URL` and
    /// `UNISENDER_LANG` are optional.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let api_key = lookup(API_KEY_ENV).ok_or(ValidationError::Empty { field: API_KEY_ENV })?;
        let mut builder = Self::new(Auth::api_key(api_key)?);
        if let Some(platform) = lookup(PLATFORM_ENV) {
            builder = builder.platform(Platform::new(platform)?);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        if let Some(lang) = lookup(LANG_ENV) {
            builder = builder.lang(lang.parse()?);
        }
        Ok(builder)
    }

    /// Override the API base URL (default `https://api.unisender.com`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Language of API error messages.
    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    /// Platform tag sent as `platform` with every request.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`UnisenderClient`].
    pub fn build(self) -> Result<UnisenderClient, UnisenderError> {
        let base_url = url::Url::parse(self.base_url.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ValidationError::InvalidUrl {
                input: self.base_url.clone(),
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| UnisenderError::Transport(Box::new(err)))?;

        Ok(UnisenderClient {
            auth: self.auth,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            lang: self.lang,
            platform: self.platform,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level UniSender client.
///
/// Every call is one form-encoded `POST` to `{base_url}/{lang}/api/{method}` carrying
/// `api_key`, `platform` (when configured) and `format=json`. Calls are never retried.
///
/// Besides [`call`](Self::call) for any [`ApiMethod`], the client has typed wrappers for the
/// operations used by the campaign helpers
/// ([`create_email_campaign`](Self::create_email_campaign) and friends).
pub struct UnisenderClient {
    auth: Auth,
    base_url: String,
    lang: Lang,
    platform: Option<Platform>,
    http: Arc<dyn HttpTransport>,
}

impl UnisenderClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`UnisenderClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            lang: Lang::default(),
            platform: None,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> UnisenderClientBuilder {
        UnisenderClientBuilder::new(auth)
    }

    /// Call any allowed remote method and return its decoded `result` payload.
    ///
    /// List and map parameters are flattened into indexed form fields. `api_key` and `format`
    /// in `params` are ignored; the client's own values are sent. A `platform` in `params` is
    /// ignored only when the client has a platform configured.
    ///
    /// Errors:
    /// - [`UnisenderError::Transport`] when the request could not be sent,
    /// - [`UnisenderError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`UnisenderError::Parse`] when the body is not a JSON envelope,
    /// - [`UnisenderError::Api`] when UniSender reports an `error`.
    pub async fn call(&self, method: ApiMethod, mut params: Params) -> Result<Value, UnisenderError> {
        let platform_key = self.platform.as_ref().map(|_| Platform::FIELD);
        for key in RESERVED_PARAMS.iter().copied().chain(platform_key) {
            if params.remove(key).is_some() {
                tracing::debug!(%method, key, "ignoring caller-supplied reserved parameter");
            }
        }

        let mut form = Vec::<(String, String)>::new();
        self.auth.push_form_params(&mut form);
        if let Some(platform) = self.platform.as_ref() {
            form.push((Platform::FIELD.to_owned(), platform.as_str().to_owned()));
        }
        form.push((FORMAT_FIELD.to_owned(), RESPONSE_FORMAT.to_owned()));
        form.extend(transport::flatten_params(&params));

        let url = transport::method_url(&self.base_url, self.lang, method);
        tracing::debug!(%method, fields = form.len(), "calling UniSender");

        let response = self
            .http
            .post_form(&url, form)
            .await
            .map_err(UnisenderError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(UnisenderError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let envelope = transport::decode_envelope(&response.body).map_err(parse_error)?;
        for warning in &envelope.warnings {
            tracing::warn!(%method, warning = %warning, "UniSender returned a warning");
        }

        envelope.result.map_err(|err| {
            tracing::debug!(%method, code = %err.code, "UniSender returned an error");
            UnisenderError::Api {
                code: err.code,
                message: err.message,
            }
        })
    }

    /// All mailing lists of the account (`getLists`).
    pub async fn get_lists(&self) -> Result<Vec<MailingList>, UnisenderError> {
        let result = self
            .call(ApiMethod::GetLists, transport::encode_get_lists_params())
            .await?;
        transport::decode_get_lists_result(result).map_err(parse_error)
    }

    /// Create a mailing list (`createList`).
    pub async fn create_list(&self, request: CreateList) -> Result<ListId, UnisenderError> {
        let result = self
            .call(
                ApiMethod::CreateList,
                transport::encode_create_list_params(&request),
            )
            .await?;
        transport::decode_create_list_result(result).map_err(parse_error)
    }

    /// All custom contact fields of the account (`getFields`).
    pub async fn get_fields(&self) -> Result<Vec<Field>, UnisenderError> {
        let result = self
            .call(ApiMethod::GetFields, transport::encode_get_fields_params())
            .await?;
        transport::decode_get_fields_result(result).map_err(parse_error)
    }

    /// Create a contact field (`createField`).
    pub async fn create_field(&self, request: CreateField) -> Result<FieldId, UnisenderError> {
        let result = self
            .call(
                ApiMethod::CreateField,
                transport::encode_create_field_params(&request),
            )
            .await?;
        transport::decode_create_field_result(result).map_err(parse_error)
    }

    /// Bulk import contacts (`importContacts`).
    pub async fn import_contacts(
        &self,
        request: ImportContacts,
    ) -> Result<ImportContactsResponse, UnisenderError> {
        let result = self
            .call(
                ApiMethod::ImportContacts,
                transport::encode_import_contacts_params(&request),
            )
            .await?;
        transport::decode_import_contacts_result(result).map_err(parse_error)
    }

    /// Create an email message bound to a list (`createEmailMessage`).
    pub async fn create_email_message(
        &self,
        request: CreateEmailMessage,
    ) -> Result<CreateEmailMessageResponse, UnisenderError> {
        let result = self
            .call(
                ApiMethod::CreateEmailMessage,
                transport::encode_create_email_message_params(&request),
            )
            .await?;
        transport::decode_create_email_message_result(result).map_err(parse_error)
    }

    /// Schedule or start a campaign for a message (`createCampaign`).
    pub async fn create_campaign(
        &self,
        request: CreateCampaign,
    ) -> Result<CreateCampaignResponse, UnisenderError> {
        let result = self
            .call(
                ApiMethod::CreateCampaign,
                transport::encode_create_campaign_params(&request),
            )
            .await?;
        transport::decode_create_campaign_result(result).map_err(parse_error)
    }
}
