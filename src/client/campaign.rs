//! Campaign helpers: fields → list → import → message → campaign, in one call.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use super::{UnisenderClient, UnisenderError};
use crate::domain::{
    CampaignData, CampaignDefaults, CampaignEntry, CampaignId, CreateCampaign,
    CreateEmailMessage, CreateField, CreateList, EmailData, EmailMessage, FieldName, FieldType,
    ImportContacts, ListId, ListTitle, Recipient, RecipientBatch, is_system_field,
};

const LIST_TITLE_PREFIX: &str = "mailing_list_";
const LIST_DIGEST_BYTES: usize = 5;

/// Title of the list holding `batch`: same recipients, same list.
fn list_title(batch: &RecipientBatch<'_>) -> Result<ListTitle, UnisenderError> {
    let mut hasher = Sha256::new();
    for recipient in batch.recipients() {
        for value in batch.row(recipient) {
            hasher.update(value.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
    }
    let digest = hasher.finalize();
    let title = format!(
        "{LIST_TITLE_PREFIX}{}",
        hex::encode(&digest[..LIST_DIGEST_BYTES])
    );
    Ok(ListTitle::new(title)?)
}

impl UnisenderClient {
    /// Create and start one email campaign for `recipients`.
    ///
    /// Sequence: create missing contact fields, find or create the list for this recipient
    /// batch, import the recipients into it, create the message for that list, create the
    /// campaign for that message. Returns the id of the new campaign.
    ///
    /// Input is validated before any request is sent: recipients must be non-empty and share
    /// one key set, and `email_data` must select exactly one content mode. Any failure after
    /// that is returned as is; only a "field already exists" error while creating fields is
    /// tolerated.
    ///
    /// ```rust,no_run
    /// use unisender::{Auth, CampaignData, EmailAddress, EmailData, Recipient, UnisenderClient};
    ///
    /// # async fn run() -> Result<(), unisender::UnisenderError> {
    /// let client = UnisenderClient::new(Auth::api_key("...")?);
    /// let recipients = vec![
    ///     Recipient::new(EmailAddress::new("dave@example.com")?).with_field("name", "Dave")?,
    ///     Recipient::new(EmailAddress::new("nick@example.com")?).with_field("name", "Nick")?,
    /// ];
    /// let email = EmailData {
    ///     sender_name: Some("John".to_owned()),
    ///     sender_email: Some("john@example.com".to_owned()),
    ///     subject: Some("Hello".to_owned()),
    ///     body: Some("<p>Hello, {{name}}</p>".to_owned()),
    ///     ..Default::default()
    /// };
    /// let campaign_id = client
    ///     .create_email_campaign(&recipients, email, CampaignData::default())
    ///     .await?;
    /// # let _ = campaign_id;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_email_campaign(
        &self,
        recipients: &[Recipient],
        email_data: EmailData,
        campaign_data: CampaignData,
    ) -> Result<CampaignId, UnisenderError> {
        let batch = RecipientBatch::new(recipients)?;
        let message = EmailMessage::try_from(email_data)?;

        let list_id = self.prepare_recipients(&batch).await?;
        self.launch_campaign(list_id, message, campaign_data).await
    }

    /// [`create_email_campaign`](Self::create_email_campaign) collapsed to a success flag.
    ///
    /// The error is logged and dropped; use the `Result` variant when the cause matters.
    pub async fn send_email_campaign(
        &self,
        recipients: &[Recipient],
        email_data: EmailData,
        campaign_data: CampaignData,
    ) -> bool {
        match self
            .create_email_campaign(recipients, email_data, campaign_data)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "email campaign was not created");
                false
            }
        }
    }

    /// Create one campaign per entry for the same recipients.
    ///
    /// Fields, list and contact import are handled once for the whole batch. Each entry is
    /// layered over `defaults` (entry values win), then gets its own message and campaign.
    /// Ids are returned in entry order.
    ///
    /// Every entry is validated before the first request. The first failing entry stops the
    /// batch with [`UnisenderError::Batch`]; campaigns created before it are not rolled back.
    pub async fn create_many_email_campaigns(
        &self,
        recipients: &[Recipient],
        campaigns: Vec<CampaignEntry>,
        defaults: &CampaignDefaults,
    ) -> Result<Vec<CampaignId>, UnisenderError> {
        let batch = RecipientBatch::new(recipients)?;
        let prepared = campaigns
            .into_iter()
            .enumerate()
            .map(|(index, entry)| -> Result<_, UnisenderError> {
                let entry = entry.merged_over(defaults);
                let message =
                    EmailMessage::try_from(entry.email_data).map_err(|err| UnisenderError::Batch {
                        index,
                        source: Box::new(UnisenderError::Validation(err)),
                    })?;
                Ok((message, entry.campaign_data))
            })
            .collect::<Result<Vec<_>, UnisenderError>>()?;

        if prepared.is_empty() {
            return Ok(Vec::new());
        }

        let list_id = self.prepare_recipients(&batch).await?;
        let mut campaign_ids = Vec::with_capacity(prepared.len());
        for (index, (message, campaign_data)) in prepared.into_iter().enumerate() {
            let campaign_id = self
                .launch_campaign(list_id, message, campaign_data)
                .await
                .map_err(|err| UnisenderError::Batch {
                    index,
                    source: Box::new(err),
                })?;
            campaign_ids.push(campaign_id);
        }
        Ok(campaign_ids)
    }

    async fn prepare_recipients(
        &self,
        batch: &RecipientBatch<'_>,
    ) -> Result<ListId, UnisenderError> {
        self.ensure_fields(batch.field_names()).await?;
        let list_id = self.ensure_list(list_title(batch)?).await?;

        let imported = self
            .import_contacts(ImportContacts::subscribe(batch, list_id))
            .await?;
        for entry in &imported.log {
            tracing::warn!(
                index = ?entry.index,
                code = ?entry.code.as_ref().map(|c| c.as_str()),
                message = ?entry.message,
                "contact was not imported cleanly"
            );
        }
        tracing::info!(
            %list_id,
            total = imported.total,
            inserted = imported.inserted,
            updated = imported.updated,
            invalid = imported.invalid,
            "contacts imported"
        );
        Ok(list_id)
    }

    async fn ensure_fields(&self, names: &[FieldName]) -> Result<(), UnisenderError> {
        let wanted = names
            .iter()
            .filter(|name| !is_system_field(name.as_str()))
            .collect::<Vec<_>>();
        if wanted.is_empty() {
            return Ok(());
        }

        let existing = self
            .get_fields()
            .await?
            .into_iter()
            .map(|field| field.name)
            .collect::<HashSet<_>>();

        for name in wanted {
            if existing.contains(name.as_str()) {
                continue;
            }
            match self
                .create_field(CreateField::new(name.clone(), FieldType::String))
                .await
            {
                Ok(field_id) => {
                    tracing::info!(field = name.as_str(), %field_id, "contact field created");
                }
                Err(UnisenderError::Api { code, .. }) if code.is_duplicate_field() => {
                    tracing::warn!(field = name.as_str(), "contact field already exists");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    async fn ensure_list(&self, title: ListTitle) -> Result<ListId, UnisenderError> {
        let found = self
            .get_lists()
            .await?
            .into_iter()
            .find(|list| list.title == title.as_str());
        if let Some(list) = found {
            tracing::debug!(list_id = %list.id, title = title.as_str(), "reusing mailing list");
            return Ok(list.id);
        }

        let list_id = self.create_list(CreateList::new(title.clone())).await?;
        tracing::info!(%list_id, title = title.as_str(), "mailing list created");
        Ok(list_id)
    }

    async fn launch_campaign(
        &self,
        list_id: ListId,
        message: EmailMessage,
        campaign_data: CampaignData,
    ) -> Result<CampaignId, UnisenderError> {
        let created = self
            .create_email_message(CreateEmailMessage::new(message, list_id))
            .await?;
        let campaign = self
            .create_campaign(CreateCampaign::new(created.message_id, campaign_data))
            .await?;
        tracing::info!(
            message_id = %created.message_id,
            campaign_id = %campaign.campaign_id,
            status = ?campaign.status,
            "campaign created"
        );
        Ok(campaign.campaign_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::super::ErrorKind;
    use super::super::fake::{FakeTransport, make_client};
    use super::*;
    use crate::domain::{
        EmailAddress, StartTime, SystemTemplateId, TemplateId, Timezone, ValidationError,
    };

    fn recipients() -> Vec<Recipient> {
        [
            ("dave@example.com", "Dave Guard"),
            ("bon@example.com", "Bon Shane"),
            ("nick@example.com", "Nick Reynolds"),
        ]
        .into_iter()
        .map(|(email, name)| {
            Recipient::new(EmailAddress::new(email).unwrap())
                .with_field("name", name)
                .unwrap()
        })
        .collect()
    }

    fn sender() -> EmailData {
        EmailData {
            sender_name: Some("John Lennon".to_owned()),
            sender_email: Some("john@example.com".to_owned()),
            ..Default::default()
        }
    }

    fn html_email() -> EmailData {
        EmailData {
            subject: Some("Mail subject".to_owned()),
            body: Some("<html>hi</html>".to_owned()),
            categories: Some(vec!["First".to_owned(), "Second".to_owned()]),
            ..sender()
        }
    }

    fn start(hour: u32) -> StartTime {
        NaiveDate::from_ymd_opt(2026, 11, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
            .into()
    }

    fn script_happy_path(transport: &FakeTransport) {
        transport
            .respond_ok("getFields", json!([]))
            .respond_ok("createField", json!({"id": 1}))
            .respond_ok("getLists", json!([]))
            .respond_ok("createList", json!({"id": 42}))
            .respond_ok("importContacts", json!({"total": 3, "inserted": 3}))
            .respond_ok("createEmailMessage", json!({"message_id": 700}))
            .respond_ok(
                "createCampaign",
                json!({"campaign_id": 9001, "status": "scheduled", "count": 3}),
            );
    }

    #[tokio::test]
    async fn empty_recipients_fail_without_network_calls() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);

        let err = client
            .create_email_campaign(&[], html_email(), CampaignData::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            UnisenderError::Validation(ValidationError::Empty {
                field: "recipients"
            })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn inconsistent_recipient_keys_fail_without_network_calls() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);

        let recipients = vec![
            Recipient::new(EmailAddress::new("a@example.com").unwrap())
                .with_field("name", "A")
                .unwrap(),
            Recipient::new(EmailAddress::new("b@example.com").unwrap()),
        ];
        let err = client
            .create_email_campaign(&recipients, html_email(), CampaignData::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UnisenderError::Validation(ValidationError::InconsistentFields { index: 1 })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn several_content_modes_fail_without_network_calls() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);

        let email = EmailData {
            template_id: Some(TemplateId::new(3140875)),
            system_template_id: Some(SystemTemplateId::new(54485)),
            ..html_email()
        };
        let err = client
            .create_email_campaign(&recipients(), email, CampaignData::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UnisenderError::Validation(ValidationError::ContentMode { found: 3 })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_content_mode_fails_without_network_calls() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);

        let err = client
            .create_email_campaign(&recipients(), sender(), CampaignData::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UnisenderError::Validation(ValidationError::ContentMode { found: 0 })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn single_campaign_runs_the_full_sequence() {
        let transport = FakeTransport::new();
        script_happy_path(&transport);
        let client = make_client(&transport);

        let campaign_id = client
            .create_email_campaign(&recipients(), html_email(), CampaignData::default())
            .await
            .unwrap();
        assert_eq!(campaign_id, CampaignId::new(9001));

        assert_eq!(
            transport.methods(),
            vec![
                "getFields",
                "createField",
                "getLists",
                "createList",
                "importContacts",
                "createEmailMessage",
                "createCampaign",
            ]
        );

        let field = &transport.calls("createField")[0];
        assert_eq!(field.param("name"), Some("name"));
        assert_eq!(field.param("type"), Some("string"));

        let list = &transport.calls("createList")[0];
        assert!(
            list.param("title")
                .is_some_and(|t| t.starts_with("mailing_list_"))
        );

        let import = &transport.calls("importContacts")[0];
        assert_eq!(import.param("field_names[0]"), Some("email"));
        assert_eq!(import.param("field_names[1]"), Some("name"));
        assert_eq!(import.param("data[0][0]"), Some("dave@example.com"));
        assert_eq!(import.param("data[2][1]"), Some("Nick Reynolds"));
        assert_eq!(import.param("data[2][3]"), Some("42"));
        assert!(import.param("data[3][0]").is_none());
        assert_eq!(import.param("overwrite_lists"), Some("1"));

        let message = &transport.calls("createEmailMessage")[0];
        assert_eq!(message.param("list_id"), Some("42"));
        assert_eq!(message.param("body"), Some("<html>hi</html>"));
        assert_eq!(message.param("categories"), Some("First,Second"));

        let campaign = &transport.calls("createCampaign")[0];
        assert_eq!(campaign.param("message_id"), Some("700"));
        assert!(campaign.param("start_time").is_none());
    }

    #[tokio::test]
    async fn existing_fields_and_list_are_reused() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);
        let recipients = recipients();
        let title = list_title(&RecipientBatch::new(&recipients).unwrap()).unwrap();

        transport
            .respond_ok("getFields", json!([{"id": 5, "name": "name", "type": "string"}]))
            .respond_ok(
                "getLists",
                json!([{"id": 1, "title": "other"}, {"id": 42, "title": title.as_str()}]),
            )
            .respond_ok("importContacts", json!({"total": 3, "updated": 3}))
            .respond_ok("createEmailMessage", json!({"message_id": 700}))
            .respond_ok("createCampaign", json!({"campaign_id": 9001}));

        client
            .create_email_campaign(&recipients, html_email(), CampaignData::default())
            .await
            .unwrap();

        assert!(transport.calls("createField").is_empty());
        assert!(transport.calls("createList").is_empty());
        assert_eq!(
            transport.calls("createEmailMessage")[0].param("list_id"),
            Some("42")
        );
    }

    #[tokio::test]
    async fn duplicate_field_error_is_tolerated() {
        let transport = FakeTransport::new();
        script_happy_path(&transport);
        transport.clear("createField").respond(
            "createField",
            200,
            r#"{"error": "Field already exists", "code": "field_already_exists"}"#,
        );
        let client = make_client(&transport);

        let campaign_id = client
            .create_email_campaign(&recipients(), html_email(), CampaignData::default())
            .await
            .unwrap();
        assert_eq!(campaign_id, CampaignId::new(9001));
        assert_eq!(transport.calls("createField").len(), 1);
    }

    #[tokio::test]
    async fn other_field_errors_abort_the_sequence() {
        let transport = FakeTransport::new();
        transport.respond_ok("getFields", json!([])).respond(
            "createField",
            200,
            r#"{"error": "Bad name", "code": "invalid_arg"}"#,
        );
        let client = make_client(&transport);

        let err = client
            .create_email_campaign(&recipients(), html_email(), CampaignData::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteApi);
        assert!(transport.calls("getLists").is_empty());
    }

    #[tokio::test]
    async fn scheduled_campaign_sends_formatted_start_time() {
        let transport = FakeTransport::new();
        script_happy_path(&transport);
        let client = make_client(&transport);

        let email = EmailData {
            template_id: Some(TemplateId::new(4185485)),
            ..sender()
        };
        let campaign = CampaignData {
            start_time: Some(start(16)),
            timezone: Some(Timezone::utc()),
            ..Default::default()
        };
        client
            .create_email_campaign(&recipients(), email, campaign)
            .await
            .unwrap();

        let message = &transport.calls("createEmailMessage")[0];
        assert_eq!(message.param("template_id"), Some("4185485"));
        assert!(message.param("body").is_none());

        let request = &transport.calls("createCampaign")[0];
        assert_eq!(request.param("start_time"), Some("2026-11-01 16:00"));
        assert_eq!(request.param("timezone"), Some("UTC"));
    }

    #[tokio::test]
    async fn send_email_campaign_collapses_result_to_bool() {
        let transport = FakeTransport::new();
        script_happy_path(&transport);
        let client = make_client(&transport);
        assert!(
            client
                .send_email_campaign(&recipients(), html_email(), CampaignData::default())
                .await
        );

        let transport = FakeTransport::new();
        transport.fail_with("connection reset");
        let client = make_client(&transport);
        assert!(
            !client
                .send_email_campaign(&recipients(), html_email(), CampaignData::default())
                .await
        );
    }

    #[tokio::test]
    async fn many_campaigns_share_one_import() {
        let transport = FakeTransport::new();
        transport
            .respond_ok("getFields", json!([]))
            .respond_ok("createField", json!({"id": 1}))
            .respond_ok("getLists", json!([]))
            .respond_ok("createList", json!({"id": 42}))
            .respond_ok("importContacts", json!({"total": 3}))
            .respond_ok("createEmailMessage", json!({"message_id": 701}))
            .respond_ok("createEmailMessage", json!({"message_id": 702}))
            .respond_ok("createEmailMessage", json!({"message_id": 703}))
            .respond_ok("createCampaign", json!({"campaign_id": 11}))
            .respond_ok("createCampaign", json!({"campaign_id": 12}))
            .respond_ok("createCampaign", json!({"campaign_id": 13}));
        let client = make_client(&transport);

        let defaults = CampaignDefaults {
            email_data: EmailData {
                body: Some("<p>news</p>".to_owned()),
                ..sender()
            },
            campaign_data: CampaignData::default(),
        };
        let entries = ["first", "second", "third"]
            .into_iter()
            .map(|subject| CampaignEntry {
                email_data: EmailData {
                    subject: Some(subject.to_owned()),
                    ..Default::default()
                },
                campaign_data: CampaignData::default(),
            })
            .collect();

        let ids = client
            .create_many_email_campaigns(&recipients(), entries, &defaults)
            .await
            .unwrap();
        assert_eq!(
            ids,
            vec![CampaignId::new(11), CampaignId::new(12), CampaignId::new(13)]
        );

        assert_eq!(transport.calls("getFields").len(), 1);
        assert_eq!(transport.calls("createField").len(), 1);
        assert_eq!(transport.calls("createList").len(), 1);
        assert_eq!(transport.calls("importContacts").len(), 1);

        let subjects = transport
            .calls("createEmailMessage")
            .iter()
            .map(|r| r.param("subject").map(str::to_owned))
            .collect::<Vec<_>>();
        assert_eq!(
            subjects,
            vec![
                Some("first".to_owned()),
                Some("second".to_owned()),
                Some("third".to_owned())
            ]
        );
        let message_ids = transport
            .calls("createCampaign")
            .iter()
            .map(|r| r.param("message_id").map(str::to_owned))
            .collect::<Vec<_>>();
        assert_eq!(
            message_ids,
            vec![
                Some("701".to_owned()),
                Some("702".to_owned()),
                Some("703".to_owned())
            ]
        );
    }

    #[tokio::test]
    async fn campaign_defaults_merge_under_entries() {
        let transport = FakeTransport::new();
        script_happy_path(&transport);
        let client = make_client(&transport);

        let defaults = CampaignDefaults {
            email_data: sender(),
            campaign_data: CampaignData {
                timezone: Some(Timezone::utc()),
                ..Default::default()
            },
        };
        let template = EmailData {
            template_id: Some(TemplateId::new(3140875)),
            ..Default::default()
        };
        let entries = vec![
            CampaignEntry {
                email_data: template.clone(),
                campaign_data: CampaignData {
                    start_time: Some(start(9)),
                    ..Default::default()
                },
            },
            CampaignEntry {
                email_data: template,
                campaign_data: CampaignData {
                    timezone: Some(Timezone::new("EU").unwrap()),
                    ..Default::default()
                },
            },
        ];

        client
            .create_many_email_campaigns(&recipients(), entries, &defaults)
            .await
            .unwrap();

        let campaigns = transport.calls("createCampaign");
        assert_eq!(campaigns[0].param("timezone"), Some("UTC"));
        assert_eq!(campaigns[0].param("start_time"), Some("2026-11-01 09:00"));
        assert_eq!(campaigns[1].param("timezone"), Some("EU"));
        assert!(campaigns[1].param("start_time").is_none());

        let message = &transport.calls("createEmailMessage")[0];
        assert_eq!(message.param("sender_name"), Some("John Lennon"));
    }

    #[tokio::test]
    async fn invalid_entry_fails_batch_before_network_calls() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);

        let entries = vec![
            CampaignEntry {
                email_data: EmailData {
                    template_id: Some(TemplateId::new(1)),
                    ..Default::default()
                },
                ..Default::default()
            },
            CampaignEntry::default(),
        ];
        let err = client
            .create_many_email_campaigns(
                &recipients(),
                entries,
                &CampaignDefaults {
                    email_data: sender(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, UnisenderError::Batch { index: 1, .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failing_campaign_stops_the_batch() {
        let transport = FakeTransport::new();
        script_happy_path(&transport);
        transport
            .clear("createCampaign")
            .respond_ok("createCampaign", json!({"campaign_id": 11}))
            .respond(
                "createCampaign",
                200,
                r#"{"error": "Top up your balance", "code": "not_enough_money"}"#,
            );
        let client = make_client(&transport);

        let entries = vec![
            CampaignEntry {
                email_data: html_email(),
                ..Default::default()
            };
            3
        ];
        let err = client
            .create_many_email_campaigns(&recipients(), entries, &CampaignDefaults::default())
            .await
            .unwrap_err();

        assert!(matches!(err, UnisenderError::Batch { index: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::RemoteApi);
        assert_eq!(transport.calls("createCampaign").len(), 2);
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let transport = FakeTransport::new();
        let client = make_client(&transport);

        let ids = client
            .create_many_email_campaigns(&recipients(), Vec::new(), &CampaignDefaults::default())
            .await
            .unwrap();
        assert!(ids.is_empty());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn list_title_depends_on_recipients() {
        let first = recipients();
        let mut second = recipients();
        second.pop();

        let a = list_title(&RecipientBatch::new(&first).unwrap()).unwrap();
        let b = list_title(&RecipientBatch::new(&first).unwrap()).unwrap();
        let c = list_title(&RecipientBatch::new(&second).unwrap()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), "mailing_list_".len() + 10);
    }
}
