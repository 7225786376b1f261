use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;

macro_rules! api_methods {
    ($($variant:ident => $name:literal,)+) => {
        /// Remote methods the client is allowed to call.
        ///
        /// Names are the snake_case spelling; the request path uses camelCase
        /// (`import_contacts` is sent as `importContacts`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ApiMethod {
            $($variant,)+
        }

        impl ApiMethod {
            pub const ALL: &'static [ApiMethod] = &[$(ApiMethod::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for ApiMethod {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(ValidationError::UnknownMethod { name: s.to_owned() }),
                }
            }
        }
    };
}

api_methods! {
    GetLists => "get_lists",
    CreateList => "create_list",
    UpdateList => "update_list",
    DeleteList => "delete_list",
    Subscribe => "subscribe",
    Exclude => "exclude",
    Unsubscribe => "unsubscribe",
    ImportContacts => "import_contacts",
    ExportContacts => "export_contacts",
    GetTotalContactsCount => "get_total_contacts_count",
    GetContactCount => "get_contact_count",
    GetContact => "get_contact",
    GetFields => "get_fields",
    CreateField => "create_field",
    UpdateField => "update_field",
    DeleteField => "delete_field",
    GetTags => "get_tags",
    DeleteTag => "delete_tag",
    CreateEmailMessage => "create_email_message",
    UpdateEmailMessage => "update_email_message",
    DeleteMessage => "delete_message",
    SendEmail => "send_email",
    SendTestEmail => "send_test_email",
    CheckEmail => "check_email",
    UpdateOptInEmail => "update_opt_in_email",
    GetMessages => "get_messages",
    GetMessage => "get_message",
    ListMessages => "list_messages",
    GetCheckedEmail => "get_checked_email",
    CreateCampaign => "create_campaign",
    CancelCampaign => "cancel_campaign",
    CreateSmsMessage => "create_sms_message",
    SendSms => "send_sms",
    CheckSms => "check_sms",
    GetActualMessageVersion => "get_actual_message_version",
    GetWebVersion => "get_web_version",
    CreateEmailTemplate => "create_email_template",
    UpdateEmailTemplate => "update_email_template",
    DeleteTemplate => "delete_template",
    GetTemplate => "get_template",
    GetTemplates => "get_templates",
    ListTemplates => "list_templates",
    GetCampaignDeliveryStats => "get_campaign_delivery_stats",
    GetCampaignCommonStats => "get_campaign_common_stats",
    GetVisitedLinks => "get_visited_links",
    GetCampaigns => "get_campaigns",
    GetCampaignStatus => "get_campaign_status",
    ValidateSender => "validate_sender",
    Register => "register",
    CheckUserExists => "check_user_exists",
    GetUserInfo => "get_user_info",
    GetUsers => "get_users",
    TransferMoney => "transfer_money",
    GetAvailableTariffs => "get_available_tariffs",
    ChangeTariff => "change_tariff",
    SetSenderDomain => "set_sender_domain",
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
