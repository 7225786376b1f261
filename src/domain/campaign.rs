use crate::domain::email::EmailData;
use crate::domain::value::{StartTime, Timezone};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Caller-supplied scheduling and tracking options for `createCampaign`.
///
/// `start_time: None` sends immediately. The message id is injected by the client and is
/// deliberately not a field here.
pub struct CampaignData {
    pub start_time: Option<StartTime>,
    pub timezone: Option<Timezone>,
    pub track_read: Option<bool>,
    pub track_links: Option<bool>,
    pub track_ga: Option<bool>,
}

impl CampaignData {
    /// Fill every unset field from `defaults`. Fields set on `self` win.
    pub fn merged_over(self, defaults: &CampaignData) -> CampaignData {
        CampaignData {
            start_time: self.start_time.or(defaults.start_time),
            timezone: self.timezone.or_else(|| defaults.timezone.clone()),
            track_read: self.track_read.or(defaults.track_read),
            track_links: self.track_links.or(defaults.track_links),
            track_ga: self.track_ga.or(defaults.track_ga),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One campaign of a batch created by
/// [`create_many_email_campaigns`](crate::UnisenderClient::create_many_email_campaigns).
pub struct CampaignEntry {
    pub email_data: EmailData,
    pub campaign_data: CampaignData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Values applied to every [`CampaignEntry`] of a batch unless the entry sets them.
pub struct CampaignDefaults {
    pub email_data: EmailData,
    pub campaign_data: CampaignData,
}

impl CampaignEntry {
    pub fn merged_over(self, defaults: &CampaignDefaults) -> CampaignEntry {
        CampaignEntry {
            email_data: self.email_data.merged_over(&defaults.email_data),
            campaign_data: self.campaign_data.merged_over(&defaults.campaign_data),
        }
    }
}
