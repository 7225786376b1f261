use serde::Deserialize;
use serde_json::Value;

use super::envelope::{TransportCount, TransportError, TransportId};
use crate::domain::{
    CampaignId, CreateCampaign, CreateCampaignResponse, MessageId, Params, StartTime, Timezone,
};

#[derive(Debug, Clone, Deserialize)]
struct CreateCampaignJson {
    campaign_id: TransportId,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    count: Option<TransportCount>,
}

pub fn encode_create_campaign_params(request: &CreateCampaign) -> Params {
    let data = request.data();
    let mut params = Params::new().with(MessageId::FIELD, request.message_id().value());
    params.insert_opt(StartTime::FIELD, data.start_time.map(StartTime::to_wire));
    params.insert_opt(Timezone::FIELD, data.timezone.as_ref().map(Timezone::as_str));
    params.insert_opt("track_read", data.track_read);
    params.insert_opt("track_links", data.track_links);
    params.insert_opt("track_ga", data.track_ga);
    params
}

pub fn decode_create_campaign_result(
    result: Value,
) -> Result<CreateCampaignResponse, TransportError> {
    let parsed: CreateCampaignJson = serde_json::from_value(result)?;
    Ok(CreateCampaignResponse {
        campaign_id: CampaignId::new(parsed.campaign_id.into_u64(CampaignId::FIELD)?),
        status: parsed.status,
        count: parsed
            .count
            .map(|count| count.into_u64("count"))
            .transpose()?,
    })
}
