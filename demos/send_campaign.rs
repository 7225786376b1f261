use std::io;

use tracing_subscriber::EnvFilter;
use unisender::{CampaignData, EmailAddress, EmailData, Recipient, UnisenderClientBuilder};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = UnisenderClientBuilder::from_env()?.build()?;

    let sender_email = required("UNISENDER_SENDER_EMAIL")?;
    let recipients_raw = required("UNISENDER_RECIPIENTS")?;
    let sender_name =
        std::env::var("UNISENDER_SENDER_NAME").unwrap_or_else(|_| "unisender demo".to_owned());

    let recipients = recipients_raw
        .split(',')
        .map(|email| {
            let name = email.split('@').next().unwrap_or_default().to_owned();
            Recipient::new(EmailAddress::new(email)?).with_field("name", name)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let email = EmailData {
        sender_name: Some(sender_name),
        sender_email: Some(sender_email),
        subject: Some("Hello from the unisender demo".to_owned()),
        body: Some("<p>Hello, {{name}}!</p>".to_owned()),
        ..Default::default()
    };

    let campaign_id = client
        .create_email_campaign(&recipients, email, CampaignData::default())
        .await?;
    println!("campaign_id: {campaign_id}");

    Ok(())
}
