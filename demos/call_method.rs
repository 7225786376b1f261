use std::io;

use tracing_subscriber::EnvFilter;
use unisender::{ApiMethod, ParamValue, Params, UnisenderClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let method = std::env::var("UNISENDER_METHOD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "UNISENDER_METHOD environment variable is required (e.g. get_lists)",
        )
    })?;
    let method: ApiMethod = method.parse()?;

    // Remaining `key=value` arguments become request parameters.
    let params = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.to_owned(), ParamValue::from(value)))
        })
        .collect::<Params>();

    let client = UnisenderClientBuilder::from_env()?.build()?;
    let result = client.call(method, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
