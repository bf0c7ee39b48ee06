//! Process-wide DynamoDB client.
//!
//! The client is built on first use and reused by every later invocation
//! handled by the same process. There is no teardown; the platform recycles
//! the process.

use aws_sdk_dynamodb::Client;
use tokio::sync::OnceCell;

use crate::config::Config;

static CLIENT: OnceCell<Client> = OnceCell::const_new();

/// Returns the shared client, creating it from `config` the first time.
pub async fn shared_client(config: &Config) -> &'static Client {
    CLIENT.get_or_init(|| create_client(config)).await
}

/// Creates a DynamoDB client with the given configuration.
async fn create_client(config: &Config) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        sdk_config_loader = sdk_config_loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;

    tracing::info!(
        table = %config.table_name,
        endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
        "Created DynamoDB client"
    );

    Client::new(&sdk_config)
}
