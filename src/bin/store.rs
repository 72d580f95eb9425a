use observability_demo::core::config::StoreConfig;
use observability_demo::store::{DynamoMessageStore, StoreService};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    observability_demo::setup_logging();

    let config = StoreConfig::from_env()?;
    let shared = aws_config::from_env().load().await;
    let store = DynamoMessageStore::new(aws_sdk_dynamodb::Client::new(&shared), config.table_name);

    let service = StoreService::new(store);
    lambda_runtime::run(lambda_runtime::service_fn(|event| service.handle(event))).await
}
