use observability_demo::core::config::LoggerConfig;
use observability_demo::logger::LoggerService;
use observability_demo::logging::{self, IconFormatter};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = LoggerConfig::from_env()?;
    logging::init(IconFormatter, &config);

    let service = LoggerService::new(config, IconFormatter);
    lambda_runtime::run(lambda_runtime::service_fn(|event| service.handle(event))).await
}
