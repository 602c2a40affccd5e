//! Meal Plan Lambda - Handles /generate-meal-plan and /v2/generate-meal-plan.
//!
//! Loads the breakfast, lunch, snack and dinner recipe lists from S3 (or a
//! local directory when `RECIPES_DIR` is set), picks one recipe per meal for
//! each day Monday to Sunday and returns the week as an API Gateway proxy
//! response with CORS headers.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{
    Config, DirectoryObjectStore, MealPlanService, ObjectStore, PendingPipeline, S3ObjectStore,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
type AppState = MealPlanService<Box<dyn ObjectStore>, PendingPipeline>;

async fn build_state() -> Result<AppState, Error> {
    let config = Config::from_env()?;

    let objects: Box<dyn ObjectStore> = match &config.recipes_dir {
        Some(dir) => {
            info!("Serving recipes from directory {}", dir.display());
            Box::new(DirectoryObjectStore::new(dir.clone()))
        }
        None => {
            info!(
                "Serving recipes from s3://{} ({})",
                config.bucket_name, config.aws_region
            );
            Box::new(S3ObjectStore::from_config(&config).await)
        }
    };

    info!(
        "Meal plan API {} ready at {}",
        config.api_version,
        config.api_version.endpoint()
    );

    Ok(MealPlanService::new(config, objects, PendingPipeline))
}

async fn handler(
    state: Arc<AppState>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request_id = event.context.request_id.clone();

    match state.handle(&event.payload).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Request {} failed: {}", request_id, e);
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(build_state().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
