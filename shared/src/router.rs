//! Request routing between the v1 and v2 meal plan flows.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use tracing::info;

use crate::http::json_response;
use crate::models::WeekResponse;
use crate::planner::{assemble_week, RandomPicker, RecipePicker};
use crate::recipes::{ObjectStore, RecipeStore};
use crate::v2::{handle_v2, PendingPipeline, V2Pipeline};
use crate::{Config, Result};

/// Flow selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Random weekly plan from the stored recipe lists
    V1,
    /// Structured generation pipeline
    V2,
}

/// Path used for routing: `resource` when set, otherwise `path`.
pub fn routing_key(event: &ApiGatewayProxyRequest) -> &str {
    event
        .resource
        .as_deref()
        .filter(|resource| !resource.is_empty())
        .or(event.path.as_deref())
        .unwrap_or("")
}

/// Only an exact match on the v2 endpoint selects v2; every other key,
/// including unknown paths, is served by v1.
pub fn resolve_route(key: &str, config: &Config) -> Route {
    if key == config.v2_endpoint() {
        Route::V2
    } else {
        Route::V1
    }
}

/// Lambda application state, built once per cold start.
pub struct MealPlanService<S, V = PendingPipeline> {
    config: Config,
    recipes: RecipeStore<S>,
    v2: V,
}

impl<S, V> MealPlanService<S, V>
where
    S: ObjectStore,
    V: V2Pipeline,
{
    pub fn new(config: Config, objects: S, v2: V) -> Self {
        Self {
            config,
            recipes: RecipeStore::new(objects),
            v2,
        }
    }

    /// Handle one gateway event with a freshly seeded random picker.
    pub async fn handle(
        &self,
        event: &ApiGatewayProxyRequest,
    ) -> Result<ApiGatewayProxyResponse> {
        let mut picker = RandomPicker::from_entropy();
        self.handle_with(event, &mut picker).await
    }

    /// Handle one gateway event, drawing recipes through `picker`.
    ///
    /// v1 storage, decode and empty-list failures are returned as errors for
    /// the runtime to report; v2 always answers with an envelope.
    pub async fn handle_with<P>(
        &self,
        event: &ApiGatewayProxyRequest,
        picker: &mut P,
    ) -> Result<ApiGatewayProxyResponse>
    where
        P: RecipePicker + Send + ?Sized,
    {
        let key = routing_key(event);
        let route = resolve_route(key, &self.config);
        info!(
            "Received request: method={}, key={}, route={:?}",
            event.http_method,
            key,
            route
        );

        match route {
            Route::V2 => Ok(handle_v2(&self.v2, event).await),
            Route::V1 => self.generate_week(picker).await,
        }
    }

    /// The v1 flow: fetch every recipe list, plan the week and wrap it.
    pub async fn generate_week<P>(&self, picker: &mut P) -> Result<ApiGatewayProxyResponse>
    where
        P: RecipePicker + Send + ?Sized,
    {
        let book = self.recipes.fetch_all().await?;
        let week = assemble_week(&book, picker)?;

        info!("Assembled meal plan for {} days", week.len());
        json_response(200, &WeekResponse { week })
    }
}
