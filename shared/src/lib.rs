//! Shared library for the PantryBuddy meal plan Lambda.
//!
//! This crate provides the recipe storage clients, the weekly plan assembler and
//! the request routing used by the API Gateway function.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod planner;
pub mod recipes;
pub mod router;
pub mod v2;

pub use config::{ApiVersion, Config};
pub use error::{Error, Result};
pub use http::{body_text, error_response, json_response};
pub use models::{
    DayPlan, MealType, Recipe, RecipeBook, RecipeList, WeekPlan, WeekResponse,
};
pub use planner::{assemble, assemble_week, days_of_week, RandomPicker, RecipePicker};
pub use recipes::{DirectoryObjectStore, ObjectStore, RecipeStore, S3ObjectStore};
pub use router::{resolve_route, routing_key, MealPlanService, Route};
pub use v2::{handle_v2, PendingPipeline, V2Pipeline};
