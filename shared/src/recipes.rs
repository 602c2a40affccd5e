//! Recipe list storage.
//!
//! Each meal type's recipes live in one JSON array object. The lists are read
//! through an [`ObjectStore`] so the function can serve from S3 in AWS or from
//! a local directory during development.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client as S3Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::models::{MealType, RecipeBook, RecipeList};
use crate::{Config, Error, Result};

/// Read-only access to stored objects by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the raw bytes stored under `key`.
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get_object(key).await
    }
}

/// Objects in an S3 bucket.
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build an S3 client for the configured region and bucket.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;

        Self::new(S3Client::new(&sdk_config), config.bucket_name.clone())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                get_object_error(
                    &self.bucket,
                    key,
                    e.as_service_error(),
                    DisplayErrorContext(&e),
                )
            })?;

        let body = response.body.collect().await.map_err(|e| {
            Error::Storage(format!(
                "Failed to read s3://{}/{}: {}",
                self.bucket, key, e
            ))
        })?;

        Ok(body.into_bytes().to_vec())
    }
}

/// Map a failed `GetObject` call to a storage error naming the object.
fn get_object_error(
    bucket: &str,
    key: &str,
    service_err: Option<&GetObjectError>,
    detail: impl fmt::Display,
) -> Error {
    if service_err.is_some_and(GetObjectError::is_no_such_key) {
        Error::Storage(format!("Object s3://{}/{} not found", bucket, key))
    } else {
        Error::Storage(format!("Failed to get s3://{}/{}: {}", bucket, key, detail))
    }
}

/// Objects stored as files beneath a local directory.
pub struct DirectoryObjectStore {
    root: PathBuf,
}

impl DirectoryObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectStore for DirectoryObjectStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.root.join(key);
        tokio::fs::read(&path)
            .await
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))
    }
}

/// Fetches and decodes recipe lists.
pub struct RecipeStore<S> {
    objects: S,
}

impl<S: ObjectStore> RecipeStore<S> {
    pub fn new(objects: S) -> Self {
        Self { objects }
    }

    /// Fetch the recipe list for one meal type.
    pub async fn fetch(&self, meal: MealType) -> Result<RecipeList> {
        let key = meal.object_key();
        let bytes = self.objects.get_object(key).await?;
        let recipes = decode_recipe_list(key, &bytes)?;

        debug!("Loaded {} {} recipes from {}", recipes.len(), meal, key);
        Ok(recipes)
    }

    /// Fetch all four recipe lists concurrently.
    pub async fn fetch_all(&self) -> Result<RecipeBook> {
        let (breakfast, lunch, snack, dinner) = tokio::try_join!(
            self.fetch(MealType::Breakfast),
            self.fetch(MealType::Lunch),
            self.fetch(MealType::Snack),
            self.fetch(MealType::Dinner),
        )?;

        info!(
            "Loaded recipe book: breakfast={}, lunch={}, snack={}, dinner={}",
            breakfast.len(),
            lunch.len(),
            snack.len(),
            dinner.len()
        );

        Ok(RecipeBook {
            breakfast,
            lunch,
            snack,
            dinner,
        })
    }
}

fn decode_recipe_list(key: &str, bytes: &[u8]) -> Result<RecipeList> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::Storage(format!("{} is not valid JSON: {}", key, e)))?;

    match value {
        Value::Array(recipes) => Ok(recipes),
        other => Err(Error::Decode(format!(
            "{} must contain a JSON array, found {}",
            key,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
