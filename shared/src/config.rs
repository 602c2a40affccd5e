//! Configuration management for the meal plan Lambda.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};

const DEFAULT_BUCKET_NAME: &str = "meal-plannerui-pantrybuddy";
const DEFAULT_REGION: &str = "us-east-2";

/// API versions served by the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    /// Endpoint path for generating a meal plan under this version.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "/generate-meal-plan",
            ApiVersion::V2 => "/v2/generate-meal-plan",
        }
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" => Ok(ApiVersion::V1),
            "v2" => Ok(ApiVersion::V2),
            other => Err(Error::Config(format!(
                "Unknown API_VERSION '{}', expected v1 or v2",
                other
            ))),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V1 => f.write_str("v1"),
            ApiVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Advertised API version
    pub api_version: ApiVersion,
    /// S3 bucket holding the recipe lists
    pub bucket_name: String,
    /// AWS region
    pub aws_region: String,
    /// Local directory to serve recipes from instead of S3
    pub recipes_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_version = match lookup("API_VERSION") {
            Some(value) => value.parse()?,
            None => ApiVersion::default(),
        };

        Ok(Self {
            api_version,
            bucket_name: lookup("S3_BUCKET_NAME")
                .unwrap_or_else(|| DEFAULT_BUCKET_NAME.to_string()),
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            recipes_dir: lookup("RECIPES_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Path the v2 flow is mounted at.
    pub fn v2_endpoint(&self) -> &'static str {
        ApiVersion::V2.endpoint()
    }
}
