use anyhow::{Context, Result};
use clap::ValueEnum;

/// Formats structured data can be printed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl Encoding {
    /// Serialize an object in this format.
    pub fn encode<T>(&self, contents: &T) -> Result<String>
    where
        T: ?Sized + serde::Serialize,
    {
        match self {
            Encoding::Yaml => as_yaml(contents),
            Encoding::Json => as_json(contents),
            Encoding::Toml => as_toml(contents),
        }
    }
}

/// Serialize an object to TOML.
pub fn as_toml<T>(contents: &T) -> Result<String>
where
    T: ?Sized + serde::Serialize,
{
    toml::to_string(&contents).context("encoding as TOML")
}

/// Serialize an object to YAML.
pub fn as_yaml<T>(contents: &T) -> Result<String>
where
    T: ?Sized + serde::Serialize,
{
    serde_yaml::to_string(&contents).context("encoding as YAML")
}

/// Serialize an object to pretty JSON.
pub fn as_json<T>(contents: &T) -> Result<String>
where
    T: ?Sized + serde::Serialize,
{
    serde_json::to_string_pretty(&contents).context("encoding as JSON")
}
