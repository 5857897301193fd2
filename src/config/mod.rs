// ABOUTME: Configuration types and parsing for dockrun.yml.
// ABOUTME: Connection settings, a default build, and a declarative run request.

mod deserialize;
mod env_value;

pub use env_value::{EnvValue, resolve_env_map, resolve_optional};

use crate::error::{Error, Result};
use crate::lifecycle::RunRequest;
use crate::runtime::{ConnectionConfig, RegistryCredentials};
use deserialize::deserialize_scalar_map;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "dockrun.yml";
pub const CONFIG_FILENAME_ALT: &str = "dockrun.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dockrun/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionSection,

    #[serde(default)]
    pub build: Option<BuildSection>,

    #[serde(default)]
    pub run: Option<RunSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSection {
    #[serde(default)]
    pub url: Option<EnvValue>,

    #[serde(default)]
    pub username: Option<EnvValue>,

    #[serde(default)]
    pub password: Option<EnvValue>,

    #[serde(default)]
    pub email: Option<EnvValue>,

    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default = "default_context")]
    pub context: PathBuf,
    pub tag: String,
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub detached: bool,

    #[serde(default, alias = "auto_remove")]
    pub rm: bool,

    #[serde(default)]
    pub env: BTreeMap<String, EnvValue>,

    #[serde(default, deserialize_with = "deserialize_scalar_map")]
    pub ports: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "deserialize_scalar_map")]
    pub volumes: BTreeMap<String, String>,

    #[serde(default)]
    pub volumes_from: Vec<String>,

    #[serde(default)]
    pub links: Vec<String>,

    #[serde(default)]
    pub dns: Vec<String>,

    #[serde(default)]
    pub dns_search: Vec<String>,
}

/// Connection settings given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.build.as_ref().is_some_and(|b| b.tag.trim().is_empty()) {
            return Err(Error::InvalidConfig("build.tag cannot be empty".to_string()));
        }
        if self.run.as_ref().is_some_and(|r| r.detached && r.rm) {
            return Err(Error::InvalidConfig(
                "run.detached and run.rm cannot both be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// First config file present in `dir`, if any.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => Err(Error::ConfigNotFound(dir.to_path_buf())),
        }
    }

    /// Resolve the connection section, applying command-line overrides.
    pub fn connection_config(&self, overrides: &ConnectionOverrides) -> Result<ConnectionConfig> {
        let section = &self.connection;
        let pick = |cli: &Option<String>, file: &Option<EnvValue>| -> Result<Option<String>> {
            match cli {
                Some(value) => Ok(Some(value.clone())),
                None => resolve_optional(file.as_ref()),
            }
        };

        let url = pick(&overrides.url, &section.url)?;
        let credentials = RegistryCredentials::new(
            pick(&overrides.username, &section.username)?.unwrap_or_default(),
            pick(&overrides.password, &section.password)?.unwrap_or_default(),
            pick(&overrides.email, &section.email)?.unwrap_or_default(),
        );

        let config = ConnectionConfig::new(url.as_deref(), credentials);
        Ok(match section.timeout {
            Some(timeout) => config.timeout(timeout),
            None => config,
        })
    }
}

impl RunSection {
    /// Build a run request, resolving environment references.
    pub fn to_request(&self) -> Result<RunRequest> {
        Ok(RunRequest {
            image: self.image.clone().unwrap_or_default(),
            name: self.name.clone(),
            hostname: self.hostname.clone(),
            detached: self.detached,
            auto_remove: self.rm,
            env: resolve_env_map(&self.env)?,
            ports: self.ports.clone(),
            volumes: self.volumes.clone(),
            volumes_from: self.volumes_from.clone(),
            links: self.links.clone(),
            dns: self.dns.clone(),
            dns_search: self.dns_search.clone(),
        })
    }
}
