//! Module locator: load a calculator module by id and pick out its
//! configuration and compute function.
//!
//! Export names are not fixed, so both values are found with a fixed
//! precedence of structural rules.
//!
//! Configuration (first match wins):
//! 1. the export named `config`
//! 2. the default export, if it is an object with an `id`
//! 3. any export whose name ends in `Config` and is an object
//! 4. any object export with an `id`, except names starting with `calculate`
//!
//! Compute function (first match wins):
//! 1. any function export whose name starts with `calculate`
//! 2. any other function export that is not the configuration
//!
//! A module missing either value is unusable as a whole.

use crate::calculator::{
    modules, CalculatorConfig, ComputeFn, ComputeInput, ComputeResult, ExportValue, ModuleExports,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const CONFIG_EXPORT: &str = "config";
const CONFIG_SUFFIX: &str = "Config";
const COMPUTE_PREFIX: &str = "calculate";

/// Failure to load a module at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no module registered for calculator '{0}'")]
    Missing(String),

    #[error("module failed to build its exports: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("module load did not settle within {0:?}")]
    TimedOut(Duration),
}

/// Failure to obtain a usable calculator from a module.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("module exports no configuration object")]
    MissingConfiguration,

    #[error("module exports no compute function")]
    MissingCompute,

    #[error("export '{export}' does not match the configuration shape: {source}")]
    InvalidConfiguration {
        export: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where modules come from.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    async fn load(&self, id: &str) -> Result<ModuleExports, LoadError>;
}

/// Modules compiled into the binary, looked up in the registration table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticModuleSource;

#[async_trait]
impl ModuleSource for StaticModuleSource {
    async fn load(&self, id: &str) -> Result<ModuleExports, LoadError> {
        let registration = modules::find(id).ok_or_else(|| LoadError::Missing(id.to_string()))?;
        (registration.exports)()
    }
}

/// A usable calculator: one configuration and one compute function.
#[derive(Clone)]
pub struct CalculatorModule {
    config: Arc<CalculatorConfig>,
    compute: ComputeFn,
}

impl CalculatorModule {
    pub fn new(config: CalculatorConfig, compute: ComputeFn) -> Self {
        Self {
            config: Arc::new(config),
            compute,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn compute(&self, input: &ComputeInput) -> ComputeResult {
        (self.compute)(input)
    }
}

impl std::fmt::Debug for CalculatorModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorModule")
            .field("id", &self.config.id)
            .finish_non_exhaustive()
    }
}

/// Which export was chosen as the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigChoice<'a> {
    Named(&'a str),
    Default,
}

/// Extract the configuration and compute function from a module's exports.
pub fn extract(exports: &ModuleExports) -> Result<CalculatorModule, LocatorError> {
    let (choice, config_value) =
        find_configuration(exports).ok_or(LocatorError::MissingConfiguration)?;
    let compute = find_compute(exports, choice).ok_or(LocatorError::MissingCompute)?;

    let export = match choice {
        ConfigChoice::Named(name) => name.to_string(),
        ConfigChoice::Default => "default".to_string(),
    };
    let config: CalculatorConfig = serde_json::from_value(config_value.clone())
        .map_err(|source| LocatorError::InvalidConfiguration { export, source })?;

    debug!("Located calculator '{}' (config from {:?})", config.id, choice);
    Ok(CalculatorModule::new(config, compute))
}

/// Load the module for `id` from `source` and extract it.
pub async fn locate(source: &dyn ModuleSource, id: &str) -> Result<CalculatorModule, LocatorError> {
    let exports = source.load(id).await?;
    extract(&exports)
}

/// [`locate`], treating a load that does not settle within `limit` as failed.
pub async fn locate_within(
    source: &dyn ModuleSource,
    id: &str,
    limit: Duration,
) -> Result<CalculatorModule, LocatorError> {
    tokio::time::timeout(limit, locate(source, id))
        .await
        .unwrap_or_else(|_| Err(LoadError::TimedOut(limit).into()))
}

fn find_configuration(exports: &ModuleExports) -> Option<(ConfigChoice<'_>, &serde_json::Value)> {
    if let Some(ExportValue::Data(value)) = exports.get(CONFIG_EXPORT) {
        return Some((ConfigChoice::Named(CONFIG_EXPORT), value));
    }

    if let Some(ExportValue::Data(data)) = exports.default_value() {
        if data.as_object().is_some_and(|obj| obj.contains_key("id")) {
            return Some((ConfigChoice::Default, data));
        }
    }

    let suffixed = exports.named().find_map(|(name, value)| match value {
        ExportValue::Data(data) if name.ends_with(CONFIG_SUFFIX) && data.is_object() => {
            Some((ConfigChoice::Named(name), data))
        }
        _ => None,
    });
    if suffixed.is_some() {
        return suffixed;
    }

    exports.named().find_map(|(name, value)| match value {
        ExportValue::Data(data) if !name.starts_with(COMPUTE_PREFIX) && value.has_id() => {
            Some((ConfigChoice::Named(name), data))
        }
        _ => None,
    })
}

fn find_compute(exports: &ModuleExports, config: ConfigChoice<'_>) -> Option<ComputeFn> {
    let prefixed = exports.named().find_map(|(name, value)| {
        name.starts_with(COMPUTE_PREFIX)
            .then(|| value.as_function())
            .flatten()
    });
    if prefixed.is_some() {
        return prefixed;
    }

    // The default export never counts here, even when it is a function
    exports
        .named()
        .filter(|(name, _)| config != ConfigChoice::Named(*name))
        .find_map(|(_, value)| value.as_function())
}
