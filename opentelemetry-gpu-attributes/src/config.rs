//! # Processor configuration
//!
//! The processor is registered in a pipeline under the
//! [`GPU_ATTRIBUTES_PROCESSOR_TYPE`] name. Its schemas are fixed in code, so
//! the configuration block carries no options today; it still has to be a
//! well-formed mapping and unknown keys are rejected so typos surface at load
//! time instead of being silently ignored.
//!
//! ```yaml
//! processors:
//!   gpuattributes: {}
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// Component type name of the processor.
pub const GPU_ATTRIBUTES_PROCESSOR_TYPE: &str = "gpuattributes";

/// Configuration of the GPU attributes processor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GpuAttributesConfig {}

impl GpuAttributesConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        GpuAttributesConfig {}
    }

    /// Creates a GpuAttributesConfig from a YAML string.
    ///
    /// An empty or `null` document yields the default configuration.
    pub fn from_yaml(yaml_str: &str) -> Result<Self, ConfigError> {
        if yaml_str.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Option<GpuAttributesConfig> = serde_yaml::from_str(yaml_str)?;
        Ok(config.unwrap_or_default())
    }

    /// Creates a GpuAttributesConfig from a YAML file.
    pub fn from_yaml_file(file_path: &str) -> Result<Self, ConfigError> {
        let yaml_str = std::fs::read_to_string(file_path)?;
        Self::from_yaml(&yaml_str)
    }

    /// Checks the configuration is usable to build a processor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}
