//! Extraction heuristics configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_signature_lines() -> usize {
    15
}

const fn default_prefer_file_name_container() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Most lines scanned while recovering one signature.
    #[serde(default = "default_max_signature_lines")]
    pub max_signature_lines: usize,

    /// When falling back to a text scan, prefer the type named like the file.
    #[serde(default = "default_prefer_file_name_container")]
    pub prefer_file_name_container: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_signature_lines: default_max_signature_lines(),
            prefer_file_name_container: default_prefer_file_name_container(),
        }
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_signature_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "parser.max_signature_lines".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
