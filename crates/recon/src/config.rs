use serde::Deserialize;

use stowage_extract::fields::DEFAULT_NULL_TOKENS;
use stowage_extract::header::{DEFAULT_KEYWORDS, DEFAULT_SCAN_LIMIT};
use stowage_extract::{FieldExtractor, HeaderLocator};

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Pipeline configuration. Every field defaults to the reference behavior,
/// so an absent or empty config file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    #[serde(default)]
    pub loading_list: LoadingListConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderConfig {
    /// Leading rows scanned for a header per sheet.
    #[serde(default = "default_scan_limit")]
    pub scan_limit: usize,
    /// Vocabulary scored against candidate header rows.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scan_limit: default_scan_limit(),
            keywords: default_keywords(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldsConfig {
    /// Cell values read as "no value" in resolved columns.
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            null_tokens: default_null_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadingListConfig {
    /// Column delimiter of the exported loading lists. Single ASCII char.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Group name used when a record has no usable sheet name.
    #[serde(default = "default_group")]
    pub default_group: String,
}

impl Default for LoadingListConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            default_group: default_group(),
        }
    }
}

fn default_scan_limit() -> usize {
    DEFAULT_SCAN_LIMIT
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_null_tokens() -> Vec<String> {
    DEFAULT_NULL_TOKENS.iter().map(|t| t.to_string()).collect()
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_group() -> String {
    "LOADING_LIST".to_string()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl PipelineConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig =
            toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.header.scan_limit == 0 {
            return Err(PipelineError::ConfigValidation(
                "header.scan_limit must be at least 1".into(),
            ));
        }

        if self.header.keywords.is_empty() {
            return Err(PipelineError::ConfigValidation(
                "header.keywords must not be empty".into(),
            ));
        }

        let delim = &self.loading_list.delimiter;
        if delim.len() != 1 || !delim.is_ascii() {
            return Err(PipelineError::ConfigValidation(format!(
                "loading_list.delimiter must be a single ASCII character, got '{delim}'"
            )));
        }

        if self.loading_list.default_group.trim().is_empty() {
            return Err(PipelineError::ConfigValidation(
                "loading_list.default_group must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The loading-list delimiter as a byte. Valid after [`validate`].
    ///
    /// [`validate`]: Self::validate
    pub fn delimiter_byte(&self) -> u8 {
        self.loading_list.delimiter.as_bytes()[0]
    }

    /// Header locator built from this config.
    pub fn locator(&self) -> HeaderLocator {
        HeaderLocator::new(self.header.keywords.clone(), self.header.scan_limit)
    }

    /// Field extractor built from this config.
    pub fn extractor(&self) -> FieldExtractor {
        FieldExtractor::new(&self.fields.null_tokens)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
