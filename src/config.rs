use anyhow::{Result, bail};
use serde::Deserialize;
use std::fs;

/// Knobs for the split router. All fields have sensible defaults; a TOML file
/// can override any subset.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RouterOptions {
    /// Granularity of trade splits in percent. Must divide 100.
    pub percent_increment: u8,
    /// How many ranked split sets to return.
    pub num_top_routes: usize,
    /// Per-percent pruning cap applied before split sets are combined.
    pub num_top_partial_quotes: usize,
    /// Maximum number of routes in one split set.
    pub max_splits: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            percent_increment: 20,
            num_top_routes: 50,
            num_top_partial_quotes: 10,
            max_splits: 3,
        }
    }
}

impl RouterOptions {
    pub fn validate(&self) -> Result<()> {
        if self.percent_increment == 0 || 100 % self.percent_increment != 0 {
            bail!(
                "percent_increment must be a divisor of 100, got {}",
                self.percent_increment
            );
        }
        if self.max_splits == 0 {
            bail!("max_splits must be nonzero");
        }
        if self.num_top_routes == 0 || self.num_top_partial_quotes == 0 {
            bail!("result caps must be nonzero");
        }
        Ok(())
    }
}

pub fn read_options(path: &str) -> Result<RouterOptions> {
    let content = fs::read_to_string(path)?;
    let options: RouterOptions = toml::from_str(&content)?;
    options.validate()?;
    Ok(options)
}
