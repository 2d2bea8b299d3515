use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Input configuration parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Sample file name, relative to the data directory.
    pub samples: String,
}

/// Column layout of the sample table.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Column holding timestamps.
    pub time: usize,
    /// Column holding positions.
    pub position: usize,
    /// Column holding accelerations.
    pub acceleration: usize,
}

/// Job configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub columns: ColumnsConfig,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input.samples.trim().is_empty() {
            bail!("sample file name must not be empty");
        }

        let cols = &self.columns;
        check_num(cols.time, 0..1000).context("invalid time column")?;
        check_num(cols.position, 0..1000).context("invalid position column")?;
        check_num(cols.acceleration, 0..1000).context("invalid acceleration column")?;

        if cols.time == cols.position || cols.time == cols.acceleration {
            bail!("time column must differ from the value columns");
        }
        if cols.position == cols.acceleration {
            bail!("position and acceleration columns must differ");
        }

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
