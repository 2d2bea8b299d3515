use crate::calculus::{derivative, integral};
use crate::config::Config;
use crate::data::{Series, get_column, load_series, load_table, save_series};
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    /// Differentiate the position column and save the speeds.
    pub fn compute_speed(&self) -> Result<()> {
        let (time, position) = self
            .load_columns(self.cfg.columns.position)
            .context("failed to load position samples")?;

        let speeds = derivative(&position, &time).context("failed to differentiate positions")?;
        log::info!("computed {} speeds", speeds.len());

        let file = self.results_file("speed");
        save_series(&file, &Series::new(&time, speeds))
            .with_context(|| format!("failed to save {file:?}"))?;
        log::info!("saved {file:?}");

        Ok(())
    }

    /// Integrate the acceleration column and save the accumulated speeds.
    pub fn compute_accumulated_speed(&self) -> Result<()> {
        let (time, acceleration) = self
            .load_columns(self.cfg.columns.acceleration)
            .context("failed to load acceleration samples")?;

        let speeds = integral(&acceleration, &time).context("failed to integrate accelerations")?;
        log::info!("computed {} accumulated speeds", speeds.len());

        let file = self.results_file("accumulated-speed");
        save_series(&file, &Series::new(&time, speeds))
            .with_context(|| format!("failed to save {file:?}"))?;
        log::info!("saved {file:?}");

        Ok(())
    }

    /// Log a summary of every saved results file.
    pub fn report(&self) -> Result<()> {
        for file in self.results_files()? {
            let series = load_series(&file).with_context(|| format!("failed to load {file:?}"))?;
            match (series.time.last(), series.values.last()) {
                (Some(time), Some(value)) => log::info!(
                    "{file:?}: {} values, final value {value} at time {time}",
                    series.values.len()
                ),
                _ => log::info!("{file:?}: no values"),
            }
        }
        Ok(())
    }

    pub fn clean(&self) -> Result<()> {
        for file in self.results_files()? {
            fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
            log::info!("removed {file:?}");
        }
        Ok(())
    }

    fn results_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.data_dir.join("results-*.msgpack");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let mut files = Vec::new();
        for entry in glob(pattern).context("failed to glob results files")? {
            match entry {
                Ok(file) => files.push(file),
                Err(error) => log::warn!("skipped unreadable entry: {error}"),
            }
        }
        Ok(files)
    }

    fn load_columns(&self, value_col: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        let file = self.data_dir.join(&self.cfg.input.samples);
        let table = load_table(&file).with_context(|| format!("failed to load {file:?}"))?;
        log::info!("loaded {} samples from {file:?}", table.len());

        let time = get_column(&table, self.cfg.columns.time).context("failed to get time column")?;
        let values = get_column(&table, value_col).context("failed to get value column")?;
        Ok((time, values))
    }

    fn results_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("results-{name}.msgpack"))
    }
}
