use anyhow::{Context, Result, bail};
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Rows of samples, each row holding one sample's columns.
pub type Table = Vec<Vec<f64>>;

/// Computed series together with the end time of each interval.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl Series {
    /// Pair interval values with the timestamps they end at.
    pub fn new(time: &[f64], values: Vec<f64>) -> Self {
        let time = time.iter().skip(1).take(values.len()).copied().collect();
        Self { time, values }
    }
}

/// Load a MessagePack-encoded list of rows.
pub fn load_table<P: AsRef<Path>>(file: P) -> Result<Table> {
    let file = file.as_ref();
    let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let mut reader = BufReader::new(file);
    let table = decode::from_read(&mut reader).context("failed to deserialize table")?;
    Ok(table)
}

/// Extract column `col` from every row of `table`.
pub fn get_column(table: &[Vec<f64>], col: usize) -> Result<Vec<f64>> {
    let mut column = Vec::with_capacity(table.len());
    for (i_row, row) in table.iter().enumerate() {
        match row.get(col) {
            Some(&val) => column.push(val),
            None => bail!("row {i_row} has {} columns, but column {col} was requested", row.len()),
        }
    }
    Ok(column)
}

/// Save a [`Series`] as MessagePack.
pub fn save_series<P: AsRef<Path>>(file: P, series: &Series) -> Result<()> {
    let file = file.as_ref();
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);
    encode::write(&mut writer, series).context("failed to serialize series")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

/// Load a [`Series`] previously written by [`save_series`].
pub fn load_series<P: AsRef<Path>>(file: P) -> Result<Series> {
    let file = file.as_ref();
    let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let mut reader = BufReader::new(file);
    let series = decode::from_read(&mut reader).context("failed to deserialize series")?;
    Ok(series)
}
