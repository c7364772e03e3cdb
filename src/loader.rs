use crate::constants::{STATE_MIN_COLUMNS, THERMAL_DELIMITER, WIND_FIELD_DELIMITER};
use crate::error::{PlotError, Result};
use crate::model::{ThermalRecord, Trajectory, TrajectorySample, WindFieldSample};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the glider state log: a headerless, whitespace separated float matrix.
pub fn load_trajectory<P: AsRef<Path>>(path: P) -> Result<Trajectory> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let trajectory = parse_trajectory(&text, path)?;
    info!(path = %path.display(), samples = trajectory.len(), "loaded trajectory");
    Ok(trajectory)
}

/// Parse a state log already in memory. `origin` is only used in error messages.
///
/// Text from a `#` to the end of the line is a comment, and lines left blank
/// are skipped. Every row must have the same number of columns, and enough of
/// them to reach the time column.
pub fn parse_trajectory(text: &str, origin: &Path) -> Result<Trajectory> {
    let mut samples = Vec::new();
    let mut width: Option<usize> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let fields = content
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|e| PlotError::Parse {
                    path: origin.to_path_buf(),
                    line,
                    message: format!("'{}' is not a number: {}", token, e),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        match width {
            Some(expected) if expected != fields.len() => {
                return Err(PlotError::Parse {
                    path: origin.to_path_buf(),
                    line,
                    message: format!("expected {} columns, found {}", expected, fields.len()),
                });
            }
            None => width = Some(fields.len()),
            _ => {}
        }

        let count = fields.len();
        let sample = TrajectorySample::new(fields).ok_or_else(|| PlotError::Parse {
            path: origin.to_path_buf(),
            line,
            message: format!(
                "state rows need at least {} columns, found {}",
                STATE_MIN_COLUMNS, count
            ),
        })?;
        samples.push(sample);
    }

    Ok(Trajectory::new(samples))
}

fn parse_table<T: DeserializeOwned>(text: &str, delimiter: u8, origin: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| PlotError::Csv {
            path: origin.to_path_buf(),
            source,
        })
}

/// Load the thermal scenario: `;` separated, with a header naming
/// at least `x`, `y`, `t_birth` and `lifespan`.
pub fn load_thermals<P: AsRef<Path>>(path: P) -> Result<Vec<ThermalRecord>> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let thermals = parse_thermals(&text, path)?;
    info!(path = %path.display(), thermals = thermals.len(), "loaded thermal scenario");
    Ok(thermals)
}

pub fn parse_thermals(text: &str, origin: &Path) -> Result<Vec<ThermalRecord>> {
    parse_table(text, THERMAL_DELIMITER, origin)
}

/// Load the sampled wind field: space separated, header `x y t updraft`.
pub fn load_wind_field<P: AsRef<Path>>(path: P) -> Result<Vec<WindFieldSample>> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let samples = parse_wind_field(&text, path)?;
    info!(path = %path.display(), samples = samples.len(), "loaded wind field");
    Ok(samples)
}

pub fn parse_wind_field(text: &str, origin: &Path) -> Result<Vec<WindFieldSample>> {
    let samples: Vec<WindFieldSample> = parse_table(text, WIND_FIELD_DELIMITER, origin)?;
    debug!(rows = samples.len(), "parsed wind field");
    Ok(samples)
}
