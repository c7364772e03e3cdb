use crate::constants::{STATE_MIN_COLUMNS, STATE_TIME_COLUMN, STATE_X_COLUMN, STATE_Y_COLUMN};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One row of the glider state log.
///
/// All fields of the row are kept; only x, y and time are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    fields: Vec<f64>,
}

impl TrajectorySample {
    /// Wrap a state row. Returns `None` if the row is too short to carry a time column.
    pub fn new(fields: Vec<f64>) -> Option<Self> {
        if fields.len() < STATE_MIN_COLUMNS {
            return None;
        }
        Some(Self { fields })
    }

    pub fn x(&self) -> f64 {
        self.fields[STATE_X_COLUMN]
    }

    pub fn y(&self) -> f64 {
        self.fields[STATE_Y_COLUMN]
    }

    pub fn time(&self) -> f64 {
        self.fields[STATE_TIME_COLUMN]
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x(), self.y())
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }
}

/// Time ordered glider trajectory, in the order the simulation logged it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn new(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn positions(&self) -> Vec<DVec2> {
        self.samples.iter().map(TrajectorySample::position).collect()
    }
}

/// A thermal of the scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalRecord {
    pub x: f64,
    pub y: f64,
    pub t_birth: f64,
    pub lifespan: f64,
}

impl ThermalRecord {
    /// Active from birth until birth + lifespan, both ends included.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.t_birth <= t && self.t_birth + self.lifespan >= t
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// One sample of the recorded wind field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindFieldSample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
    pub updraft: f64,
}
