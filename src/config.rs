use crate::constants::{
    BOUNDARY_RADIUS_M, FINAL_AXIS_LIMIT_M, OVERVIEW_AXIS_LIMIT_M, THERMAL_SCENARIO_PATH,
    TRAJECTORY_PATH, UPDRAFT_SLICE_TIME_S, WIND_FIELD_PATH,
};
use crate::error::{PlotError, Result};
use crate::filter::{Cutoff, ThermalPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Glyph drawn at each selected thermal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalMarker {
    /// Filled dot
    Circle,
    Cross,
}

/// Parameters of a 2-D trajectory view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryView {
    /// Half width of the square plot area, centred on the origin
    pub axis_limit: f64,
    /// Radius of the flight zone boundary circle
    pub boundary_radius: f64,
    pub thermals: ThermalPolicy,
    pub cutoff: Cutoff,
    /// Mark the first and last sample with "Start" / "End"
    pub annotate_ends: bool,
    pub thermal_marker: ThermalMarker,
}

impl TrajectoryView {
    /// Whole flight over the thermals that exist at t = 0.
    pub fn overview() -> Self {
        Self {
            axis_limit: OVERVIEW_AXIS_LIMIT_M,
            boundary_radius: BOUNDARY_RADIUS_M,
            thermals: ThermalPolicy::BirthOnly,
            cutoff: Cutoff::None,
            annotate_ends: false,
            thermal_marker: ThermalMarker::Circle,
        }
    }

    /// Flight up to its final timestamp over the thermals alive at that moment.
    pub fn final_state() -> Self {
        Self {
            axis_limit: FINAL_AXIS_LIMIT_M,
            boundary_radius: BOUNDARY_RADIUS_M,
            thermals: ThermalPolicy::ActiveAtFinal,
            cutoff: Cutoff::FinalTimestamp,
            annotate_ends: true,
            thermal_marker: ThermalMarker::Cross,
        }
    }
}

/// Parameters of the 3-D updraft surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceView {
    pub slice_time: f64,
}

impl Default for SurfaceView {
    fn default() -> Self {
        Self { slice_time: UPDRAFT_SLICE_TIME_S }
    }
}

/// Optional replacements for the fields of a [`TrajectoryView`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOverrides {
    pub axis_limit: Option<f64>,
    pub boundary_radius: Option<f64>,
    pub thermals: Option<ThermalPolicy>,
    pub cutoff: Option<Cutoff>,
    pub annotate_ends: Option<bool>,
    pub thermal_marker: Option<ThermalMarker>,
}

impl ViewOverrides {
    pub fn apply(&self, view: TrajectoryView) -> TrajectoryView {
        TrajectoryView {
            axis_limit: self.axis_limit.unwrap_or(view.axis_limit),
            boundary_radius: self.boundary_radius.unwrap_or(view.boundary_radius),
            thermals: self.thermals.unwrap_or(view.thermals),
            cutoff: self.cutoff.unwrap_or(view.cutoff),
            annotate_ends: self.annotate_ends.unwrap_or(view.annotate_ends),
            thermal_marker: self.thermal_marker.unwrap_or(view.thermal_marker),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOverrides {
    pub slice_time: Option<f64>,
}

impl SurfaceOverrides {
    pub fn apply(&self, view: SurfaceView) -> SurfaceView {
        SurfaceView {
            slice_time: self.slice_time.unwrap_or(view.slice_time),
        }
    }
}

/// Input file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    pub trajectory: PathBuf,
    pub thermals: PathBuf,
    pub wind_field: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            trajectory: PathBuf::from(TRAJECTORY_PATH),
            thermals: PathBuf::from(THERMAL_SCENARIO_PATH),
            wind_field: PathBuf::from(WIND_FIELD_PATH),
        }
    }
}

/// Contents of the optional JSON config file. Every field may be omitted.
///
/// ```json
/// {
///   "inputs": { "trajectory": "run3/state.dat" },
///   "final_state": { "axis_limit": 1300.0, "cutoff": { "cutoff": "fixed", "t": 600.0 } },
///   "updraft": { "slice_time": 200.0 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub inputs: InputPaths,
    pub overview: ViewOverrides,
    pub final_state: ViewOverrides,
    pub updraft: SurfaceOverrides,
}

impl PlotConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PlotConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PlotError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&text, path)?;
        info!(path = %path.display(), "loaded plot config");
        Ok(config)
    }

    pub fn from_json(text: &str, origin: &Path) -> Result<PlotConfig> {
        serde_json::from_str(text).map_err(|e| PlotError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn overview_view(&self) -> TrajectoryView {
        self.overview.apply(TrajectoryView::overview())
    }

    pub fn final_view(&self) -> TrajectoryView {
        self.final_state.apply(TrajectoryView::final_state())
    }

    pub fn surface_view(&self) -> SurfaceView {
        self.updraft.apply(SurfaceView::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_config_uses_presets() {
        let config = PlotConfig::from_json("{}", Path::new("plot.json")).unwrap();
        assert_eq!(config.inputs, InputPaths::default());
        assert_eq!(config.overview_view(), TrajectoryView::overview());
        assert_eq!(config.final_view(), TrajectoryView::final_state());
        assert_eq!(config.surface_view().slice_time, 100.0);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "inputs": { "trajectory": "run3/state.dat" },
            "final_state": {
                "axis_limit": 1300.0,
                "cutoff": { "cutoff": "fixed", "t": 600.0 }
            },
            "overview": { "thermals": { "policy": "active_at", "t": 50.0 } },
            "updraft": { "slice_time": 200.0 }
        }"#;
        let config = PlotConfig::from_json(json, Path::new("plot.json")).unwrap();
        assert_eq!(config.inputs.trajectory, PathBuf::from("run3/state.dat"));
        assert_eq!(config.inputs.thermals, PathBuf::from(THERMAL_SCENARIO_PATH));

        let final_view = config.final_view();
        assert_eq!(final_view.axis_limit, 1300.0);
        assert_eq!(final_view.boundary_radius, BOUNDARY_RADIUS_M);
        assert_eq!(final_view.cutoff, Cutoff::Fixed(600.0));
        assert_eq!(final_view.thermals, ThermalPolicy::ActiveAtFinal);

        assert_eq!(config.overview_view().thermals, ThermalPolicy::ActiveAt(50.0));
        assert_eq!(config.surface_view().slice_time, 200.0);
    }

    #[test]
    fn test_unit_policy_from_json() {
        let json = r#"{ "overview": { "thermals": { "policy": "active_at_final" } } }"#;
        let config = PlotConfig::from_json(json, Path::new("plot.json")).unwrap();
        assert_eq!(config.overview_view().thermals, ThermalPolicy::ActiveAtFinal);
    }

    #[test]
    fn test_thermal_marker_per_view() {
        assert_eq!(TrajectoryView::overview().thermal_marker, ThermalMarker::Circle);
        assert_eq!(TrajectoryView::final_state().thermal_marker, ThermalMarker::Cross);

        let json = r#"{ "overview": { "thermal_marker": "cross" } }"#;
        let config = PlotConfig::from_json(json, Path::new("plot.json")).unwrap();
        assert_eq!(config.overview_view().thermal_marker, ThermalMarker::Cross);
        assert_eq!(config.final_view().thermal_marker, ThermalMarker::Cross);
    }

    #[test]
    fn test_invalid_config() {
        let err = PlotConfig::from_json(r#"{"inputs": 3"#, Path::new("plot.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = PlotConfig::load("/path/that/does/not/exist.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
