use crate::error::{PlotError, Result};
use crate::model::{ThermalRecord, Trajectory, WindFieldSample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which thermals of the scenario are drawn over a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "t")]
pub enum ThermalPolicy {
    /// Thermals present when the simulation starts (`t_birth == 0`).
    BirthOnly,
    /// Thermals alive at the final timestamp of the trajectory.
    ActiveAtFinal,
    /// Thermals alive at a fixed instant.
    ActiveAt(f64),
}

impl ThermalPolicy {
    /// Resolve `ActiveAtFinal` against a fixed cutoff: a trajectory cut at `t`
    /// is plotted as of `t`, even when no sample falls exactly on it.
    pub fn at_cutoff(self, cutoff: Cutoff) -> ThermalPolicy {
        match (self, cutoff) {
            (ThermalPolicy::ActiveAtFinal, Cutoff::Fixed(t)) => ThermalPolicy::ActiveAt(t),
            (policy, _) => policy,
        }
    }
}

/// Upper time bound applied to the trajectory before plotting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "cutoff", content = "t")]
pub enum Cutoff {
    None,
    /// The trajectory's own final timestamp.
    FinalTimestamp,
    Fixed(f64),
}

/// Time of the last logged sample.
pub fn reference_time(trajectory: &Trajectory) -> Result<f64> {
    trajectory
        .last()
        .map(|sample| sample.time())
        .ok_or(PlotError::EmptyTrajectory)
}

pub fn born_at_start(thermals: &[ThermalRecord]) -> Vec<ThermalRecord> {
    thermals.iter().filter(|th| th.t_birth == 0.0).copied().collect()
}

pub fn active_at(thermals: &[ThermalRecord], t: f64) -> Vec<ThermalRecord> {
    thermals.iter().filter(|th| th.is_active_at(t)).copied().collect()
}

/// Apply a [`ThermalPolicy`]. Only `ActiveAtFinal` needs a non-empty trajectory.
pub fn select_thermals(
    thermals: &[ThermalRecord],
    policy: ThermalPolicy,
    trajectory: &Trajectory,
) -> Result<Vec<ThermalRecord>> {
    let selected = match policy {
        ThermalPolicy::BirthOnly => born_at_start(thermals),
        ThermalPolicy::ActiveAtFinal => active_at(thermals, reference_time(trajectory)?),
        ThermalPolicy::ActiveAt(t) => active_at(thermals, t),
    };
    debug!(?policy, total = thermals.len(), selected = selected.len(), "selected thermals");
    Ok(selected)
}

/// Keep the samples logged at or before `cutoff`, in source order.
pub fn truncate(trajectory: &Trajectory, cutoff: f64) -> Trajectory {
    Trajectory::new(
        trajectory
            .samples()
            .iter()
            .filter(|sample| sample.time() <= cutoff)
            .cloned()
            .collect(),
    )
}

pub fn apply_cutoff(trajectory: &Trajectory, cutoff: Cutoff) -> Result<Trajectory> {
    match cutoff {
        Cutoff::None => Ok(trajectory.clone()),
        Cutoff::FinalTimestamp => Ok(truncate(trajectory, reference_time(trajectory)?)),
        Cutoff::Fixed(t) => Ok(truncate(trajectory, t)),
    }
}

/// Samples taken exactly at `t`. The field is sampled on a discrete time grid,
/// so this is an equality test.
pub fn wind_slice(samples: &[WindFieldSample], t: f64) -> Vec<WindFieldSample> {
    samples.iter().filter(|s| s.t == t).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrajectorySample;

    fn trajectory(points: &[(f64, f64, f64)]) -> Trajectory {
        Trajectory::new(
            points
                .iter()
                .map(|&(x, y, t)| {
                    let mut fields = vec![0.0; 11];
                    fields[0] = x;
                    fields[1] = y;
                    fields[10] = t;
                    TrajectorySample::new(fields).unwrap()
                })
                .collect(),
        )
    }

    fn thermal(t_birth: f64, lifespan: f64) -> ThermalRecord {
        ThermalRecord { x: 1.0, y: 1.0, t_birth, lifespan }
    }

    #[test]
    fn test_thermal_alive_at_final_time() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (10.0, 10.0, 5.0)]);
        let thermals = vec![thermal(0.0, 10.0)];
        let selected = select_thermals(&thermals, ThermalPolicy::ActiveAtFinal, &traj).unwrap();
        assert_eq!(selected, thermals);
    }

    #[test]
    fn test_thermal_born_after_final_time() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (10.0, 10.0, 5.0)]);
        let thermals = vec![thermal(6.0, 2.0)];
        let selected = select_thermals(&thermals, ThermalPolicy::ActiveAtFinal, &traj).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let thermals = vec![thermal(5.0, 3.0), thermal(2.0, 3.0), thermal(2.0, 2.9)];
        let selected = active_at(&thermals, 5.0);
        assert_eq!(selected, vec![thermal(5.0, 3.0), thermal(2.0, 3.0)]);
    }

    #[test]
    fn test_empty_trajectory_has_no_reference_time() {
        let traj = Trajectory::default();
        assert!(matches!(reference_time(&traj), Err(PlotError::EmptyTrajectory)));
        assert!(matches!(
            select_thermals(&[thermal(0.0, 1.0)], ThermalPolicy::ActiveAtFinal, &traj),
            Err(PlotError::EmptyTrajectory)
        ));
        assert!(matches!(
            apply_cutoff(&traj, Cutoff::FinalTimestamp),
            Err(PlotError::EmptyTrajectory)
        ));
    }

    #[test]
    fn test_birth_only_ignores_trajectory() {
        let thermals = vec![thermal(0.0, 100.0), thermal(0.5, 100.0), thermal(0.0, 1.0)];
        let selected =
            select_thermals(&thermals, ThermalPolicy::BirthOnly, &Trajectory::default()).unwrap();
        assert_eq!(selected, vec![thermal(0.0, 100.0), thermal(0.0, 1.0)]);
    }

    #[test]
    fn test_truncate_at_final_timestamp_is_noop() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)]);
        assert_eq!(apply_cutoff(&traj, Cutoff::FinalTimestamp).unwrap(), traj);
    }

    #[test]
    fn test_truncate_at_earlier_cutoff() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)]);
        let cut = apply_cutoff(&traj, Cutoff::Fixed(1.0)).unwrap();
        assert_eq!(cut.len(), 2);
        assert_eq!(cut.last().unwrap().time(), 1.0);
    }

    #[test]
    fn test_fixed_cutoff_sets_window_time() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (1.0, 1.0, 30.0), (2.0, 2.0, 60.0)]);
        let policy = ThermalPolicy::ActiveAtFinal.at_cutoff(Cutoff::Fixed(45.0));
        assert_eq!(policy, ThermalPolicy::ActiveAt(45.0));

        let cut = apply_cutoff(&traj, Cutoff::Fixed(45.0)).unwrap();
        let selected = select_thermals(&[thermal(40.0, 100.0)], policy, &cut).unwrap();
        assert_eq!(selected, vec![thermal(40.0, 100.0)]);
    }

    #[test]
    fn test_other_policies_ignore_cutoff() {
        let fixed = Cutoff::Fixed(45.0);
        assert_eq!(ThermalPolicy::BirthOnly.at_cutoff(fixed), ThermalPolicy::BirthOnly);
        assert_eq!(ThermalPolicy::ActiveAt(10.0).at_cutoff(fixed), ThermalPolicy::ActiveAt(10.0));
        assert_eq!(
            ThermalPolicy::ActiveAtFinal.at_cutoff(Cutoff::FinalTimestamp),
            ThermalPolicy::ActiveAtFinal
        );
    }

    #[test]
    fn test_wind_slice_exact() {
        let samples = vec![
            WindFieldSample { x: 1.0, y: 2.0, t: 100.0, updraft: 3.5 },
            WindFieldSample { x: 1.0, y: 2.0, t: 99.0, updraft: 1.0 },
            WindFieldSample { x: 1.0, y: 2.0, t: 100.000001, updraft: 1.0 },
        ];
        assert_eq!(wind_slice(&samples, 100.0), vec![samples[0]]);
    }
}
