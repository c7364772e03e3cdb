use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use colored::Colorize;
use l2f_plot::config::{PlotConfig, TrajectoryView, ViewOverrides};
use l2f_plot::filter::{Cutoff, ThermalPolicy};
use l2f_plot::pipeline::{surface_figure, trajectory_figure};
use l2f_plot::render::{render, Figure, Output};
use l2f_plot::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot L2F glider trajectories and updraft fields", long_about = None)]
struct Cli {
    /// JSON file with input paths and view parameters
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Write the figure to this PNG file instead of opening a window
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    save: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Whole trajectory over the thermals present at t = 0
    Overview(TrajectoryArgs),
    /// Trajectory up to its final timestamp over the thermals alive at that moment
    Final(TrajectoryArgs),
    /// 3-D surface of the updraft at one time slice of the wind field
    Updraft(UpdraftArgs),
}

#[derive(Args, Debug)]
struct TrajectoryArgs {
    /// Glider state log
    #[arg(long, value_hint = ValueHint::FilePath)]
    trajectory: Option<PathBuf>,

    /// Thermal scenario table
    #[arg(long, value_hint = ValueHint::FilePath)]
    thermals: Option<PathBuf>,

    /// Half width of the square plot area (m)
    #[arg(long)]
    axis_limit: Option<f64>,

    /// Radius of the flight zone boundary (m)
    #[arg(long)]
    boundary_radius: Option<f64>,

    /// Drop samples logged after this time (s)
    #[arg(long)]
    cutoff: Option<f64>,

    /// Show the thermals alive at this time (s) instead of the view's default
    #[arg(long)]
    thermals_at: Option<f64>,
}

impl TrajectoryArgs {
    fn overrides(&self) -> ViewOverrides {
        ViewOverrides {
            axis_limit: self.axis_limit,
            boundary_radius: self.boundary_radius,
            thermals: self.thermals_at.map(ThermalPolicy::ActiveAt),
            cutoff: self.cutoff.map(Cutoff::Fixed),
            annotate_ends: None,
            thermal_marker: None,
        }
    }
}

#[derive(Args, Debug)]
struct UpdraftArgs {
    /// Sampled wind field
    #[arg(long, value_hint = ValueHint::FilePath)]
    wind_field: Option<PathBuf>,

    /// Time slice to show (s); must match a sampled time exactly
    #[arg(long)]
    slice_time: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", format!("error[{}]:", e.kind()).red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    let output = cli.save.map(Output::Png).unwrap_or(Output::Window);
    debug!(?config, ?output, "resolved settings");

    match cli.command {
        Command::Overview(args) => {
            let view = args.overrides().apply(config.overview_view());
            run_trajectory(&config, &args, &view, "Trajectory overview", &output)
        }
        Command::Final(args) => {
            let view = args.overrides().apply(config.final_view());
            run_trajectory(&config, &args, &view, "Trajectory final state", &output)
        }
        Command::Updraft(args) => {
            let mut view = config.surface_view();
            if let Some(t) = args.slice_time {
                view.slice_time = t;
            }
            let path = args.wind_field.unwrap_or(config.inputs.wind_field.clone());
            let figure = surface_figure(&path, &view)?;
            println!(
                "{} updraft surface at t = {}: {} samples, {} triangles",
                "▶".cyan(),
                view.slice_time,
                figure.vertices.len(),
                figure.triangles.len()
            );
            finish(Figure::Surface(figure), "Updraft velocity", &output)
        }
    }
}

fn run_trajectory(
    config: &PlotConfig,
    args: &TrajectoryArgs,
    view: &TrajectoryView,
    title: &str,
    output: &Output,
) -> Result<()> {
    let trajectory = args.trajectory.as_ref().unwrap_or(&config.inputs.trajectory);
    let thermals = args.thermals.as_ref().unwrap_or(&config.inputs.thermals);
    let figure = trajectory_figure(trajectory, thermals, view)?;
    println!(
        "{} {}: {} samples, {} thermals",
        "▶".cyan(),
        title.to_lowercase(),
        figure.path.len(),
        figure.thermals.len()
    );
    finish(Figure::Trajectory(figure), title, output)
}

fn finish(figure: Figure, title: &str, output: &Output) -> Result<()> {
    render(figure, title, output)?;
    if let Output::Png(path) = output {
        println!("{} wrote {}", "✅".green(), path.display());
    }
    Ok(())
}
