use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use glint_core::{Preset, Scene};
use glint_renderer::{render, render_orbit, Camera, OrbitSettings, RenderConfig, Schedule};

/// Row distribution policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScheduleArg {
    Static,
    Dynamic,
    WorkStealing,
}

impl From<ScheduleArg> for Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Static => Schedule::Static,
            ScheduleArg::Dynamic => Schedule::Dynamic,
            ScheduleArg::WorkStealing => Schedule::WorkStealing,
        }
    }
}

/// Built-in scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Showcase,
    RedSphere,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Showcase => Preset::Showcase,
            PresetArg::RedSphere => Preset::RedSphere,
        }
    }
}

/// Glint: a multi-threaded Whitted ray tracer
#[derive(Parser, Debug)]
#[command(version, disable_help_flag = true)]
struct Args {
    /// Width of the rendered image
    #[arg(short = 'w', long = "width", requires = "height")]
    width: Option<u32>,

    /// Height of the rendered image
    #[arg(short = 'h', long = "height", requires = "width")]
    height: Option<u32>,

    /// Number of worker threads
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,

    /// How rows are handed out to the workers
    #[arg(long = "schedule", value_enum, default_value_t = ScheduleArg::Dynamic)]
    schedule: ScheduleArg,

    /// Scene file (JSON)
    #[arg(long = "scene", conflicts_with = "preset")]
    scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(long = "preset", value_enum, default_value_t = PresetArg::Showcase)]
    preset: PresetArg,

    /// Output image, or output directory for orbit frames
    #[arg(short = 'o', long = "output", default_value = "result.png")]
    output: PathBuf,

    /// Render an orbit sequence with this many frames
    #[arg(long = "orbit-frames")]
    orbit_frames: Option<u32>,

    /// Playback rate of the orbit sequence
    #[arg(long = "fps", default_value_t = 30)]
    fps: u32,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    fn config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        defaults
            .with_resolution(
                self.width.unwrap_or(defaults.width),
                self.height.unwrap_or(defaults.height),
            )
            .with_threads(self.threads)
            .with_schedule(self.schedule.into())
    }

    fn load_scene(&self) -> Result<Scene> {
        match &self.scene {
            Some(path) => Scene::load(path)
                .with_context(|| format!("Failed to load scene {:?}", path)),
            None => Ok(Preset::from(self.preset).build()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = args.config();
    config.validate().context("Invalid render settings")?;

    let scene = args.load_scene()?;
    log::info!("Scene ready: {} surfaces", scene.len());

    match args.orbit_frames {
        Some(frames) => {
            let settings = OrbitSettings::default()
                .with_frames(frames)
                .with_fps(args.fps);
            let report = render_orbit(&config, &scene, &settings, &args.output)
                .with_context(|| format!("Failed to render orbit into {:?}", args.output))?;

            if !report.is_complete() {
                log::warn!("{} frame(s) failed: {:?}", report.failed.len(), report.failed);
            }
            if report.written.is_empty() {
                bail!("No orbit frames were written");
            }
        }
        None => {
            render(&config, &scene, &Camera::default(), &args.output)
                .with_context(|| format!("Failed to render {:?}", args.output))?;
            log::info!("Saved {:?}", args.output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glint"]).unwrap();
        let config = args.config();

        assert_eq!(config, RenderConfig::default());
        assert_eq!(args.output, PathBuf::from("result.png"));
        assert_eq!(args.preset, PresetArg::Showcase);
        assert!(args.orbit_frames.is_none());
    }

    #[test]
    fn test_full_arguments() {
        let args = Args::try_parse_from([
            "glint", "-w", "320", "-h", "200", "-t", "4", "--schedule", "work-stealing",
            "--preset", "red-sphere", "-o", "out.png",
        ])
        .unwrap();
        let config = args.config();

        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.threads, 4);
        assert_eq!(config.schedule, Schedule::WorkStealing);
        assert_eq!(args.preset, PresetArg::RedSphere);
        assert_eq!(args.output, PathBuf::from("out.png"));
    }

    #[test]
    fn test_width_requires_height() {
        assert!(Args::try_parse_from(["glint", "-w", "320"]).is_err());
        assert!(Args::try_parse_from(["glint", "--height", "200"]).is_err());
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        assert!(Args::try_parse_from(["glint", "-w", "wide", "-h", "200"]).is_err());
        assert!(Args::try_parse_from(["glint", "-t", "many"]).is_err());
    }

    #[test]
    fn test_scene_and_preset_conflict() {
        assert!(
            Args::try_parse_from(["glint", "--scene", "a.json", "--preset", "showcase"]).is_err()
        );
    }

    #[test]
    fn test_orbit_arguments() {
        let args =
            Args::try_parse_from(["glint", "--orbit-frames", "12", "--fps", "24", "-o", "frames"])
                .unwrap();
        assert_eq!(args.orbit_frames, Some(12));
        assert_eq!(args.fps, 24);
    }
}
