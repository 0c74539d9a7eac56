use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::stepper::StepperSettings;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "chaos-equations",
    version,
    about = "Plots random quadratic recursive equations as t sweeps a range"
)]
pub struct Config {
    #[arg(long, default_value_t = 1600)]
    pub width: u32,

    #[arg(long, default_value_t = 900)]
    pub height: u32,

    #[arg(long, default_value_t = false)]
    pub fullscreen: bool,

    /// Iterates plotted per time step.
    #[arg(long, default_value_t = 800)]
    pub iterations: usize,

    /// Simulation steps per displayed frame.
    #[arg(long, default_value_t = 500)]
    pub steps_per_frame: usize,

    #[arg(long, default_value_t = 1e-5)]
    pub delta_per_step: f64,

    #[arg(long, default_value_t = 1e-7)]
    pub delta_minimum: f64,

    #[arg(long, default_value_t = -3.0, allow_hyphen_values = true)]
    pub t_start: f64,

    #[arg(long, default_value_t = 3.0, allow_hyphen_values = true)]
    pub t_end: f64,

    /// Start from this equation code instead of a random one (implies --repeat).
    #[arg(long)]
    pub code: Option<String>,

    /// Keep the same equation when t wraps around.
    #[arg(long, default_value_t = false)]
    pub repeat: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = TrailPreset::Fast)]
    pub trail: TrailPreset,

    #[arg(long, value_enum, default_value_t = DotSize::Small)]
    pub dot: DotSize,

    #[arg(long, default_value = "saved.txt")]
    pub save_file: PathBuf,

    /// Directory holding `point.{vert,frag}.wgsl` / `trail.{vert,frag}.wgsl` overrides.
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub vsync: bool,
}

/// How much of the previous frame survives into the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrailPreset {
    Fast,
    Slow,
    Frozen,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotSize {
    Small,
    Medium,
    Large,
}

impl TrailPreset {
    pub fn next(self) -> Self {
        match self {
            Self::Fast => Self::Slow,
            Self::Slow => Self::Frozen,
            Self::Frozen => Self::Instant,
            Self::Instant => Self::Fast,
        }
    }

    /// Amount subtracted from every color channel of the accumulated image per frame.
    pub fn fade_amount(self) -> f32 {
        match self {
            Self::Fast => 10.0 / 255.0,
            Self::Slow => 2.0 / 255.0,
            Self::Frozen => 0.0,
            Self::Instant => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast fade",
            Self::Slow => "slow fade",
            Self::Frozen => "frozen",
            Self::Instant => "no trail",
        }
    }
}

impl DotSize {
    pub fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }

    pub fn pixels(self) -> f32 {
        match self {
            Self::Small => 1.0,
            Self::Medium => 3.0,
            Self::Large => 10.0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("--width and --height must be non-zero");
        }
        if self.iterations == 0 {
            anyhow::bail!("--iterations must be at least 1");
        }
        if self.steps_per_frame == 0 {
            anyhow::bail!("--steps-per-frame must be at least 1");
        }
        if !(self.delta_per_step.is_finite() && self.delta_per_step > 0.0) {
            anyhow::bail!("--delta-per-step must be a positive number");
        }
        if !(self.delta_minimum.is_finite() && self.delta_minimum > 0.0) {
            anyhow::bail!("--delta-minimum must be a positive number");
        }
        if !(self.t_start.is_finite() && self.t_end.is_finite()) || self.t_end <= self.t_start {
            anyhow::bail!(
                "--t-end ({}) must be greater than --t-start ({})",
                self.t_end,
                self.t_start
            );
        }
        Ok(())
    }

    pub fn stepper_settings(&self) -> StepperSettings {
        StepperSettings {
            iterations: self.iterations,
            steps_per_frame: self.steps_per_frame,
            delta_per_step: self.delta_per_step,
            delta_minimum: self.delta_minimum,
            t_start: self.t_start,
            t_end: self.t_end,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.iterations.saturating_mul(self.steps_per_frame)
    }
}
