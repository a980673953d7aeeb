use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::{Report, eyre::eyre};
use glyphwave_core::MOBILE_BREAKPOINT;

#[derive(Parser, Debug)]
#[command(
    name = "glyphwave-preview",
    about = "Terminal previewer for the glyphwave background animation",
    long_about = "Runs the ASCII wave-field animation in the terminal, one terminal cell per glyph cell"
)]
pub struct Cli {
    /// Render profile; `auto` picks one from the terminal width and the breakpoint
    #[arg(short, long, value_enum, default_value_t = ProfileArg::Auto)]
    pub profile: ProfileArg,

    /// Frames per second to request from the animation
    #[arg(short, long, default_value = "30", value_name = "FPS")]
    pub fps: u32,

    /// Seed for the logo morph glyphs; random when omitted
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Quit after this many seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Nominal viewport width, in pixels, at or below which `auto` selects mobile
    #[arg(long, default_value_t = MOBILE_BREAKPOINT, value_name = "PIXELS")]
    pub breakpoint: f64,
}

/// Render profile selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Auto,
    Desktop,
    Mobile,
}

impl ProfileArg {
    /// Breakpoint that makes viewport classification yield this profile.
    pub fn breakpoint(self, configured: f64) -> f64 {
        match self {
            ProfileArg::Auto => configured,
            ProfileArg::Desktop => f64::NEG_INFINITY,
            ProfileArg::Mobile => f64::INFINITY,
        }
    }
}

impl Cli {
    /// Validates argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), Report> {
        if !(1..=240).contains(&self.fps) {
            return Err(eyre!("FPS must be between 1 and 240, got {}", self.fps));
        }

        if let Some(duration) = self.duration
            && (!duration.is_finite() || duration <= 0.0)
        {
            return Err(eyre!("Duration must be a positive number of seconds, got {duration}"));
        }

        if !self.breakpoint.is_finite() || self.breakpoint < 0.0 {
            return Err(eyre!("Breakpoint must be a non-negative width, got {}", self.breakpoint));
        }

        Ok(())
    }

    /// Interval between frame ticks.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Breakpoint used to classify terminal viewports.
    pub fn effective_breakpoint(&self) -> f64 {
        self.profile.breakpoint(self.breakpoint)
    }

    /// Run time limit, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.duration.map(Duration::from_secs_f64)
    }
}
