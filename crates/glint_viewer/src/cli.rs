use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::controls::KeyPress;

/// Log levels selectable from the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Progressive sphere path tracer")]
pub struct Args {
    /// Output width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Number of frames to accumulate
    #[arg(short, long, default_value_t = 64)]
    pub frames: u32,

    /// Trace one pixel per SCALE x SCALE block (overrides the config file)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Bounce depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Sampling seed (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON render configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Camera translation per key press
    #[arg(long, default_value_t = 0.03)]
    pub speed: f64,

    /// Key press replayed before a frame, as FRAME:KEY with KEY one of w a s d q e
    #[arg(short, long = "key", value_name = "FRAME:KEY")]
    pub keys: Vec<KeyPress>,

    /// Output PNG path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
