use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::audio::tone::Ear;

#[derive(Parser)]
#[command(name = "earcheck")]
#[command(about = "Self-administered hearing screening from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the guided hearing test
    Test {
        /// Write the markdown report to this path instead of the data dir
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also export raw results as JSON next to the report
        #[arg(long)]
        json: bool,
    },

    /// Play a single calibration tone in one ear
    Tone {
        /// Tone frequency in Hz
        #[arg(long, default_value_t = 1000.0)]
        frequency: f32,

        /// Which ear to play into
        #[arg(long, value_enum, default_value = "left")]
        ear: Ear,

        /// Volume, 0.0 to 1.0
        #[arg(long, default_value_t = 0.5)]
        volume: f32,

        /// Duration in seconds
        #[arg(long, default_value_t = 2.0)]
        duration: f32,
    },

    /// List available audio output devices
    Devices,

    /// Show where config and reports live
    Paths,
}
