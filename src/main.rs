mod assessment;
mod audio;
mod cli;
mod config;
mod paths;
mod report;
mod session;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use console::style;

use crate::audio::tone::{Ear, ToneSynth};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = config::load_config()?;

    match cli.command {
        Command::Test { output, json } => {
            session::run_hearing_test(&config, output.as_deref(), json)
        }

        Command::Tone {
            frequency,
            ear,
            volume,
            duration,
        } => play_tone(&config, frequency, ear, volume, duration),

        Command::Devices => audio::devices::list_devices(),

        Command::Paths => {
            println!("Config:  {}", paths::config_file().display());
            println!("Reports: {}", paths::reports_dir().display());
            Ok(())
        }
    }
}

/// Play one tone for a fixed duration, then let the release ramp run out
/// before the stream is dropped.
fn play_tone(
    config: &config::AppConfig,
    frequency: f32,
    ear: Ear,
    volume: f32,
    duration: f32,
) -> Result<()> {
    if frequency <= 0.0 {
        anyhow::bail!("Frequency must be positive, got {frequency}");
    }
    if !(0.0..=2.0 * 3600.0).contains(&duration) {
        anyhow::bail!("Duration must be between 0 and 7200 seconds");
    }

    let synth = ToneSynth::new(&config.audio);
    if !synth.is_available() {
        anyhow::bail!("No usable stereo audio output device");
    }

    println!(
        "Playing {frequency} Hz in the {} ear for {duration:.1}s at volume {volume:.2}",
        style(ear.label()).cyan().bold()
    );

    synth.start_looping_tone(frequency, volume, ear);
    std::thread::sleep(std::time::Duration::from_secs_f32(duration));
    synth.stop_tone();

    // Give the de-click ramp time to reach silence before dropping the
    // stream.
    let release = std::time::Duration::from_millis(config.audio.ramp_ms.ceil() as u64 + 50);
    std::thread::sleep(release);

    Ok(())
}
