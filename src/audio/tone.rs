use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use log::warn;

use crate::config::AudioConfig;

/// Which ear a tone is routed to. The untested ear always receives exact
/// digital silence — attenuated bleed-through would invalidate the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    pub fn label(self) -> &'static str {
        match self {
            Ear::Left => "left",
            Ear::Right => "right",
        }
    }
}

/// Desired tone parameters, shared between the control thread and the audio
/// callback. Frequency and ear are packed into one atomic so the callback
/// always reads a consistent pair; gain rides in its own atomic since it
/// changes independently (volume adjustments).
struct ToneTarget {
    tone: AtomicU64,
    gain: AtomicU32,
}

const EAR_RIGHT_BIT: u64 = 1;

impl ToneTarget {
    fn new() -> Self {
        Self {
            tone: AtomicU64::new(pack_tone(0.0, Ear::Left)),
            gain: AtomicU32::new(0.0_f32.to_bits()),
        }
    }

    fn set_tone(&self, frequency: f32, ear: Ear) {
        self.tone.store(pack_tone(frequency, ear), Ordering::Relaxed);
    }

    fn set_gain(&self, gain: f32) {
        self.gain.store(gain.to_bits(), Ordering::Relaxed);
    }

    fn tone(&self) -> (f32, Ear) {
        unpack_tone(self.tone.load(Ordering::Relaxed))
    }

    fn gain(&self) -> f32 {
        f32::from_bits(self.gain.load(Ordering::Relaxed))
    }
}

fn pack_tone(frequency: f32, ear: Ear) -> u64 {
    let ear_bit = match ear {
        Ear::Left => 0,
        Ear::Right => EAR_RIGHT_BIT,
    };
    ((frequency.to_bits() as u64) << 32) | ear_bit
}

fn unpack_tone(packed: u64) -> (f32, Ear) {
    let frequency = f32::from_bits((packed >> 32) as u32);
    let ear = if packed & EAR_RIGHT_BIT == 0 {
        Ear::Left
    } else {
        Ear::Right
    };
    (frequency, ear)
}

/// The sample-rendering state machine behind the output callback.
///
/// Holds the currently sounding tone (frequency, ear, smoothed gain, phase)
/// and chases the desired parameters: gain moves toward its target by a
/// fixed per-sample ramp step, and a frequency or ear change first ramps the
/// old tone down to zero before the new parameters take effect. Both tone
/// onset/offset and retuning are therefore free of level discontinuities.
///
/// Pure apart from the buffer it writes into, so the de-click and
/// channel-isolation contracts are testable without audio hardware.
pub(crate) struct ToneRenderer {
    sample_rate: f32,
    channels: usize,
    ramp_step: f32,
    phase: f32,
    gain: f32,
    frequency: f32,
    ear: Ear,
}

impl ToneRenderer {
    pub(crate) fn new(sample_rate: u32, channels: usize, ramp_ms: f32) -> Self {
        let ramp_samples = (ramp_ms / 1000.0 * sample_rate as f32).max(1.0);
        Self {
            sample_rate: sample_rate as f32,
            channels,
            ramp_step: 1.0 / ramp_samples,
            phase: 0.0,
            gain: 0.0,
            frequency: 0.0,
            ear: Ear::Left,
        }
    }

    /// Fill an interleaved output buffer, steering the active tone toward
    /// the desired parameters.
    pub(crate) fn fill(
        &mut self,
        buffer: &mut [f32],
        desired_frequency: f32,
        desired_ear: Ear,
        desired_gain: f32,
    ) {
        for frame in buffer.chunks_mut(self.channels) {
            let retuning =
                self.frequency != desired_frequency || self.ear != desired_ear;

            if retuning && self.gain <= 0.0 {
                self.frequency = desired_frequency;
                self.ear = desired_ear;
            }

            // While retuning, the old tone's target is silence; the new
            // tone is adopted only once the gain has passed through zero.
            let target = if self.frequency != desired_frequency || self.ear != desired_ear {
                0.0
            } else {
                desired_gain
            };

            if self.gain < target {
                self.gain = (self.gain + self.ramp_step).min(target);
            } else if self.gain > target {
                self.gain = (self.gain - self.ramp_step).max(target);
            }

            let sample = (self.phase * std::f32::consts::TAU).sin() * self.gain;
            self.phase += self.frequency / self.sample_rate;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }

            for slot in frame.iter_mut() {
                *slot = 0.0;
            }
            let channel = match self.ear {
                Ear::Left => 0,
                Ear::Right => 1,
            };
            if channel < frame.len() {
                frame[channel] = sample;
            }
        }
    }

    #[cfg(test)]
    fn current_gain(&self) -> f32 {
        self.gain
    }

    #[cfg(test)]
    fn active_frequency(&self) -> f32 {
        self.frequency
    }
}

/// Single-channel test-tone synthesizer.
///
/// The output stream is acquired once on construction and released when the
/// synthesizer is dropped. All control calls store target parameters and
/// return immediately; the audio callback applies them with short gain
/// ramps. When no usable stereo output exists the synthesizer logs a
/// warning and degrades to a silent no-op — the screening must remain
/// completable without sound.
pub struct ToneSynth {
    // RAII guard: dropping the stream stops audio rendering.
    stream: Option<cpal::Stream>,
    target: Arc<ToneTarget>,
}

impl ToneSynth {
    pub fn new(config: &AudioConfig) -> Self {
        let target = Arc::new(ToneTarget::new());
        let stream = match open_output_stream(Arc::clone(&target), config.ramp_ms) {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!("audio output unavailable, tones disabled: {e:#}");
                None
            }
        };
        Self { stream, target }
    }

    /// Whether a real output stream is running.
    pub fn is_available(&self) -> bool {
        self.stream.is_some()
    }

    /// Begin continuous playback of a tone. Safe to call while a tone is
    /// already sounding: the old tone ramps through zero before the new one
    /// starts, so rapid restarts never click.
    pub fn start_looping_tone(&self, frequency: f32, amplitude: f32, ear: Ear) {
        if !frequency.is_finite() || frequency <= 0.0 {
            warn!("ignoring tone with non-positive frequency {frequency}");
            return;
        }
        self.target.set_tone(frequency, ear);
        self.target.set_gain(amplitude.clamp(0.0, 1.0));
    }

    /// Adjust the running tone's amplitude, ramped. Out-of-range input is
    /// clamped rather than rejected.
    pub fn set_volume(&self, amplitude: f32) {
        self.target.set_gain(amplitude.clamp(0.0, 1.0));
    }

    /// Ramp the tone down to silence. No-op when nothing is playing.
    pub fn stop_tone(&self) {
        self.target.set_gain(0.0);
    }
}

impl Drop for ToneSynth {
    fn drop(&mut self) {
        // Ask for silence before the stream goes away; effective even
        // mid-ramp.
        self.stop_tone();
        self.stream.take();
    }
}

fn open_output_stream(target: Arc<ToneTarget>, ramp_ms: f32) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device found")?;

    let config = device
        .default_output_config()
        .context("failed to get default output config")?;

    let channels = config.channels() as usize;
    if channels < 2 {
        anyhow::bail!("default output device is mono; per-ear routing needs stereo");
    }

    let sample_rate = config.sample_rate().0;
    let format = config.sample_format();
    let mut renderer = ToneRenderer::new(sample_rate, channels, ramp_ms);

    let stream = match format {
        SampleFormat::F32 => device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let (frequency, ear) = target.tone();
                let gain = target.gain();
                renderer.fill(data, frequency, ear, gain);
            },
            |err| warn!("audio output stream error: {err}"),
            None,
        )?,
        SampleFormat::I16 => {
            let mut scratch: Vec<f32> = Vec::new();
            device.build_output_stream(
                &config.into(),
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    scratch.resize(data.len(), 0.0);
                    let (frequency, ear) = target.tone();
                    let gain = target.gain();
                    renderer.fill(&mut scratch, frequency, ear, gain);
                    for (out, &s) in data.iter_mut().zip(scratch.iter()) {
                        *out = (s * i16::MAX as f32) as i16;
                    }
                },
                |err| warn!("audio output stream error: {err}"),
                None,
            )?
        }
        other => anyhow::bail!("unsupported output sample format: {other:?}"),
    };

    stream.play().context("failed to start audio output stream")?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 48_000;
    const RAMP_MS: f32 = 10.0;

    fn renderer() -> ToneRenderer {
        ToneRenderer::new(SAMPLE_RATE, 2, RAMP_MS)
    }

    /// Fill enough frames for several full ramps.
    fn settle(r: &mut ToneRenderer, frequency: f32, ear: Ear, gain: f32) {
        let mut buf = vec![0.0; 2 * SAMPLE_RATE as usize / 10];
        r.fill(&mut buf, frequency, ear, gain);
    }

    #[test]
    fn left_tone_leaves_right_channel_silent() {
        let mut r = renderer();
        let mut buf = vec![0.0; 4096];
        r.fill(&mut buf, 1000.0, Ear::Left, 0.8);

        assert!(buf.iter().skip(1).step_by(2).all(|&s| s == 0.0));
        assert!(buf.iter().step_by(2).any(|&s| s != 0.0));
    }

    #[test]
    fn right_tone_leaves_left_channel_silent() {
        let mut r = renderer();
        let mut buf = vec![0.0; 4096];
        r.fill(&mut buf, 1000.0, Ear::Right, 0.8);

        assert!(buf.iter().step_by(2).all(|&s| s == 0.0));
        assert!(buf.iter().skip(1).step_by(2).any(|&s| s != 0.0));
    }

    #[test]
    fn onset_gain_ramps_instead_of_jumping() {
        let mut r = renderer();
        let mut last_gain = 0.0;
        let ramp_step = 1.0 / (RAMP_MS / 1000.0 * SAMPLE_RATE as f32);

        for _ in 0..2000 {
            let mut frame = [0.0; 2];
            r.fill(&mut frame, 440.0, Ear::Left, 1.0);
            let gain = r.current_gain();
            assert!(gain >= last_gain);
            assert!(gain - last_gain <= ramp_step + 1e-6);
            last_gain = gain;
        }
        assert!((last_gain - 1.0).abs() < 1e-6);
    }

    #[test]
    fn stop_ramps_down_to_exact_silence() {
        let mut r = renderer();
        settle(&mut r, 440.0, Ear::Left, 0.7);
        assert!((r.current_gain() - 0.7).abs() < 1e-6);

        settle(&mut r, 440.0, Ear::Left, 0.0);
        assert_eq!(r.current_gain(), 0.0);

        let mut buf = vec![1.0; 256];
        r.fill(&mut buf, 440.0, Ear::Left, 0.0);
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn retune_passes_through_zero_before_switching() {
        let mut r = renderer();
        settle(&mut r, 440.0, Ear::Left, 0.9);
        assert_eq!(r.active_frequency(), 440.0);

        // Ask for a different tone and step frame by frame: the old
        // frequency must stay active until the gain has ramped to zero.
        let ramp_step = 1.0 / (RAMP_MS / 1000.0 * SAMPLE_RATE as f32);
        let mut switched = false;
        for _ in 0..4000 {
            let before = r.active_frequency();
            let mut frame = [0.0; 2];
            r.fill(&mut frame, 880.0, Ear::Right, 0.9);
            if !switched && before == 440.0 && r.active_frequency() != 440.0 {
                // Handoff frame: the new tone starts from silence.
                assert!(r.current_gain() <= ramp_step + 1e-6);
                switched = true;
            }
        }
        assert!(switched);
        assert_eq!(r.active_frequency(), 880.0);

        settle(&mut r, 880.0, Ear::Right, 0.9);
        assert!((r.current_gain() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn volume_change_mid_ramp_retargets() {
        let mut r = renderer();
        let mut frame = [0.0; 2];
        for _ in 0..50 {
            r.fill(&mut frame, 440.0, Ear::Left, 1.0);
        }
        let mid = r.current_gain();
        assert!(mid > 0.0 && mid < 1.0);

        // Retarget downward before the upward ramp finishes.
        settle(&mut r, 440.0, Ear::Left, 0.2);
        assert!((r.current_gain() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn four_channel_device_only_uses_front_pair() {
        let mut r = ToneRenderer::new(SAMPLE_RATE, 4, RAMP_MS);
        let mut buf = vec![0.0; 4096];
        r.fill(&mut buf, 1000.0, Ear::Right, 0.8);

        for frame in buf.chunks(4) {
            assert_eq!(frame[0], 0.0);
            assert_eq!(frame[2], 0.0);
            assert_eq!(frame[3], 0.0);
        }
        assert!(buf.chunks(4).any(|f| f[1] != 0.0));
    }

    #[test]
    fn tone_target_packs_frequency_and_ear_together() {
        let target = ToneTarget::new();
        target.set_tone(4000.0, Ear::Right);
        assert_eq!(target.tone(), (4000.0, Ear::Right));

        target.set_tone(250.0, Ear::Left);
        assert_eq!(target.tone(), (250.0, Ear::Left));
    }

    #[test]
    fn tone_target_gain_roundtrip() {
        let target = ToneTarget::new();
        target.set_gain(0.35);
        assert_eq!(target.gain(), 0.35);
    }
}
