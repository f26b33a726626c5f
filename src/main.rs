//! Application entry point — reading-aloud loudness coach.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse command-line arguments.
//! 3. Load [`AppConfig`] from disk (returns default on first run) and apply
//!    command-line overrides.
//! 4. With a FILE argument: analyse it once and print the result.
//! 5. Otherwise: start the cpal capture stream, run a live session on a
//!    tokio runtime and print readouts until Ctrl-C.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use voice_level_coach::{
    audio::{AudioCapture, AudioFrame},
    config::AppConfig,
    feedback::{compose, readout, target_percent, Verdict},
    session::{analyze_upload, run_live, AnalysisWarning, LiveSession, TickReport},
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "voice-level-coach", version, about = "Coach readers to speak up")]
struct Cli {
    /// WAV file to analyse.  Listens to the default microphone when omitted.
    file: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Target loudness in dBFS.
    #[arg(long, allow_negative_numbers = true)]
    target_dbfs: Option<f32>,

    /// Seconds the target must be held before praise.
    #[arg(long)]
    hold_secs: Option<f32>,

    /// Smoothing factor for live capture, in (0, 1].
    #[arg(long)]
    alpha: Option<f32>,

    /// Name used in feedback messages.
    #[arg(long)]
    name: Option<String>,

    /// Emit one JSON object per report instead of text.
    #[arg(long)]
    json: bool,

    /// In live mode, print a readout every N frames (verdict changes are
    /// always printed).
    #[arg(long, default_value_t = 10, value_name = "N")]
    every: u64,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(target) = self.target_dbfs {
            config.detector.target_dbfs = target;
        }
        if let Some(hold) = self.hold_secs {
            config.detector.hold_secs = hold;
        }
        if let Some(alpha) = self.alpha {
            config.detector.smoothing_alpha = alpha;
        }
        if let Some(name) = &self.name {
            config.feedback.student_name = name.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// File mode
// ---------------------------------------------------------------------------

fn analyse_file(path: &Path, config: &AppConfig, json: bool) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let report = analyze_upload(&bytes, &config.detector, std::time::Instant::now())
        .with_context(|| format!("analysing {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    if report.warning == Some(AnalysisWarning::EmptyInput) {
        println!("(file contains no audio)");
    }
    println!(
        "{}  |  {:.2} s @ {} Hz",
        readout(&report.measurement, config.detector.target_dbfs),
        report.duration.as_secs_f32(),
        report.sample_rate
    );
    println!(
        "Meter: {:>3}% (target at {}%)  {}",
        report.meter.percent,
        target_percent(config.detector.target_dbfs),
        report.meter.band.label()
    );
    println!("{}", compose(&config.feedback, report.verdict));
    Ok(())
}

// ---------------------------------------------------------------------------
// Live mode
// ---------------------------------------------------------------------------

fn print_tick(tick: &TickReport, config: &AppConfig) {
    println!(
        "{}  |  meter {:>3}% {}",
        readout(&tick.smoothed, config.detector.target_dbfs),
        tick.meter.percent,
        tick.meter.band.label()
    );
}

fn run_microphone(config: AppConfig, json: bool, every: u64) -> Result<()> {
    // Two workers: one for the session task, one for the printer.
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let session = LiveSession::new(&config.detector)?;

    let (frame_tx, frame_rx) = mpsc::unbounded_channel::<AudioFrame>();
    let (report_tx, mut report_rx) = mpsc::channel::<TickReport>(256);

    let capture = AudioCapture::new().context("audio capture unavailable")?;
    let stream = capture.start(frame_tx)?;
    log::info!(
        "Audio capture started ({} Hz, {} ch)",
        capture.sample_rate(),
        capture.channels()
    );

    let session_task = rt.spawn(run_live(session, frame_rx, report_tx));
    let every = every.max(1);

    let printed = rt.block_on(async {
        let mut last_verdict: Option<Verdict> = None;
        let mut ticks: u64 = 0;
        loop {
            tokio::select! {
                maybe_tick = report_rx.recv() => {
                    let Some(tick) = maybe_tick else { break };
                    ticks += 1;
                    let changed = last_verdict != Some(tick.verdict);
                    last_verdict = Some(tick.verdict);

                    if json {
                        println!("{}", serde_json::to_string(&tick)?);
                        continue;
                    }
                    if changed || ticks % every == 0 {
                        print_tick(&tick, &config);
                    }
                    if changed {
                        println!("{}", compose(&config.feedback, tick.verdict));
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Ctrl-C received; stopping capture");
                    break;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    });

    // Dropping the stream closes the frame channel, which ends the session.
    drop(stream);
    drop(report_rx);
    if let Err(e) = rt.block_on(session_task) {
        log::warn!("live session task failed: {e}");
    }
    printed
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Arguments
    let cli = Cli::parse();

    // 3. Configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    cli.apply(&mut config);
    config.detector.validate()?;
    if !config.detector.is_within_recommended() {
        log::warn!(
            "target {} dBFS / hold {} s is outside the recommended range",
            config.detector.target_dbfs,
            config.detector.hold_secs
        );
    }

    if cli.save {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        log::info!("Settings saved");
    }

    // 4/5. Run
    match &cli.file {
        Some(path) => analyse_file(path, &config, cli.json),
        None => run_microphone(config, cli.json, cli.every),
    }
}
