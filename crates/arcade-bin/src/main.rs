// arcade: headless frame runner for the arcade toolkit.
//
// Renders into a command recorder and drives input from an optional script,
// so whole screen flows can be exercised without a window.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use arcade_audio::{MusicBackend, SilentMusicBackend, SilentSoundBackend, SoundBackend};
use arcade_bin::screens::BootScreen;
use arcade_bin::{HeadlessRunner, InputScript, Pacing};
use arcade_render::CommandRecorder;
use arcade_state::AppContext;
use arcade_types::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "arcade", about = "Headless runner for the arcade toolkit")]
struct Args {
    /// Path to the config JSON file.
    #[arg(long, default_value = "arcade.json", env = "ARCADE_CONFIG")]
    config: PathBuf,

    /// Stop after this many frames (overrides the config; 0 = until exit).
    #[arg(long)]
    frames: Option<u64>,

    /// JSON input script to replay.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Pace frames against the wall clock instead of stepping as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Write the effective config back to `--config` and exit.
    #[arg(long)]
    write_config: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

#[cfg(feature = "kira")]
fn audio_backends() -> (Box<dyn MusicBackend>, Box<dyn SoundBackend>) {
    use arcade_audio::{KiraMusicBackend, KiraSoundBackend};

    match (KiraMusicBackend::new(), KiraSoundBackend::new()) {
        (Ok(music), Ok(sound)) => {
            log::info!("audio output: kira");
            (Box::new(music), Box::new(sound))
        }
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("audio output unavailable, running silent: {e:#}");
            (
                Box::new(SilentMusicBackend::new()),
                Box::new(SilentSoundBackend::new()),
            )
        }
    }
}

#[cfg(not(feature = "kira"))]
fn audio_backends() -> (Box<dyn MusicBackend>, Box<dyn SoundBackend>) {
    log::info!("audio output: silent");
    (
        Box::new(SilentMusicBackend::new()),
        Box::new(SilentSoundBackend::new()),
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AppConfig::load_from(&args.config)?;
    log::info!("config: {}", args.config.display());

    if args.write_config {
        config.save_to(&args.config)?;
        log::info!("wrote {}", args.config.display());
        return Ok(());
    }

    let renderer = CommandRecorder::new(config.window_width, config.window_height);
    let (music, sounds) = audio_backends();
    let frame_ms = config.frame_ms.max(1);
    let mut ctx = AppContext::new(config, Box::new(renderer), music, sounds);
    ctx.load_font();
    ctx.load_sounds();
    ctx.start_playlist();

    let pacing = if args.realtime {
        Pacing::Realtime(frame_ms)
    } else {
        Pacing::Fixed(frame_ms)
    };
    let mut runner = HeadlessRunner::new(ctx, Box::new(BootScreen::new()), pacing);
    if let Some(path) = &args.script {
        runner = runner.with_script(InputScript::load_from(path)?);
    }
    if let Some(frames) = args.frames {
        runner = runner.with_max_frames(frames);
    }

    let summary = runner.run()?;
    log::info!(
        "run finished: {} frames, {} ms simulated, {}",
        summary.frames,
        summary.elapsed_ms,
        if summary.exited { "exited" } else { "frame limit" }
    );
    Ok(())
}
