//! Headless runner for the hero particle field
//!
//! Runs the field against a recording surface and logs what each frame
//! draws. Handy for checking a config before shipping it to the page.
//!
//! Run with: cargo run --features cli --bin hero-field-cli -- --frames 600

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hero_field::core::{Animator, FieldConfig, FrameStats, RecordingSurface};
use hero_field::time::now_seconds;

/// Nominal frame interval of a 60 Hz display, in milliseconds
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "hero-field-cli", about = "Run the hero particle field headless")]
struct Args {
    /// Surface width in CSS pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    /// Surface height in CSS pixels
    #[arg(long, default_value_t = 640.0)]
    height: f64,
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// RNG seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,
    /// JSON field config
    #[arg(long, env = "HERO_FIELD_CONFIG")]
    config: Option<PathBuf>,
    /// Hold the pointer at "x,y" for the whole run
    #[arg(long)]
    pointer: Option<PointerPos>,
    /// Log stats every N frames
    #[arg(long, default_value_t = 120)]
    stats_every: u64,
}

#[derive(Clone, Copy, Debug)]
struct PointerPos {
    x: f64,
    y: f64,
}

impl FromStr for PointerPos {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
        };
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hero_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match &args.config {
        Some(path) => FieldConfig::from_path(path)?,
        None => FieldConfig::default(),
    };

    let mut animator = match args.seed {
        Some(seed) => Animator::with_seed(config, args.width, args.height, seed),
        None => Animator::new(config, args.width, args.height),
    };
    if let Some(pointer) = args.pointer {
        info!(x = pointer.x, y = pointer.y, "Pointer held over field");
        animator.pointer_moved(pointer.x, pointer.y);
    }

    let mut surface = RecordingSurface::new();
    let started = now_seconds();
    let mut rendered = 0u64;

    while rendered < args.frames {
        let chunk = args.stats_every.max(1).min(args.frames - rendered);
        let mut ticks = (rendered..rendered + chunk).map(|i| i as f64 * FRAME_MS);

        // Only the latest frame is inspected
        surface.reset();
        let done = animator.run(&mut ticks, &mut surface);
        if done == 0 {
            break;
        }
        rendered += done;

        let stats = FrameStats::collect(surface.last_frame(), animator.field());
        info!(
            frame = rendered,
            lines = stats.lines,
            dots = stats.dots,
            glowing = stats.glowing,
            outside = stats.outside,
            max_line_alpha = format!("{:.3}", stats.max_line_alpha),
            "stats"
        );
    }

    animator.stop();
    let elapsed = now_seconds() - started;
    info!(
        frames = rendered,
        elapsed_ms = format!("{:.1}", elapsed * 1000.0),
        "Run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer() {
        let p: PointerPos = "12.5, 40".parse().expect("valid pointer");
        assert_eq!((p.x, p.y), (12.5, 40.0));
        assert!("12.5".parse::<PointerPos>().is_err());
        assert!("a,b".parse::<PointerPos>().is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["hero-field-cli"]);
        assert_eq!(args.frames, 600);
        assert_eq!(args.stats_every, 120);
        assert!(args.seed.is_none());
    }
}
