use std::path::PathBuf;

use clap::Parser;

use crate::signal::HitPolicy;
use crate::theme::Theme;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[arg(long, value_enum, default_value_t = Theme::Dark, help = "Theme to start with.")]
    theme: Theme,

    #[arg(long, help = "Seed for signal target selection; defaults to the clock.")]
    seed: Option<u64>,

    #[arg(long, help = "Skip the boot sequence.")]
    skip_boot: bool,

    #[arg(long, help = "Load portfolio content from this JSON file instead of the built-in one.")]
    content: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory the resume is written to.")]
    download_dir: PathBuf,

    #[arg(long, help = "Keep a target lit until every overlapping hit on it has expired.")]
    refcount_hits: bool,

    #[arg(long, help = "Start with signal particles disabled.")]
    no_signals: bool,

    #[arg(long, help = "Show a frame-rate readout in the top bar.")]
    show_fps: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub theme: Theme,
    pub seed: Option<u64>,
    pub skip_boot: bool,
    pub content_path: Option<PathBuf>,
    pub download_dir: PathBuf,
    pub hit_policy: HitPolicy,
    pub signals_enabled: bool,
    pub show_fps: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            theme: args.theme,
            seed: args.seed,
            skip_boot: args.skip_boot,
            content_path: args.content,
            download_dir: args.download_dir,
            hit_policy: if args.refcount_hits {
                HitPolicy::RefCounted
            } else {
                HitPolicy::Independent
            },
            signals_enabled: !args.no_signals,
            show_fps: args.show_fps,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from(Args::parse_from(["silicon-folio"]))
    }
}
