// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scenes::Showcase;

#[derive(Parser, Debug, Clone)]
#[command(name = "holo-scenes")]
#[command(about = "Animated holographic scenes", long_about = None)]
pub struct Cli {
    /// Scene to show (falls back to HOLO_SHOWCASE, then holodeck)
    #[arg(long, value_enum)]
    pub showcase: Option<Showcase>,

    /// Seed for the procedural layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Step the animation without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Write a JSON snapshot of the scene after headless frames
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Hide the egui overlay (FPS and scene stats); logging is unaffected
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_run() {
        let cli = Cli::parse_from([
            "holo-scenes",
            "--showcase",
            "constellation",
            "--seed",
            "42",
            "--headless",
            "--frames",
            "10",
            "--snapshot",
            "out.json",
        ]);
        assert_eq!(cli.showcase, Some(Showcase::Constellation));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.headless);
        assert_eq!(cli.frames, 10);
        assert_eq!(cli.snapshot, Some(PathBuf::from("out.json")));
        assert!(!cli.no_ui);
    }

    #[test]
    fn no_ui_only_toggles_overlay_flag() {
        let cli = Cli::parse_from(["holo-scenes", "--no-ui"]);
        assert!(cli.no_ui);
        assert!(!cli.headless);
        assert_eq!(cli.snapshot, None);
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["holo-scenes"]);
        assert_eq!(cli.showcase, None);
        assert_eq!(cli.frames, 600);
        assert!(!cli.headless);
    }
}
