use anyhow::{Result, anyhow, bail};
use clap::Parser;
use slotflash_lib::{ExecMode, Manifest, ReflashParams, Slot};
use std::path::PathBuf;

use crate::config::SlotflashConfig;

pub const USAGE: &str = "USAGE: slotflash [OPTIONS] [image_dir]";

#[derive(Parser, Debug)]
#[command(author, version, about = "Reflash an A/B device through fastboot", long_about = None)]
pub struct Cli {
    /// Directory holding the partition images (default: current directory)
    pub image_dir: Option<PathBuf>,

    /// JSON configuration file path
    #[arg(long = "config", short = 'f')]
    pub config: Option<String>,

    /// Slot to flash (default: b)
    #[arg(short = 's', long = "slot", value_enum)]
    pub slot: Option<Slot>,

    /// Wipe user data after flashing and erasing
    #[arg(short = 'w', long = "wipe-data")]
    pub wipe_data: bool,

    /// Print the fastboot commands instead of running them
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Proceed without asking when images are missing
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// fastboot program to run (default: fastboot)
    #[arg(long = "fastboot")]
    pub fastboot: Option<String>,

    /// Suppress status lines (default: false)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Settings after merging the command line over the config file
#[derive(Debug)]
pub struct MergedConfig {
    pub image_dir: Option<PathBuf>,
    pub manifest: Manifest,
    pub params: ReflashParams,
    pub mode: ExecMode,
    pub fastboot: String,
    pub assume_yes: bool,
    pub quiet: bool,
}

/// Merge CLI arguments with configuration file, CLI args take precedence
pub fn merge_config(args: &Cli, config: Option<SlotflashConfig>) -> Result<MergedConfig> {
    let base_config = config.unwrap_or_else(SlotflashConfig::with_defaults);

    let slot = match args.slot {
        Some(slot) => slot,
        None => base_config
            .parse_slot()
            .map_err(|e| anyhow!("Invalid slot in config: {}", e))?,
    };

    let manifest = base_config
        .manifest()
        .map_err(|e| anyhow!("Invalid manifest in config: {}", e))?;

    let fastboot = args
        .fastboot
        .clone()
        .unwrap_or_else(|| base_config.fastboot.clone());
    if fastboot.trim().is_empty() {
        bail!("fastboot program must not be empty");
    }

    let image_dir = args
        .image_dir
        .clone()
        .or_else(|| base_config.image_dir.as_ref().map(PathBuf::from));

    let mode = if args.dry_run || base_config.dry_run {
        ExecMode::DryRun
    } else {
        ExecMode::Live
    };

    Ok(MergedConfig {
        image_dir,
        manifest,
        params: ReflashParams {
            slot,
            wipe_data: args.wipe_data || base_config.wipe_data,
        },
        mode,
        fastboot,
        assume_yes: args.yes || base_config.yes,
        quiet: args.quiet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("slotflash").chain(args.iter().copied())).unwrap()
    }

    fn config(json: &str) -> SlotflashConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_without_config() {
        let merged = merge_config(&parse(&[]), None).unwrap();
        assert_eq!(merged.params.slot, Slot::B);
        assert!(!merged.params.wipe_data);
        assert_eq!(merged.mode, ExecMode::Live);
        assert_eq!(merged.fastboot, "fastboot");
        assert!(merged.image_dir.is_none());
        assert_eq!(merged.manifest, Manifest::default());
    }

    #[test]
    fn rejects_more_than_one_directory() {
        assert!(Cli::try_parse_from(["slotflash", "a", "b"]).is_err());
    }

    #[test]
    fn cli_overrides_config() {
        let cfg = config(r#"{"slot": "a", "image_dir": "/from/config", "fastboot": "/opt/fastboot"}"#);
        let merged = merge_config(&parse(&["--slot", "b", "/from/cli"]), Some(cfg)).unwrap();
        assert_eq!(merged.params.slot, Slot::B);
        assert_eq!(merged.image_dir, Some(PathBuf::from("/from/cli")));
        assert_eq!(merged.fastboot, "/opt/fastboot");
    }

    #[test]
    fn config_flags_are_honoured() {
        let cfg = config(r#"{"wipe_data": true, "dry_run": true, "yes": true}"#);
        let merged = merge_config(&parse(&[]), Some(cfg)).unwrap();
        assert!(merged.params.wipe_data);
        assert!(merged.assume_yes);
        assert_eq!(merged.mode, ExecMode::DryRun);
    }

    #[test]
    fn config_manifest_override() {
        let cfg = config(r#"{"partitions": ["boot", "system"]}"#);
        let merged = merge_config(&parse(&["-n"]), Some(cfg)).unwrap();
        assert_eq!(merged.manifest.partitions(), ["boot", "system"]);
        assert_eq!(merged.manifest.erase().len(), 6);
    }

    #[test]
    fn invalid_config_is_reported() {
        let cfg = config(r#"{"slot": "c"}"#);
        assert!(cfg.validate().is_err());
        assert!(merge_config(&parse(&[]), Some(cfg)).is_err());

        let cfg = config(r#"{"erase": ["misc", "misc"]}"#);
        assert!(cfg.validate().is_err());
    }
}
