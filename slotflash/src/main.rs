mod cli;
mod config;
mod progress;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use slotflash_lib::{
    AssumeYes, Confirm, Error, ExecMode, ImageDir, PromptConfirm, Reflasher, create_executor,
};
use std::process;

use crate::cli::{Cli, USAGE, merge_config};
use crate::config::SlotflashConfig;
use crate::progress::create_progress_callback;

const EXIT_FAILURE: i32 = 1;

/// Exit code for a rejected command line; clap's own code 2 becomes 1.
/// `--help` and `--version` also end up here and exit 0.
fn parse_error_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() { EXIT_FAILURE } else { 0 }
}

/// Lines printed on stderr when a run fails
fn failure_lines(e: &anyhow::Error) -> Vec<String> {
    match e.downcast_ref::<Error>() {
        Some(err @ Error::NotADirectory(_)) => vec![err.to_string(), USAGE.to_string()],
        Some(err @ Error::MissingImage(_)) => vec![err.to_string()],
        _ => vec![format!("Error: {:#}", e)],
    }
}

fn run(args: Cli) -> Result<()> {
    let config = match &args.config {
        Some(config_path) => {
            let config = SlotflashConfig::from_file(config_path)
                .map_err(|e| anyhow!("Failed to load config file '{}': {}", config_path, e))?;
            config
                .validate()
                .map_err(|e| anyhow!("Invalid config file '{}': {}", config_path, e))?;
            Some(config)
        }
        None => None,
    };

    let merged = merge_config(&args, config)?;

    let image_dir = match ImageDir::resolve(merged.image_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e @ Error::NotADirectory(_)) => return Err(e.into()),
        Err(e) => return Err(e).context("Failed to resolve image directory"),
    };
    tracing::info!("using images from {}", image_dir);

    let dry_run = merged.mode == ExecMode::DryRun;
    let executor = create_executor(merged.mode, &merged.fastboot);
    let progress = create_progress_callback(dry_run, merged.quiet);
    let mut reflasher = Reflasher::new(merged.manifest, merged.params, executor, progress);

    let mut confirm: Box<dyn Confirm> = if merged.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::stdio())
    };

    let report = reflasher.run(&image_dir, confirm.as_mut())?;
    tracing::debug!(?report, "done");
    Ok(())
}

fn main() {
    // Log level can be controlled by setting the RUST_LOG environment variable, e.g.:
    // RUST_LOG=debug, RUST_LOG=slotflash_lib=trace, RUST_LOG=info
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = parse_error_exit_code(&e);
            if code != 0 {
                eprintln!("{}", USAGE);
            }
            process::exit(code);
        }
    };

    if let Err(e) = run(args) {
        for line in failure_lines(&e) {
            eprintln!("{}", line);
        }
        process::exit(EXIT_FAILURE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn usage_errors_exit_with_one() {
        let err = Cli::try_parse_from(["slotflash", "one", "two"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 1);

        let err = Cli::try_parse_from(["slotflash", "--slot", "c"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 1);
    }

    #[test]
    fn help_and_version_exit_with_zero() {
        let err = Cli::try_parse_from(["slotflash", "--help"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 0);

        let err = Cli::try_parse_from(["slotflash", "--version"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 0);
    }

    #[test]
    fn invalid_directory_prints_message_then_usage() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let args = Cli::try_parse_from([
            std::ffi::OsStr::new("slotflash"),
            std::ffi::OsStr::new("--dry-run"),
            missing.as_os_str(),
        ])
        .unwrap();

        let err = run(args).unwrap_err();
        assert_eq!(
            failure_lines(&err),
            vec![
                format!("'{}' is not a valid directory!", missing.display()),
                USAGE.to_string(),
            ]
        );
    }

    #[test]
    fn declined_image_has_no_error_prefix() {
        let err = anyhow::Error::from(Error::MissingImage("boot.img".to_string()));
        assert_eq!(
            failure_lines(&err),
            vec!["Aborting because of missing file 'boot.img'"]
        );
    }

    #[test]
    fn other_failures_are_prefixed() {
        let err = anyhow!("Invalid slot in config: c");
        assert_eq!(failure_lines(&err), vec!["Error: Invalid slot in config: c"]);
    }
}
