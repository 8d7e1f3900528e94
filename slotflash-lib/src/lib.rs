pub mod command;
pub mod confirm;
pub mod erase;
pub mod error;
pub mod exec;
pub mod flash;
pub mod images;
pub mod manifest;
pub mod progress;
pub mod validate;
pub mod wipe;

pub use command::FastbootCommand;
pub use confirm::{AssumeYes, Confirm, PromptConfirm};
pub use erase::ErasePartitions;
pub use error::{Error, Result};
pub use exec::{
    CommandExecutor, DryRunExecutor, ExecMode, ProcessExecutor, RecordingExecutor,
    create_executor,
};
pub use flash::FlashPartitions;
pub use images::{ImageDir, ImageFile, ImageSet};
pub use manifest::{ERASE_PARTITIONS, Manifest, PARTITION_NAMES, image_name};
pub use progress::{ProgressCallback, ProgressCallbackArc, no_op_progress_callback};
pub use wipe::WipeData;

use progress::ProgressHelper;
use strum::{Display, EnumString};

/// One of the two redundant partition sets of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Slot {
    #[strum(serialize = "a")]
    A,
    #[default]
    #[strum(serialize = "b")]
    B,
}

impl Slot {
    pub fn suffix(&self) -> &'static str {
        match self {
            Slot::A => "a",
            Slot::B => "b",
        }
    }

    /// Slot-qualified partition name, e.g. `boot_b`.
    pub fn target(&self, partition: &str) -> String {
        format!("{}_{}", partition, self.suffix())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReflashParams {
    pub slot: Slot,
    pub wipe_data: bool,
}

/// Outcome of a completed [`Reflasher::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflashReport {
    pub unused: Vec<String>,
    pub acknowledged_missing: Vec<String>,
    pub flashed: usize,
    pub erased: usize,
    pub wiped: bool,
}

pub struct Reflasher {
    manifest: Manifest,
    params: ReflashParams,
    executor: Box<dyn CommandExecutor>,
    progress: ProgressHelper,
}

impl Reflasher {
    pub fn new(
        manifest: Manifest,
        params: ReflashParams,
        executor: Box<dyn CommandExecutor>,
        progress: ProgressCallbackArc,
    ) -> Self {
        Self {
            manifest,
            params,
            executor,
            progress: ProgressHelper::new(progress, 0),
        }
    }

    /// Validate the image directory and, if the operator lets it through,
    /// flash every manifest partition, erase the erase list and optionally
    /// wipe user data.
    ///
    /// No command is issued when a missing image is declined.
    pub fn run(&mut self, dir: &ImageDir, confirm: &mut dyn Confirm) -> Result<ReflashReport> {
        let images = ImageSet::collect(dir)?;
        tracing::info!("collected {} file(s) from {}", images.len(), dir);

        let unused: Vec<String> = validate::unused_files(&images, &self.manifest)
            .into_iter()
            .map(|file| file.name.clone())
            .collect();
        for name in unused.iter() {
            self.progress.warn(format!("Unused file detected: {}", name));
        }

        let acknowledged_missing =
            validate::check_missing_images(&images, &self.manifest, confirm)?;

        let flashed = self.flash_partitions(&images)?;
        let erased = self.erase_partitions()?;
        let wiped = if self.params.wipe_data {
            self.wipe_data()?;
            true
        } else {
            false
        };

        tracing::info!(flashed, erased, wiped, "reflash finished");
        Ok(ReflashReport {
            unused,
            acknowledged_missing,
            flashed,
            erased,
            wiped,
        })
    }

    /// Run one command with progress drawing paused; the tool writes to the
    /// same terminal.
    fn execute(&mut self, command: &FastbootCommand) -> Result<()> {
        tracing::debug!("executing `{}`", command);
        let executor = &mut self.executor;
        self.progress.suspend(|| executor.execute(command))
    }
}
