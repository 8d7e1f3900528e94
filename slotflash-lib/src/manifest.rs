//! Fixed partition lists.
//!
//! The manifest order is the flash order. Erase targets carry no image.

use crate::{Error, Result};
use std::collections::HashSet;

pub const PARTITION_NAMES: [&str; 22] = [
    "abl",
    "xbl",
    "bluetooth",
    "boot",
    "cda",
    "cmnlib",
    "cmnlib64",
    "devcfg",
    "dsp",
    "hidden",
    "hyp",
    "keymaster",
    "mdtpsecapp",
    "modem",
    "nvdef",
    "pmic",
    "rpm",
    "splash",
    "system",
    "systeminfo",
    "tz",
    "vendor",
];

pub const ERASE_PARTITIONS: [&str; 6] = ["ssd", "misc", "sti", "ddr", "securefs", "box"];

pub const IMAGE_EXTENSION: &str = ".img";

/// Image file name expected for a partition.
pub fn image_name(partition: &str) -> String {
    format!("{}{}", partition, IMAGE_EXTENSION)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    partitions: Vec<String>,
    erase: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            partitions: PARTITION_NAMES.iter().map(|s| s.to_string()).collect(),
            erase: ERASE_PARTITIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Manifest {
    /// Build a manifest from custom lists, rejecting names fastboot could
    /// not take as a single argument and duplicates within a list.
    pub fn new(partitions: Vec<String>, erase: Vec<String>) -> Result<Self> {
        check_names("partitions", &partitions)?;
        check_names("erase", &erase)?;
        Ok(Self { partitions, erase })
    }

    pub fn partitions(&self) -> &[String] {
        &self.partitions
    }

    pub fn erase(&self) -> &[String] {
        &self.erase
    }

    /// Whether `file_name` is exactly the image name of some manifest entry.
    pub fn is_expected(&self, file_name: &str) -> bool {
        self.partitions
            .iter()
            .any(|partition| image_name(partition) == file_name)
    }
}

fn check_names(list: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(Error::invalid_manifest(format!(
                "empty partition name in {} list",
                list
            )));
        }
        if name
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\' || c == '"' || c == '\'')
        {
            return Err(Error::invalid_manifest(format!(
                "partition name '{}' in {} list contains an invalid character",
                name, list
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::invalid_manifest(format!(
                "duplicate partition '{}' in {} list",
                name, list
            )));
        }
    }
    Ok(())
}
