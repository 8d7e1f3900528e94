use serde::{Deserialize, Serialize};
use slotflash_lib::{Manifest, Slot};
use std::str::FromStr;

/// Default configuration values
pub struct Defaults;

impl Defaults {
    pub const SLOT: &'static str = "b";
    pub const FASTBOOT: &'static str = "fastboot";
    pub const WIPE_DATA: bool = false;
    pub const DRY_RUN: bool = false;
    pub const YES: bool = false;
}

/// Root of the JSON configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotflashConfig {
    pub image_dir: Option<String>,
    #[serde(default = "default_slot")]
    pub slot: String,
    #[serde(default)]
    pub wipe_data: bool,
    #[serde(default)]
    pub dry_run: bool,
    /// Accept missing images without prompting
    #[serde(default)]
    pub yes: bool,
    #[serde(default = "default_fastboot")]
    pub fastboot: String,

    // Manifest overrides, the built-in lists are used when absent
    pub partitions: Option<Vec<String>>,
    pub erase: Option<Vec<String>>,
}

fn default_slot() -> String {
    Defaults::SLOT.to_string()
}
fn default_fastboot() -> String {
    Defaults::FASTBOOT.to_string()
}

impl SlotflashConfig {
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: SlotflashConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_defaults() -> Self {
        Self {
            image_dir: None,
            slot: Defaults::SLOT.to_string(),
            wipe_data: Defaults::WIPE_DATA,
            dry_run: Defaults::DRY_RUN,
            yes: Defaults::YES,
            fastboot: Defaults::FASTBOOT.to_string(),
            partitions: None,
            erase: None,
        }
    }

    pub fn parse_slot(&self) -> Result<Slot, String> {
        Slot::from_str(&self.slot).map_err(|_| format!("Invalid slot: {}", self.slot))
    }

    pub fn manifest(&self) -> Result<Manifest, String> {
        if self.partitions.is_none() && self.erase.is_none() {
            return Ok(Manifest::default());
        }
        let default = Manifest::default();
        let partitions = self
            .partitions
            .clone()
            .unwrap_or_else(|| default.partitions().to_vec());
        let erase = self
            .erase
            .clone()
            .unwrap_or_else(|| default.erase().to_vec());
        Manifest::new(partitions, erase).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.parse_slot()?;
        if self.fastboot.trim().is_empty() {
            return Err("fastboot program must not be empty".to_string());
        }
        self.manifest()?;
        Ok(())
    }
}
