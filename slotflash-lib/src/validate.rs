//! Cross-check of the collected images against the manifest.
//!
//! Unused files only produce warnings. A missing image needs the operator's
//! go-ahead, and the first refusal stops the whole run.

use crate::confirm::Confirm;
use crate::images::{ImageFile, ImageSet};
use crate::manifest::{Manifest, image_name};
use crate::{Error, Result};

/// Files that are not the image of any manifest partition.
pub fn unused_files<'a>(images: &'a ImageSet, manifest: &Manifest) -> Vec<&'a ImageFile> {
    images
        .files()
        .iter()
        .filter(|file| !manifest.is_expected(&file.name))
        .collect()
}

/// Expected image names with no exact match, in manifest order.
pub fn missing_images(images: &ImageSet, manifest: &Manifest) -> Vec<String> {
    manifest
        .partitions()
        .iter()
        .map(|partition| image_name(partition))
        .filter(|name| !images.contains(name))
        .collect()
}

/// Ask about every missing image in manifest order.
///
/// Returns the acknowledged names, or [`Error::MissingImage`] for the first
/// one the operator refused. Later entries are not asked about.
pub fn check_missing_images(
    images: &ImageSet,
    manifest: &Manifest,
    confirm: &mut dyn Confirm,
) -> Result<Vec<String>> {
    let mut acknowledged = Vec::new();
    for name in missing_images(images, manifest) {
        if !confirm.confirm_missing(&name)? {
            tracing::info!("missing image '{}' declined", name);
            return Err(Error::MissingImage(name));
        }
        acknowledged.push(name);
    }
    Ok(acknowledged)
}
