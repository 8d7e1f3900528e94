use crate::command::FastbootCommand;
use crate::images::ImageSet;
use crate::progress::StepKind;
use crate::{Reflasher, Result};

pub trait FlashPartitions {
    /// Flash every manifest partition that has an image, in manifest order.
    /// Returns the number of flash commands issued.
    fn flash_partitions(&mut self, images: &ImageSet) -> Result<usize>;
}

impl FlashPartitions for Reflasher {
    fn flash_partitions(&mut self, images: &ImageSet) -> Result<usize> {
        let slot = self.params.slot;
        let mut flashed = 0;
        for partition in self.manifest.partitions().to_vec() {
            let Some(image) = images.find_for(&partition) else {
                tracing::debug!("no image for '{}', skipping", partition);
                continue;
            };

            let target = slot.target(&partition);
            let step = self.progress.start_step(
                StepKind::Flash,
                format!("Flashing partition '{}' with file '{}'", target, image.name),
            );
            if let Err(e) = self.execute(&FastbootCommand::Flash {
                target: target.clone(),
                image: image.path.clone(),
            }) {
                step.abort();
                return Err(e);
            }
            step.finish_with_message(format!("Flashed '{}'", target));
            flashed += 1;
        }
        Ok(flashed)
    }
}
