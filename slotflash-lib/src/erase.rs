use crate::command::FastbootCommand;
use crate::progress::StepKind;
use crate::{Reflasher, Result};

pub trait ErasePartitions {
    /// Erase the fixed erase list. Returns the number of erase commands issued.
    fn erase_partitions(&mut self) -> Result<usize>;
}

impl ErasePartitions for Reflasher {
    fn erase_partitions(&mut self) -> Result<usize> {
        let mut erased = 0;
        for partition in self.manifest.erase().to_vec() {
            let step = self
                .progress
                .start_step(StepKind::Erase, format!("Erasing partition '{}'", partition));
            if let Err(e) = self.execute(&FastbootCommand::Erase {
                partition: partition.clone(),
            }) {
                step.abort();
                return Err(e);
            }
            step.finish_with_message(format!("Erased '{}'", partition));
            erased += 1;
        }
        Ok(erased)
    }
}
