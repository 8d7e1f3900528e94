use crate::command::FastbootCommand;
use crate::progress::StepKind;
use crate::{Reflasher, Result};

pub trait WipeData {
    /// Factory reset: wipe user data.
    fn wipe_data(&mut self) -> Result<()>;
}

impl WipeData for Reflasher {
    fn wipe_data(&mut self) -> Result<()> {
        let step = self.progress.start_step(StepKind::Wipe, "Wiping data");
        if let Err(e) = self.execute(&FastbootCommand::Wipe) {
            step.abort();
            return Err(e);
        }
        step.finish_with_message("Data wiped");
        Ok(())
    }
}
