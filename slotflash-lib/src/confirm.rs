//! Operator confirmation for missing images.

use crate::Result;
use std::io::{BufRead, Write};

pub trait Confirm {
    /// Ask whether to go on without `image_name`. `Ok(false)` aborts the run.
    fn confirm_missing(&mut self, image_name: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm_missing(&mut self, image_name: &str) -> Result<bool> {
        self(image_name)
    }
}

/// Line based prompt; only the exact answer `yes` confirms.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm_missing(&mut self, image_name: &str) -> Result<bool> {
        writeln!(
            self.output,
            "The file '{} is missing! Enter 'yes' to proceed anyway:",
            image_name
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        let answer = answer.trim_end_matches(['\n', '\r']);
        Ok(answer == "yes")
    }
}

/// Accepts every missing image without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm_missing(&mut self, image_name: &str) -> Result<bool> {
        tracing::warn!("proceeding without '{}'", image_name);
        Ok(true)
    }
}
