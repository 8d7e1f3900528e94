//! Terminal rendering of reflash steps.
//!
//! Spinners are only drawn for live runs on a terminal; everything else gets
//! one plain status line per step. Warnings always go to stderr. The flashing
//! tool shares the terminal, so its runs happen with the spinners suspended
//! and finished steps are printed as plain lines above them.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use slotflash_lib::progress::{ABORTED, ProgressCallback, ProgressId, StepInfo};
use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Prints each status line on stdout as the step starts
pub struct LineProgressCallback {
    quiet: bool,
}

impl LineProgressCallback {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressCallback for LineProgressCallback {
    fn start(&self, info: StepInfo) -> ProgressId {
        if !self.quiet {
            let mut stdout = io::stdout();
            let _ = writeln!(stdout, "{}", info.message);
            let _ = stdout.flush();
        }
        ProgressId(0)
    }

    fn finish(&self, _id: ProgressId, _final_message: String) {}

    fn warn(&self, message: String) {
        eprintln!("{}", message);
    }
}

/// indicatif spinner per step
pub struct IndicatifProgressCallback {
    multi_progress: MultiProgress,
    spinners: Arc<Mutex<HashMap<u64, (ProgressBar, String)>>>,
    next_id: Arc<Mutex<u64>>,
}

impl IndicatifProgressCallback {
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::stdout()),
            spinners: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }
}

impl Default for IndicatifProgressCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for IndicatifProgressCallback {
    fn start(&self, info: StepInfo) -> ProgressId {
        let id = self.next_id();

        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_style(
            ProgressStyle::with_template(&format!("[{}] {{spinner}} {{msg}}", info.prefix))
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(info.message);

        self.spinners
            .lock()
            .unwrap()
            .insert(id, (spinner, info.prefix));
        ProgressId(id)
    }

    fn finish(&self, id: ProgressId, final_message: String) {
        if let Ok(mut spinners) = self.spinners.lock()
            && let Some((spinner, prefix)) = spinners.remove(&id.0)
        {
            spinner.finish_and_clear();
            self.multi_progress.remove(&spinner);
            let line = format!("[{}] {}", prefix, final_message);
            if final_message == ABORTED {
                self.multi_progress.suspend(|| eprintln!("{}", line));
            } else {
                let _ = self.multi_progress.println(line);
            }
        }
    }

    fn warn(&self, message: String) {
        self.multi_progress.suspend(|| eprintln!("{}", message));
    }

    fn suspend(&self, f: &mut dyn FnMut()) {
        self.multi_progress.suspend(f);
    }
}

/// Pick the renderer for this run
pub fn create_progress_callback(dry_run: bool, quiet: bool) -> Arc<dyn ProgressCallback> {
    if !dry_run && !quiet && io::stdout().is_terminal() {
        Arc::new(IndicatifProgressCallback::new())
    } else {
        Arc::new(LineProgressCallback::new(quiet))
    }
}
