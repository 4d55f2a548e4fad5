use crate::ports::outbound::ProgressReporter;
use owo_colors::OwoColorize;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so it doesn't interfere with report output on stdout.
/// `quiet` drops everything except errors.
pub struct StderrProgressReporter {
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if self.quiet {
            return;
        }
        let step = format!("[{}/{}]", current, total);
        match message {
            Some(msg) => eprintln!("   {} {}", step.cyan(), msg),
            None => eprintln!("   {}", step.cyan()),
        }
    }

    fn report_error(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message.green());
        }
    }
}
