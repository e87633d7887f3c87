use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use crossterm::{
    cursor::MoveToColumn,
    queue,
    terminal::{Clear, ClearType},
};

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Terminal activity indicator running on its own thread
pub struct Spinner {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Spinner {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        let (stop, stopped) = bounded(1);
        let handle = thread::spawn(move || spin(&label, &stopped));
        Self { stop, handle }
    }

    /// Stop the animation and wait until its line is cleared. Nothing may be
    /// printed before this returns.
    pub fn stop(self) {
        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            tracing::debug!("spinner thread panicked");
        }
    }
}

fn spin(label: &str, stopped: &Receiver<()>) {
    let mut out = io::stdout();
    for frame in FRAMES.iter().cycle() {
        let _ = write!(out, "\r{} {}", frame, label);
        let _ = out.flush();
        match stopped.recv_timeout(FRAME_INTERVAL) {
            Err(RecvTimeoutError::Timeout) => continue,
            // Stop requested, or the owner is gone
            _ => break,
        }
    }
    let _ = queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine));
    let _ = out.flush();
}

/// Run `work` while a spinner animates, returning once the spinner is gone.
/// Without `animate` the label is printed once instead, leaving the terminal
/// to log output.
pub fn with_spinner<T>(label: &str, animate: bool, work: impl FnOnce() -> T) -> T {
    if !animate {
        println!("{}", label);
        return work();
    }

    let spinner = Spinner::start(label);
    let result = work();
    spinner.stop();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_spinner_returns_work_result() {
        assert_eq!(with_spinner("Counting", true, || 2 + 2), 4);
    }

    #[test]
    fn test_without_animation_runs_work_inline() {
        let caller = thread::current().id();
        let worker = with_spinner("Counting", false, || thread::current().id());
        assert_eq!(worker, caller);
    }

    #[test]
    fn test_stop_is_acknowledged() {
        let spinner = Spinner::start("Waiting");
        thread::sleep(Duration::from_millis(20));
        // Returns only after the thread has exited
        spinner.stop();
    }
}
