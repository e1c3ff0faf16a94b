use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observer for a genetic run. Generation numbers are 0-based.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, valid_count: usize);
}

pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _valid_count: usize) {}
}

/// Logs every `every`-th generation at info level.
pub struct ConsoleProgressCallback {
    every: usize,
}

impl ConsoleProgressCallback {
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1) }
    }
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, valid_count: usize) {
        if (generation + 1) % self.every == 0 {
            log::info!(
                "Generation {} complete. Best fitness: {:.4}, feasible chromosomes: {}",
                generation + 1,
                best_fitness,
                valid_count
            );
        }
    }
}

pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, best_fitness: f64, valid_count: usize },
}

/// Forwards progress over a channel, e.g. to a thread driving a display.
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, valid_count: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            valid_count,
        });
    }
}

/// Cancellation flag plus optional deadline, checked by the engine between generations.
///
/// Clones share the flag, so one can be handed to another thread and
/// `cancel()`ed while the run is in progress.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_time_limit(self, limit: Duration) -> Self {
        self.with_deadline(Instant::now() + limit)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let signal = StopSignal::new();
        let handle = signal.clone();
        assert!(!signal.should_stop());

        handle.cancel();
        assert!(signal.should_stop());
    }

    #[test]
    fn test_elapsed_deadline_stops() {
        let signal = StopSignal::new().with_deadline(Instant::now());
        assert!(signal.should_stop());

        let signal = StopSignal::new().with_time_limit(Duration::from_secs(3600));
        assert!(!signal.should_stop());
    }
}
