use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

const MAX_LOG_LINES: usize = 500;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared state handed to the background task
///
/// `running` belongs to a single run: a stopped run never sees the flag of the run started after it.
#[derive(Clone)]
pub struct WorkerContext {
    running: Arc<AtomicBool>,
    status: Arc<Mutex<String>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl WorkerContext {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn set_running(&self, value: bool) {
        self.running.store(value, Ordering::SeqCst);
    }

    pub fn set_status(&self, text: &str) {
        *lock(&self.status) = text.to_string();
    }

    /// Append a timestamped line to the in-app log
    pub fn log(&self, line: &str) {
        let stamped = format!("{} {}", chrono::Local::now().format("%H:%M:%S"), line);
        let mut log = lock(&self.log);
        log.push(stamped);
        if log.len() > MAX_LOG_LINES {
            let excess = log.len() - MAX_LOG_LINES;
            log.drain(..excess);
        }
    }
}

pub struct Worker {
    ctx: WorkerContext,
    handle: Option<JoinHandle<()>>,
}

impl Default for Worker {
    fn default() -> Self {
        Self {
            ctx: WorkerContext {
                running: Arc::new(AtomicBool::new(false)),
                status: Arc::new(Mutex::new("Ready".to_string())),
                log: Arc::new(Mutex::new(Vec::new())),
            },
            handle: None,
        }
    }
}

impl Worker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on a fresh thread with its own stop flag.
    /// Returns false without starting anything while the previous thread is still alive.
    pub fn start<F>(&mut self, task: F) -> bool
    where
        F: FnOnce(WorkerContext) + Send + 'static,
    {
        if self.thread_alive() {
            return false;
        }

        self.ctx.running = Arc::new(AtomicBool::new(true));
        let ctx = self.ctx.clone();
        self.handle = Some(thread::spawn(move || {
            task(ctx.clone());
            ctx.set_running(false);
        }));
        true
    }

    /// Ask the current run to stop; the thread exits at its next check
    pub fn stop(&self) {
        self.ctx.set_running(false);
        self.set_status("Stopping...");
    }

    fn thread_alive(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }

    /// True until the run is both stopped and its thread has exited
    pub fn is_running(&self) -> bool {
        self.ctx.is_running() || self.thread_alive()
    }

    /// True once the current run has been asked to stop, or when idle
    pub fn stop_requested(&self) -> bool {
        !self.ctx.is_running()
    }

    pub fn get_status(&self) -> String {
        lock(&self.ctx.status).clone()
    }

    pub fn set_status(&self, text: &str) {
        self.ctx.set_status(text);
    }

    pub fn log(&self, line: &str) {
        self.ctx.log(line);
    }

    pub fn log_snapshot(&self) -> Vec<String> {
        lock(&self.ctx.log).clone()
    }

    pub fn clear_log(&self) {
        lock(&self.ctx.log).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn task_result_is_visible_and_running_resets() {
        let mut worker = Worker::new();
        let (tx, rx) = mpsc::channel();

        assert!(worker.start(move |ctx| {
            ctx.set_status("Done");
            ctx.log("hello");
            tx.send(()).expect("send failed");
        }));

        rx.recv_timeout(Duration::from_secs(5)).expect("task did not run");
        for _ in 0..100 {
            if !worker.is_running() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert!(!worker.is_running());
        assert_eq!(worker.get_status(), "Done");
        let log = worker.log_snapshot();
        assert_eq!(log.len(), 1);
        assert!(log[0].ends_with(" hello"));
    }

    #[test]
    fn log_is_bounded() {
        let worker = Worker::new();
        for i in 0..(MAX_LOG_LINES + 25) {
            worker.log(&format!("line {}", i));
        }
        let log = worker.log_snapshot();
        assert_eq!(log.len(), MAX_LOG_LINES);
        assert!(log[0].ends_with(" line 25"));

        worker.clear_log();
        assert!(worker.log_snapshot().is_empty());
    }

    #[test]
    fn stop_clears_running_flag() {
        let worker = Worker::new();
        worker.ctx.set_running(true);
        worker.stop();
        assert!(!worker.is_running());
        assert!(worker.stop_requested());
        assert_eq!(worker.get_status(), "Stopping...");
    }

    fn wait_until_idle(worker: &Worker) {
        for _ in 0..500 {
            if !worker.is_running() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("worker thread did not exit");
    }

    #[test]
    fn stopped_run_must_exit_before_a_restart() {
        let mut worker = Worker::new();
        let stop_sent = Arc::new(AtomicBool::new(false));
        let steps_after_stop = Arc::new(AtomicUsize::new(0));

        let (sent, steps) = (stop_sent.clone(), steps_after_stop.clone());
        assert!(worker.start(move |ctx| {
            while ctx.is_running() {
                if sent.load(Ordering::SeqCst) {
                    steps.fetch_add(1, Ordering::SeqCst);
                }
                thread::sleep(Duration::from_millis(200));
            }
        }));

        thread::sleep(Duration::from_millis(50));
        worker.stop();
        stop_sent.store(true, Ordering::SeqCst);

        // The first thread is still asleep inside its step
        assert!(worker.is_running());
        assert!(worker.stop_requested());
        assert!(!worker.start(|_| {}), "restart accepted while the stopped run was alive");

        wait_until_idle(&worker);
        assert_eq!(steps_after_stop.load(Ordering::SeqCst), 0);

        let (tx, rx) = mpsc::channel();
        assert!(worker.start(move |ctx| {
            thread::sleep(Duration::from_millis(50));
            tx.send(ctx.is_running()).expect("send failed");
        }));
        let still_running = rx.recv_timeout(Duration::from_secs(5)).expect("second run did not report");
        assert!(still_running, "second run lost its flag");
        wait_until_idle(&worker);
    }

    #[test]
    fn each_run_gets_its_own_flag() {
        let mut worker = Worker::new();
        let (tx, rx) = mpsc::channel();
        assert!(worker.start(move |ctx| {
            tx.send(ctx).expect("send failed");
        }));
        let first = rx.recv_timeout(Duration::from_secs(5)).expect("first run did not report");
        wait_until_idle(&worker);

        assert!(worker.start(|ctx| {
            while ctx.is_running() {
                thread::sleep(Duration::from_millis(10));
            }
        }));
        // A late write from the finished run does not touch the new run
        first.set_running(false);
        assert!(worker.is_running());
        assert!(!worker.stop_requested());

        worker.stop();
        wait_until_idle(&worker);
    }
}
