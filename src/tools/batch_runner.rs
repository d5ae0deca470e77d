use std::path::PathBuf;
use std::time::Duration;

use crate::automation::context::AutomationContext;
use crate::core::input::is_escape_key_down;
use crate::core::worker::{Worker, WorkerContext};
use crate::error::{AutomationError, Result};
use crate::omere::jobs::{duplicate_identifiers, load_job_list, Job};
use crate::omere::launcher::{focus_window, launch};
use crate::omere::preflight::{check_templates, ensure_templates, preview_jobs};
use crate::omere::runner::{pause_interruptible, run_batch, BatchReport, Desktop, RunControl};
use crate::settings::{resolve_path, AppSettings};
use crate::ui::batch_runner::{render_ui, BatchUiAction};

/// Settings with every path resolved, captured when a batch starts
#[derive(Debug, Clone)]
struct BatchPlan {
    settings: AppSettings,
    exe_path: PathBuf,
    images_dir: PathBuf,
    input_list: PathBuf,
}

impl BatchPlan {
    fn new(settings: &AppSettings) -> Self {
        let base = AppSettings::base_dir();
        Self {
            settings: settings.clone(),
            exe_path: resolve_path(&base, &settings.batch.exe_path),
            images_dir: resolve_path(&base, &settings.batch.images_dir),
            input_list: resolve_path(&base, &settings.batch.input_list_path),
        }
    }
}

/// Bridges the runner to the worker's status, log and stop flag
struct WorkerControl {
    ctx: WorkerContext,
}

impl RunControl for WorkerControl {
    fn should_stop(&self) -> bool {
        if !self.ctx.is_running() {
            return true;
        }
        if is_escape_key_down() {
            self.ctx.set_running(false);
            return true;
        }
        false
    }

    fn progress(&self, message: &str) {
        tracing::info!("{}", message);
        self.ctx.set_status(message);
        self.ctx.log(message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        self.ctx.log(message);
    }
}

/// Reference image check and job list, before anything touches the screen
fn prepare_jobs(plan: &BatchPlan, control: &dyn RunControl) -> Result<Vec<Job>> {
    control.progress("Checking reference images...");
    ensure_templates(&plan.images_dir)?;

    let jobs = load_job_list(&plan.input_list)?;
    control.progress(&format!("Loaded {} input files", jobs.len()));
    for id in duplicate_identifiers(&jobs) {
        control.warn(&format!("Several inputs share identifier '{}'; later outputs overwrite earlier ones", id));
    }
    Ok(jobs)
}

/// Launch or attach to OMERE, then run every job
fn drive(desktop: &mut dyn Desktop, plan: &BatchPlan, jobs: &[Job], control: &dyn RunControl) -> Result<BatchReport> {
    let batch = &plan.settings.batch;
    let timing = &plan.settings.timing;

    let stop = || control.should_stop();
    let window_timeout = Duration::from_millis(timing.window_timeout_ms);
    if batch.launch_application {
        control.progress("Starting OMERE...");
        let _child = launch(&plan.exe_path)?;
        if !focus_window(&batch.window_title, window_timeout, &stop)? {
            control.warn(&format!("'{}' window not detected, continuing anyway", batch.window_title));
        }
        control.progress("Waiting for OMERE to finish starting...");
        pause_interruptible(desktop, control, timing.startup_delay_ms)?;
    } else if !focus_window(&batch.window_title, Duration::ZERO, &stop)? {
        control.warn(&format!("'{}' window not detected, continuing anyway", batch.window_title));
    }

    run_batch(desktop, jobs, batch, timing, control)
}

fn run_plan(plan: &BatchPlan, control: &WorkerControl) -> Result<BatchReport> {
    let jobs = prepare_jobs(plan, control)?;

    let mut desktop = AutomationContext::new(plan.settings.batch.confidence)?;
    desktop.store_button_templates(&plan.images_dir)?;

    drive(&mut desktop, plan, &jobs, control)
}

fn summarize(report: &BatchReport) -> String {
    if report.records_with_problems() == 0 && report.navigation.is_clean() {
        return format!("Batch complete: {} records", report.records.len());
    }

    let problem_ids: Vec<&str> = report
        .records
        .iter()
        .filter(|r| !r.steps.is_clean())
        .map(|r| r.identifier.as_str())
        .collect();
    format!(
        "Batch finished: {} records, {} with missing buttons or input errors ({})",
        report.records.len(),
        problem_ids.len(),
        if problem_ids.is_empty() { "navigation".to_string() } else { problem_ids.join(", ") }
    )
}

pub struct BatchRunnerTool {
    worker: Worker,
}

impl Default for BatchRunnerTool {
    fn default() -> Self {
        Self {
            worker: Worker::new(),
        }
    }
}

impl BatchRunnerTool {
    /// Ask a running batch to stop; the worker reports "Stopped by user" once it has
    pub fn stop(&mut self) {
        if !self.worker.is_running() || self.worker.stop_requested() {
            return;
        }
        self.worker.stop();
        self.worker.log("Stop requested");
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }

    pub fn get_status(&self) -> String {
        self.worker.get_status()
    }

    pub fn log_snapshot(&self) -> Vec<String> {
        self.worker.log_snapshot()
    }

    pub fn clear_log(&self) {
        self.worker.clear_log();
    }

    pub fn start(&mut self, settings: &AppSettings) {
        if self.worker.is_running() {
            return;
        }

        let plan = BatchPlan::new(settings);
        self.worker.set_status("Starting...");
        self.worker.log("Batch started");

        let started = self.worker.start(move |ctx: WorkerContext| {
            let control = WorkerControl { ctx: ctx.clone() };
            match run_plan(&plan, &control) {
                Ok(report) => {
                    let summary = summarize(&report);
                    tracing::info!("{}", summary);
                    ctx.set_status(&summary);
                    ctx.log(&summary);
                }
                Err(AutomationError::Cancelled) => {
                    tracing::info!("Batch stopped by user");
                    ctx.set_status("Stopped by user");
                    ctx.log("Stopped by user");
                }
                Err(e) => {
                    tracing::error!("Batch failed: {}", e);
                    ctx.set_status(&format!("Error: {}", e));
                    ctx.log(&format!("Error: {}", e));
                }
            }
        });
        if !started {
            self.worker.set_status("Previous batch is still stopping");
        }
    }

    fn log_template_check(&self, settings: &AppSettings) {
        let images_dir = resolve_path(&AppSettings::base_dir(), &settings.batch.images_dir);
        let checks = check_templates(&images_dir);
        let failed = checks.iter().filter(|c| c.result.is_err()).count();

        for check in &checks {
            match &check.result {
                Ok((w, h)) => self.worker.log(&format!("{}: {}x{}", check.button.file_name(), w, h)),
                Err(e) => self.worker.log(&format!("{}: {}", check.button.file_name(), e)),
            }
        }

        if failed == 0 {
            self.worker.set_status(&format!("All {} reference images found", checks.len()));
        } else {
            self.worker.set_status(&format!("Error: {} reference images missing or unreadable", failed));
        }
    }

    fn log_job_preview(&self, settings: &AppSettings) {
        let input_list = resolve_path(&AppSettings::base_dir(), &settings.batch.input_list_path);
        match preview_jobs(&input_list, &settings.batch.output_dir, &settings.batch.output_suffix) {
            Ok(preview) => {
                for (input, output) in &preview.lines {
                    self.worker.log(&format!("{} -> {}", input, output));
                }
                for id in &preview.duplicates {
                    self.worker.log(&format!("Duplicate identifier: {}", id));
                }
                self.worker.set_status(&format!("{} input files listed", preview.lines.len()));
            }
            Err(e) => self.worker.set_status(&format!("Error: {}", e)),
        }
    }

    pub fn update(&mut self, ui: &mut egui::Ui, settings: &mut AppSettings) {
        let is_running = self.worker.is_running();
        let status = self.worker.get_status();

        match render_ui(ui, &mut settings.batch, is_running, &status) {
            BatchUiAction::CheckImages => self.log_template_check(settings),
            BatchUiAction::PreviewJobs => self.log_job_preview(settings),
            BatchUiAction::Start => {
                settings.auto_save();
                self.start(settings);
            }
            BatchUiAction::Stop => self.stop(),
            BatchUiAction::None => {}
        }
    }
}
