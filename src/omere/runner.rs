use crate::automation::detection::offset_point;
use crate::error::{AutomationError, Result};
use crate::omere::buttons::Button;
use crate::omere::jobs::Job;
use crate::omere::sequence::{navigation_steps, record_steps, Step};
use crate::settings::{BatchSettings, TimingSettings};

/// Longest uninterrupted sleep; stop requests are noticed within this
const PAUSE_SLICE_MS: u64 = 50;

/// Mouse, keyboard and screen matching as seen by the step runner
pub trait Desktop {
    /// Center of the button on screen, if found
    fn locate(&mut self, button: Button) -> Option<(u32, u32)>;
    fn click_at(&mut self, x: u32, y: u32) -> Result<()>;
    fn clear_field(&mut self) -> Result<()>;
    fn type_text(&mut self, text: &str) -> Result<()>;
    fn pause(&mut self, ms: u64);
}

/// Progress reporting and cancellation for a run
pub trait RunControl {
    fn should_stop(&self) -> bool;
    fn progress(&self, message: &str);
    fn warn(&self, message: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepsReport {
    pub missing: Vec<Button>,
    pub input_errors: usize,
}

impl StepsReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.input_errors == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub identifier: String,
    pub output_name: String,
    pub steps: StepsReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub navigation: StepsReport,
    pub records: Vec<RecordReport>,
}

impl BatchReport {
    pub fn records_with_problems(&self) -> usize {
        self.records.iter().filter(|r| !r.steps.is_clean()).count()
    }
}

fn check_stop(control: &dyn RunControl) -> Result<()> {
    if control.should_stop() {
        Err(AutomationError::Cancelled)
    } else {
        Ok(())
    }
}

/// Sleep in short slices so a stop request cuts long waits short
pub fn pause_interruptible(desktop: &mut dyn Desktop, control: &dyn RunControl, ms: u64) -> Result<()> {
    let mut remaining = ms;
    while remaining > 0 {
        check_stop(control)?;
        let slice = remaining.min(PAUSE_SLICE_MS);
        desktop.pause(slice);
        remaining -= slice;
    }
    Ok(())
}

fn report_input_error(control: &dyn RunControl, report: &mut StepsReport, step: &Step, error: AutomationError) {
    control.warn(&format!("{} failed: {}", step.describe(), error));
    report.input_errors += 1;
}

/// Execute steps in order; a button that is not on screen is reported and its step skipped
pub fn run_steps(desktop: &mut dyn Desktop, steps: &[Step], control: &dyn RunControl) -> Result<StepsReport> {
    let mut report = StepsReport::default();

    for step in steps {
        check_stop(control)?;
        tracing::debug!("{}", step.describe());

        match step {
            Step::Click { button, settle_ms } => match desktop.locate(*button) {
                Some((x, y)) => {
                    if let Err(e) = desktop.click_at(x, y) {
                        report_input_error(control, &mut report, step, e);
                    }
                    pause_interruptible(desktop, control, *settle_ms)?;
                }
                None => {
                    control.warn(&format!("{} not found on screen.", button));
                    report.missing.push(*button);
                }
            },
            Step::ClickBeside {
                button,
                offset_x,
                settle_ms,
            } => match desktop.locate(*button) {
                Some(anchor) => {
                    let (x, y) = offset_point(anchor, *offset_x);
                    if let Err(e) = desktop.click_at(x, y) {
                        report_input_error(control, &mut report, step, e);
                    }
                    pause_interruptible(desktop, control, *settle_ms)?;
                }
                None => {
                    control.warn(&format!("{} not found on screen.", button));
                    report.missing.push(*button);
                }
            },
            Step::ClearField => {
                if let Err(e) = desktop.clear_field() {
                    report_input_error(control, &mut report, step, e);
                }
            }
            Step::Type(text) => {
                if let Err(e) = desktop.type_text(text) {
                    report_input_error(control, &mut report, step, e);
                }
            }
            Step::Delay(ms) => pause_interruptible(desktop, control, *ms)?,
        }
    }

    Ok(report)
}

/// Navigate to the calculation dialog once, then run every job
pub fn run_batch(
    desktop: &mut dyn Desktop,
    jobs: &[Job],
    batch: &BatchSettings,
    timing: &TimingSettings,
    control: &dyn RunControl,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    control.progress("Opening calculation parameters...");
    report.navigation = run_steps(desktop, &navigation_steps(timing), control)?;

    for (index, job) in jobs.iter().enumerate() {
        let output_name = job.output_name(&batch.output_dir, &batch.output_suffix);
        control.progress(&format!(
            "Record {}/{}: {} -> {}",
            index + 1,
            jobs.len(),
            job.identifier,
            output_name
        ));

        let steps = run_steps(desktop, &record_steps(job, &output_name, timing), control)?;
        report.records.push(RecordReport {
            identifier: job.identifier.clone(),
            output_name,
            steps,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::omere::fake::{Action, FakeDesktop, RecordingControl};

    #[test]
    fn click_hits_located_center_and_waits() {
        let mut desktop = FakeDesktop::default();
        desktop.positions.insert(Button::Ok, (640, 480));
        let control = RecordingControl::default();

        let steps = [Step::Click {
            button: Button::Ok,
            settle_ms: 120,
        }];
        let report = run_steps(&mut desktop, &steps, &control).expect("run failed");

        assert!(report.is_clean());
        assert_eq!(desktop.actions, vec![Action::Click(640, 480)]);
        assert_eq!(desktop.paused_ms, 120);
    }

    #[test]
    fn click_beside_offsets_from_anchor() {
        let mut desktop = FakeDesktop::default();
        desktop.positions.insert(Button::NielElectrons, (300, 150));
        let control = RecordingControl::default();

        let steps = [Step::ClickBeside {
            button: Button::NielElectrons,
            offset_x: 100,
            settle_ms: 0,
        }];
        run_steps(&mut desktop, &steps, &control).expect("run failed");

        assert_eq!(desktop.actions, vec![Action::Click(400, 150)]);
    }

    #[test]
    fn missing_button_is_reported_and_skipped() {
        let mut desktop = FakeDesktop::default();
        let control = RecordingControl::default();

        let steps = [
            Step::Click {
                button: Button::Calculation,
                settle_ms: 7000,
            },
            Step::Type("after".to_string()),
        ];
        let report = run_steps(&mut desktop, &steps, &control).expect("run failed");

        assert_eq!(report.missing, vec![Button::Calculation]);
        assert_eq!(desktop.paused_ms, 0);
        assert_eq!(desktop.actions, vec![Action::Type("after".to_string())]);
        assert_eq!(
            control.warnings.borrow().as_slice(),
            ["Calculation not found on screen.".to_string()]
        );
    }

    #[test]
    fn input_errors_are_counted_not_fatal() {
        let mut desktop = FakeDesktop {
            fail_typing: true,
            ..FakeDesktop::default()
        };
        let control = RecordingControl::default();

        let steps = [Step::Type("x".to_string()), Step::ClearField];
        let report = run_steps(&mut desktop, &steps, &control).expect("run failed");

        assert_eq!(report.input_errors, 1);
        assert_eq!(desktop.actions, vec![Action::Clear]);
    }

    #[test]
    fn stop_request_cuts_a_long_wait_short() {
        let mut desktop = FakeDesktop::default();
        let control = RecordingControl {
            stop_after: Some(3),
            ..RecordingControl::default()
        };

        let result = run_steps(&mut desktop, &[Step::Delay(7000)], &control);

        assert!(matches!(result, Err(AutomationError::Cancelled)));
        assert_eq!(desktop.paused_ms, 2 * PAUSE_SLICE_MS);
    }

    #[test]
    fn batch_navigates_once_then_runs_each_record() {
        let mut desktop = FakeDesktop::with_all_buttons();
        let control = RecordingControl::default();
        let jobs = vec![Job::new(r"C:\in\Fe_e.txt"), Job::new(r"C:\in\Si_e.txt")];
        let batch = BatchSettings::default();
        let timing = TimingSettings::default();

        let report = run_batch(&mut desktop, &jobs, &batch, &timing, &control).expect("batch failed");

        assert!(report.navigation.is_clean());
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].output_name, r"omere_outputs\Si_equiFlux.fle");
        assert_eq!(report.records_with_problems(), 0);

        let typed: Vec<String> = desktop
            .actions
            .iter()
            .filter_map(|a| match a {
                Action::Type(text) => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            typed,
            vec![
                r"C:\in\Fe_e.txt".to_string(),
                r"omere_outputs\Fe_equiFlux.fle".to_string(),
                r"C:\in\Si_e.txt".to_string(),
                r"omere_outputs\Si_equiFlux.fle".to_string(),
            ]
        );

        let messages = control.messages.borrow();
        assert_eq!(messages.len(), 3);
        assert!(messages[2].starts_with("Record 2/2: Si"));
    }

    #[test]
    fn batch_keeps_going_when_a_record_misses_a_button() {
        let mut desktop = FakeDesktop::with_all_buttons();
        desktop.positions.remove(&Button::OutputFile);
        let control = RecordingControl::default();
        let jobs = vec![Job::new("Fe_e.txt")];

        let report = run_batch(
            &mut desktop,
            &jobs,
            &BatchSettings::default(),
            &TimingSettings::default(),
            &control,
        )
        .expect("batch failed");

        assert_eq!(report.records_with_problems(), 1);
        assert_eq!(report.records[0].steps.missing, vec![Button::OutputFile]);
    }
}
