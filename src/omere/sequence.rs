use crate::omere::buttons::Button;
use crate::omere::jobs::Job;
use crate::settings::TimingSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Locate a button, click its center, then wait
    Click { button: Button, settle_ms: u64 },
    /// Locate a label and click the text box `offset_x` pixels to its right
    ClickBeside {
        button: Button,
        offset_x: i32,
        settle_ms: u64,
    },
    /// Ctrl+A then Delete in the focused text box
    ClearField,
    Type(String),
    Delay(u64),
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::Click { button, .. } => format!("Click {}", button),
            Step::ClickBeside { button, offset_x, .. } => {
                format!("Click {}px right of {}", offset_x, button)
            }
            Step::ClearField => "Clear field".to_string(),
            Step::Type(text) => format!("Type {}", text),
            Step::Delay(ms) => format!("Wait {}ms", ms),
        }
    }
}

/// From OMERE's start screen to the focused NIEL electrons text box
pub fn navigation_steps(timing: &TimingSettings) -> Vec<Step> {
    let click = |button, settle_ms| Step::Click { button, settle_ms };

    vec![
        click(Button::AtomicDisplacement, timing.click_settle_ms),
        click(Button::EquivalentFluence, timing.click_settle_ms),
        click(Button::CalculationParameters, timing.dialog_settle_ms),
        click(Button::ProtonEquivalentFluence, timing.click_settle_ms),
        click(Button::ElectronEquivalentFluence, timing.click_settle_ms),
        click(Button::EnergyRangeNielCurves, timing.click_settle_ms),
        click(Button::YourNielData, timing.click_settle_ms),
        click(Button::NielElectrons, timing.click_settle_ms),
        Step::ClickBeside {
            button: Button::NielElectrons,
            offset_x: timing.field_offset_x,
            settle_ms: 0,
        },
    ]
}

/// One calculation; starts and ends with the NIEL electrons text box focused
pub fn record_steps(job: &Job, output_name: &str, timing: &TimingSettings) -> Vec<Step> {
    vec![
        Step::Delay(timing.record_delay_ms),
        Step::ClearField,
        Step::Type(job.input_path.clone()),
        Step::Click {
            button: Button::Ok,
            settle_ms: timing.click_settle_ms,
        },
        Step::Delay(timing.click_settle_ms),
        Step::ClickBeside {
            button: Button::OutputFile,
            offset_x: timing.field_offset_x,
            settle_ms: 0,
        },
        Step::ClearField,
        Step::Type(output_name.to_string()),
        Step::Click {
            button: Button::Calculation,
            settle_ms: timing.calculation_wait_ms,
        },
        Step::Click {
            button: Button::CalculationParameters,
            settle_ms: timing.dialog_settle_ms,
        },
        Step::ClickBeside {
            button: Button::NielElectrons,
            offset_x: timing.field_offset_x,
            settle_ms: 0,
        },
    ]
}
