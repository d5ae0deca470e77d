use std::path::Path;

use crate::error::{AutomationError, Result};
use crate::omere::buttons::Button;
use crate::omere::jobs::{duplicate_identifiers, load_job_list};

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCheck {
    pub button: Button,
    pub result: std::result::Result<(u32, u32), String>,
}

/// Confirm every reference screenshot exists and decodes
pub fn check_templates(images_dir: &Path) -> Vec<TemplateCheck> {
    Button::ALL
        .iter()
        .map(|button| {
            let path = button.template_path(images_dir);
            let result = if !path.is_file() {
                Err(format!("{} is missing", path.display()))
            } else {
                image::image_dimensions(&path).map_err(|e| format!("{}: {}", path.display(), e))
            };
            TemplateCheck {
                button: *button,
                result,
            }
        })
        .collect()
}

pub fn ensure_templates(images_dir: &Path) -> Result<()> {
    let failed: Vec<String> = check_templates(images_dir)
        .into_iter()
        .filter(|check| check.result.is_err())
        .map(|check| check.button.file_name())
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(AutomationError::MissingTemplates(failed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPreview {
    pub lines: Vec<(String, String)>,
    pub duplicates: Vec<String>,
}

/// Input and output names of every job, without touching the screen
pub fn preview_jobs(input_list: &Path, output_dir: &str, output_suffix: &str) -> Result<JobPreview> {
    let jobs = load_job_list(input_list)?;
    Ok(JobPreview {
        lines: jobs
            .iter()
            .map(|job| (job.input_path.clone(), job.output_name(output_dir, output_suffix)))
            .collect(),
        duplicates: duplicate_identifiers(&jobs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]))
            .save(path)
            .expect("failed to save png");
    }

    #[test]
    fn complete_image_set_passes() {
        let dir = tempdir().expect("Failed to create temp directory");
        for button in Button::ALL {
            write_png(&button.template_path(dir.path()), 24, 12);
        }

        let checks = check_templates(dir.path());
        assert_eq!(checks.len(), Button::ALL.len());
        assert!(checks.iter().all(|c| c.result == Ok((24, 12))));
        assert!(ensure_templates(dir.path()).is_ok());
    }

    #[test]
    fn missing_and_corrupt_images_are_named() {
        let dir = tempdir().expect("Failed to create temp directory");
        for button in Button::ALL {
            if button != Button::Ok && button != Button::Calculation {
                write_png(&button.template_path(dir.path()), 10, 10);
            }
        }
        fs::write(Button::Calculation.template_path(dir.path()), b"not a png").expect("write failed");

        match ensure_templates(dir.path()) {
            Err(AutomationError::MissingTemplates(names)) => {
                assert_eq!(names, vec!["ok.png".to_string(), "calculation.png".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn preview_lists_outputs_and_duplicates() {
        let dir = tempdir().expect("Failed to create temp directory");
        let list = dir.path().join("inputs.txt");
        fs::write(&list, "C:\\in\\Fe_a.txt\nC:\\in\\Fe_b.txt\nC:\\in\\Si_a.txt\n").expect("write failed");

        let preview = preview_jobs(&list, "omere_outputs", "_equiFlux.fle").expect("preview failed");
        assert_eq!(preview.lines.len(), 3);
        assert_eq!(
            preview.lines[2],
            (r"C:\in\Si_a.txt".to_string(), r"omere_outputs\Si_equiFlux.fle".to_string())
        );
        assert_eq!(preview.duplicates, vec!["Fe".to_string()]);
    }
}
