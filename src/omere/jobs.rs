use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{AutomationError, Result};

/// One calculation: an input file path typed into OMERE and the identifier its output is named after
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input_path: String,
    pub identifier: String,
}

impl Job {
    pub fn new(input_path: &str) -> Self {
        Self {
            input_path: input_path.to_string(),
            identifier: identifier_for(input_path),
        }
    }

    pub fn output_name(&self, output_dir: &str, suffix: &str) -> String {
        output_file_name(output_dir, &self.identifier, suffix)
    }
}

/// One job per non-blank line; `#` starts a comment line
pub fn parse_job_list(contents: &str) -> Vec<Job> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Job::new)
        .collect()
}

pub fn load_job_list(path: &Path) -> Result<Vec<Job>> {
    let contents = fs::read_to_string(path).map_err(|source| AutomationError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let jobs = parse_job_list(&contents);
    if jobs.is_empty() {
        return Err(AutomationError::EmptyJobList(path.to_path_buf()));
    }
    Ok(jobs)
}

/// File name of the input, cut at its first underscore
/// `C:\data\Fe_electron_niel.txt` -> `Fe`
pub fn identifier_for(input_path: &str) -> String {
    let file_name = input_path
        .trim()
        .rsplit(|c: char| c == '\\' || c == '/')
        .next()
        .unwrap_or_default();

    file_name.split('_').next().unwrap_or_default().to_string()
}

/// Output path typed into OMERE's output field; OMERE runs on Windows so `\` separates
pub fn output_file_name(output_dir: &str, identifier: &str, suffix: &str) -> String {
    let dir = output_dir.trim().trim_end_matches(|c: char| c == '\\' || c == '/');
    if dir.is_empty() {
        format!("{}{}", identifier, suffix)
    } else {
        format!("{}\\{}{}", dir, identifier, suffix)
    }
}

/// Identifiers shared by several jobs; their outputs would overwrite each other
pub fn duplicate_identifiers(jobs: &[Job]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for job in jobs {
        *counts.entry(job.identifier.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}
