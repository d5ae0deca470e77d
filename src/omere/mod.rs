pub mod buttons;
#[cfg(test)]
pub(crate) mod fake;
pub mod jobs;
pub mod launcher;
pub mod preflight;
pub mod runner;
pub mod sequence;
