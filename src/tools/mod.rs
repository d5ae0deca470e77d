pub mod batch_runner;
