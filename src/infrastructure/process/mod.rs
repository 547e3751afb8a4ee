mod command_runner;

pub use command_runner::{CommandFailure, binary_responds, run_with_timeout};
