use std::process::ExitCode;

use clap::Parser;
use pipeflow_toolbox::app;
use pipeflow_toolbox::cli::LossArgs;

/// 손실수두 계산기 엔트리 포인트.
fn main() -> ExitCode {
    app::init_tracing();
    app::losses_main(LossArgs::parse())
}
