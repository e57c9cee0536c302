use std::process::ExitCode;

use clap::Parser;
use pipeflow_toolbox::app;
use pipeflow_toolbox::cli::MeshArgs;

fn main() -> ExitCode {
    app::init_tracing();
    app::mesh_main(MeshArgs::parse())
}
