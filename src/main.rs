use clap::Parser;
use color_eyre::owo_colors::OwoColorize;
use s3_deploy::{
    cli::{Args, usage_exit_code},
    deploy::deploy,
    setup,
};
use std::process::ExitCode;

#[macro_use]
extern crate tracing;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if let Err(print_err) = e.print() {
                eprintln!("unable to print usage: {print_err}");
            }
            return ExitCode::from(usage_exit_code(&e));
        }
    };
    setup();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("unable to build runtime");

    match runtime.block_on(deploy(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(?e, "Error deploying");
            eprintln!("{}", "Deployment aborted".red().bold());
            ExitCode::FAILURE
        }
    }
}
