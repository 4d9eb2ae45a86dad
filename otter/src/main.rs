//! Command-line driver for the build engine (§6).

mod cli;
mod manifest;

use {
    clap::Parser,
    cli::Args,
    otter_actions::ProcessRunner,
    otter_core::build::BuildContext,
    std::process::ExitCode,
};

fn main() -> ExitCode
{
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if is_help_or_version(&err) => {
            eprint!("{err}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprint!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn is_help_or_version(err: &clap::Error) -> bool
{
    use clap::error::ErrorKind::{DisplayHelp, DisplayVersion};
    matches!(err.kind(), DisplayHelp | DisplayVersion)
}

fn run(args: &Args) -> anyhow::Result<()>
{
    let mut manifest = manifest::load(&args.manifest)?;

    let profile = args.profile();
    let flags = &mut manifest.config.flags;
    flags.cc_flags = join(&flags.cc_flags, profile.cc_flags());
    flags.ll_flags = join(&flags.ll_flags, profile.ll_flags());

    let mut context = BuildContext::create(&manifest.targets, &manifest.config)?;
    let runner = ProcessRunner::new();
    context.build_all(&runner)?;

    Ok(())
}

/// Append `extra` to `existing`, separated by a space if both are
/// non-empty.
fn join(existing: &str, extra: &str) -> String
{
    if existing.is_empty() {
        extra.to_owned()
    } else {
        format!("{existing} {extra}")
    }
}
