use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use glue_trigger::{env_var, job_args, payload, Decision, OutputArgs};
use log::info;
use std::io;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read n from a JSON payload such as '{"n": 4}'
    Payload(PayloadArgs),
    /// Read n from an environment variable
    Env(EnvArgs),
    /// Resolve n from a job argument list carrying --n <value>
    JobArgs(ResolvedJobArgs),
}

#[derive(Args, Debug)]
struct PayloadArgs {
    event: Option<String>,
    #[clap(long = "payload-key", default_value = payload::DEFAULT_PAYLOAD_KEY)]
    payload_key: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct EnvArgs {
    #[clap(long = "var", default_value = env_var::DEFAULT_ENV_VAR)]
    var: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ResolvedJobArgs {
    #[clap(long = "option", default_value = job_args::DEFAULT_JOB_OPTION)]
    option: String,
    #[command(flatten)]
    output: OutputArgs,
    /// Job arguments as passed by the runner, after `--`
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (input, output) = match &cli.command {
        Commands::Payload(args) => {
            info!("Reading n from payload argument");
            (
                payload::read_n(args.event.as_deref(), &args.payload_key),
                &args.output,
            )
        }
        Commands::Env(args) => {
            info!("Reading n from environment variable '{}'", args.var);
            (env_var::read_n(&args.var, |var| std::env::var(var)), &args.output)
        }
        Commands::JobArgs(args) => {
            info!("Resolving n from {} job arguments", args.args.len());
            (job_args::read_n(&args.args, &args.option), &args.output)
        }
    };

    let decision =
        Decision::from_input(input, output.policy).context("No valid 'n' provided")?;

    let stdout = io::stdout();
    glue_trigger::run(&decision, output, &mut stdout.lock())
        .context("Failed to write step output")?;

    Ok(())
}
