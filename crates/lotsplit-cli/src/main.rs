use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use lotsplit_cli::{commands, PlanFile};
use lotsplit_core::AreaUnit;
use lotsplit_session::SubdivisionSession;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn plan_arg() -> Arg {
    Arg::new("plan")
        .long("plan")
        .short('p')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Subdivision plan file (TOML, or JSON with a .json extension)")
}

fn cli() -> Command {
    Command::new("lotsplit")
        .version(lotsplit_cli::VERSION)
        .about("Plan property subdivisions: lot shares, cost base and commit requests")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(
            Command::new("preview")
                .about("Show each lot's share and allocated cost base")
                .arg(plan_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Run the submission checks")
                .arg(plan_arg()),
        )
        .subcommand(
            Command::new("submit")
                .about("Validate and print the commit request (dry run)")
                .arg(plan_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an area between units")
                .arg(
                    Arg::new("value")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .help("Area to convert"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .default_value("hectares")
                        .value_parser(value_parser!(AreaUnit))
                        .help("Unit of the value: sqms, hectares or acres"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .default_value("sqms")
                        .value_parser(value_parser!(AreaUnit))
                        .help("Target unit: sqms, hectares or acres"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_session(args: &ArgMatches) -> Result<SubdivisionSession> {
    let path = args
        .get_one::<PathBuf>("plan")
        .context("missing --plan")?;
    PlanFile::load(path)?.into_session()
}

fn run(matches: &ArgMatches) -> Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("preview", args)) => {
            let session = load_session(args)?;
            commands::preview(&session, args.get_flag("json"), &mut out)?;
            Ok(true)
        }
        Some(("validate", args)) => {
            let session = load_session(args)?;
            commands::validate(&session, &mut out)
        }
        Some(("submit", args)) => {
            let mut session = load_session(args)?;
            commands::submit(&mut session, &mut out)
        }
        Some(("convert", args)) => {
            let value = *args.get_one::<f64>("value").context("missing value")?;
            let from = *args.get_one::<AreaUnit>("from").context("missing --from")?;
            let to = *args.get_one::<AreaUnit>("to").context("missing --to")?;
            writeln!(out, "{}", commands::convert(value, from, to))?;
            Ok(true)
        }
        _ => Ok(true),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    if !run(&matches)? {
        std::process::exit(1);
    }
    Ok(())
}
