use crate::io::WriteDataMode;
use clap::{Arg, ArgMatches, Command};
use core_affinity::{get_core_ids, set_for_current};
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) mode: Mode,
    pub(crate) number_of_threads: NonZeroUsize,
    pub(crate) core_affinity: bool,
    pub(crate) write_data: WriteDataMode,
    pub(crate) iterations: usize,
    pub(crate) check_stability: bool,
    pub(crate) restart: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Run,
            number_of_threads: NonZeroUsize::MIN,
            core_affinity: false,
            write_data: WriteDataMode::Frequency(100),
            iterations: 4000,
            check_stability: false,
            restart: None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Mode {
    Run,
    Info,
}

pub(crate) fn command() -> Command {
    clap::command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1)")
                .value_parser(clap::value_parser!(NonZeroUsize))
                .default_value("1")
                .global(true),
        )
        .arg(
            Arg::new("core_affinity")
                .long("affinity")
                .help("Pin each worker thread to a core")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Run the simulation")
                .arg(
                    Arg::new("write_data")
                        .short('w')
                        .long("write-data")
                        .value_name("FREQUENCY")
                        .help("Write a snapshot every FREQUENCY time steps (0 disables)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    Arg::new("write_steps")
                        .long("write-steps")
                        .value_name("STEPS")
                        .help("Write snapshots only at the listed time steps")
                        .value_parser(clap::value_parser!(usize))
                        .num_args(1..)
                        .conflicts_with("write_data"),
                )
                .arg(
                    Arg::new("iterations")
                        .long("iterations")
                        .value_name("ITER")
                        .help("The number of time steps to run")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4000"),
                )
                .arg(
                    Arg::new("check_stability")
                        .long("check-stability")
                        .help("Stop with an error when a fluid cell density blows up")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("restart")
                        .long("restart")
                        .value_name("FILE")
                        .help("Resume from a checkpoint file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("info").about("Print a summary of the case and exit"))
}

pub(crate) fn get_args() -> CliResult<ArgMatches> {
    Ok(command().get_matches())
}

pub(crate) fn parse_matches(matches: &ArgMatches) -> CliResult<Config> {
    let number_of_threads = *matches
        .get_one::<NonZeroUsize>("number_of_threads")
        .ok_or("missing number of threads")?;
    let core_affinity = matches.get_flag("core_affinity");
    match matches.subcommand() {
        Some(("run", sub_m)) => {
            let write_data = match sub_m.get_many::<usize>("write_steps") {
                Some(steps) => WriteDataMode::ListOfSteps(steps.copied().collect()),
                None => WriteDataMode::Frequency(
                    *sub_m
                        .get_one::<usize>("write_data")
                        .ok_or("missing write frequency")?,
                ),
            };
            let iterations = *sub_m
                .get_one::<usize>("iterations")
                .ok_or("missing number of iterations")?;
            Ok(Config {
                mode: Mode::Run,
                number_of_threads,
                core_affinity,
                write_data,
                iterations,
                check_stability: sub_m.get_flag("check_stability"),
                restart: sub_m.get_one::<PathBuf>("restart").cloned(),
            })
        }
        Some(("info", _)) => Ok(Config {
            mode: Mode::Info,
            number_of_threads,
            core_affinity,
            ..Default::default()
        }),
        _ => Err("a subcommand is required: run or info".into()),
    }
}

pub(crate) fn init_global_pool(num_threads: usize, pin_all_cores: bool) -> CliResult<()> {
    if pin_all_cores {
        let cores = get_core_ids().ok_or("could not list the system cores")?;
        if cores.is_empty() {
            return Err("no cores available for pinning".into());
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .start_handler(move |idx| {
                let core = cores[idx % cores.len()];
                let _ = set_for_current(core);
            })
            .build_global()?;
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    };
    Ok(())
}
