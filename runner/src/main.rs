use std::env;
use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use scheduler::{
    build, ChannelHandle, ChannelNotifier, CompletionEvent, ConfigError, PolicyKind,
    SchedulerConfig,
};

mod logger;
mod simulation;
mod workload;

use simulation::Simulation;
use workload::{Arrival, WorkloadError};

const USAGE: &str = "usage: runner <rr|mlfq|sjf> [workload-file|-] [quantum_ms]";

#[derive(Debug)]
enum CliError {
    Usage,
    Quantum(String),
    Config(ConfigError),
    Workload(WorkloadError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage => write!(f, "{}", USAGE),
            CliError::Quantum(value) => write!(f, "invalid quantum '{}'", value),
            CliError::Config(err) => write!(f, "{}", err),
            CliError::Workload(err) => write!(f, "{}", err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<WorkloadError> for CliError {
    fn from(err: WorkloadError) -> Self {
        CliError::Workload(err)
    }
}

fn parse_args(args: &[String]) -> Result<(SchedulerConfig, Vec<Arrival>), CliError> {
    let policy: PolicyKind = args.first().ok_or(CliError::Usage)?.parse()?;
    let mut config = SchedulerConfig::new(policy);

    let workload = match args.get(1).map(String::as_str) {
        None | Some("-") => workload::default_workload(),
        Some(path) => workload::load(Path::new(path))?,
    };

    if let Some(value) = args.get(2) {
        let quantum = value.parse().map_err(|_| CliError::Quantum(value.clone()))?;
        config = config.with_quantum(quantum);
    }

    Ok((config, workload))
}

fn run(args: &[String]) -> Result<(), CliError> {
    let (config, workload) = parse_args(args)?;
    let scheduler = build(&config)?;

    let mut notifier: ChannelNotifier<Vec<u8>> = ChannelNotifier::new();
    for arrival in workload.iter() {
        notifier.register(ChannelHandle::new(arrival.pid.get()), Vec::new());
    }

    let mut simulation = Simulation::new(scheduler, notifier, workload.clone(), config.tick_ms);
    simulation.run_to_completion();
    log::info!(
        "{} processes completed by {}",
        simulation.completed().len(),
        simulation.now()
    );
    let notifier = simulation.into_notifier();

    println!(
        "{:>5} {:>8} {:>9} {:>9} {:>11} {:>8}",
        "pid", "arrival", "required", "done", "turnaround", "waiting"
    );
    for arrival in workload.iter() {
        let channel = ChannelHandle::new(arrival.pid.get());
        let event = notifier
            .channel(channel)
            .and_then(|buf| CompletionEvent::decode(buf));

        match event {
            Some(event) => {
                let turnaround = event.time.since(arrival.arrival);
                println!(
                    "{:>5} {:>8} {:>9} {:>9} {:>11} {:>8}",
                    arrival.pid.get(),
                    arrival.arrival.get(),
                    arrival.required_time_ms,
                    event.time.get(),
                    turnaround,
                    turnaround.saturating_sub(arrival.required_time_ms)
                );
            }
            None => log::warn!("no completion message received for pid {}", arrival.pid),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logger::init(logger::level_from_env()) {
        eprintln!("cannot install logger: {}", err);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
