use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use file_ha::{
    cli::{Cli, Command, DemoArgs, ShellArgs},
    cluster::ClusterController,
    config::ClusterConfig,
    selector::RandomSelector,
    shell,
    transfer::LoggingTransfer,
};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn build_cluster(
    config: ClusterConfig,
    seed: Option<u64>,
) -> ClusterController<RandomSelector, LoggingTransfer> {
    let selector = match seed {
        Some(seed) => RandomSelector::seeded(seed),
        None => RandomSelector::from_entropy(),
    };
    ClusterController::with_parts(config, selector, LoggingTransfer)
}

fn run_demo(config: ClusterConfig, args: DemoArgs) -> Result<()> {
    let mut cluster = build_cluster(config, args.seed);

    for host in ["host1", "host2", "host3", "host4"] {
        cluster.add_host(host);
    }
    let placements = [
        ("file1", "host1"),
        ("file2", "host1"),
        ("file4", "host1"),
        ("file5", "host1"),
        ("file2", "host2"),
        ("file3", "host2"),
        ("file1", "host3"),
        ("file3", "host3"),
        ("file4", "host3"),
        ("file5", "host4"),
    ];
    for (file, host) in placements {
        cluster
            .add_file(file, host)
            .with_context(|| format!("failed to place {file} on {host}"))?;
    }

    println!("Cluster before HA");
    println!("-----------------------------");
    print!("{cluster}");
    println!("-----------------------------");

    info!(failed = ?args.fail, "performing HA");
    let actions = cluster.perform_ha(&args.fail)?;
    for action in &actions {
        println!("{}", action.encode()?);
    }

    println!("Cluster after HA");
    println!("-----------------------------");
    print!("{cluster}");
    println!("-----------------------------");
    Ok(())
}

fn run_shell(config: ClusterConfig, args: ShellArgs) -> Result<()> {
    let mut cluster = build_cluster(config, args.seed);
    let stdin = io::stdin();
    shell::run(&mut cluster, stdin.lock(), io::stdout().lock())
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.limits.resolve()?;
    match cli.command {
        Command::Demo(args) => run_demo(config, args)?,
        Command::Shell(args) => run_shell(config, args)?,
    }

    Ok(())
}
