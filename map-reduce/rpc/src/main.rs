mod flaky_handler;
mod job_config;

use clap::Parser;
use flaky_handler::FlakyHandler;
use job_config::JobConfig;
use map_reduce_core::{PhaseDescriptor, PhaseSummary, Scheduler, WorkerAddress};
use map_reduce_rpc::{RpcTaskInvoker, TaskServer, WorkerRegistry};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a map-reduce job on local fault-injecting workers")]
struct Args {
    /// JSON job configuration
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Overrides the number of local workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Overrides the per-call failure percentage
    #[arg(short, long)]
    failure_rate: Option<u32>,
}

async fn run_job(
    config: &JobConfig,
    registry: &WorkerRegistry,
) -> (PhaseSummary, PhaseSummary) {
    let scheduler = Scheduler::new(RpcTaskInvoker::new(config.rpc.clone()));

    info!("=== MAP PHASE ===");
    let map = scheduler
        .schedule(
            PhaseDescriptor::map(
                config.job_name.as_str(),
                config.input_files.clone(),
                config.n_reduce,
            ),
            registry.subscribe(),
        )
        .await;

    info!("=== REDUCE PHASE ===");
    let reduce = scheduler
        .schedule(
            PhaseDescriptor::reduce(
                config.job_name.as_str(),
                config.input_files.len(),
                config.n_reduce,
            ),
            registry.subscribe(),
        )
        .await;

    (map, reduce)
}

fn print_summary(summary: &PhaseSummary) {
    println!(
        "{}: {} tasks, {} attempts, {} failed, {} workers",
        summary.phase, summary.n_tasks, summary.attempts, summary.failures, summary.workers
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start_time = Instant::now();
    let args = Args::parse();

    let mut config = match JobConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}", args.config.display(), e);
            warn!("Using default configuration...");
            JobConfig::default()
        }
    };
    if let Some(workers) = args.workers {
        config.num_workers = workers;
    }
    if let Some(failure_rate) = args.failure_rate {
        config.failure_rate = failure_rate;
    }
    info!("Configuration: {:?}", config);

    let shutdown = CancellationToken::new();
    let servers = TaskTracker::new();
    let mut addresses: Vec<WorkerAddress> = Vec::with_capacity(config.num_workers);

    for id in 0..config.num_workers {
        let handler = FlakyHandler::new(
            id,
            config.failure_rate,
            Duration::from_millis(config.task_latency_ms),
        );
        let server = TaskServer::bind("127.0.0.1:0", handler).await?;
        addresses.push(server.address()?);
        servers.spawn(server.run(shutdown.clone()));
    }

    let registry = WorkerRegistry::new();
    if let Some((late, early)) = addresses.split_last() {
        for worker in early {
            registry.register(worker.clone());
        }

        let registry = registry.clone();
        let late = late.clone();
        let delay = Duration::from_millis(config.late_registration_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            registry.register(late);
        });
    }

    tokio::select! {
        (map, reduce) = run_job(&config, &registry) => {
            println!("\n=== RESULTS ===");
            let workers = registry.workers();
            println!(
                "Workers: {}",
                workers.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            );
            print_summary(&map);
            print_summary(&reduce);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("=== Ctrl+C received, initiating shutdown ===");
        }
    }

    shutdown.cancel();
    servers.close();
    servers.wait().await;

    println!("\nTotal time: {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
