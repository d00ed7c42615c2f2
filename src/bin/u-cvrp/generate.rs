use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use u_cvrp::generate::{random_instance, GeneratorConfig};
use u_cvrp::io::format_instance;

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of customers
    #[arg(short = 'n', long, default_value_t = 30)]
    customers: usize,

    /// Vehicle capacity
    #[arg(short, long, default_value_t = 100)]
    capacity: u32,

    /// Largest customer demand
    #[arg(long, default_value_t = 30)]
    max_demand: u32,

    /// Side length of the square customers are placed in
    #[arg(long, default_value_t = 100.0)]
    grid_size: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Instance name written to the NAME field
    #[arg(long)]
    name: Option<String>,

    /// Output .vrp file
    #[arg(long, short = 'o')]
    out: PathBuf,
}

pub fn run(args: GenerateArgs) -> Result<(), anyhow::Error> {
    let config = GeneratorConfig {
        customers: args.customers,
        capacity: args.capacity,
        max_demand: args.max_demand,
        grid_size: args.grid_size,
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let name = args
        .name
        .unwrap_or_else(|| format!("random-n{}-s{}", args.customers + 1, args.seed));
    let instance = random_instance(&config, &mut rng)?.with_name(name);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.out, format_instance(&instance))
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    info!(
        customers = instance.num_customers(),
        total_demand = instance.total_demand(),
        path = %args.out.display(),
        "generated instance"
    );
    Ok(())
}
