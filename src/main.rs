use gravbox::{bench_gravity, load_into, save, ForceModel, Session, DEFAULT_DT, DEFAULT_THETA};

use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless Newtonian gravity sandbox engine")]
struct Args {
    /// System file to load; defaults to the stock Sun/Earth/Jupiter system
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 365)]
    ticks: u64,

    /// Simulated seconds per tick
    #[arg(short, long, default_value_t = DEFAULT_DT)]
    dt: f64,

    /// Evaluate forces through the Barnes-Hut tree instead of exact pairwise sums
    #[arg(long)]
    tree: bool,

    /// Opening-angle threshold for the tree
    #[arg(long, default_value_t = DEFAULT_THETA)]
    theta: f64,

    /// Write the final system to this file
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Run the force-evaluation benchmark instead of a simulation
    #[arg(long)]
    bench: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity(args.theta);
        return Ok(());
    }

    let mut session = Session::default_system();
    if let Some(file) = &args.file {
        load_into(file, &mut session.bodies)?;
    }

    session.dt = args.dt;
    session.model = if args.tree {
        ForceModel::BarnesHut { theta: args.theta }
    } else {
        ForceModel::Direct
    };
    session.running = true;

    for _ in 0..args.ticks {
        session.tick();
    }

    for body in &session.bodies {
        let p = body.position_au();
        println!(
            "{:<12} x = {:+.4} AU, y = {:+.4} AU, z = {:+.4} AU",
            body.name, p.x, p.y, p.z
        );
    }

    if let Some(out) = &args.out {
        save(out, &session.bodies)?;
    }

    Ok(())
}
