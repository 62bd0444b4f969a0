use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use hirschfye_qmc::{
    free_level_tau, init_tracing, read_run_config, weiss_matrix, HirschFyeSolver, Result,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.yml")]
    config: String,
}

fn run(args: &Args) -> Result<()> {
    let conf = read_run_config(&args.config)?;
    let beta = conf.beta();

    // isolated level as the Weiss field of both spins
    let g0 = weiss_matrix(&free_level_tau(conf.level_energy, beta, conf.n_tau)?);

    let mut solver = HirschFyeSolver::new(conf.solver)?;
    let mut v = solver.initial_field(conf.n_tau);
    let out = solver.solve(&g0, &g0, &mut v)?;

    println!("Hirsch-Fye QMC Results for an Isolated Level");
    println!("--------------------------------------------");
    println!("Slices: {}, beta: {:.4}, U: {:.4}", conf.n_tau, beta, conf.solver.u);
    println!("Acceptance rate: {:.4}", out.acceptance_rate());
    println!("{:>10} {:>14} {:>14}", "tau", "G_up", "G_dw");
    let (up, dw) = (out.tau_up(), out.tau_dw());
    for l in 0..conf.n_tau {
        println!("{:>10.4} {:>14.8} {:>14.8}", l as f64 * conf.solver.dtau_mc, up[l], dw[l]);
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
