use clap::{Parser, Subcommand};
use linprog_problems::Scenario;
use linprog_solver::{Model, Solution, SolutionStatus, Solver};
use std::time::Duration;
use tracing::info;

mod logging;

#[derive(Parser)]
#[command(name = "linprog")]
#[command(about = "Solve the bundled linear and integer programming examples", long_about = None)]
struct Cli {
    /// Log filter, overrides LINPROG_LOG (e.g. debug, linprog_solver=trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available scenarios
    List,
    /// Print a scenario's model in LP format
    Show {
        /// The scenario name (see `list`)
        scenario: String,
    },
    /// Solve a scenario and print the solution
    Solve {
        /// The scenario name (see `list`)
        scenario: String,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty", value_parser = ["pretty", "json"])]
        format: String,
        /// Stop branch-and-bound after this many nodes
        #[arg(long)]
        max_nodes: Option<usize>,
        /// Stop branch-and-bound after this many seconds
        #[arg(long)]
        time_limit: Option<f64>,
        /// Show constraint activity
        #[arg(short, long)]
        constraints: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Commands::List => {
            for scenario in linprog_problems::catalog() {
                println!("{:16} {:12} {}", scenario.name, scenario.exercise, scenario.description);
            }
        }
        Commands::Show { scenario } => {
            let (_, model) = load(&scenario);
            print!("{}", model);
        }
        Commands::Solve {
            scenario,
            format,
            max_nodes,
            time_limit,
            constraints,
        } => {
            let (scenario, model) = load(&scenario);

            let mut solver = Solver::new();
            if let Some(max) = max_nodes {
                solver = solver.with_max_nodes(max);
            }
            if let Some(secs) = time_limit {
                match Duration::try_from_secs_f64(secs) {
                    Ok(limit) => solver = solver.with_time_limit(limit),
                    Err(e) => {
                        eprintln!("Invalid time limit {}: {}", secs, e);
                        std::process::exit(1);
                    }
                }
            }

            info!(
                component = "cli",
                operation = "solve",
                scenario = scenario.name,
                variables = model.num_variables(),
                constraints = model.num_constraints(),
                "Solving scenario"
            );
            let solution = solver.solve(&model);

            if format == "json" {
                let output = serde_json::json!({
                    "scenario": scenario.name,
                    "solution": solution,
                });
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing solution: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_solution(&scenario, &model, &solution, constraints);
            }
        }
    }
}

fn load(name: &str) -> (Scenario, Model) {
    let scenario = match linprog_problems::find(name) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run `linprog list` to see the available scenarios");
            std::process::exit(1);
        }
    };

    match scenario.model() {
        Ok(model) => (scenario, model),
        Err(e) => {
            eprintln!("Model error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_solution(scenario: &Scenario, model: &Model, solution: &Solution, constraints: bool) {
    println!("Scenario: {} ({})", scenario.name, scenario.exercise);
    println!("Description: {}", scenario.description);
    println!(
        "Model: {} variables ({} integral), {} constraints",
        model.num_variables(),
        model.num_integral(),
        model.num_constraints()
    );
    println!();

    println!("Status: {}", solution.status.as_str().to_uppercase());
    if let Some(objective) = solution.objective_value {
        println!("Objective: {:.4}", objective);
    }
    if model.is_mixed_integer()
        && let Some(bound) = solution.stats.root_bound
    {
        println!("Root relaxation: {:.4}", bound);
    }
    println!(
        "Nodes: {}, simplex iterations: {}",
        solution.stats.nodes, solution.stats.simplex_iterations
    );
    for warning in &solution.stats.warnings {
        println!("Warning: {}", warning);
    }

    if !solution.has_solution() {
        if solution.status == SolutionStatus::Infeasible {
            println!();
            println!("No assignment satisfies every constraint.");
        }
        return;
    }

    println!();
    println!("Values (nonzero):");
    for (name, value) in solution.iter() {
        if value.abs() > 1e-9 {
            println!("  {:24} {:12.4}", name, value);
        }
    }

    if constraints {
        println!();
        println!("Constraints:");
        for (i, c) in solution.constraints.iter().enumerate() {
            let name = c.name.clone().unwrap_or_else(|| format!("c{}", i));
            println!(
                "  {:28} {:12.4} {} {:12.4}  slack {:10.4}{}",
                name,
                c.activity,
                c.op.symbol(),
                c.rhs,
                c.slack,
                if c.binding { "  (binding)" } else { "" }
            );
        }
    }
}
