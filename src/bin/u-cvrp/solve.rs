use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use u_cvrp::constructive::{savings_with_history, Heuristic, MergeRecord};
use u_cvrp::evaluation::{check_solution, score_solution};
use u_cvrp::io::{format_solution, read_instance, read_solution};
use u_cvrp::models::{Instance, Solution};
use u_cvrp::render::render_svg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    All,
    NearestNeighbour,
    Savings,
}

impl HeuristicArg {
    fn selected(self) -> &'static [Heuristic] {
        match self {
            HeuristicArg::All => &Heuristic::ALL,
            HeuristicArg::NearestNeighbour => &[Heuristic::NearestNeighbour],
            HeuristicArg::Savings => &[Heuristic::Savings],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct SolveArgs {
    /// CVRPLIB instance file (.vrp)
    input: PathBuf,

    /// Reference solution to score alongside the heuristics (.sol)
    #[arg(short, long)]
    solution: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = HeuristicArg::All)]
    heuristic: HeuristicArg,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write an SVG plot per solution into this folder
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// Write a .sol file per constructed solution into this folder
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct RunReport {
    title: String,
    /// `None` for the reference solution.
    heuristic: Option<Heuristic>,
    routes: Vec<Vec<usize>>,
    distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merges: Option<Vec<MergeRecord>>,
    violations: Vec<String>,
}

impl RunReport {
    fn new(
        title: String,
        heuristic: Option<Heuristic>,
        solution: &Solution,
        instance: &Instance,
    ) -> Self {
        let violations = check_solution(solution, instance)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        if !violations.is_empty() {
            warn!(%title, count = violations.len(), "solution violates constraints");
        }
        Self {
            title,
            heuristic,
            routes: solution
                .routes()
                .iter()
                .map(|r| r.customers().to_vec())
                .collect(),
            distance: score_solution(solution, instance),
            stated_cost: None,
            merges: None,
            violations,
        }
    }

    /// Stem for the plot and solution files written for this run.
    fn file_stem(&self) -> &'static str {
        match self.heuristic {
            None => "reference",
            Some(Heuristic::NearestNeighbour) => "nearest-neighbour",
            Some(Heuristic::Savings) => "savings",
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    instance: Option<&'a str>,
    customers: usize,
    capacity: u32,
    runs: Vec<RunReport>,
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let instance = read_instance(&args.input)
        .with_context(|| format!("failed to read instance {}", args.input.display()))?;
    info!(
        name = instance.name().unwrap_or("unnamed"),
        customers = instance.num_customers(),
        capacity = instance.capacity(),
        "loaded instance"
    );

    let mut runs = Vec::new();
    let mut solutions = Vec::new();

    if let Some(path) = &args.solution {
        let file = read_solution(path)
            .with_context(|| format!("failed to read solution {}", path.display()))?;
        let solution = file.to_solution(&instance);
        let mut report =
            RunReport::new("Reference Solution".to_string(), None, &solution, &instance);
        report.stated_cost = file.cost;
        runs.push(report);
        solutions.push(solution);
    }

    for &heuristic in args.heuristic.selected() {
        let (solution, merges) = match heuristic {
            Heuristic::Savings => savings_with_history(&instance)
                .map(|(solution, merges)| (solution, Some(merges))),
            Heuristic::NearestNeighbour => heuristic.build(&instance).map(|s| (s, None)),
        }
        .with_context(|| format!("{heuristic} heuristic failed"))?;
        let mut report = RunReport::new(
            format!("{heuristic} Heuristic"),
            Some(heuristic),
            &solution,
            &instance,
        );
        report.merges = merges;
        runs.push(report);
        solutions.push(solution);
    }

    if let Some(dir) = &args.plot_dir {
        for (run, solution) in runs.iter().zip(&solutions) {
            let svg = render_svg(solution, &instance, &run.title);
            write_output(dir, &format!("{}.svg", run.file_stem()), &svg)?;
        }
    }

    if let Some(dir) = &args.out_dir {
        for (run, solution) in runs.iter().zip(&solutions) {
            if run.heuristic.is_none() {
                continue;
            }
            let text = format_solution(solution, Some(run.distance));
            write_output(dir, &format!("{}.sol", run.file_stem()), &text)?;
        }
    }

    let report = Report {
        instance: instance.name(),
        customers: instance.num_customers(),
        capacity: instance.capacity(),
        runs,
    };

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_text(report: &Report<'_>) {
    for run in &report.runs {
        println!("{:?}", run.routes);
        match run.stated_cost {
            Some(cost) => println!(
                "{} Distance: {:.2} (stated {cost})",
                run.title, run.distance
            ),
            None => println!("{} Distance: {:.2}", run.title, run.distance),
        }
        if let Some(merges) = &run.merges {
            println!("  {} merges", merges.len());
        }
        for violation in &run.violations {
            println!("  ! {violation}");
        }
    }
}

fn write_output(dir: &Path, file_name: &str, contents: &str) -> Result<(), anyhow::Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote file");
    Ok(())
}
