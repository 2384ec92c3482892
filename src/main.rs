//! Revenue Projection CLI
//!
//! Command-line interface for running hybrid revenue projections

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use revenue_projection::format::{format_currency, format_percentage, format_revenue};
use revenue_projection::inputs::{
    load_inputs_json, load_scenarios, DetailedInputs, DetailedProjectInputs,
    DetailedRecurringInputs,
};
use revenue_projection::output::{write_projection_csv_path, write_summary_csv};
use revenue_projection::{
    InputBounds, ProjectionConfig, ProjectionResult, RevenueInputs, ScenarioRunner, SimpleInputs,
};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,

    /// Date month labels are anchored to (YYYY-MM-DD); month 1 is the next month
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Skip the calculator's rate limits (growth 0-100, churn 0-50, project growth -50-100)
    #[arg(long, global = true)]
    no_bounds: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the simple profile (24 months, net growth rate)
    Simple {
        #[arg(long, default_value_t = 100_000.0)]
        initial_mrr: f64,
        /// Percent per month
        #[arg(long, default_value_t = 15.0)]
        mrr_growth_rate: f64,
        /// Percent per month
        #[arg(long, default_value_t = 5.0)]
        churn_rate: f64,
        /// Month-1 project revenue
        #[arg(long, default_value_t = 50_000.0)]
        project_revenue: f64,
        /// Percent per year, linear
        #[arg(long, default_value_t = 10.0)]
        project_growth_rate: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Project the detailed profile (customer and pipeline drivers)
    Detailed {
        #[arg(long)]
        current_mrr: f64,
        #[arg(long, default_value_t = 0.0)]
        new_customers_per_month: f64,
        #[arg(long, default_value_t = 0.0)]
        average_mrr_per_customer: f64,
        /// Expansion, percent per month
        #[arg(long, default_value_t = 0.0)]
        monthly_growth_from_existing: f64,
        /// Percent per month
        #[arg(long, default_value_t = 0.0)]
        monthly_churn_rate: f64,
        #[arg(long, default_value_t = 0.0)]
        new_projects_per_month: f64,
        #[arg(long, default_value_t = 0.0)]
        average_project_value: f64,
        /// Days from booking to recognition
        #[arg(long, default_value_t = 0.0)]
        average_time_to_close: f64,
        /// Percent per year, linear
        #[arg(long, default_value_t = 0.0)]
        project_growth_rate: f64,
        #[arg(short, long, default_value_t = 24)]
        months: u32,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Project inputs read from a JSON document (any profile)
    Run {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Project every scenario in a saved-scenario CSV
    Batch {
        /// Scenario CSV (name, initial_mrr, mrr_growth_rate, project_revenue, project_growth_rate, churn_rate)
        #[arg(short, long)]
        scenarios: PathBuf,
        /// Summary CSV output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Write the monthly timeline to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let config = ProjectionConfig {
        as_of: args.as_of,
        ..Default::default()
    };
    let bounds = (!args.no_bounds).then(InputBounds::default);

    match args.command {
        Commands::Simple {
            initial_mrr,
            mrr_growth_rate,
            churn_rate,
            project_revenue,
            project_growth_rate,
            output,
        } => {
            let inputs: RevenueInputs = SimpleInputs {
                initial_mrr,
                mrr_growth_rate,
                churn_rate,
                project_revenue,
                project_growth_rate,
            }
            .into();
            run_single(&inputs, config, bounds.as_ref(), &output)
        }
        Commands::Detailed {
            current_mrr,
            new_customers_per_month,
            average_mrr_per_customer,
            monthly_growth_from_existing,
            monthly_churn_rate,
            new_projects_per_month,
            average_project_value,
            average_time_to_close,
            project_growth_rate,
            months,
            output,
        } => {
            let inputs: RevenueInputs = DetailedInputs {
                recurring: DetailedRecurringInputs {
                    current_mrr,
                    new_customers_per_month,
                    average_mrr_per_customer,
                    monthly_growth_from_existing,
                    monthly_churn_rate,
                },
                projects: DetailedProjectInputs {
                    new_projects_per_month,
                    average_project_value,
                    average_time_to_close,
                    annual_growth_rate: project_growth_rate,
                },
                projection_months: months,
            }
            .into();
            run_single(&inputs, config, bounds.as_ref(), &output)
        }
        Commands::Run { input, output } => {
            let file = File::open(&input)
                .with_context(|| format!("failed to open {}", input.display()))?;
            let inputs = load_inputs_json(file)
                .with_context(|| format!("failed to load inputs from {}", input.display()))?;
            run_single(&inputs, config, bounds.as_ref(), &output)
        }
        Commands::Batch { scenarios, output } => {
            run_batch(&scenarios, output.as_deref(), config, bounds.as_ref())
        }
    }
}

fn run_single(
    inputs: &RevenueInputs,
    config: ProjectionConfig,
    bounds: Option<&InputBounds>,
    output: &OutputArgs,
) -> Result<()> {
    if let Some(bounds) = bounds {
        inputs.check_bounds(bounds)?;
    }

    let runner = ScenarioRunner::new(config);
    let result = runner.run(inputs)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table(&result);
        print_summary(&result);
    }

    if let Some(path) = &output.csv {
        write_projection_csv_path(path, &result.projections)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}

fn run_batch(
    path: &Path,
    output: Option<&Path>,
    config: ProjectionConfig,
    bounds: Option<&InputBounds>,
) -> Result<()> {
    let scenarios = load_scenarios(path)
        .with_context(|| format!("failed to load scenarios from {}", path.display()))?;
    println!("Loaded {} scenarios", scenarios.len());

    if let Some(bounds) = bounds {
        for scenario in &scenarios {
            scenario
                .inputs
                .check_bounds(bounds)
                .with_context(|| format!("scenario '{}' is out of bounds", scenario.name))?;
        }
    }

    let runner = ScenarioRunner::new(config);
    let outcomes = runner.run_batch(&scenarios);

    println!(
        "{:<24} {:>14} {:>14} {:>10} {:>10}",
        "Scenario", "ARR", "Total Rev", "Recurring", "Growth"
    );
    println!("{}", "-".repeat(76));

    let mut summaries = Vec::with_capacity(outcomes.len());
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => {
                let m = &result.metrics;
                println!(
                    "{:<24} {:>14} {:>14} {:>10} {:>10}",
                    outcome.name,
                    format_revenue(m.projected_arr),
                    format_revenue(m.total_revenue_horizon),
                    format_percentage(m.recurring_percentage),
                    format_percentage(m.monthly_growth_rate),
                );
                summaries.push((outcome.name.as_str(), m));
            }
            Err(err) => println!("{:<24} failed: {}", outcome.name, err),
        }
    }

    if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_summary_csv(file, summaries)?;
        println!("\nSummary written to: {}", path.display());
    }

    if outcomes.iter().any(|o| o.result.is_err()) {
        bail!("one or more scenarios failed");
    }
    Ok(())
}

fn print_table(result: &ProjectionResult) {
    println!("Revenue Projection ({} months from {})", result.horizon(), result.as_of);
    println!(
        "{:>5} {:>9} {:>14} {:>14} {:>14} {:>14} {:>16}",
        "Month", "Label", "Existing MRR", "Total MRR", "Projects", "Total Rev", "Cumulative"
    );
    println!("{}", "-".repeat(92));

    for row in &result.projections {
        println!(
            "{:>5} {:>9} {:>14} {:>14} {:>14} {:>14} {:>16}",
            row.month,
            row.month_label,
            format_currency(row.existing_mrr),
            format_currency(row.total_mrr),
            format_currency(row.project_revenue),
            format_currency(row.total_revenue),
            format_currency(row.cumulative_revenue),
        );
    }
}

fn print_summary(result: &ProjectionResult) {
    let m = &result.metrics;
    println!("\nSummary:");
    println!("  Projected ARR:        {}", format_currency(m.projected_arr));
    println!("  Ending MRR:           {}", format_currency(m.ending_mrr));
    println!("  Revenue (window):     {}", format_currency(m.total_revenue_window));
    println!("  Revenue ({} months):  {}", m.horizon_months, format_currency(m.total_revenue_horizon));
    println!(
        "  Revenue mix:          {} recurring / {} project",
        format_percentage(m.recurring_percentage),
        format_percentage(m.project_percentage)
    );
    println!("  Monthly growth:       {}", format_percentage(m.monthly_growth_rate));
    println!("  Current run-rate:     {}", format_currency(m.current_run_rate));
}
