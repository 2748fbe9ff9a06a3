use aws_reports::pipeline::{self, RunOptions};
use aws_reports::report::{Report, ReportVariant};
use aws_reports::writer;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aws-reports")]
#[command(about = "EC2 instance reports across all AWS profiles and regions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report instances with public IP addresses (CSV + multi-sheet XLSX)
    Exposed {
        /// CSV output path
        #[arg(long, default_value = "aws_externally_exposed_objects.csv")]
        output: PathBuf,

        /// XLSX output path, one sheet per profile plus a combined sheet
        #[arg(long, default_value = "aws_externally_exposed_objects.xlsx")]
        workbook: PathBuf,

        /// Comma-separated regions to query instead of DescribeRegions
        #[arg(long, value_delimiter = ',')]
        regions: Vec<String>,
    },
    /// Report every instance with its type and state (CSV)
    Inventory {
        /// CSV output path
        #[arg(long, default_value = "aws_instances_report.csv")]
        output: PathBuf,

        /// Comma-separated regions to query instead of DescribeRegions
        #[arg(long, value_delimiter = ',')]
        regions: Vec<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Exposed {
            output: PathBuf::from("aws_externally_exposed_objects.csv"),
            workbook: PathBuf::from("aws_externally_exposed_objects.xlsx"),
            regions: Vec::new(),
        }
    }
}

fn region_override(regions: Vec<String>) -> Option<Vec<String>> {
    if regions.is_empty() {
        None
    } else {
        Some(regions)
    }
}

fn print_summary(report: &Report) {
    println!(
        "{} instances across {} profiles",
        report.records.len(),
        report.profiles().len()
    );

    if !report.failures.is_empty() {
        println!("Failed queries:");
        for failure in &report.failures {
            println!(
                "  {} / {}: {}",
                failure.profile, failure.region, failure.reason
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command.unwrap_or_default() {
        Command::Exposed {
            output,
            workbook,
            regions,
        } => {
            let options = RunOptions {
                variant: ReportVariant::Exposed,
                region_override: region_override(regions),
            };
            let report = pipeline::run(&options).await?;

            let rows = report.rows(ReportVariant::Exposed);
            writer::write_csv(&output, ReportVariant::Exposed.header(), &rows)?;

            // The workbook is built from the CSV rather than the in-memory
            // records, so the sheets always mirror the file on disk.
            let csv_rows = writer::read_csv_rows(&output)?;
            writer::write_workbook(
                &workbook,
                &csv_rows,
                ReportVariant::Exposed.profile_column(),
            )?;

            println!(
                "Report saved to {} and {}",
                output.display(),
                workbook.display()
            );
            print_summary(&report);
        }
        Command::Inventory { output, regions } => {
            let options = RunOptions {
                variant: ReportVariant::Inventory,
                region_override: region_override(regions),
            };
            let report = pipeline::run(&options).await?;

            let rows = report.rows(ReportVariant::Inventory);
            writer::write_csv(&output, ReportVariant::Inventory.header(), &rows)?;

            println!("Report saved to {}", output.display());
            for (instance_type, count) in report.instance_type_counts() {
                println!("  {}: {}", instance_type, count);
            }
            print_summary(&report);
        }
    }

    Ok(())
}
