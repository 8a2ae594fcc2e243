use clap::Parser;
use hsdec_process::imaging::ConstantChannel;
use hsdec_process::{config, output, process};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "process")]
#[command(about = "Median-filter and normalize an HSDEC image")]
#[command(long_about = "\
Median-filter and normalize an HSDEC image

Reads INPUTFILE, replaces every channel value with the median of the pixel
and its four direct neighbours (pixels outside the image count as 0), then
stretches each channel so its observed range covers 0..255, and writes the
result to OUTPUTFILE.

File format:

  HSDEC <width> <height>
  <red> <green> <blue>     # one line per pixel, row-major
  ...

Exit status is 0 on success and 1 on any failure.

Run 'process --gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Image to read
    #[arg(value_name = "INPUTFILE", required_unless_present = "gen_config")]
    input: Option<PathBuf>,

    /// Where to write the processed image
    #[arg(value_name = "OUTPUTFILE", required_unless_present = "gen_config")]
    output: Option<PathBuf>,

    /// Config file (TOML); stock defaults apply to anything it leaves out
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// What to do with a channel that has a single value across the image
    #[arg(long, value_enum, value_name = "POLICY")]
    constant_channel: Option<ConstantChannel>,

    /// Write a JSON summary of the run to FILE
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Print per-channel ranges and the saved file
    #[arg(short, long)]
    verbose: bool,

    /// Print a stock config file with all options documented
    #[arg(long, conflicts_with_all = ["input", "output"])]
    gen_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors share the exit status of every other failure
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }
    let (Some(input), Some(output_path)) = (cli.input, cli.output) else {
        return Err("Usage: process INPUTFILE OUTPUTFILE".into());
    };

    let mut process_config = config::load_config(cli.config.as_deref())?;
    if let Some(policy) = cli.constant_channel {
        process_config.normalize.constant_channel = policy;
    }

    let report = process::process(&input, &output_path, &process_config)?;
    output::print_report(&report, cli.verbose);

    if let Some(report_path) = cli.report {
        process::write_report(&report, &report_path)?;
    }
    Ok(())
}
