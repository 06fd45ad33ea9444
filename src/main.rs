//! WC DSP command-line interface
//!
//! Runs the HRV, step counting and energy expenditure pipelines on CSV input.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use wc_dsp::io::measurements::{read_measurements, read_subjects};
use wc_dsp::io::results::{write_energy_estimates, write_results};
use wc_dsp::io::sensor::read_sensor_csv;
use wc_dsp::preprocessing::interpolation::InterpolationMethod;
use wc_dsp::{
    analyze_patients_detailed, count_steps, estimate_energy_expenditure, AnalysisConfig,
};

#[derive(Parser)]
#[command(name = "wc-dsp")]
#[command(version)]
#[command(about = "Signal analysis for wearable sensor recordings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file; missing fields use defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Parallel workers (default: CPU-1)
    #[arg(short, long, global = true)]
    jobs: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute RMSSD, respiration rate and LF/HF for every adult patient
    Hrv {
        /// Patient metadata CSV (File, Age (years), Gender)
        #[arg(short, long, default_value = "data/patient-info.csv")]
        patients: PathBuf,

        /// Directory holding <File>.txt RR interval files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Results CSV
        #[arg(short, long, default_value = "analysis_results.csv")]
        output: PathBuf,

        /// Use cubic spline instead of linear interpolation
        #[arg(long)]
        cubic: bool,

        /// Print the run summary as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Count steps in a gyroscope recording (time,wx,wy,wz)
    Steps {
        /// Gyroscope CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Sampling frequency in Hz
        #[arg(long)]
        sampling_frequency: Option<f64>,

        /// Print per-window results as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Estimate energy expenditure from exercise test measurements
    Energy {
        /// Measurement CSV (ID_test, HR, VO2, VCO2, ...)
        #[arg(short, long)]
        measurements: PathBuf,

        /// Subject info CSV (ID_test, Sex, Age, Weight, ...)
        #[arg(short, long)]
        subjects: PathBuf,

        /// Output CSV
        #[arg(short, long, default_value = "energy_expenditure.csv")]
        output: PathBuf,
    },
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1).max(1))
        .unwrap_or(1)
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            Ok(AnalysisConfig::from_json_file(path)?)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = load_config(cli.config.as_deref())?;

    let jobs = cli.jobs.map(|j| j.max(1)).unwrap_or_else(default_jobs);
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()?;

    let t0 = Instant::now();

    match cli.command {
        Commands::Hrv {
            patients,
            data_dir,
            output,
            cubic,
            json,
        } => {
            if cubic {
                config.hrv.interpolation = InterpolationMethod::CubicSpline;
            }
            let batch = analyze_patients_detailed(&patients, &data_dir, &config.hrv)?;
            write_results(&output, &batch.results)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&batch.metadata)?);
            } else {
                for result in &batch.results {
                    println!(
                        "{}: age={} gender={} RMSSD={:.2} ms resp={:.2} bpm LF/HF={:.3}",
                        result.file_id,
                        result.age,
                        result.gender,
                        result.rmssd,
                        result.respiration_rate_bpm,
                        result.lf_hf_ratio
                    );
                }
            }
            log::info!(
                "Analysis complete. {}/{} patients written to {}",
                batch.metadata.patients_analyzed,
                batch.metadata.patients_total,
                output.display()
            );
        }
        Commands::Steps {
            input,
            sampling_frequency,
            json,
        } => {
            if let Some(fs) = sampling_frequency {
                config.steps.sampling_frequency = fs;
            }
            let samples = read_sensor_csv(&input)?;
            let result = count_steps(&samples, &config.steps)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Step count: {:.2}", result.total_steps);
            }
        }
        Commands::Energy {
            measurements,
            subjects,
            output,
        } => {
            let measurements = read_measurements(&measurements)?;
            let subjects = read_subjects(&subjects)?;
            let estimates = estimate_energy_expenditure(&measurements, &subjects, &config.energy);
            write_energy_estimates(&output, &estimates)?;
            println!("{} estimates written to {}", estimates.len(), output.display());
        }
    }

    log::debug!("Done in {:.0} ms", t0.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}
