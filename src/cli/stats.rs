
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct StatsSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    pathobench_version: String,

    /// Contingency summary file (TSV) previously written by the compare sub-command
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input-contingency")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub contingency_filename: PathBuf,

    /// Output statistics file (CSV/TSV)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-statistics")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Reports over the merged three-category view (P, VUS, B)
    #[clap(long = "merged")]
    #[clap(help_heading = Some("Statistics parameters"))]
    pub merged: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_stats_settings(mut settings: StatsSettings) -> anyhow::Result<StatsSettings> {
    // hard code the version in
    settings.pathobench_version = FULL_VERSION.clone();
    info!("Pathobench version: {:?}", &settings.pathobench_version);
    info!("Sub-command: stats");
    info!("Inputs:");

    check_required_filename(&settings.contingency_filename, "Contingency summary")?;
    info!("\tContingency summary: {:?}", &settings.contingency_filename);

    info!("Outputs:");
    info!("\tStatistics: {:?}", &settings.output_filename);

    info!("Statistics parameters:");
    info!("\tCategory view: {}", if settings.merged { "MERGED" } else { "STANDARD" });

    Ok(settings)
}
