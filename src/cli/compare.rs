
use anyhow::bail;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_optional_filename, check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CompareSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    pathobench_version: String,

    /// ClinGen truth set (JSON)
    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "truth-set")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_set_filename: PathBuf,

    /// Pipeline annotation file (JSON-lines), provided once per pipeline
    #[clap(short = 'p')]
    #[clap(long = "pipeline-annotations")]
    #[clap(value_name = "JSONL")]
    #[clap(help_heading = Some("Input/Output"))]
    pub pipeline_filenames: Vec<PathBuf>,

    /// The label to use for the corresponding pipeline annotation file [default: "pipeline_#"]
    #[clap(long = "pipeline-label")]
    #[clap(value_name = "LABEL")]
    #[clap(help_heading = Some("Input/Output"))]
    pub pipeline_labels: Vec<String>,

    /// Competitor annotation file (TSV)
    #[clap(short = 'c')]
    #[clap(long = "competitor-annotations")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub competitor_filename: Option<PathBuf>,

    /// The label to use for the competitor annotation file
    #[clap(long = "competitor-label")]
    #[clap(value_name = "LABEL")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "competitor")]
    pub competitor_label: String,

    /// Output directory containing all summary files
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Collapses VUS sub-tier predictions (VUS+, VUS++) into plain VUS at comparison time
    #[clap(long = "merge-vus")]
    #[clap(help_heading = Some("Compare parameters"))]
    pub merge_vus: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,

    // Debug options that are generally hidden and just for quick testing
    /// Skips a number of records per source (debug only); non-0 values may create partial values in output
    #[clap(hide = true)]
    #[clap(long = "skip")]
    #[clap(default_value = "0")]
    pub skip_records: usize,

    /// Takes a number of records per source (debug only); non-0 values may create partial values in output
    #[clap(hide = true)]
    #[clap(long = "take")]
    #[clap(default_value = "0")]
    pub take_records: usize,
}

pub fn check_compare_settings(mut settings: CompareSettings) -> anyhow::Result<CompareSettings> {
    // hard code the version in
    settings.pathobench_version = FULL_VERSION.clone();
    info!("Pathobench version: {:?}", &settings.pathobench_version);
    info!("Sub-command: compare");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.truth_set_filename, "Truth set")?;
    check_optional_filename(settings.competitor_filename.as_deref(), "Competitor annotations")?;
    info!("\tTruth set: {:?}", &settings.truth_set_filename);

    if settings.pipeline_filenames.is_empty() && settings.competitor_filename.is_none() {
        bail!("At least one of --pipeline-annotations or --competitor-annotations is required");
    }
    if settings.pipeline_labels.len() > settings.pipeline_filenames.len() {
        bail!("More pipeline labels than pipeline annotation files were provided");
    }

    // check the pipeline inputs and fill in any missing labels
    for (i, pipeline_fn) in settings.pipeline_filenames.iter().enumerate() {
        check_required_filename(pipeline_fn, format!("Pipeline annotations #{i}").as_str())?;
        info!("\tPipeline annotations #{i}: {pipeline_fn:?}");

        if settings.pipeline_labels.len() <= i {
            settings.pipeline_labels.push(format!("pipeline_{i}"));
        }
        info!("\t\tLabel: {:?}", settings.pipeline_labels[i]);
    }

    if let Some(competitor_fn) = settings.competitor_filename.as_deref() {
        info!("\tCompetitor annotations: {competitor_fn:?}");
        info!("\t\tLabel: {:?}", settings.competitor_label);
    } else {
        info!("\tCompetitor annotations: None");
    }

    // labels become output filename prefixes, so they must be unique
    let mut all_labels: Vec<&String> = settings.pipeline_labels.iter().collect();
    if settings.competitor_filename.is_some() {
        all_labels.push(&settings.competitor_label);
    }
    let unique_labels: std::collections::BTreeSet<&String> = all_labels.iter().copied().collect();
    if unique_labels.len() != all_labels.len() {
        bail!("Source labels must be unique: {all_labels:?}");
    }

    // outputs
    info!("Outputs:");
    info!("\tOutput folder: {:?}", &settings.output_folder);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    // other misc parameters
    info!("Compare parameters:");
    info!("\tMerge VUS: {}", if settings.merge_vus { "ENABLED" } else { "DISABLED" });

    // 0 is just a sentinel for everything
    if settings.take_records == 0 {
        settings.take_records = usize::MAX;
    }

    Ok(settings)
}
