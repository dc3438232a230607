
use indexmap::IndexMap;
use itertools::Itertools;
use log::{LevelFilter, error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use pathobench::cli::compare::{CompareSettings, check_compare_settings};
use pathobench::cli::core::{Commands, get_cli};
use pathobench::cli::stats::{StatsSettings, check_stats_settings};
use pathobench::compare::{CompareConfigBuilder, compare_records};
use pathobench::data_types::concordance_benchmark::ConcordanceBenchmark;
use pathobench::data_types::pathogenicity::Grouping;
use pathobench::parsing::competitor::CompetitorReader;
use pathobench::parsing::pipeline::PipelineReader;
use pathobench::parsing::truth_set::TruthSet;
use pathobench::util::json_io::save_json;
use pathobench::writers::contingency_summary::{read_contingency_summary, write_contingency_summary};
use pathobench::writers::evidence_summary::{write_double_counting_summary, write_evidence_summary};
use pathobench::writers::statistics_summary::write_statistics_summary;

/// Writes the full output file set for one compared source and logs the headline numbers.
/// # Arguments
/// * `label` - the source label, used as the output filename prefix
/// * `benchmark` - the completed comparison results for the source
/// * `output_folder` - the shared output directory
fn save_source_outputs(label: &str, benchmark: &ConcordanceBenchmark, output_folder: &std::path::Path) -> anyhow::Result<()> {
    info!("\tTotal records: {}", benchmark.total_records());
    info!("\tMatched records: {}", benchmark.matched_records());
    info!("\tMissing records: {}", benchmark.missing_records());
    for (codes, count) in benchmark.double_counting().iter() {
        warn!("\tPotential evidence double-counting [{}]: {count} records", codes.iter().join("+"));
    }

    let contingency_fn = output_folder.join(format!("{label}.tsv"));
    write_contingency_summary(benchmark.contingency(), Grouping::Standard, &contingency_fn)?;

    let merged_fn = output_folder.join(format!("{label}_merged.tsv"));
    write_contingency_summary(benchmark.contingency(), Grouping::Merged, &merged_fn)?;

    let statistics_fn = output_folder.join(format!("{label}_statistics.tsv"));
    write_statistics_summary(benchmark.contingency(), Grouping::Standard, &statistics_fn)?;

    let merged_statistics_fn = output_folder.join(format!("{label}_merged_statistics.tsv"));
    write_statistics_summary(benchmark.contingency(), Grouping::Merged, &merged_statistics_fn)?;

    let evidence_fn = output_folder.join(format!("{label}_evidence_codes.tsv"));
    write_evidence_summary(benchmark.evidence_codes(), &evidence_fn)?;

    let double_counting_fn = output_folder.join(format!("{label}_double_counting.tsv"));
    write_double_counting_summary(benchmark.double_counting(), &double_counting_fn)?;

    Ok(())
}

fn run_compare(settings: CompareSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // create the primary output folder
    info!("Creating output folder at {:?}...", settings.output_folder);
    match std::fs::create_dir_all(&settings.output_folder) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while creating output folder: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // create a debug folder if specified, the CLI options get saved there
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("Creating debug folder at {debug_folder:?}...");
        match std::fs::create_dir_all(debug_folder) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while creating debug folder: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }

        // save the CLI options
        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(&settings, &cli_json) {
            error!("Error while saving CLI options: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // check if we're in debug mode
    let skip_count = settings.skip_records;
    let take_count = settings.take_records;
    let debug_run: bool = skip_count != 0 || take_count != usize::MAX;
    if debug_run {
        warn!("Debug run detected, output may be truncated.");
        warn!("Records to skip: {skip_count}");
        warn!("Records to process: {take_count}");
    }

    // load the truth set fully into memory; the annotation sources stay streamed
    info!("Pre-loading truth set into memory...");
    let truth_set = match TruthSet::from_json(&settings.truth_set_filename) {
        Ok(ts) => ts,
        Err(e) => {
            error!("Error while loading truth set: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Loaded {} truth records.", truth_set.len());

    // build our configuration
    let compare_config = match CompareConfigBuilder::default()
        .merge_vus(settings.merge_vus)
        .build() {
        Ok(cc) => cc,
        Err(e) => {
            error!("Error while building compare config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    // assemble the labeled sources in CLI order, pipelines first
    let pipeline_sources: IndexMap<String, PathBuf> = settings.pipeline_labels.iter().cloned()
        .zip(settings.pipeline_filenames.iter().cloned())
        .collect();

    // one sequential pass per pipeline source
    for (label, pipeline_fn) in pipeline_sources.iter() {
        info!("Comparing {label:?} annotations to the truth set...");
        let reader = match PipelineReader::new(pipeline_fn) {
            Ok(r) => r,
            Err(e) => {
                error!("Error while opening {pipeline_fn:?}: {e:#}");
                std::process::exit(exitcode::IOERR);
            }
        };

        let benchmark = match compare_records(reader.skip(skip_count).take(take_count), &truth_set, compare_config) {
            Ok(b) => b,
            Err(e) => {
                error!("Error while comparing {label:?}: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        };

        if let Err(e) = save_source_outputs(label, &benchmark, &settings.output_folder) {
            error!("Error while saving output files for {label:?}: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // and one pass for the competitor source
    if let Some(competitor_fn) = settings.competitor_filename.as_deref() {
        let label = &settings.competitor_label;
        info!("Comparing {label:?} annotations to the truth set...");
        let reader = match CompetitorReader::new(competitor_fn) {
            Ok(r) => r,
            Err(e) => {
                error!("Error while opening {competitor_fn:?}: {e:#}");
                std::process::exit(exitcode::IOERR);
            }
        };

        let benchmark = match compare_records(reader.skip(skip_count).take(take_count), &truth_set, compare_config) {
            Ok(b) => b,
            Err(e) => {
                error!("Error while comparing {label:?}: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        };

        if let Err(e) = save_source_outputs(label, &benchmark, &settings.output_folder) {
            error!("Error while saving output files for {label:?}: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Comparisons completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_stats(settings: StatsSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_stats_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // load the previously written contingency summary
    info!("Loading contingency summary...");
    let table = match read_contingency_summary(&settings.contingency_filename) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while loading contingency summary: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Loaded {} classified records.", table.total());

    let grouping = if settings.merged { Grouping::Merged } else { Grouping::Standard };
    info!("Saving output statistics to {:?}...", settings.output_filename);
    if let Err(e) = write_statistics_summary(&table, grouping, &settings.output_filename) {
        error!("Error while saving statistics file: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Statistics completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        },
        Commands::Stats(settings) => {
            run_stats(*settings);
        }
    }

    info!("Process finished successfully.");
}
