use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use obs_cli::config::{RunConfig, load_config};
use obs_core::{
    DirectoryStore, MemoryStore, ObservationStore, PipelineOptions, build_bundle,
    bundle_filename, run_pipeline,
};
use obs_ingest::read_rows;
use obs_model::RunSummary;
use obs_terminology::{
    DEFAULT_TERMINOLOGY_URL, OntoserverClient, StaticResolver, TerminologyResolver,
};

use crate::cli::GenerateArgs;
use crate::summary::apply_table_style;

/// Outcome of a `generate` run, for summary rendering.
#[derive(Debug)]
pub struct GenerateResult {
    pub input: PathBuf,
    /// None for dry runs.
    pub output_dir: Option<PathBuf>,
    pub bundle_file: Option<String>,
    pub summary: RunSummary,
}

pub fn run_columns() {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Required", "Description"]);
    apply_table_style(&mut table);
    table.add_row(vec!["code", "yes", "Code within the coding system"]);
    table.add_row(vec!["system", "yes", "Coding system URI"]);
    table.add_row(vec!["text_description", "yes", "Human-readable test description"]);
    table.add_row(vec!["panel_description", "no", "Panel the test belongs to"]);
    table.add_row(vec!["value", "no", "Numeric result value"]);
    table.add_row(vec!["units", "no", "Display units"]);
    table.add_row(vec!["ucum", "with value", "UCUM unit code"]);
    table.add_row(vec!["LowRefRange", "no", "Low reference-range bound"]);
    table.add_row(vec!["HighRefRange", "no", "High reference-range bound"]);
    table.add_row(vec!["RR Display", "no", "Reference-range display text"]);
    table.add_row(vec!["dateobserved", "no", "Observation date (day/month/year)"]);
    println!("{table}");
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let span = info_span!("generate", input = %args.input.display());
    let _guard = span.enter();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };

    let rows = read_rows(&args.input).context("read input")?;
    info!(rows = rows.len(), "processing lab results");

    // With --no-lookup the driver never consults the resolver; the stand-in
    // only satisfies the pipeline signature.
    let resolver: Box<dyn TerminologyResolver> = if args.no_lookup {
        Box::new(StaticResolver::new())
    } else {
        let url = args
            .terminology_url
            .clone()
            .or_else(|| config.terminology_url.clone())
            .unwrap_or_else(|| DEFAULT_TERMINOLOGY_URL.to_string());
        Box::new(OntoserverClient::new(url).context("build terminology client")?)
    };

    let options = PipelineOptions {
        build: config.build_options(),
        collect_documents: args.bundle,
        skip_lookup: args.no_lookup,
    };

    let (summary, output_dir, bundle_file) = if args.dry_run {
        let mut store = MemoryStore::new();
        let outcome = run_pipeline(&rows, resolver.as_ref(), &mut store, &options);
        (outcome.summary, None, None)
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.input));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
        let mut store = DirectoryStore::new(&dir);
        let outcome = run_pipeline(&rows, resolver.as_ref(), &mut store, &options);

        let mut bundle_file = None;
        if args.bundle && !outcome.documents.is_empty() {
            let bundle = build_bundle(&outcome.documents);
            let filename =
                bundle_filename(&chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
            let bytes = serde_json::to_vec_pretty(&bundle).context("serialize bundle")?;
            store
                .write(&filename, &bytes)
                .with_context(|| format!("write bundle {filename}"))?;
            info!(%filename, entries = bundle.entry.len(), "created bundle");
            bundle_file = Some(filename);
        }

        (outcome.summary, Some(dir), bundle_file)
    };

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        warnings = summary.warnings.len(),
        "run complete"
    );

    Ok(GenerateResult {
        input: args.input.clone(),
        output_dir,
        bundle_file,
        summary,
    })
}

fn default_output_dir(input: &std::path::Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("out"), |parent| parent.join("out"))
}
