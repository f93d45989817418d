//! Build command implementation.
//!
//! Generates the unique combinations, renders one PNG per combination and
//! writes the metadata table.

use std::path::PathBuf;

use clap::Args;

use crate::config::Manifest;
use crate::error::Result;
use crate::export::{build_records, prepare_output_dir, MetadataFile, Prepared};
use crate::generate::{all_unique, make_rng, Generator};
use crate::output::{display_path, plural, Printer, Progress};
use crate::render::{LayerRenderer, LayerSet};
use crate::validation::require_valid_config;

use super::ManifestArgs;

/// Width of the progress bars in cells.
const BAR_WIDTH: usize = 32;

/// Generate the collection images and metadata
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub collection: ManifestArgs,

    /// Output directory (overrides `output`)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Rejected draws allowed per image before giving up
    #[arg(long)]
    pub max_retries: Option<u64>,

    /// Delete an existing, non-empty output directory
    #[arg(long)]
    pub force: bool,

    /// Render images on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// Options that shape a build beyond the manifest itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub force: bool,
    pub parallel: bool,
}

/// What a finished build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub images: usize,
    pub unique: bool,
    pub output: PathBuf,
    pub metadata: PathBuf,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let mut manifest = args.collection.load()?;
    if let Some(output) = args.output {
        manifest.output = output;
    }
    if args.max_retries.is_some() {
        manifest.max_retries = args.max_retries;
    }

    let options = BuildOptions {
        force: args.force,
        parallel: args.parallel,
    };

    build_collection(&manifest, options, printer)?;
    Ok(())
}

/// Run the whole pipeline for a loaded manifest.
pub fn build_collection(
    manifest: &Manifest,
    options: BuildOptions,
    printer: &Printer,
) -> Result<BuildSummary> {
    require_valid_config(manifest, printer)?;

    // Phase 1: unique combinations
    let mut generator = Generator::new(&manifest.traits)?;
    if let Some(retries) = manifest.max_retries {
        generator = generator.with_max_retries(retries);
    }
    let mut rng = make_rng(manifest.seed);

    printer.status(
        "Combining",
        &format!(
            "{} from {} combinations",
            plural(manifest.count, "image", "images"),
            generator.space()
        ),
    );
    let progress = Progress::new(printer, "Combining", manifest.count, BAR_WIDTH);
    let combinations = generator.generate_with(manifest.count, &mut rng, |n| progress.update(n))?;
    progress.finish();

    let unique = all_unique(&combinations);
    printer.info("Unique", &unique.to_string());

    let records = build_records(combinations, &manifest.name, &manifest.description);

    // Phase 2: decode layers before touching the output directory
    let layers = LayerSet::for_records(manifest, &records)?;
    printer.status(
        "Loaded",
        &format!(
            "{} from {}",
            plural(layers.len(), "layer", "layers"),
            display_path(&manifest.components)
        ),
    );

    match prepare_output_dir(&manifest.output, options.force)? {
        Prepared::Cleared => printer.warning(
            "Removed",
            &format!("previous contents of {}", display_path(&manifest.output)),
        ),
        Prepared::Created | Prepared::ReusedEmpty => {}
    }

    // Phase 3: images and metadata
    let mut metadata = MetadataFile::create(
        &manifest.metadata_path(),
        manifest.delimiter,
        &manifest.traits,
    )?;
    let renderer = LayerRenderer::new(&layers).with_background(manifest.background);
    let progress = Progress::new(printer, "Assembling", records.len(), BAR_WIDTH);

    if options.parallel {
        renderer.render_all_parallel(&records, &manifest.output, |n| progress.update(n))?;
        for record in &records {
            metadata.write_record(record)?;
        }
    } else {
        for (i, record) in records.iter().enumerate() {
            renderer.render_to(record, &manifest.output)?;
            metadata.write_record(record)?;
            progress.update(i + 1);
        }
    }
    progress.finish();

    let images = metadata.rows();
    let metadata_path = metadata.finish()?;

    printer.success(
        "Finished",
        &format!(
            "{} and {} in {}",
            plural(images, "image", "images"),
            display_path(&metadata_path),
            display_path(&manifest.output)
        ),
    );

    Ok(BuildSummary {
        images,
        unique,
        output: manifest.output.clone(),
        metadata: metadata_path,
    })
}
