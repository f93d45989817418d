//! Validate command implementation.

use clap::Args;

use crate::error::{MixError, Result};
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, validate_config, validate_manifest};

use super::ManifestArgs;

/// Check the manifest and component images without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub collection: ManifestArgs,

    /// Only check the manifest, not the component images
    #[arg(long)]
    pub no_assets: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let manifest = args.collection.load()?;
    printer.status("Checking", &display_path(&args.collection.manifest));

    let result = if args.no_assets {
        validate_config(&manifest)
    } else {
        validate_manifest(&manifest)
    };

    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(MixError::Config {
            message: format!(
                "{} has {}",
                display_path(&args.collection.manifest),
                plural(result.error_count(), "error", "errors")
            ),
            help: None,
        });
    }

    printer.info(
        "Space",
        &format!(
            "{} unique combinations for {}",
            manifest.space(),
            plural(manifest.count, "requested image", "requested images")
        ),
    );

    Ok(())
}
