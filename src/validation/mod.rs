//! Validation for collection manifests.
//!
//! Runs a suite of checks against a manifest and its component images and
//! reports errors and warnings. Used by `traitmix validate` and before every
//! `traitmix build`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::config::Manifest;
use crate::error::Result;
use crate::output::{plural, Printer};

/// Run the configuration checks (no file access).
pub fn validate_config(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_traits(manifest));
    result.merge(checks::check_shared_variants(manifest));
    result.merge(checks::check_settings(manifest));

    result
}

/// Run the configuration checks plus the component image checks.
pub fn validate_manifest(manifest: &Manifest) -> ValidationResult {
    let mut result = validate_config(manifest);

    result.merge(checks::check_unused_components(manifest));
    if manifest.components.is_dir() {
        result.merge(checks::check_assets(manifest));
    }

    result
}

/// Gate for commands that sample: print any config diagnostics and fail
/// if there are errors.
pub fn require_valid_config(manifest: &Manifest, printer: &Printer) -> Result<()> {
    let validation = validate_config(manifest);
    if validation.has_warnings() || validation.has_errors() {
        print_diagnostics(&validation, printer);
    }
    validation.ensure_ok()
}

/// Print diagnostics and a summary line.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.is_error());
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning("Passed", &plural(warnings, "warning", "warnings"));
    } else {
        printer.success("Passed", "no problems found");
    }
}
