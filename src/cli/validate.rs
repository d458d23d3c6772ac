use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Validate IPASC file integrity
pub fn run(file: PathBuf) -> Result<()> {
    use ipasc_data::validator::validate_ipasc_file;

    info!("Validating {}", file.display());

    match validate_ipasc_file(&file) {
        Ok(report) => {
            println!("{}", report.format_colored());

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {e:#}");
            std::process::exit(1);
        }
    }
}
