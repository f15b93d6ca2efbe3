//! Configuration Layer Management
//!
//! Layers run options as defaults < configuration file < CLI flags.

use std::path::PathBuf;

use crate::cli::args::{DiscoveryArgs, ReportArgs};
use cribcheck_rs::RunOptions;

/// Implicit configuration files looked up in the working directory.
const IMPLICIT_CONFIG_FILES: [&str; 2] = [".cribcheck.yml", ".cribcheck.yaml"];

/// Apply CLI arguments on top of already loaded options
pub trait ApplyCliArgs<T> {
    /// Override every option the arguments set explicitly
    fn apply_cli_args(&mut self, args: &T);
}

impl ApplyCliArgs<DiscoveryArgs> for RunOptions {
    fn apply_cli_args(&mut self, args: &DiscoveryArgs) {
        if let Some(root) = &args.root {
            self.root_directory = root.clone();
        }
        if let Some(language) = &args.language {
            self.language = language.clone();
        }
        if !args.suffixes.is_empty() {
            self.file_suffixes = args.suffixes.clone();
        }
        if let Some(basecode) = &args.basecode {
            self.basecode = Some(basecode.clone());
        }
        if let Some(subdirectory) = &args.subdirectory {
            self.subdirectory = Some(subdirectory.clone());
        }
        // Patterns from the command line add to the configured ones
        for pattern in &args.excluded {
            if !self.excluded_files.contains(pattern) {
                self.excluded_files.push(pattern.clone());
            }
        }
        if let Some(file) = &args.exclusion_file {
            self.exclusion_file = Some(file.clone());
        }
        if !args.legacy_roots.is_empty() {
            self.legacy_root_directories = args.legacy_roots.clone();
        }
    }
}

impl ApplyCliArgs<ReportArgs> for RunOptions {
    fn apply_cli_args(&mut self, args: &ReportArgs) {
        self.apply_cli_args(&args.discovery);
        if let Some(maximum) = args.max_comparisons {
            self.maximum_comparisons = maximum;
        }
        if let Some(sensitivity) = args.match_sensitivity {
            self.match_sensitivity = sensitivity;
        }
    }
}

/// Load the configuration file named by `--config`, or an implicit one, or defaults.
pub fn load_file_layer(args: &DiscoveryArgs) -> anyhow::Result<RunOptions> {
    let implicit_config_path = if args.config.is_none() {
        IMPLICIT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    } else {
        None
    };

    match args.config.as_ref().or(implicit_config_path.as_ref()) {
        Some(config_path) => RunOptions::from_yaml_file(config_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load configuration from {}: {}",
                config_path.display(),
                e
            )
        }),
        None => Ok(RunOptions::default()),
    }
}

/// Build validated options for a command from every configuration layer.
pub fn build_layered_options<T>(discovery: &DiscoveryArgs, args: &T) -> anyhow::Result<RunOptions>
where
    RunOptions: ApplyCliArgs<T>,
{
    let mut options = load_file_layer(discovery)?;
    options.apply_cli_args(args);
    options.apply_language_defaults()?;
    options
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(options)
}
