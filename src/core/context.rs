use std::{collections::BTreeSet, env, path::PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::{
    cli::args::ScanArgs,
    config::{Config, load_config, resolve_path},
    core::{
        aggregator::{Aggregator, Tally},
        discovery::{Discovery, DiscoveryOptions, discover_files},
        filter::ReportMode,
        key_set::KeySet,
        parsers::keys::load_keys,
        writer::Destination,
    },
};

/// Everything a scan needs, resolved before any file is read.
///
/// # Configuration Priority
///
/// 1. CLI arguments and their environment variables (e.g. `--keys`, `KEYTALLY_KEYS`)
/// 2. `.keytallyrc.json` config file, paths relative to the file
/// 3. Built-in defaults
pub struct ScanContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Key source document.
    pub keys_path: PathBuf,

    /// Directory that is walked for source files.
    pub root_dir: PathBuf,

    /// Where the report is written.
    pub destination: Destination,

    pub mode: ReportMode,

    /// Every known key name.
    pub keys: BTreeSet<String>,

    /// Source files to scan.
    pub discovery: Discovery,
}

impl ScanContext {
    /// Create a new `ScanContext` from command line arguments.
    ///
    /// This constructor:
    /// 1. Loads configuration (CLI args > config file > defaults)
    /// 2. Loads the key source document
    /// 3. Discovers source files
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - The key source document is missing, malformed or contains duplicate keys
    /// - The source root does not exist or is not a directory
    pub fn new(args: &ScanArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine current directory")?;
        let config_result = load_config(&cwd)?;

        if !config_result.from_file {
            debug!("no config file found, using default configuration");
        }

        let base_dir = config_result.base_dir;
        let mut config = config_result.config;

        let keys_path = match &args.keys {
            Some(path) => path.clone(),
            None => resolve_path(&base_dir, &config.keys_file),
        };
        let root_dir = match &args.source_root {
            Some(path) => path.clone(),
            None => resolve_path(&base_dir, &config.source_root),
        };

        if let Some(format) = args.format {
            config.format = format;
        }
        let output = match (&args.output, &config.output) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => resolve_path(&base_dir, path),
            (None, None) => PathBuf::from(config.format.default_file_name()),
        };
        if !args.extensions.is_empty() {
            config.extensions = args.extensions.clone();
        }
        if args.threads.is_some() {
            config.threads = args.threads;
        }
        config.unused_only |= args.unused_only;
        config.validate()?;

        // Key loading and discovery are independent.
        let (keys, discovery) = rayon::join(
            || load_keys(&keys_path),
            || {
                discover_files(
                    &root_dir,
                    &DiscoveryOptions {
                        extensions: &config.extensions,
                        includes: &config.includes,
                        ignores: &config.ignores,
                    },
                )
            },
        );
        let keys = keys.context("Failed to load keys")?;
        let mut discovery = discovery.context("Failed to discover source files")?;

        // Never count the key file or a previous report as source.
        let destination = Destination::parse(&output);
        match &destination {
            Destination::File(path) => discovery.exclude(&[keys_path.as_path(), path.as_path()]),
            Destination::Stdout => discovery.exclude(&[keys_path.as_path()]),
        }

        debug!(
            keys = keys.len(),
            files = discovery.files.len(),
            keys_path = %keys_path.display(),
            root = %root_dir.display(),
            "scan context ready"
        );

        Ok(Self {
            mode: ReportMode::from_unused_only(config.unused_only),
            destination,
            config,
            keys_path,
            root_dir,
            keys,
            discovery,
        })
    }

    /// Count every key across every discovered file.
    pub fn tally(&self) -> Result<Tally> {
        Aggregator::with_threads(self.config.threads)
            .run(KeySet::seed(&self.keys), self.discovery.files.clone())
            .context("Failed to start worker pool")
    }
}
