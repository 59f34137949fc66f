use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub const DEFAULT_SOURCE_DIR: &str = "include";
pub const DEFAULT_ROOT: &str = "dcf.hpp";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const DEFAULT_VERSION_LABEL: &str = "0.0.1";

#[derive(Debug, Clone)]
pub struct Config {
    pub source_dir: PathBuf,
    pub root: String,
    pub output_path: PathBuf,
    pub version_label: String,
    pub strict: bool,
    pub verbosity: u8,
    #[cfg(feature = "restore")]
    pub restore_input: Option<PathBuf>,
    #[cfg(feature = "restore")]
    pub restore_path: Option<PathBuf>,
}

impl Config {
    /// Configuration with every default applied for the given root.
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_DIR).join(&root),
            root,
            version_label: DEFAULT_VERSION_LABEL.to_string(),
            strict: false,
            verbosity: 0,
            #[cfg(feature = "restore")]
            restore_input: None,
            #[cfg(feature = "restore")]
            restore_path: None,
        }
    }
}

fn command() -> Command {
    let cmd = Command::new("hppmerge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inlines a header and its quoted includes into one self-contained file")
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Root file, relative to the source directory")
                .default_value(DEFAULT_ROOT)
                .num_args(1),
        )
        .arg(
            Arg::new("source-dir")
                .short('s')
                .long("source-dir")
                .value_name("DIR")
                .help("Directory that include names are resolved against")
                .default_value(DEFAULT_SOURCE_DIR)
                .num_args(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Destination file [default: dist/<ROOT>]")
                .num_args(1),
        )
        .arg(
            Arg::new("label")
                .short('l')
                .long("label")
                .value_name("VERSION")
                .help("Version label written into the banner")
                .default_value(DEFAULT_VERSION_LABEL)
                .num_args(1),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on quoted include lines that do not parse cleanly")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase logging verbosity (-v, -vv, -vvv)")
                .action(ArgAction::Count),
        );

    #[cfg(feature = "restore")]
    let cmd = cmd
        .arg(
            Arg::new("restore")
                .long("restore")
                .value_name("FILE")
                .help("Split a generated file back into its source files")
                .num_args(1),
        )
        .arg(
            Arg::new("restore-path")
                .long("restore-path")
                .value_name("DIR")
                .help("Where restored files are written [default: next to FILE]")
                .requires("restore")
                .num_args(1),
        );

    cmd
}

pub fn parse_args() -> Result<Config> {
    config_from_matches(&command().get_matches())
}

/// Like [`parse_args`] but reports `--help` and usage errors as `Err`.
pub fn config_from_args<I, T>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    config_from_matches(&command().try_get_matches_from(args)?)
}

fn config_from_matches(matches: &ArgMatches) -> Result<Config> {
    let root = matches
        .get_one::<String>("root")
        .cloned()
        .unwrap_or_else(|| DEFAULT_ROOT.to_string());

    if root.trim().is_empty() {
        bail!("Root file name cannot be empty");
    }

    let mut config = Config::new(root);

    if let Some(dir) = matches.get_one::<String>("source-dir") {
        config.source_dir = PathBuf::from(dir);
    }

    if let Some(output) = matches.get_one::<String>("output") {
        config.output_path = PathBuf::from(output);
    }

    if let Some(label) = matches.get_one::<String>("label") {
        config.version_label = label.clone();
    }

    config.strict = matches.get_flag("strict");
    config.verbosity = matches.get_count("verbose");

    #[cfg(feature = "restore")]
    {
        config.restore_input = matches.get_one::<String>("restore").map(PathBuf::from);
        config.restore_path = matches.get_one::<String>("restore-path").map(PathBuf::from);
    }

    Ok(config)
}
