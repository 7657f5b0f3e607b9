use std::{
    env,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use color_eyre as ey;
use ey::eyre::{Context, ContextCompat};
use paklist_content::{build_manifest, ManifestConfig, SkipList};
use paklist_shared::{
    chrono,
    log::{self, error, info},
};

/// List of assets that are already packaged. Expected next to the executable.
const SKIP_LIST_FILE_NAME: &str = "R5Reloaded_Asset_Database.db";
const OUTPUT_FILE_NAME: &str = "output.json";
const LOG_FILE_NAME: &str = "log.txt";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArguments {
    /// Directory containing the exported assets
    root: PathBuf,

    /// File listing the assets that are already packaged [default: next to the executable]
    #[arg(long)]
    skip_list: Option<PathBuf>,

    /// Destination of the manifest [default: next to the executable]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log file that is overwritten on every run [default: next to the executable]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// YAML file overriding the manifest metadata, group order and sort priorities
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Most verbose level that is logged
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> ey::Result<ExitCode> {
    color_eyre::install()?;
    let command_line_arguments = CommandLineArguments::parse();

    let executable_directory = executable_directory()?;
    let log_file_path = command_line_arguments
        .log_file
        .clone()
        .unwrap_or_else(|| executable_directory.join(LOG_FILE_NAME));
    setup_logging(command_line_arguments.log_level.into(), &log_file_path)?;

    info!("Manifest builder starting...");
    let result = run(&command_line_arguments, &executable_directory);
    if let Err(err) = &result {
        error!("Error: {err:#}");
    }
    info!("Conversion ended at: {}", chrono::Local::now());
    log::logger().flush();

    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

fn run(command_line_arguments: &CommandLineArguments, executable_directory: &Path) -> ey::Result<()> {
    let config = match &command_line_arguments.config {
        Some(config_path) => {
            info!("Loading configuration: {}", config_path.display());
            ManifestConfig::from_yaml_file(config_path)
                .wrap_err_with(|| format!("Failed to load configuration '{}'", config_path.display()))?
        }
        None => ManifestConfig::default(),
    };

    let skip_list_path = command_line_arguments
        .skip_list
        .clone()
        .unwrap_or_else(|| executable_directory.join(SKIP_LIST_FILE_NAME));
    let skip_list = SkipList::load(&skip_list_path).unwrap_or_else(|err| {
        error!("Failed to load skip list '{}': {err}", skip_list_path.display());
        SkipList::empty()
    });

    let document =
        build_manifest(&command_line_arguments.root, &config, &skip_list).wrap_err("Failed to build the manifest")?;
    let json = document.to_json_pretty().wrap_err("Failed to serialize the manifest")?;

    let output_path = command_line_arguments
        .output
        .clone()
        .unwrap_or_else(|| executable_directory.join(OUTPUT_FILE_NAME));
    fs::write(&output_path, json).wrap_err_with(|| format!("Failed to write the manifest to '{}'", output_path.display()))?;

    info!("Manifest with {} assets successfully written", document.files.len());
    info!("Output Location: {}", output_path.display());
    Ok(())
}

fn executable_directory() -> ey::Result<PathBuf> {
    let executable = env::current_exe().wrap_err("Failed to determine the path of the executable")?;
    let directory = executable
        .parent()
        .wrap_err_with(|| format!("Executable '{}' has no parent directory", executable.display()))?;
    Ok(directory.to_owned())
}

/// Logs to stdout and to a log file that is truncated first.
fn setup_logging(level: log::LevelFilter, log_file_path: &Path) -> ey::Result<()> {
    let log_file =
        File::create(log_file_path).wrap_err_with(|| format!("Failed to create log file '{}'", log_file_path.display()))?;
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stdout())
        .chain(log_file)
        .apply()
        .wrap_err("Failed to install the logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_line_is_consistent() {
        CommandLineArguments::command().debug_assert();
    }

    #[test]
    fn root_is_required() {
        assert!(CommandLineArguments::try_parse_from(["paklist_tool"]).is_err());
    }

    #[test]
    fn defaults() {
        let arguments = CommandLineArguments::try_parse_from(["paklist_tool", "assets"]).unwrap();
        assert_eq!(arguments.root, PathBuf::from("assets"));
        assert_eq!(arguments.skip_list, None);
        assert_eq!(arguments.output, None);
        assert_eq!(arguments.log_level, LogLevel::Info);
        assert_eq!(log::LevelFilter::from(arguments.log_level), log::LevelFilter::Info);
    }

    #[test]
    fn overrides() {
        let arguments = CommandLineArguments::try_parse_from([
            "paklist_tool",
            "assets",
            "--skip-list",
            "db.txt",
            "-o",
            "manifest.json",
            "--log-level",
            "trace",
        ])
        .unwrap();
        assert_eq!(arguments.skip_list, Some(PathBuf::from("db.txt")));
        assert_eq!(arguments.output, Some(PathBuf::from("manifest.json")));
        assert_eq!(arguments.log_level, LogLevel::Trace);
    }
}
