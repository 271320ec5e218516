//! Init command implementation

use crate::cli::args::InitArgs;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::MonitorConfig;
use crate::error::{Error, Result};

pub fn run_init(args: &InitArgs, level: LogLevel) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(Error::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    let yaml = MonitorConfig::default().to_yaml_string()?;
    if let Some(parent) = args.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_path("create", parent, e))?;
    }
    std::fs::write(&args.path, yaml).map_err(|e| Error::io_path("write", &args.path, e))?;

    log(level, LogLevel::Normal, &format!("Wrote default configuration to {}", args.path.display()));
    Ok(())
}
