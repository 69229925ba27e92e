use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use h2h_terminal::config::{self, AppConfig};
use h2h_terminal::league::League;

#[derive(Debug, clap::Parser, Clone)]
#[command(about = "Clone or update the footballcsv league repositories")]
struct Args {
    /// directory to sync the repositories into
    #[clap(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// file the run log is appended to
    #[clap(long, default_value = "update_log.txt")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    config::load_dotenv();
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| AppConfig::from_env().data_dir);

    info!("starting update process");
    if let Err(err) = git(&["--version"], None) {
        error!("git is not installed: {err:#}");
        return Err(err);
    }

    let mut failed = 0usize;
    for league in League::ALL {
        if let Err(err) = update_repo(&data_dir, league) {
            error!(repo = league.repo_folder(), "{err:#}");
            failed += 1;
        }
    }

    if failed == 0 {
        info!("update process completed");
    } else {
        info!(failed, "update process completed with errors");
    }
    Ok(())
}

fn init_logging(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open {}", log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

fn update_repo(data_dir: &Path, league: League) -> Result<()> {
    let folder = league.repo_folder();
    let path = data_dir.join(folder);

    if path.exists() {
        info!(repo = folder, "updating");
        git(&["-C", &path.to_string_lossy(), "pull"], None)?;
        info!(repo = folder, "updated successfully");
    } else {
        info!(repo = folder, "cloning for the first time");
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        git(&["clone", league.repo_url(), folder], Some(data_dir))?;
        info!(repo = folder, "cloned successfully");
    }
    Ok(())
}

fn git(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    let output = cmd
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        return Err(anyhow!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
