use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use checkin_core::{
    load_settings, render::ATTENDEE_LIST_TITLE, render_view, CheckInController, CheckInInput,
    PageSurface, Settings,
};
use clap::{Parser, Subcommand};
use shared::leader::{compute_leader, Leader};
use storage::FileStore;
use tracing_subscriber::EnvFilter;

const PAGE_TITLE: &str = "Intel Sustainability Summit: Event Check-In";

#[derive(Parser, Debug)]
#[command(name = "checkin", about = "Event check-in tracker")]
struct Cli {
    /// Settings file (TOML). Defaults to ./checkin.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the saved attendance state.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check in one attendee.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        team: String,
    },
    /// Show totals, progress and the current leader.
    Status,
    /// List attendees, newest first.
    List,
    /// Write the check-in page as a standalone HTML file.
    Render {
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the effective settings.
    Settings,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(cli.config.as_deref())?;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &settings)?;

    if let Command::Settings = cli.command {
        let mut effective = settings.clone();
        effective.data_dir = Some(data_dir);
        print!("{}", effective.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut page = PageSurface::for_bindings(&settings.regions);
    let mut controller =
        CheckInController::bootstrap(&settings, FileStore::new(&data_dir), &mut page);

    match cli.command {
        Command::Add { name, team } => {
            let input = CheckInInput::new(name, team);
            if controller.submit(&input, &mut page, Instant::now()).is_err() {
                for alert in page.alerts() {
                    eprintln!("{alert}");
                }
                return Ok(ExitCode::from(2));
            }
            if let Some(greeting) = page.text(&settings.regions.greeting) {
                println!("{greeting}");
            }
            print_status(&controller);
        }
        Command::Status => print_status(&controller),
        Command::List => print_list(&controller),
        Command::Render { out } => {
            fs::write(&out, page.to_html_document(PAGE_TITLE))
                .with_context(|| format!("failed to write page to '{}'", out.display()))?;
            println!("wrote {}", out.display());
        }
        Command::Settings => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_data_dir(cli_dir: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = cli_dir.or(settings.data_dir.as_deref()) {
        return Ok(dir.to_path_buf());
    }
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir; pass --data-dir"))?;
    Ok(base.join("checkin"))
}

fn status_lines(controller: &CheckInController<FileStore>) -> Vec<String> {
    let view = render_view(controller.state(), controller.goal());
    let mut lines = vec![format!("{} ({:.0}%)", view.goal_text, view.progress_percent)];
    for (team, count) in view.team_counts {
        lines.push(format!("  {}: {count}", team.label()));
    }
    match view.celebration {
        Some(message) => lines.push(message),
        None if view.total > 0 => lines.push(match compute_leader(controller.state().teams()) {
            Leader::Outright { team, count } => format!("Leading: {} ({count})", team.label()),
            Leader::Tie { count, .. } => format!("Tied at {count}"),
        }),
        None => {}
    }
    lines
}

fn print_status(controller: &CheckInController<FileStore>) {
    for line in status_lines(controller) {
        println!("{line}");
    }
}

fn print_list(controller: &CheckInController<FileStore>) {
    let view = render_view(controller.state(), controller.goal());
    println!("{ATTENDEE_LIST_TITLE} ({})", view.attendees.len());
    for row in &view.attendees {
        println!("  {}  {}  {}", row.checked_in_at, row.name, row.team_label());
    }
}
