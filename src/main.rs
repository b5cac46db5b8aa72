use anyhow::{Context, Result};
use buffet::model::FormConfig;
use buffet::nav::keys::parse_script;
use buffet::theme::Theme;
use buffet::ui::{buffer_lines, CrosstermSurface, ScriptedSurface, Session, Surface};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FORM: &str = include_str!("../demos/players.yaml");

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

fn env_u16(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|s| s.parse::<u16>().ok())
}

// The UI owns the terminal, so logs only go to the file named by BUFFET_LOG.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("BUFFET_LOG") else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", PathBuf::from(&path).display()))?;
    let filter =
        EnvFilter::try_from_env("BUFFET_LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn load_form() -> Result<FormConfig> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("BUFFET_CONFIG"))
        .map(PathBuf::from);
    match path {
        Some(p) => FormConfig::load(&p),
        None => FormConfig::from_yaml(DEFAULT_FORM),
    }
}

fn run_headless(cfg: &FormConfig) -> Result<()> {
    let rows = env_u16("BUFFET_ROWS").unwrap_or(7);
    let cols = env_u16("BUFFET_COLS").or(cfg.width).unwrap_or(30);
    let script = std::env::var("BUFFET_KEYS").unwrap_or_default();
    let keys = parse_script(&script)?;
    let mut surface = ScriptedSurface::scripted(rows, cols, keys)?;
    let mut menu = cfg.build(cfg.rows_for(rows))?;
    tracing::info!(rows, cols, "headless run");
    let result = menu.run(&mut surface)?;
    if env_flag("BUFFET_SMOKE_SUMMARY") {
        let summary = serde_json::json!({
            "result": result,
            "outcome": menu.outcome(),
            "cursor": menu.cursor(),
            "screen": buffer_lines(surface.terminal().backend().buffer()),
        });
        println!("{summary}");
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn run_interactive(cfg: &FormConfig) -> Result<()> {
    let session = Session::enter()?;
    let result = (|| -> Result<buffet::MenuResult> {
        let mut surface = CrosstermSurface::stdout(Theme::from_env())?;
        let (rows, _) = surface.size()?;
        let mut menu = cfg.build(cfg.rows_for(rows))?;
        menu.run(&mut surface)
    })();
    // Restore before printing
    drop(session);
    let result = result?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cfg = load_form()?;
    if env_flag("BUFFET_HEADLESS") {
        run_headless(&cfg)
    } else {
        run_interactive(&cfg)
    }
}
