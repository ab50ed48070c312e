use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::clock::ClockStyle;
use crate::constants::{DEFAULT_REFRESH_INTERVAL_MINS, FACE_HEIGHT, FACE_WIDTH, MAX_DISPLAY_SIDE};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration. Every field is optional so files and
/// CLI flags can be layered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub clock: Option<ClockConfig>,
    pub refresh: Option<RefreshConfig>,
    pub display: Option<DisplayConfig>,
    pub companion: Option<CompanionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClockConfig {
    pub style: Option<ClockStyle>,     // auto | 12h | 24h
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RefreshConfig {
    pub interval_mins: Option<u32>,    // 1..=60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub snapshot: Option<PathBuf>,     // PBM written on every redraw
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompanionConfig {
    pub inbox: Option<String>,         // JSON lines in, "-" = stdin
    pub outbox: Option<String>,        // JSON lines out, "-" = stdout
}

impl Config {
    pub fn clock_style(&self) -> ClockStyle {
        self.clock.as_ref().and_then(|c| c.style).unwrap_or_default()
    }

    pub fn refresh_interval_mins(&self) -> u32 {
        self.refresh
            .as_ref()
            .and_then(|r| r.interval_mins)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_MINS)
    }

    pub fn display_size(&self) -> (u32, u32) {
        let display = self.display.as_ref();
        (
            display.and_then(|d| d.width).unwrap_or(FACE_WIDTH),
            display.and_then(|d| d.height).unwrap_or(FACE_HEIGHT),
        )
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.display.as_ref().and_then(|d| d.snapshot.as_deref())
    }

    pub fn inbox(&self) -> Option<&str> {
        self.companion.as_ref().and_then(|c| c.inbox.as_deref())
    }

    pub fn outbox(&self) -> Option<&str> {
        self.companion.as_ref().and_then(|c| c.outbox.as_deref())
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "stockface", version, about = "StockFace - clock, weather and stock watch face")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    /// auto | 12h | 24h
    #[arg(long)]
    pub clock_style: Option<ClockStyle>,
    #[arg(long)]
    pub refresh_interval_mins: Option<u32>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    /// write a PBM snapshot of the face here on every redraw
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,
    /// companion JSON lines input, "-" for stdin
    #[arg(long)]
    pub inbox: Option<String>,
    /// companion JSON lines output, "-" for stdout
    #[arg(long)]
    pub outbox: Option<String>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: read YAML, merge, apply CLI, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of effective config (nice for debugging)
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/stockface/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/stockface/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/stockface.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["stockface.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    // clock
    match (&mut dst.clock, src.clock) {
        (None, Some(c)) => dst.clock = Some(c),
        (Some(d), Some(s)) => { if s.style.is_some() { d.style = s.style; } }
        _ => {}
    }
    // refresh
    match (&mut dst.refresh, src.refresh) {
        (None, Some(c)) => dst.refresh = Some(c),
        (Some(d), Some(s)) => { if s.interval_mins.is_some() { d.interval_mins = s.interval_mins; } }
        _ => {}
    }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    // companion
    match (&mut dst.companion, src.companion) {
        (None, Some(c)) => dst.companion = Some(c),
        (Some(d), Some(s)) => {
            if s.inbox.is_some()    { d.inbox = s.inbox; }
            if s.outbox.is_some()   { d.outbox = s.outbox; }
        }
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.snapshot.is_some()    { dst.snapshot = src.snapshot; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                     { cfg.log_level = Some("debug".into()); }

    if cli.clock_style.is_some() {
        cfg.clock.get_or_insert_with(ClockConfig::default).style = cli.clock_style;
    }
    if cli.refresh_interval_mins.is_some() {
        cfg.refresh.get_or_insert_with(RefreshConfig::default).interval_mins = cli.refresh_interval_mins;
    }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.snapshot.is_some();
    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_width.is_some()   { display.width = cli.display_width; }
        if cli.display_height.is_some()  { display.height = cli.display_height; }
        if cli.snapshot.is_some()        { display.snapshot = cli.snapshot.clone(); }
    }

    if (cli.inbox.is_some() || cli.outbox.is_some()) && cfg.companion.is_none() {
        cfg.companion = Some(CompanionConfig::default());
    }
    if let Some(companion) = cfg.companion.as_mut() {
        if cli.inbox.is_some()   { companion.inbox = cli.inbox.clone(); }
        if cli.outbox.is_some()  { companion.outbox = cli.outbox.clone(); }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {},
            _ => return Err(ConfigError::Validation(format!(
                "log_level must be off|error|warn|info|debug|trace, got '{level}'"
            ))),
        }
    }
    let interval = cfg.refresh_interval_mins();
    if !(1..=60).contains(&interval) {
        return Err(ConfigError::Validation(format!(
            "refresh interval_mins must be 1..=60, got {interval}"
        )));
    }
    let (w, h) = cfg.display_size();
    let side = 1..=MAX_DISPLAY_SIDE;
    if !side.contains(&w) || !side.contains(&h) {
        return Err(ConfigError::Validation(format!(
            "display width/height must be 1..={MAX_DISPLAY_SIDE}, got {w}x{h}"
        )));
    }
    if let Some(companion) = cfg.companion.as_ref() {
        if companion.inbox.as_deref() == Some("") || companion.outbox.as_deref() == Some("") {
            return Err(ConfigError::Validation("companion inbox/outbox must not be empty".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("stockface").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.clock_style(), ClockStyle::Auto);
        assert_eq!(cfg.refresh_interval_mins(), 20);
        assert_eq!(cfg.display_size(), (144, 168));
        assert!(cfg.snapshot_path().is_none());
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_yaml_fields() {
        let cfg = parse_yaml(
            "log_level: debug\n\
             clock:\n  style: 12h\n\
             refresh:\n  interval_mins: 15\n\
             display:\n  snapshot: /tmp/face.pbm\n\
             companion:\n  inbox: '-'\n",
        )
        .unwrap();
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.clock_style(), ClockStyle::TwelveHour);
        assert_eq!(cfg.refresh_interval_mins(), 15);
        assert_eq!(cfg.snapshot_path(), Some(Path::new("/tmp/face.pbm")));
        assert_eq!(cfg.inbox(), Some("-"));
        assert_eq!(cfg.outbox(), None);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut cfg = parse_yaml("display:\n  width: 200\n  height: 228\n").unwrap();
        merge(&mut cfg, parse_yaml("display:\n  height: 300\n").unwrap());
        assert_eq!(cfg.display_size(), (200, 300));
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let mut cfg = parse_yaml("clock:\n  style: 12h\nlog_level: warn\n").unwrap();
        apply_cli_overrides(&mut cfg, &cli(&["--clock-style", "24h", "--debug", "--outbox", "-"]));
        assert_eq!(cfg.clock_style(), ClockStyle::TwentyFourHour);
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.outbox(), Some("-"));
    }

    #[test]
    fn test_validation() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--refresh-interval-mins", "0"]));
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--refresh-interval-mins", "61"]));
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--display-width", "0"]));
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--display-width", "40000000"]));
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--display-width", "4096", "--display-height", "4096"]));
        assert!(validate(&cfg).is_ok());

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--log-level", "chatty"]));
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_bad_clock_style_in_yaml() {
        assert!(matches!(parse_yaml("clock:\n  style: 13h\n"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_dump_round_trips() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--clock-style", "12h", "--snapshot", "face.pbm"]));
        let yaml = dump(&cfg).unwrap();
        assert_eq!(parse_yaml(&yaml).unwrap(), cfg);
    }
}
