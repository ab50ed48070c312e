/*
 *  main.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Desktop host: minute ticks, companion JSON lines and PBM snapshots
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};
use std::fs::OpenOptions;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use stockface::app::WatchFaceApp;
use stockface::clock::SystemClockPreference;
use stockface::config::{self, Cli, Config};
use stockface::display::{DisplayDriver, FaceLayout, SnapshotDriver, WatchFace};
use stockface::message::companion::CompanionBridge;
use stockface::tick::until_next_minute;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

type Inbox = Lines<BufReader<Box<dyn AsyncRead + Unpin + Send>>>;
type App = WatchFaceApp<CompanionBridge<Box<dyn Write>>, SystemClockPreference>;

/// Waits for SIGINT, SIGTERM or SIGHUP and logs which one arrived.
#[cfg(unix)]
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

fn open_outbox(target: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match target {
        None => Box::new(io::sink()),
        Some("-") => Box::new(io::stdout()),
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening outbox {path}"))?,
        ),
    })
}

async fn open_inbox(source: Option<&str>) -> anyhow::Result<Option<Inbox>> {
    let reader: Box<dyn AsyncRead + Unpin + Send> = match source {
        None => return Ok(None),
        Some("-") => Box::new(tokio::io::stdin()),
        Some(path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening inbox {path}"))?,
        ),
    };
    Ok(Some(BufReader::new(reader).lines()))
}

fn open_snapshot(cfg: &Config) -> anyhow::Result<Option<SnapshotDriver>> {
    let Some(path) = cfg.snapshot_path() else {
        return Ok(None);
    };
    let (width, height) = cfg.display_size();
    let mut driver = SnapshotDriver::new(path, width, height);
    driver.init()?;
    Ok(Some(driver))
}

/// Hand queued transport events to the app, then redraw if anything changed.
fn settle(app: &mut App, driver: &mut Option<SnapshotDriver>) {
    for event in app.transport_mut().drain_events() {
        app.on_transport_event(event);
    }
    match driver.as_mut() {
        Some(driver) => {
            if let Err(e) = app.face_mut().present(driver) {
                error!("snapshot failed: {}", e);
            }
        }
        None => {
            if app.face_mut().take_dirty() {
                debug!("face: {:?}", app.face().state());
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli)?;

    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("This {} worth the glance", env!("CARGO_PKG_NAME"));
    info!("v.{} built {} ({})", env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);

    let (width, height) = cfg.display_size();
    let face = WatchFace::new(FaceLayout::for_display(width, height));
    let mut driver = open_snapshot(&cfg)?;
    let bridge = CompanionBridge::new(open_outbox(cfg.outbox())?);
    let mut inbox = open_inbox(cfg.inbox()).await?;

    let mut app: App = WatchFaceApp::new(
        face,
        bridge,
        SystemClockPreference::new(cfg.clock_style()),
        cfg.refresh_interval_mins(),
    );
    app.start(&Local::now());
    settle(&mut app, &mut driver);

    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    loop {
        let mut inbox_closed = false;
        tokio::select! {
            _ = tokio::time::sleep(until_next_minute(&Local::now())) => {
                app.on_tick(&Local::now());
            }
            line = async {
                match inbox.as_mut() {
                    Some(lines) => lines.next_line().await,
                    None => std::future::pending().await,
                }
            } => {
                match line {
                    Ok(Some(line)) => app.transport_mut().push_inbox_line(&line),
                    Ok(None) => {
                        info!("companion inbox closed");
                        inbox_closed = true;
                    }
                    Err(e) => {
                        error!("companion inbox read failed: {}", e);
                        inbox_closed = true;
                    }
                }
            }
            res = &mut shutdown => {
                if let Err(e) = res {
                    error!("signal handler failed: {}", e);
                }
                break;
            }
        }
        if inbox_closed {
            inbox = None;
            app.transport_mut().inbox_closed();
        }
        settle(&mut app, &mut driver);
    }

    app.stop();
    settle(&mut app, &mut driver);
    info!("{} stopped", env!("CARGO_PKG_NAME"));
    Ok(())
}
