//! Listen command implementation
//!
//! Each line typed on stdin is treated as a recognized utterance while the
//! session is listening. Lines starting with `/` control the session:
//!
//! - `/listen`          enable voice mode again
//! - `/stop`            disable voice mode
//! - `/dismiss`         dismiss the emergency overlay
//! - `/gps <lat> <lng>` update the location fix (`/gps off` to drop it)
//! - `/status`          show the session state
//! - `/quit`            exit

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use iris::Location;
use iris::app::spawn_console_pipeline;
use iris::config::Config;
use iris::store::StoreHandle;
use iris::voice::{ListenMode, SessionState};

use super::LocationArgs;

pub async fn listen_command(
    config: &Config,
    store: StoreHandle,
    location: LocationArgs,
    single: bool,
) -> Result<()> {
    let mode = if single || !config.voice.continuous {
        ListenMode::SingleShot
    } else {
        ListenMode::Continuous
    };

    let pipeline = spawn_console_pipeline(config, store, location.fix());
    pipeline.handle.enable(mode);

    println!(
        "IRIS is listening ({}). Say \"{} help\" to raise an SOS.",
        mode, config.voice.wake_word
    );
    println!("Type /quit to exit, /status for the session state.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("/quit") | Some("/exit") => break,
            Some("/listen") => pipeline.handle.enable(mode),
            Some("/stop") => pipeline.handle.disable(),
            Some("/dismiss") => pipeline.handle.dismiss_emergency(),
            Some("/status") => {
                let emergency = if pipeline.emergency.is_active() {
                    if pipeline.emergency.is_sent() { " (SOS sent)" } else { " (SOS pending)" }
                } else {
                    ""
                };
                println!("State: {}{}", pipeline.handle.state(), emergency);
            }
            Some("/gps") => match (parts.next(), parts.next()) {
                (Some("off"), None) => {
                    pipeline.location.set(None);
                    println!("GPS fix dropped");
                }
                (Some(lat), Some(lng)) => match (lat.parse(), lng.parse()) {
                    (Ok(lat), Ok(lng)) => {
                        let fix = Location::new(lat, lng);
                        pipeline.location.set(Some(fix));
                        println!("GPS fix: {}", fix.display_short());
                    }
                    _ => eprintln!("Usage: /gps <lat> <lng>"),
                },
                _ => eprintln!("Usage: /gps <lat> <lng> | /gps off"),
            },
            Some(cmd) if cmd.starts_with('/') => eprintln!("Unknown command: {}", cmd),
            _ => {
                if !pipeline.feed.feed(line) {
                    let state = pipeline.handle.state();
                    match state {
                        SessionState::Suppressed => {
                            println!("(emergency active, /dismiss to resume)")
                        }
                        SessionState::Idle | SessionState::Suspended => {
                            println!("(not listening: {}, /listen to start)", state)
                        }
                        _ => println!("(busy, try again in a moment)"),
                    }
                }
            }
        }
    }

    pipeline.handle.shutdown();
    pipeline.task.await?;
    Ok(())
}
