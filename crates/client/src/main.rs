//! Dejarik demo binary.
//!
//! Runs two peers over the in-process transport through a short scripted
//! exchange and checks that both ended with the same board.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=dejarik_runtime=debug DEJARIK_MOVEMENT=2 cargo run -p dejarik-client
//! ```

use anyhow::{Context, Result, ensure};
use dejarik_core::{PieceType, TilePos};
use dejarik_runtime::{MemoryHub, MemoryTransport, RuntimeConfig, Session};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = RuntimeConfig::from_env();
    tracing::info!("Starting Dejarik demo");
    tracing::info!("Local player: {}", config.player_name);
    tracing::info!("Movement: {}", config.movement);

    let opponent_config = RuntimeConfig {
        player_name: "opponent".to_owned(),
        ..config.clone()
    };

    let hub = MemoryHub::new();
    let mut host = Session::from_config(hub.connect()?, &config)?;
    let mut guest = Session::from_config(hub.connect()?, &opponent_config)?;
    host.register_peer(guest.local_peer(), opponent_config.player_name.clone())?;
    guest.register_peer(host.local_peer(), config.player_name.clone())?;

    run_script(&mut host, &mut guest)?;

    ensure!(host.board() == guest.board(), "boards diverged");
    ensure!(
        host.registry().pieces().eq(guest.registry().pieces()),
        "piece tables diverged"
    );

    for piece in host.registry().pieces() {
        let point = host.world_position(piece.position)?;
        tracing::info!(
            "{} {} at {} ({:.2}, {:.2}, {:.2}){}",
            piece.id,
            piece.kind,
            piece.position.describe(),
            point.x,
            point.y,
            point.z,
            if piece.selected { " [selected]" } else { "" }
        );
    }
    tracing::info!("Peers converged on {} pieces", host.registry().piece_count());

    Ok(())
}

/// Alternating placements and a selection, pumping the other side after each.
fn run_script(
    host: &mut Session<MemoryTransport>,
    guest: &mut Session<MemoryTransport>,
) -> Result<()> {
    let ghhhk = host
        .place_piece(PieceType::Ghhhk, TilePos::new(1, 0))
        .context("host placement")?;
    guest.pump();

    guest
        .place_piece(PieceType::Houjix, TilePos::new(2, 6))
        .context("guest placement")?;
    host.pump();

    // The tile is taken; rejected locally and never sent.
    if let Err(err) = guest.place_piece(PieceType::Monnok, TilePos::new(1, 0)) {
        tracing::warn!("Guest placement rejected: {err}");
    }

    let reachable = host.select_piece(ghhhk).context("host selection")?;
    let ids: Vec<String> = reachable.iter().map(ToString::to_string).collect();
    tracing::info!("{ghhhk} can reach [{}]", ids.join(", "));
    guest.pump();

    Ok(())
}

/// Setup logging to stderr, `info` unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
