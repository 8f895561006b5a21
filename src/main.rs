use std::time::Duration;

use tracing_subscriber::EnvFilter;

use six_stones::config::SaveConfig;
use six_stones::game::GameSession;
use six_stones::input_system::{GameAction, InputContext, Key, map_key};
use six_stones::item::ItemCatalog;
use six_stones::match3::PieceType;
use six_stones::save::SaveError;

// 60 fps
const FRAME: Duration = Duration::from_micros(16_667);

const MAZE_SIZE: u32 = 12;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        tracing::error!(error = %err, "demo failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Plays a short scripted session against the save system
fn run() -> Result<(), SaveError> {
    let mut config = SaveConfig::default();
    if let Some(dir) = std::env::args().nth(1) {
        config = config.with_save_dir(dir);
    }
    tracing::info!(dir = %config.save_dir.display(), "save directory");

    let mut session = GameSession::new(config, ItemCatalog::create_default())?;

    // New game, then wander into a maze
    session.handle(GameAction::NewGame);
    frames(&mut session, 10);
    if let Err(err) = session.world.enter_maze(0, MAZE_SIZE, MAZE_SIZE) {
        tracing::error!(error = %err, "could not build maze");
        return Ok(());
    }
    explore(&mut session, 40);

    // A fight breaks out; the player hammers F5 mid-swap
    session.world.start_battle(7);
    if let Some(board) = session.world.board.as_mut() {
        if let Err(err) = board.begin_swap((0, 0), (1, 0)) {
            tracing::warn!(error = %err, "swap refused");
        }
        board.add_color_score(0, PieceType::Ruby, 3);
    }
    press(&mut session, Key::F5, InputContext::Playing);
    frames(&mut session, 30);

    // Finish the fight and save to a menu slot
    session.world.end_battle();
    explore(&mut session, 20);
    press(&mut session, Key::Digit(3), InputContext::SlotMenu { saving: true });

    for info in session.manager().all_slot_info() {
        tracing::info!(
            slot = info.slot,
            level = info.level,
            playtime = format!("{:.1}s", info.playtime_seconds),
            bytes = info.file_size,
            saved_at = %info.saved_at,
            "slot"
        );
    }

    // Quit to the menu and pick up where we left off
    session.world.leave_maze();
    press(&mut session, Key::Enter, InputContext::MainMenu);
    frames(&mut session, 10);

    if let Some(report) = session.last_restore() {
        for warning in &report.warnings {
            tracing::warn!(%warning, "restore warning");
        }
        tracing::info!(restored = ?report.restored, deferred = ?report.deferred, "restore report");
    }
    if let Some(run) = &session.world.maze {
        tracing::info!(
            seed = run.generator.seed_used(),
            position = ?run.player.position(),
            visited = run.minimap.visited().len(),
            "back in the maze"
        );
    }
    Ok(())
}

fn press(session: &mut GameSession, key: Key, context: InputContext) {
    if let Some(action) = map_key(key, context) {
        session.handle(action);
    }
    report(session);
}

fn frames(session: &mut GameSession, count: usize) {
    for _ in 0..count {
        session.update(FRAME);
        report(session);
    }
}

/// Walks forward where possible, turning right at walls
fn explore(session: &mut GameSession, steps: usize) {
    for _ in 0..steps {
        if let Some(run) = session.world.maze.as_mut() {
            if !run.step_forward() {
                run.player.turn_right();
            }
            run.collect_treasure_here();
            run.open_secret_here();
        }
        frames(session, 1);
    }
}

fn report(session: &mut GameSession) {
    for notification in session.take_notifications() {
        tracing::info!("[{notification}]");
    }
}
