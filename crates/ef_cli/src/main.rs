//! Electric Football CLI
//!
//! 헤드리스 실행기: seeded games on the vibrating board, event stream to stdout.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ef_core::engine::formation::FormationData;
use ef_core::{GameConfig, GamePhase, PlayerId, Role, Simulation, Team};

#[derive(Parser)]
#[command(name = "ef_cli")]
#[command(about = "Run electric football games headlessly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted game and print every event
    Play {
        /// Vibration noise seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Number of plays to run
        #[arg(long, default_value_t = 4)]
        plays: u32,

        /// JSON config file (falls back to EF_CONFIG_PATH, then defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Built-in formation: i | shotgun
        #[arg(long, default_value = "i")]
        formation: String,

        /// Whistle a play that is still live after this many seconds
        #[arg(long, default_value_t = 10.0)]
        max_seconds: f32,

        /// Throw to the deepest eligible receiver half a second after the snap
        #[arg(long)]
        pass: bool,
    },

    /// Print a built-in formation as JSON
    Formation {
        #[arg(long, default_value = "i")]
        name: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, plays, config, formation, max_seconds, pass } => {
            let config = load_config(config)?.with_seed(seed);
            let Some(formation) = FormationData::builtin(&formation) else {
                bail!("unknown formation: {}", formation);
            };
            play(config, &formation, plays, max_seconds, pass)?;
        }
        Commands::Formation { name } => {
            let Some(formation) = FormationData::builtin(&name) else {
                bail!("unknown formation: {}", name);
            };
            println!("{}", formation.to_json()?);
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Ok(GameConfig::from_json(&json)?)
        }
        None => Ok(GameConfig::from_env()?),
    }
}

fn play(config: GameConfig, formation: &FormationData, plays: u32, max_seconds: f32, pass: bool) -> Result<()> {
    let mut sim = Simulation::new(config);
    sim.apply_formation(formation)?;
    sim.register_ball();
    print_events(&mut sim)?;

    for n in 1..=plays {
        let los = sim.state().line_of_scrimmage;
        sim.apply_formation(&formation.shifted_to(los))?;
        if !sim.ready_for_next_play() {
            break;
        }

        let offense = sim.state().possession;
        let s = sim.state();
        println!(
            "--- play {}: {} ball, {} & {} at the {}",
            n, offense, s.current_down, s.yards_to_go, s.line_of_scrimmage
        );

        if let Some(carrier) = pick_carrier(&sim, offense) {
            sim.set_ball_carrier(Some(carrier));
        }
        sim.snap();

        if pass {
            sim.run_for(0.5);
            if let Some(target) = deepest_receiver(&sim, offense).and_then(|id| sim.player(id)) {
                let aim = target.position;
                sim.throw_pass(aim, 450.0);
            }
        }

        if !sim.run_until_dead(max_seconds) {
            log::info!("play {} still live after {:.1}s, whistling", n, max_seconds);
            sim.whistle();
        }
        print_events(&mut sim)?;

        if sim.phase() == GamePhase::GameOver {
            break;
        }
    }

    let s = sim.state();
    println!("=== FINAL: HOME {} - AWAY {}", s.home_score, s.away_score);
    Ok(())
}

fn print_events(sim: &mut Simulation) -> Result<()> {
    for event in sim.take_events() {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

/// Quarterback if the offense has one, otherwise its first eligible figure,
/// otherwise anyone on the team.
fn pick_carrier(sim: &Simulation, team: Team) -> Option<PlayerId> {
    sim.find_player(team, Role::Quarterback)
        .or_else(|| sim.players().iter().find(|p| p.team == team && p.is_eligible_receiver()).map(|p| p.id))
        .or_else(|| sim.players().iter().find(|p| p.team == team).map(|p| p.id))
}

/// Eligible non-quarterback furthest downfield for `team`.
fn deepest_receiver(sim: &Simulation, team: Team) -> Option<PlayerId> {
    let dir = team.attack_direction() as f32;
    sim.players()
        .iter()
        .filter(|p| p.team == team && p.is_eligible_receiver() && p.role != Role::Quarterback)
        .max_by(|a, b| (a.position.x * dir).total_cmp(&(b.position.x * dir)))
        .map(|p| p.id)
}
