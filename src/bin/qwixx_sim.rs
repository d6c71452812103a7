//! Qwixx simulator - plays complete games headlessly
//!
//! The human seat is driven by one of the AI tiers through the same
//! operations an interactive client would call.

use clap::Parser;
use qwixx_engine::{
    strategy_for, Difficulty, GameError, GamePhase, GameRng, GameSession, PlayerId, Result, RulesConfig,
};

#[derive(Parser)]
#[command(name = "qwixx-sim")]
#[command(about = "Play Qwixx games between AI tiers", long_about = None)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Seats at the table (player 1 plus AI opponents)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Difficulty of the AI opponents
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Tier that plays the human seat
    #[arg(long, default_value_t = Difficulty::Hard)]
    human_strategy: Difficulty,

    /// Base random seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const HUMAN: PlayerId = PlayerId(1);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .init();

    let rules = RulesConfig::default();
    let seats = cli.players.clamp(1, rules.seat_limit());
    let mut totals = vec![0i64; seats];
    let mut wins = vec![0usize; seats];
    let mut names = Vec::new();

    println!(
        "Playing {} game(s): {} seat(s), player 1 as {}, opponents as {}",
        cli.games, seats, cli.human_strategy, cli.difficulty
    );

    for game in 0..cli.games {
        let mut builder = GameSession::builder()
            .player_count(seats)
            .difficulty(cli.difficulty)
            .rules(rules.clone());
        if let Some(seed) = cli.seed {
            builder = builder.seed(seed.wrapping_add(game as u64));
        }
        let mut session = builder.build();
        let mut rng = cli
            .seed
            .map_or_else(GameRng::from_entropy, |s| GameRng::new(s.wrapping_add(game as u64) ^ 0x5eed));

        play_human_seat(&mut session, cli.human_strategy, &mut rng)?;

        for (seat, player) in session.players().iter().enumerate() {
            totals[seat] += i64::from(player.total_score());
        }
        if names.is_empty() {
            names = session.players().iter().map(|p| p.name.clone()).collect();
        }
        let winners = session.winners();
        for id in &winners {
            wins[usize::from(id.0) - 1] += 1;
        }

        let scores: Vec<String> = session
            .players()
            .iter()
            .map(|p| format!("{}={}", p.name, p.total_score()))
            .collect();
        println!("Game {:>3}: {} | {}", game + 1, scores.join(", "), session.message());
    }

    if cli.games > 0 {
        println!();
        println!("{:<14} {:>6} {:>10}", "Player", "Wins", "Avg score");
        for (seat, name) in names.iter().enumerate() {
            println!(
                "{:<14} {:>6} {:>10.1}",
                name,
                wins[seat],
                totals[seat] as f64 / cli.games as f64
            );
        }
    }

    Ok(())
}

/// Drive player 1 until the game ends. AI seats move inside the session.
fn play_human_seat(session: &mut GameSession, tier: Difficulty, rng: &mut GameRng) -> Result<()> {
    let strategy = strategy_for(tier);

    while session.phase() != GamePhase::GameOver {
        if !session.is_awaiting(HUMAN) {
            return Err(GameError::InvalidState(format!(
                "session stalled in {} without waiting on player 1",
                session.phase()
            )));
        }

        if session.phase() == GamePhase::WaitingForRoll {
            session.roll()?;
            continue;
        }

        let stage = (session.phase(), session.current_player_index());
        let moves = session
            .turn_view(HUMAN)
            .map(|view| strategy.choose_moves(&view, rng))
            .unwrap_or_default();
        for mark in moves {
            session.mark(HUMAN, mark.color, mark.number)?;
        }

        // AI seats may have finished the stage (or the game) after our mark.
        if (session.phase(), session.current_player_index()) != stage {
            continue;
        }
        if session.current_player().id == HUMAN {
            session.done(HUMAN)?;
        } else if session.is_awaiting(HUMAN) {
            session.pass(HUMAN)?;
        }
    }
    Ok(())
}
