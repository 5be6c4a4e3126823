use std::io::{self, Write};

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use seabattle::{
    format_grid, init_logging, FleetSpec, Session, SessionRegistry, ShotOutcome, ShotResult, Side,
};

const LOCAL_PLAYER: &str = "local";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch random shots play out a whole game.
    Auto {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { seed } => play(seed).await,
        Commands::Auto { seed } => auto(seed),
    }
}

async fn play(seed: Option<u64>) -> anyhow::Result<()> {
    let registry = SessionRegistry::new(FleetSpec::default());
    let shared = match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            registry.start_seeded(LOCAL_PLAYER, s).await?
        }
        None => registry.start(LOCAL_PLAYER).await?,
    };
    let mut session = shared.lock().await;
    session.place_human_fleet()?;
    println!("Your fleet is in position.");
    print_boards(&session);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYour shot: ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => print_help(),
            "new" => {
                session.restart()?;
                session.place_human_fleet()?;
                println!("New game. Your fleet is in position.");
                print_boards(&session);
            }
            _ if session.is_finished() => {
                println!("The game is over. Type `new` to play again or `quit` to leave.");
            }
            _ => {
                let outcome = session.submit_human_shot(input)?;
                report(&outcome);
                if !outcome.is_rejected() {
                    print_boards(&session);
                }
            }
        }
    }
    Ok(())
}

fn auto(seed: Option<u64>) -> anyhow::Result<()> {
    let fleet = FleetSpec::default();
    let (mut session, mut shooter) = match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            (
                Session::start_seeded(fleet, s)?,
                SmallRng::seed_from_u64(s.wrapping_add(1)),
            )
        }
        None => (Session::start(fleet)?, SmallRng::from_rng(&mut rand::rng())),
    };
    session.place_human_fleet()?;

    while !session.is_finished() {
        let target = session
            .opponent_board()
            .unshot_cells()
            .choose(&mut shooter)
            .ok_or_else(|| anyhow::anyhow!("no cells left to fire at"))?;
        let outcome = session.submit_human_shot(&target.to_string())?;
        report(&outcome);
    }
    print_boards(&session);
    Ok(())
}

fn report(outcome: &ShotOutcome) {
    match outcome {
        ShotOutcome::InvalidCoordinate(e) => println!("Invalid coordinate: {}.", e),
        ShotOutcome::AlreadyShot(at) => {
            println!("You already fired at {}. Pick another cell.", at)
        }
        ShotOutcome::Exchange(exchange) => {
            println!("You fire at {}: {}", exchange.target, describe(exchange.result));
            if let Some(reply) = exchange.reply {
                println!("Opponent fires at {}: {}", reply.target, describe(reply.result));
            }
            match exchange.winner {
                Some(Side::Human) => println!("\nAll enemy ships destroyed. You win!"),
                Some(Side::Opponent) => println!("\nYour fleet is lost. The opponent wins."),
                None => {}
            }
        }
    }
}

fn describe(result: ShotResult) -> &'static str {
    match result {
        ShotResult::Hit => "hit!",
        ShotResult::Miss => "miss.",
        ShotResult::AlreadyShot => "already shot.",
    }
}

fn print_boards(session: &Session) {
    println!("\nYour shots:\n{}", format_grid(&session.target_view()));
    println!("\nYour fleet:\n{}", format_grid(&session.own_view()));
}

fn print_help() {
    println!(
        "\nEnter a cell such as A3 (row letter, column number) to fire.\n\
         Commands: `new` starts over, `help` shows this text, `quit` leaves."
    );
}
