use rand::{rngs::SmallRng, seq::IteratorRandom, SeedableRng};
use seabattle::{init_logging, FleetSpec, Session, ShotOutcome, Side};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let mut session = Session::start_seeded(FleetSpec::default(), seed)?;
    session.place_human_fleet()?;
    let mut shooter = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let mut exchanges = 0usize;
    let mut rejected = 0usize;
    while !session.is_finished() {
        let target = session
            .opponent_board()
            .unshot_cells()
            .choose(&mut shooter)
            .ok_or_else(|| anyhow::anyhow!("no cells left to fire at"))?;
        match session.submit_human_shot(&target.to_string())? {
            ShotOutcome::Exchange(_) => exchanges += 1,
            _ => rejected += 1,
        }
    }

    let winner = match session.winner() {
        Some(Side::Human) => "human",
        Some(Side::Opponent) => "opponent",
        None => return Err(anyhow::anyhow!("game finished without a winner")),
    };
    let result = json!({
        "seed": seed,
        "winner": winner,
        "exchanges": exchanges,
        "rejected": rejected,
        "human_shots": session.shots_fired(Side::Human),
        "opponent_shots": session.shots_fired(Side::Opponent),
        "human_cells_left": session.human_board().remaining_ship_cells(),
        "opponent_cells_left": session.opponent_board().remaining_ship_cells(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
