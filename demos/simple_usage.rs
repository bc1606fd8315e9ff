/// chessdex API demo
///
/// Walks through one session:
/// - loading game metadata and projecting columns
/// - parsing move text in batches
/// - prefix searches, cached and uncached
/// - result breakdown and statistics

use std::time::Duration;
use chessdex::core::types::{fields, MoveRow};
use chessdex::{Config, GameDatabase, GameRecord, MoveToken, Outcome};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        chessdex - Opening Search Demo         ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Open a session
    let config = Config::default()
        .with_batch_size(2)
        .with_yield_delay(Duration::from_millis(10));
    let db = GameDatabase::open(config)?;

    // Step 2: LOAD - game metadata
    println!("Step 2: LOAD - game metadata...");
    db.load(vec![
        GameRecord::new(1650, 1600, "Normal", 1.0, "C50"),
        GameRecord::new(1820, 1790, "Time forfeit", 0.0, "B20"),
        GameRecord::new(2010, 2050, "Normal", 0.5, "D06"),
        GameRecord::new(1400, 1450, "Normal", 0.0, "C20"),
        GameRecord::new(1710, 1705, "Normal", 1.0, "C65"),
    ])?;
    let ratings = db.project(&[fields::WHITE_ELO, fields::BLACK_ELO])?;
    println!("  {} games loaded, first rating pair: {:?}\n", ratings.len(), ratings[0]);

    // Step 3: INDEX - move text, yielding between batches
    println!("Step 3: INDEX - parsing moves...");
    let rows: Vec<MoveRow> = [
        "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5",
        "1. e4 c5 2. Nf3 d6 3. d4 cxd4",
        "1. d4 d5 2. c4 dxc4",
        "1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7#",
        "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6",
    ]
    .iter()
    .map(|m| MoveRow { moves: m.to_string() })
    .collect();
    db.index_moves(&rows).await?;
    println!("  Done!\n");

    // Step 4: SEARCH
    println!("Step 4: SEARCH - move prefixes...");
    for input in ["1. e4", "1. e4 e5 2. Nf3", "1. e4 e5 2. Nf3 Nc6 3. Bb5", "1. c4"] {
        let hits = db.search_notation(input)?;
        let outcomes = hits.outcomes();
        println!(
            "  '{}': {} games ({} {:.0}% / {} {:.0}% / {} {:.0}%)",
            input,
            hits.len(),
            Outcome::WhiteWin.notation(),
            100.0 * outcomes.white.fraction,
            Outcome::Draw.notation(),
            100.0 * outcomes.draw.fraction,
            Outcome::BlackWin.notation(),
            100.0 * outcomes.black.fraction,
        );
    }

    let uncached = db.search_with(&[MoveToken::new("e4"), MoveToken::new("e5")], false)?;
    println!("  uncached 'e4 e5': {} games\n", uncached.len());

    // Step 5: STATS
    println!("Step 5: STATS");
    println!("{}", serde_json::to_string_pretty(&db.stats())?);

    Ok(())
}
