//! Spymaster CLI - deal a board and show the clue the engine would give.
//!
//! Loads a word list and a word2vec text file, deals a board, lets the
//! engine clue for the chosen team and prints the key, the clue and the
//! best-ranked alternatives.

use std::path::PathBuf;

use clap::Parser;
use codenames_engine::{
    Allegiance, ClueConfig, ClueEngine, GameConfig, GameController, GameRng, Team, VectorModel,
    WordList,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "spymaster")]
#[command(about = "Deal a Codenames board and generate a clue from word embeddings")]
struct Args {
    /// Board word list, one word per line
    #[arg(short, long)]
    words: PathBuf,

    /// Word vectors in word2vec text format
    #[arg(long)]
    vectors: PathBuf,

    /// Seed for the deal (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Team the engine gives a clue for
    #[arg(short, long, default_value = "blue")]
    team: Team,

    /// Nearest neighbours fetched per clue
    #[arg(long, default_value = "200")]
    top_k: usize,

    /// Ranked alternatives to print
    #[arg(long, default_value = "5")]
    show: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let words = WordList::from_path(&args.words)?;
    let model = VectorModel::from_path(&args.vectors)?;
    let rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!(seed = rng.seed(), words = words.len(), vectors = model.len(), "starting");

    let clue_config = ClueConfig::default().with_top_k(args.top_k);
    let config = GameConfig::default()
        .with_starting_team(args.team)
        .with_clue(clue_config.clone());

    let mut controller = GameController::new(model, config);
    controller.choose_spymaster_team(args.team);
    controller.new_game(&words, rng)?;

    let Some(board) = controller.board() else {
        return Err("no board was dealt".into());
    };

    println!("Key:");
    for (i, card) in board.cards().iter().enumerate() {
        let marker = match card.allegiance() {
            Allegiance::Blue => "B",
            Allegiance::Red => "R",
            Allegiance::Bystander => ".",
            Allegiance::Assassin => "X",
        };
        println!("  {i:>2} [{marker}] {}", card.word());
    }
    println!();

    match controller.active_clue() {
        Some(clue) => {
            println!("{} clue: {clue}", args.team);
            if !clue.targets.is_empty() {
                println!("  for: {}", clue.targets.join(", "));
            }
        }
        None => println!("{}", controller.status_message()),
    }

    if args.show > 0 {
        // Ranked against the board as dealt, before the clue above was used.
        let engine = ClueEngine::new(clue_config);
        let ranked = engine.rank(args.team, board, controller.model(), &Default::default())?;
        println!();
        println!("Top candidates:");
        for candidate in ranked.iter().take(args.show) {
            println!(
                "  {:<16} score {:>10.3}  team {:>6.3}  danger {:>6.3}",
                candidate.word, candidate.score, candidate.team_score, candidate.danger
            );
        }
    }

    Ok(())
}
