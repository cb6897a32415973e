use clap::{Parser, Subcommand};
use log::info;
use mana_curve::producer::ProducerCatalog;
use mana_curve::rng::GameRng;
use mana_curve::simulation::report::{render_sweep, render_table, CurveReport};
use mana_curve::simulation::sweep::best_for_turn;
use mana_curve::simulation::{calculate_curve, parse_deck_file, sample_curve, sweep_lands, DeckConfig};

#[derive(Parser)]
#[command(name = "mana-curve")]
#[command(about = "Exact mana availability by turn for a commander deck", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck file to use
    #[arg(short, long, default_value = "deck.json", global = true)]
    deck: String,

    /// Producer catalog file
    #[arg(short, long, default_value = "producers.json", global = true)]
    catalog: String,

    /// Override the number of lands in the deck
    #[arg(long, global = true)]
    lands: Option<u32>,

    /// Override the last turn to compute
    #[arg(short, long, global = true)]
    turns: Option<u32>,

    /// Override the highest mana bucket
    #[arg(short, long, global = true)]
    max_mana: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the turn/mana probability table (default)
    Table {
        /// Also write a JSON report to this path
        #[arg(long)]
        json: Option<String>,
    },

    /// Compare land counts
    Sweep {
        /// Smallest land count
        #[arg(long, default_value = "30")]
        from: u32,

        /// Largest land count
        #[arg(long, default_value = "42")]
        to: u32,

        /// Turn to compare on
        #[arg(long, default_value = "4")]
        turn: u32,

        /// Mana target for the "at least" column
        #[arg(long, default_value = "4")]
        target: u32,
    },

    /// Check the exact table against shuffled games
    Verify {
        /// Number of games to sample
        #[arg(short, long, default_value = "100000")]
        num_games: usize,

        /// Seed for reproducibility (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List the producers in the catalog
    Producers,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match ProducerCatalog::from_file(&cli.catalog) {
        Ok(catalog) => {
            info!("loaded {} producers from {}", catalog.len(), cli.catalog);
            catalog
        }
        Err(e) => {
            eprintln!("✗ Failed to load producers from '{}': {}", cli.catalog, e);
            std::process::exit(1);
        }
    };

    match &cli.command {
        Some(Commands::Producers) => list_producers(&catalog),
        Some(Commands::Table { json }) => {
            print_table(&load_config(&cli, &catalog), &cli.deck, json.as_deref())
        }
        Some(Commands::Sweep { from, to, turn, target }) => {
            run_sweep(&load_config(&cli, &catalog), *from, *to, *turn, *target)
        }
        Some(Commands::Verify { num_games, seed }) => {
            let seed = seed.unwrap_or_else(|| GameRng::new(None).seed());
            verify(&load_config(&cli, &catalog), *num_games, seed)
        }
        None => print_table(&load_config(&cli, &catalog), &cli.deck, None),
    }
}

/// Deck file with the command-line overrides applied
fn load_config(cli: &Cli, catalog: &ProducerCatalog) -> DeckConfig {
    let mut config = match parse_deck_file(&cli.deck, catalog) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to parse deck file '{}': {}", cli.deck, e);
            std::process::exit(1);
        }
    };
    if let Some(lands) = cli.lands {
        config.lands = lands;
    }
    if let Some(turns) = cli.turns {
        config.max_turns = turns;
    }
    if let Some(max_mana) = cli.max_mana {
        config.max_mana = max_mana;
    }
    config
}

fn print_deck_header(config: &DeckConfig, deck_file: &str) {
    println!("Deck: {} ({} cards)", deck_file, config.deck_size);
    println!(
        "Commanders: {} | Lands: {} | Producers: {} | Other: {}",
        config.commanders,
        config.lands,
        config.producers.len(),
        config.other_cards()
    );
    if !config.producers.is_empty() {
        let names: Vec<&str> = config.producers.iter().map(|p| p.name.as_str()).collect();
        println!("  {}", names.join(", "));
    }
    println!();
}

fn print_table(config: &DeckConfig, deck_file: &str, json: Option<&str>) {
    println!("\n=== Mana Curve ===\n");
    print_deck_header(config, deck_file);

    let start = std::time::Instant::now();
    let table = match calculate_curve(config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("✗ Invalid deck configuration: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    print!("{}", render_table(&table));
    println!("\nComputed in {:.2?}", elapsed);

    if let Some(path) = json {
        match CurveReport::new(config, &table).write_json(path) {
            Ok(()) => println!("Report saved to: {}", path),
            Err(e) => {
                eprintln!("✗ Failed to write report '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }
}

fn run_sweep(config: &DeckConfig, from: u32, to: u32, turn: u32, target: u32) {
    if from > to || turn == 0 || turn > config.max_turns {
        eprintln!(
            "✗ Need from <= to and 1 <= turn <= {} (got {}..={}, turn {})",
            config.max_turns, from, to, turn
        );
        std::process::exit(1);
    }

    println!("\n=== Land Count Sweep ===\n");
    println!("Lands: {}..={} | Turn: {} | Target: {} mana\n", from, to, turn, target);

    let start = std::time::Instant::now();
    let points = match sweep_lands(config, from..=to, true) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("✗ Invalid sweep: {}", e);
            std::process::exit(1);
        }
    };

    print!("{}", render_sweep(&points, turn, target));
    if let Some(best) = best_for_turn(&points, turn) {
        println!(
            "\n✓ {} lands gives the most mana on turn {} ({:.3})",
            best.lands,
            turn,
            best.table.expected_mana(turn)
        );
    }
    println!("\nCompleted in {:.2?}", start.elapsed());
}

fn verify(config: &DeckConfig, num_games: usize, seed: u64) {
    println!("\n=== Exact vs Sampled ===\n");
    println!("Games: {} | Seed: {}\n", num_games, seed);

    let exact = calculate_curve(config);
    let sampled = sample_curve(config, num_games, seed);
    let (exact, sampled) = match (exact, sampled) {
        (Ok(exact), Ok(sampled)) => (exact, sampled),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("✗ Invalid deck configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!("{:<6} {:>10} {:>10} {:>10}", "Turn", "Exact", "Sampled", "MaxDiff");
    println!("{}", "-".repeat(40));
    for turn in 1..=config.max_turns {
        let diff = exact
            .row(turn)
            .iter()
            .zip(sampled.row(turn))
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        println!(
            "{:<6} {:>10.3} {:>10.3} {:>9.2}%",
            turn,
            exact.expected_mana(turn),
            sampled.expected_mana(turn),
            diff * 100.0
        );
    }
    println!("\nLargest cell difference: {:.2}%", exact.max_abs_diff(&sampled) * 100.0);
}

fn list_producers(catalog: &ProducerCatalog) {
    println!("{:<24} {:>5} {:>7} {:>6} {:>5}", "Name", "Cost", "Payoff", "Input", "Fast");
    println!("{}", "-".repeat(51));
    for producer in catalog.producers() {
        println!(
            "{:<24} {:>5} {:>7} {:>6} {:>5}",
            producer.name,
            producer.cost,
            producer.payoff,
            producer.input_cost,
            if producer.is_fast() { "yes" } else { "" }
        );
    }
}
