use clap::Parser;
use clap::ValueEnum;
use keyed_tables::OpenAddressingTable;
use keyed_tables::SeparateChainingTable;
use keyed_tables::Table;
use keyed_tables::UniversalHash;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    OpenAddressing,
    SeparateChaining,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "count", default_value_t = 1000)]
    count: usize,

    #[arg(short = 's', long = "strategy", value_enum, default_value_t = Strategy::OpenAddressing)]
    strategy: Strategy,

    /// Fixed hash multiplier; drawn at random when omitted.
    #[arg(short = 'm', long = "multiplier")]
    multiplier: Option<u32>,

    /// Fraction of inserted keys erased afterwards, in percent.
    #[arg(short = 'e', long = "erase_percent", default_value_t = 0)]
    erase_percent: u32,

    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let hasher = args
        .multiplier
        .map(UniversalHash::with_multiplier)
        .unwrap_or_else(UniversalHash::random);
    println!(
        "Filling {:?} table with {} keys (multiplier {:#010x})",
        args.strategy,
        args.count,
        hasher.multiplier()
    );

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let keys: Vec<u32> = (0..args.count).map(|_| rng.random()).collect();

    match args.strategy {
        Strategy::OpenAddressing => {
            let mut table = OpenAddressingTable::<u64>::with_hasher(hasher);
            let inserted = fill(&mut table, &keys, args.erase_percent, &mut rng);
            println!("Inserted {} distinct keys", inserted);
            table.debug_stats().print();
            table.print_probe_histogram();
        }
        Strategy::SeparateChaining => {
            let mut table = SeparateChainingTable::<u64>::with_hasher(hasher);
            let inserted = fill(&mut table, &keys, args.erase_percent, &mut rng);
            println!("Inserted {} distinct keys", inserted);
            table.debug_stats().print();
            for (length, buckets) in table.chain_histogram().iter().enumerate() {
                println!("chain length {:>3}: {} buckets", length, buckets);
            }
        }
    }
}

fn fill(
    table: &mut dyn Table<u64>,
    keys: &[u32],
    erase_percent: u32,
    rng: &mut SmallRng,
) -> usize {
    let inserted = keys
        .iter()
        .filter(|key| table.insert(**key, u64::from(**key)))
        .count();

    let erased = keys
        .iter()
        .filter(|_| rng.random_range(0..100) < erase_percent)
        .filter(|key| table.erase(**key))
        .count();
    if erased > 0 {
        println!("Erased {} keys", erased);
    }

    assert_eq!(table.len(), inserted - erased);
    inserted
}
