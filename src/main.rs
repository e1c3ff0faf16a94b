use anyhow::Context;
use clap::{Parser, ValueEnum};
use fundsplit::config::traits::ConfigSection;
use fundsplit::config::{AllocationConfig, ConfigManager, DataConfig, StrategyKind};
use fundsplit::data::CsvConnector;
use fundsplit::{report, strategy_from_config};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Greedy,
    Genetic,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::Genetic => StrategyKind::Genetic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fundsplit")]
#[command(about = "Spread investments over investors so annual yield comes out even", long_about = None)]
struct Cli {
    /// TOML or JSON configuration file. Without it, defaults plus FUNDSPLIT_* variables apply.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    #[arg(long)]
    investors: Option<PathBuf>,

    #[arg(long)]
    customers: Option<PathBuf>,

    #[arg(long)]
    products: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Print the configuration fields and exit.
    #[arg(long)]
    describe_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.describe_config {
        let manifests = vec![
            AllocationConfig::default().to_manifest(),
            DataConfig::default().to_manifest(),
        ];
        println!("{}", serde_json::to_string_pretty(&manifests)?);
        return Ok(());
    }

    let manager = ConfigManager::new();
    match &cli.config {
        Some(path) => manager
            .load_from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => manager.load_from_env().context("loading configuration")?,
    }
    manager.update(|config| {
        if let Some(strategy) = cli.strategy {
            config.allocation.strategy = strategy.into();
        }
        if let Some(seed) = cli.seed {
            config.allocation.seed = Some(seed);
        }
        if let Some(path) = &cli.investors {
            config.data.investors_csv = path.clone();
        }
        if let Some(path) = &cli.customers {
            config.data.customers_csv = path.clone();
        }
        if let Some(path) = &cli.products {
            config.data.products_csv = path.clone();
        }
    })?;
    let config = manager.get();

    log::info!("The program has started");
    let investors = CsvConnector::load_investors(&config.data.investors_csv)
        .context("reading investors")?;
    let investments = CsvConnector::load_investments(&config.data.customers_csv, &config.data.products_csv)
        .context("reading orders and products")?;
    log::info!("Loaded {} investors and {} investments", investors.len(), investments.len());

    let strategy = strategy_from_config(&config.allocation)?;
    let result = strategy
        .allocate(&investors, &investments)
        .with_context(|| format!("running the {} allocation", strategy.name()))?;
    log::info!("{}", report::summary(&result));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result));
    }

    log::info!("The program has ended");
    Ok(())
}
