use fundsplit::config::{AllocationConfig, StrategyKind};
use fundsplit::data::CsvConnector;
use fundsplit::{report, strategy_from_config, AllocationError, Investment, Investor};
use std::path::PathBuf;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

fn load() -> (Vec<Investor>, Vec<Investment>) {
    let investors = CsvConnector::load_investors(data_path("investors.csv")).unwrap();
    let investments =
        CsvConnector::load_investments(data_path("customers.csv"), data_path("products.csv")).unwrap();
    (investors, investments)
}

fn amounts(investments: &[Investment]) -> Vec<f64> {
    investments.iter().map(|i| i.amount()).collect()
}

#[test]
fn test_load_investors_in_file_order() {
    let (investors, _) = load();

    let names: Vec<&str> = investors.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["Vulture", "Seagull", "Finch", "Eagle"]);
    assert_eq!(investors[2].wishlist().len(), 6);
    assert!(investors[3].wants("P5"));
}

#[test]
fn test_load_investments_with_rates() {
    let (_, investments) = load();

    assert_eq!(investments.len(), 14);
    assert_eq!(investments[0].product_id(), "P5");
    assert_eq!(investments[0].rate(), 2.6);
    assert_eq!(investments[0].owner(), "Customer1");
    assert!((investments[11].annual_yield() - 5000.0).abs() < 1e-6);
}

#[test]
fn test_missing_file_reports_data_loading() {
    let err = CsvConnector::load_investors(data_path("nope.csv")).unwrap_err();
    assert!(matches!(err, AllocationError::DataLoading(_)));
}

#[test]
fn test_greedy_end_to_end() {
    let (investors, investments) = load();
    let strategy = strategy_from_config(&AllocationConfig::default()).unwrap();
    assert_eq!(strategy.name(), "greedy");

    let result = strategy.allocate(&investors, &investments).unwrap();

    assert_eq!(amounts(&result.get("Vulture").unwrap().investments), vec![73412.0, 50000.0]);
    assert_eq!(
        amounts(&result.get("Seagull").unwrap().investments),
        vec![63000.0, 50000.0, 50000.0]
    );
    assert_eq!(
        amounts(&result.get("Finch").unwrap().investments),
        vec![100000.0, 42000.0, 17412.0]
    );
    assert_eq!(
        amounts(&result.get("Eagle").unwrap().investments),
        vec![100000.0, 48000.0, 12345.0]
    );
    assert_eq!(result.get("Finch").unwrap().investments[0].product_id(), "P4");
    assert_eq!(result.get("Eagle").unwrap().investments[0].product_id(), "P5");

    let unused: Vec<(&str, f64)> = result.unused().iter().map(|i| (i.product_id(), i.amount())).collect();
    assert_eq!(unused, vec![("P1", 30000.0), ("P7", 25000.0), ("P1", 10000.0)]);

    assert!((result.get("Vulture").unwrap().investor.annual_yield() - 2885.3).abs() < 1e-6);
    assert!((result.get("Seagull").unwrap().investor.annual_yield() - 4505.0).abs() < 1e-6);

    let text = report::render(&result);
    let vulture = text.find("allocated to Vulture").unwrap();
    let finch = text.find("allocated to Finch").unwrap();
    assert!(vulture < finch);
    assert!(text.contains("The borrower is Customer9."));
}

#[test]
fn test_genetic_end_to_end() {
    let (investors, investments) = load();
    let config = AllocationConfig {
        strategy: StrategyKind::Genetic,
        population_size: 20,
        generation_count: 25,
        seed: Some(42),
        ..AllocationConfig::default()
    };
    let strategy = strategy_from_config(&config).unwrap();
    assert_eq!(strategy.name(), "genetic");

    let result = strategy.allocate(&investors, &investments).unwrap();

    assert_eq!(result.total_count(), investments.len());
    assert!(result.unused().iter().any(|i| i.product_id() == "P7"));
}
