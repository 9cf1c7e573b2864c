//! Specialization Run Integration Test
//!
//! Runs the full pipeline through the runner:
//! - In-memory ledger with a small cohort
//! - Fatal ledger failures
//! - JSON table files on disk

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ssi_core::{Band, CompanyClassification, Investor, InvestorId, Round};
use ssi_engine::EngineError;
use ssi_ports::{LedgerError, LedgerTable};
use ssi_runner::{EngineConfig, InMemoryLedger, IndexRunner, JsonLedger};

fn date(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 31)
}

fn cohort() -> InMemoryLedger {
    let investors = vec![
        Investor::new(1u64, "Venture Capital, Corporate", "Italy"),
        Investor::new(2u64, "venture_capital", "France"),
        Investor::new(3u64, "Angel", "Spain"),
        Investor::new(4u64, "venture capital", "Germany"),
    ];

    let mut rounds = vec![
        // Investor 1: 10M industry 2012, 30M other 2013
        Round::new(1u64, 100u64, Some(dec!(10000000)), date(2012), "SERIES A"),
        Round::new(1u64, 200u64, Some(dec!(30000000)), date(2013), "SERIES B"),
        Round::new(1u64, 200u64, None, None, "SEED"),
        Round::new(1u64, 100u64, Some(dec!(80000000)), date(2013), "IPO"),
        // Investor 2: industry only
        Round::new(2u64, 100u64, Some(dec!(1000000)), date(2018), "SEED"),
        Round::new(2u64, 100u64, Some(dec!(2000000)), date(2019), "SERIES A"),
        Round::new(2u64, 300u64, Some(dec!(3000000)), date(2019), "SERIES A"),
        Round::new(2u64, 300u64, Some(dec!(4000000)), date(2020), "SERIES B"),
    ];
    // Investor 3: wrong category, plenty of activity
    rounds.extend((2010..2016).map(|y| Round::new(3u64, 100u64, Some(dec!(1)), date(y), "SEED")));
    // Investor 4: only three deals
    rounds.extend((2010..2013).map(|y| Round::new(4u64, 100u64, Some(dec!(1)), date(y), "SEED")));

    InMemoryLedger::new()
        .with_investors(investors)
        .with_rounds(rounds)
        .with_classifications(vec![
            CompanyClassification::new(100u64, true, "Europe").with_segments(true, false),
            CompanyClassification::new(200u64, false, "Europe"),
            CompanyClassification::new(300u64, true, " europe ").with_segments(false, true),
        ])
}

#[test]
fn test_run_in_memory_cohort() {
    let _ = env_logger::try_init();

    let runner = IndexRunner::new(EngineConfig::default()).unwrap();
    let run = runner.run(&cohort()).unwrap();

    assert_eq!(
        run.eligible.iter().copied().collect::<Vec<_>>(),
        vec![InvestorId(1), InvestorId(2)]
    );
    assert_eq!(run.fact.len(), 2);
    assert_eq!(run.fact.records().count(), 2 * 26);

    assert_eq!(run.fact.ratio(InvestorId(1), 2014), Some(dec!(0.25)));
    assert_eq!(run.fact.band(InvestorId(1), 2014), Some(Band::Low));
    assert_eq!(run.fact.ratio(InvestorId(2), 2021), Some(Decimal::ONE));
    assert_eq!(run.fact.band(InvestorId(2), 2021), Some(Band::Dominant));
    assert_eq!(run.fact.ratio(InvestorId(3), 2014), None);

    assert_eq!(run.stats.exits_excluded, 1);
    assert_eq!(run.stats.failed_category, 1);
    assert_eq!(run.stats.failed_activity, 1);
}

#[test]
fn test_run_is_repeatable() {
    let _ = env_logger::try_init();

    let runner = IndexRunner::new(EngineConfig::default()).unwrap();
    let ledger = cohort();
    let first = runner.run(&ledger).unwrap();
    let second = runner.run(&ledger).unwrap();

    assert_eq!(first.fact, second.fact);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_unavailable_table_aborts_run() {
    let _ = env_logger::try_init();

    let runner = IndexRunner::new(EngineConfig::default()).unwrap();
    for table in LedgerTable::ALL {
        let ledger = cohort().with_unavailable(table);
        let err = runner.run(&ledger).unwrap_err();
        match err {
            EngineError::Ledger(LedgerError::Unavailable { table: failed, .. }) => {
                assert_eq!(failed, table)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config = EngineConfig {
        first_year: 2030,
        last_year: 2020,
        ..Default::default()
    };
    assert!(matches!(
        IndexRunner::new(config),
        Err(EngineError::InvalidConfig(_))
    ));
}

#[test]
fn test_run_from_json_files() {
    let _ = env_logger::try_init();

    let dir: PathBuf = std::env::temp_dir().join(format!("ssi-runner-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let ledger = cohort();
    let source = JsonLedger::new(&dir);
    {
        use ssi_ports::LedgerSource;
        fs::write(
            source.path(LedgerTable::Investors),
            serde_json::to_string(&ledger.investors().unwrap()).unwrap(),
        )
        .unwrap();
        fs::write(
            source.path(LedgerTable::Rounds),
            serde_json::to_string(&ledger.rounds().unwrap()).unwrap(),
        )
        .unwrap();
        fs::write(
            source.path(LedgerTable::CompanyClassification),
            serde_json::to_string(&ledger.classifications().unwrap()).unwrap(),
        )
        .unwrap();
    }
    fs::write(
        dir.join("config.json"),
        r#"{ "first_year": 2005, "last_year": 2022, "parallel": false }"#,
    )
    .unwrap();

    let runner = IndexRunner::from_config_file(dir.join("config.json")).unwrap();
    let from_files = runner.run(&source).unwrap();
    let from_memory = runner.run(&ledger).unwrap();

    assert_eq!(from_files.fact, from_memory.fact);
    assert_eq!(from_files.fact.records().count(), 2 * 18);
    assert_eq!(from_files.fact.ratio(InvestorId(1), 2014), Some(dec!(0.25)));

    fs::remove_dir_all(&dir).unwrap();
}

/// Write raw table files into a fresh temp directory
fn write_tables(name: &str, investors: &str, rounds: &str, updown: &str) -> (PathBuf, JsonLedger) {
    let dir = std::env::temp_dir().join(format!("ssi-runner-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let ledger = JsonLedger::new(&dir);
    fs::write(ledger.path(LedgerTable::Investors), investors).unwrap();
    fs::write(ledger.path(LedgerTable::Rounds), rounds).unwrap();
    fs::write(ledger.path(LedgerTable::CompanyClassification), updown).unwrap();
    (dir, ledger)
}

const UPDOWN: &str = r#"[
    {"company_id": 100, "is_industry": true, "is_upstream": true, "is_downstream": false, "continent": "Europe"},
    {"company_id": 200, "is_industry": false, "is_upstream": false, "is_downstream": false, "continent": "Europe"}
]"#;

#[test]
fn test_unparseable_round_date_skips_only_that_round() {
    let _ = env_logger::try_init();

    let (dir, ledger) = write_tables(
        "bad-date",
        r#"[{"id": 1, "types": ["venture capital"], "country": "Italy", "launch_date": null}]"#,
        r#"[
            {"investor_id": 1, "company_id": 100, "amount": "10000000", "date": "2012-05-01", "round_type": "SERIES A"},
            {"investor_id": 1, "company_id": 200, "amount": "30000000", "date": "2013-05-01", "round_type": "SERIES B"},
            {"investor_id": 1, "company_id": 200, "amount": "1", "date": null, "round_type": "SEED"},
            {"investor_id": 1, "company_id": 100, "amount": "1", "date": "03/2009", "round_type": "SEED"},
            {"investor_id": 1, "company_id": 100, "amount": "99000000", "date": "n/a", "round_type": "SERIES C"}
        ]"#,
        UPDOWN,
    );

    let runner = IndexRunner::new(EngineConfig::default()).unwrap();
    let run = runner.run(&ledger).unwrap();

    assert!(run.eligible.contains(&InvestorId(1)));
    assert_eq!(run.stats.undated, 2);
    // 2014 window 2009..2013: 10M + 1 industry, 30M other
    assert_eq!(
        run.fact.ratio(InvestorId(1), 2014),
        Some(dec!(10000001) / dec!(40000001))
    );
    assert_eq!(run.fact.ratio(InvestorId(1), 2019), Some(Decimal::ZERO));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_malformed_category_tags_fail_only_that_investor() {
    let _ = env_logger::try_init();

    let rounds: Vec<String> = [1u64, 2]
        .iter()
        .flat_map(|id| {
            (2010..2014).map(move |year| {
                format!(
                    r#"{{"investor_id": {id}, "company_id": 100, "amount": "5", "date": "{year}", "round_type": "SEED"}}"#
                )
            })
        })
        .collect();
    let (dir, ledger) = write_tables(
        "bad-tags",
        r#"[
            {"id": 1, "types": "Venture Capital, Corporate", "country": "Italy"},
            {"id": 2, "types": null, "country": "France"}
        ]"#,
        &format!("[{}]", rounds.join(",")),
        UPDOWN,
    );

    let runner = IndexRunner::new(EngineConfig::default()).unwrap();
    let run = runner.run(&ledger).unwrap();

    assert_eq!(
        run.eligible.iter().copied().collect::<Vec<_>>(),
        vec![InvestorId(1)]
    );
    assert_eq!(run.stats.investors_evaluated, 2);
    assert_eq!(run.stats.failed_category, 1);
    assert_eq!(run.fact.ratio(InvestorId(1), 2015), Some(Decimal::ONE));

    fs::remove_dir_all(&dir).unwrap();
}
