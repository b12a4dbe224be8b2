use std::cell::RefCell;

use ledger_summary::aggregate::{aggregate, sort_for_report, to_usd};
use ledger_summary::credit::CreditLimits;
use ledger_summary::filter::{FilterMode, apply_filter};
use ledger_summary::grid::{Cell, Grid, normalize};
use ledger_summary::model::{
    AggregatedClient, BalanceStatus, ClientRecord, SectionType, SkipReason,
};
use ledger_summary::records::extract_records;
use ledger_summary::reporter::{NullReporter, ReportEvent, Reporter};
use ledger_summary::{ReportError, ReportOptions, summarize};

fn text(value: &str) -> Cell {
    Cell::from(value)
}

fn client_row(label: &str, amount: f64) -> Vec<Cell> {
    vec![Cell::Empty, text(label), Cell::Empty, Cell::from(amount)]
}

fn record(client: &str, section_type: SectionType, amount: f64) -> ClientRecord {
    ClientRecord {
        client_id: client.to_string(),
        client_name: client.to_string(),
        section_type,
        amount,
        source_row: 0,
    }
}

fn ledger() -> Grid {
    Grid::new(vec![
        vec![text("Chart of Accounts Status")],
        vec![text("240601 Accounts receivable")],
        client_row("Acme (RMB)", 1200.0),
        client_row("Beta RMB", 300.0),
        client_row("Gamma (USD)", 999.0),
        vec![Cell::Empty, text("Acme (RMB)"), text("n/a")],
        client_row("Acme (RMB)", 800.0),
        vec![text("110301 Orders")],
        client_row("Acme (RMB)", 500.0),
        client_row("Beta RMB", 900.0),
        client_row("Delta RMB", 50.0),
        vec![Cell::Empty, text("nan")],
        vec![],
        vec![Cell::Empty, text("Acme RMB Credit Limit"), Cell::Empty, text("20,000")],
    ])
}

#[derive(Default)]
struct CollectingReporter {
    skips: RefCell<Vec<(usize, SkipReason)>>,
    sections: RefCell<Vec<SectionType>>,
    credit: RefCell<Vec<(String, f64)>>,
    records: RefCell<usize>,
}

impl Reporter for CollectingReporter {
    fn report(&self, event: ReportEvent<'_>) {
        match event {
            ReportEvent::SectionFound { marker, .. } => {
                self.sections.borrow_mut().push(marker.section_type)
            }
            ReportEvent::RowSkipped { row, reason, .. } => {
                self.skips.borrow_mut().push((row, reason))
            }
            ReportEvent::RecordExtracted(_) => *self.records.borrow_mut() += 1,
            ReportEvent::CreditLimitFound { client, amount, .. } => {
                self.credit.borrow_mut().push((client.to_string(), amount))
            }
        }
    }
}

#[test]
fn marker_followed_by_client_row_yields_one_record() {
    let grid = Grid::new(vec![
        vec![text("240601")],
        vec![Cell::Empty, text("ClientA (RMB)"), Cell::Empty, Cell::from(100)],
    ]);
    let normalized = normalize(&grid);

    let (records, stats) = extract_records(&grid, &normalized, &NullReporter);

    assert_eq!(
        records,
        vec![ClientRecord {
            client_id: "ClientA".into(),
            client_name: "ClientA".into(),
            section_type: SectionType::Receivables,
            amount: 100.0,
            source_row: 1,
        }]
    );
    assert_eq!(stats.sections, 1);
    assert_eq!(stats.rows_scanned, 1);
    assert_eq!(stats.skipped(), 0);
}

#[test]
fn credit_limit_row_is_displayed_with_two_decimals() {
    let grid = Grid::new(vec![
        vec![text("240601")],
        client_row("ClientA (RMB)", 100.0),
        vec![text("110301")],
        client_row("ClientA (RMB)", 40.0),
        vec![Cell::Empty, text("ClientA RMB Credit Limit"), Cell::Empty, Cell::from(5000)],
    ]);

    let summary = summarize(&grid, &ReportOptions::default(), &NullReporter).expect("summary");

    assert_eq!(summary.clients.len(), 1);
    let client = &summary.clients[0];
    assert_eq!(client.client_id, "ClientA");
    assert_eq!(client.credit_limit_display, "5000.00");
    // The credit row sits inside the orders span but is not an order.
    assert_eq!(client.orders_total, 40.0);
    assert_eq!(summary.stats.rows_scanned, 2);
    assert_eq!(summary.stats.skipped(), 0);
}

#[test]
fn credit_rows_in_a_span_are_not_scanned_rows() {
    let grid = Grid::new(vec![
        vec![text("240601")],
        vec![Cell::Empty, text("Gamma (USD)"), Cell::Empty, Cell::from(10)],
        vec![Cell::Empty, text("Gamma USD Credit Limit"), Cell::Empty, Cell::from(100)],
    ]);

    let error = summarize(&grid, &ReportOptions::default(), &NullReporter).unwrap_err();

    let ReportError::NoRecords { stats } = &error else {
        panic!("expected empty extraction, got {error:?}");
    };
    assert_eq!(stats.no_rmb, 1);
    assert_eq!(stats.rows_scanned, 1);
    assert_eq!(stats.rows_scanned, stats.skipped());
}

#[test]
fn receivables_only_client_depends_on_filter_mode() {
    let grid = Grid::new(vec![vec![text("240601")], client_row("Solo (RMB)", 50.0)]);

    let strict = summarize(&grid, &ReportOptions::from_only_full(true), &NullReporter);
    match strict {
        Err(ReportError::EmptyAfterFilter { mode }) => assert_eq!(mode, FilterMode::RequireBoth),
        other => panic!("expected empty-after-filter failure, got {other:?}"),
    }

    let relaxed = summarize(&grid, &ReportOptions::from_only_full(false), &NullReporter)
        .expect("relaxed summary");
    assert_eq!(relaxed.filter, FilterMode::RequireEither);
    let client = &relaxed.clients[0];
    assert_eq!(client.receivables_total, 50.0);
    assert_eq!(client.orders_total, 0.0);
    assert_eq!(client.net_total, 50.0);
    assert_eq!(client.usd_equivalent, 7.04);
    assert_eq!(client.credit_limit_display, "");
    assert_eq!(client.status, BalanceStatus::Positive);
}

#[test]
fn grid_without_rmb_labels_reports_empty_extraction() {
    let grid = Grid::new(vec![
        vec![text("240601")],
        client_row("Gamma (USD)", 10.0),
        client_row("Omega Ltd", 20.0),
        vec![text("110301")],
        client_row("Gamma (USD)", 5.0),
    ]);

    let error = summarize(&grid, &ReportOptions::default(), &NullReporter)
        .expect_err("no RMB rows");

    let ReportError::NoRecords { stats } = &error else {
        panic!("expected empty extraction, got {error:?}");
    };
    assert_eq!(stats.rows_scanned, 3);
    assert_eq!(stats.no_rmb, 3);
    assert_eq!(stats.no_amount, 0);
    assert_eq!(stats.invalid_client, 0);
}

#[test]
fn grid_without_markers_reports_empty_extraction() {
    let grid = Grid::new(vec![client_row("Acme (RMB)", 10.0)]);

    let error = summarize(&grid, &ReportOptions::default(), &NullReporter).unwrap_err();

    assert!(matches!(error, ReportError::NoRecords { .. }));
    assert_eq!(error.stats().map(|stats| stats.sections), Some(0));
}

#[test]
fn ledger_summary_counts_skips_and_orders_by_net() {
    let reporter = CollectingReporter::default();

    let summary =
        summarize(&ledger(), &ReportOptions::default(), &reporter).expect("ledger summary");

    let ids: Vec<&str> = summary.clients.iter().map(|c| c.client_id.as_str()).collect();
    assert_eq!(ids, vec!["Acme", "Beta"]);

    let acme = &summary.clients[0];
    assert_eq!(acme.receivables_total, 2000.0);
    assert_eq!(acme.orders_total, 500.0);
    assert_eq!(acme.net_total, 1500.0);
    assert_eq!(acme.usd_equivalent, 211.27);
    assert_eq!(acme.credit_limit_display, "20000.00");
    assert_eq!(acme.status, BalanceStatus::Positive);

    let beta = &summary.clients[1];
    assert_eq!(beta.net_total, -600.0);
    assert_eq!(beta.usd_equivalent, -84.51);
    assert_eq!(beta.status, BalanceStatus::Negative);

    assert_eq!(summary.stats.sections, 2);
    assert_eq!(summary.stats.rows_scanned, 10);
    assert_eq!(summary.stats.no_rmb, 1);
    assert_eq!(summary.stats.no_amount, 1);
    assert_eq!(summary.stats.invalid_client, 2);

    assert_eq!(
        *reporter.sections.borrow(),
        vec![SectionType::Receivables, SectionType::Orders]
    );
    assert_eq!(
        *reporter.skips.borrow(),
        vec![
            (4, SkipReason::NoRmb),
            (5, SkipReason::NoAmount),
            (11, SkipReason::InvalidClient),
            (12, SkipReason::InvalidClient),
        ]
    );
    assert_eq!(*reporter.records.borrow(), 6);
    assert_eq!(*reporter.credit.borrow(), vec![("Acme".to_string(), 20000.0)]);
}

#[test]
fn require_either_keeps_partial_clients() {
    let summary = summarize(&ledger(), &ReportOptions::from_only_full(false), &NullReporter)
        .expect("ledger summary");

    let ids: Vec<&str> = summary.clients.iter().map(|c| c.client_id.as_str()).collect();
    assert_eq!(ids, vec!["Acme", "Delta", "Beta"]);
    assert_eq!(summary.clients[1].net_total, -50.0);
    assert_eq!(summary.clients[1].status, BalanceStatus::Negative);
}

#[test]
fn aggregation_conserves_section_totals() {
    let grid = ledger();
    let normalized = normalize(&grid);
    let (records, _) = extract_records(&grid, &normalized, &NullReporter);

    let clients = aggregate(&records, &CreditLimits::new());

    for section_type in SectionType::all() {
        let expected: f64 = records
            .iter()
            .filter(|record| record.section_type == section_type)
            .map(|record| record.amount)
            .sum();
        let actual: f64 = clients
            .iter()
            .map(|client| match section_type {
                SectionType::Receivables => client.receivables_total,
                SectionType::Orders => client.orders_total,
            })
            .sum();
        assert_eq!(expected, actual, "{section_type}");
    }
}

#[test]
fn repeated_runs_produce_identical_summaries() {
    let grid = ledger();
    let options = ReportOptions::from_only_full(false);

    let first = summarize(&grid, &options, &NullReporter).expect("first run");
    let second = summarize(&grid, &options, &NullReporter).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn aggregate_defaults_missing_sections_to_zero() {
    let records = vec![
        record("A", SectionType::Receivables, 10.0),
        record("A", SectionType::Receivables, 5.0),
        record("B", SectionType::Orders, 7.0),
    ];
    let mut limits = CreditLimits::new();
    limits.insert("B".to_string(), 1234.5);
    limits.insert("Z".to_string(), 1.0);

    let clients = aggregate(&records, &limits);

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].client_id, "A");
    assert_eq!(clients[0].receivables_total, 15.0);
    assert_eq!(clients[0].orders_total, 0.0);
    assert_eq!(clients[0].credit_limit_display, "");
    assert_eq!(clients[1].client_id, "B");
    assert_eq!(clients[1].receivables_total, 0.0);
    assert_eq!(clients[1].net_total, -7.0);
    assert_eq!(clients[1].credit_limit_display, "1234.50");
}

#[test]
fn filter_modes_follow_sign_rules() {
    let clients = aggregate(
        &[
            record("both", SectionType::Receivables, 10.0),
            record("both", SectionType::Orders, 4.0),
            record("negative", SectionType::Receivables, -3.0),
            record("negative", SectionType::Orders, 2.0),
            record("orders-only", SectionType::Orders, 8.0),
            record("cancelled", SectionType::Receivables, 5.0),
            record("cancelled", SectionType::Receivables, -5.0),
        ],
        &CreditLimits::new(),
    );

    let ids = |kept: Vec<AggregatedClient>| -> Vec<String> {
        kept.into_iter().map(|client| client.client_id).collect()
    };

    assert_eq!(ids(apply_filter(clients.clone(), FilterMode::RequireBoth)), vec!["both"]);
    assert_eq!(
        ids(apply_filter(clients, FilterMode::RequireEither)),
        vec!["both", "negative", "orders-only"]
    );
}

#[test]
fn report_order_is_net_descending_then_id() {
    let mut clients = aggregate(
        &[
            record("b", SectionType::Receivables, 5.0),
            record("a", SectionType::Receivables, 5.0),
            record("c", SectionType::Receivables, 50.0),
            record("d", SectionType::Orders, 1.0),
        ],
        &CreditLimits::new(),
    );

    sort_for_report(&mut clients);

    let ids: Vec<&str> = clients.iter().map(|c| c.client_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b", "d"]);
}

#[test]
fn usd_conversion_rounds_to_cents() {
    assert_eq!(to_usd(50.0), 7.04);
    assert_eq!(to_usd(710.0), 100.0);
    assert_eq!(to_usd(0.0), 0.0);
    assert_eq!(to_usd(-71.0), -10.0);
}

#[test]
fn summary_serializes_to_json() {
    let summary = summarize(&ledger(), &ReportOptions::default(), &NullReporter)
        .expect("ledger summary");

    let json = serde_json::to_value(&summary).expect("summary serialized");

    assert_eq!(json["filter"], "require-both");
    assert_eq!(json["clients"][0]["client_id"], "Acme");
    assert_eq!(json["clients"][0]["status"], "Positive");
    assert_eq!(json["stats"]["no_rmb"], 1);
}
