//! Per-client rollup of extracted records.

use std::collections::BTreeMap;

use crate::EXCHANGE_RATE;
use crate::credit::CreditLimits;
use crate::model::{AggregatedClient, BalanceStatus, ClientId, ClientRecord, SectionType};

type ClientKey = (ClientId, String);

#[derive(Debug, Default)]
struct Totals {
    receivables: f64,
    orders: f64,
}

/// Groups records by client and sums them per section type.
///
/// The result is ordered by client identifier. Credit limits are matched on
/// the canonical client name.
pub fn aggregate(records: &[ClientRecord], credit_limits: &CreditLimits) -> Vec<AggregatedClient> {
    let mut groups: BTreeMap<ClientKey, Totals> = BTreeMap::new();

    for record in records {
        let totals = groups
            .entry((record.client_id.clone(), record.client_name.clone()))
            .or_default();
        match record.section_type {
            SectionType::Receivables => totals.receivables += record.amount,
            SectionType::Orders => totals.orders += record.amount,
        }
    }

    groups
        .into_iter()
        .map(|((client_id, client_name), totals)| {
            let net_total = totals.receivables - totals.orders;
            let credit_limit_display = credit_limits
                .get(&client_name)
                .filter(|limit| **limit != 0.0)
                .map(|limit| format!("{limit:.2}"))
                .unwrap_or_default();

            AggregatedClient {
                client_id,
                client_name,
                receivables_total: totals.receivables,
                orders_total: totals.orders,
                net_total,
                usd_equivalent: to_usd(net_total),
                credit_limit_display,
                status: BalanceStatus::from_net(net_total),
            }
        })
        .collect()
}

/// Converts an RMB amount at the fixed rate, rounded to cents.
pub fn to_usd(amount: f64) -> f64 {
    round_cents(amount / EXCHANGE_RATE)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Report order: largest net balance first, ties by client identifier.
pub fn sort_for_report(clients: &mut [AggregatedClient]) {
    clients.sort_by(|lhs, rhs| {
        rhs.net_total
            .total_cmp(&lhs.net_total)
            .then_with(|| lhs.client_id.cmp(&rhs.client_id))
    });
}
