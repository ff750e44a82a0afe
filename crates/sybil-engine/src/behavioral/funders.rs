//! Shared funders (§4.6): transfers between EVM-looking addresses, grouped
//! by sender so recipients of the same funder can be cross-linked. Despite
//! the field name on `Scorecard`, this tracks "shared sender," not identical
//! wallet addresses.

use std::collections::{HashMap, HashSet};

use sybil_types::Event;

pub fn compute(logs: &[Event]) -> HashMap<String, Vec<String>> {
    let mut funder_to_recipients: HashMap<&str, HashSet<&str>> = HashMap::new();

    for event in logs {
        if !event.is_hex_wallet_transfer() {
            continue;
        }
        funder_to_recipients
            .entry(&event.actor)
            .or_default()
            .insert(&event.target);
    }

    let mut shared_wallets: HashMap<String, HashSet<String>> = HashMap::new();
    for (funder, recipients) in &funder_to_recipients {
        if recipients.len() < 2 {
            continue;
        }
        for recipient in recipients {
            shared_wallets
                .entry(recipient.to_string())
                .or_default()
                .insert(funder.to_string());
        }
    }

    shared_wallets
        .into_iter()
        .map(|(actor, funders)| {
            let mut list: Vec<String> = funders.into_iter().collect();
            list.sort();
            (actor, list)
        })
        .collect()
}
