//! Transaction-amount fraud score (§4.6): coefficient of variation of an
//! actor's `amount`-bearing events.

use std::collections::HashMap;

use sybil_types::Event;

pub fn compute(logs: &[Event]) -> HashMap<String, f64> {
    let mut amounts_by_actor: HashMap<&str, Vec<f64>> = HashMap::new();
    for event in logs {
        if let Some(amount) = event.amount {
            amounts_by_actor.entry(&event.actor).or_default().push(amount);
        }
    }

    amounts_by_actor
        .into_iter()
        .filter(|(_, amounts)| amounts.len() >= 2)
        .map(|(actor, amounts)| {
            let n = amounts.len() as f64;
            let mean = amounts.iter().sum::<f64>() / n;
            let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
            let stddev = variance.sqrt();
            let score = (stddev / (mean + 1.0)).clamp(0.0, 1.0);
            (actor.to_string(), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(actor: &str, amount: f64) -> Event {
        let mut e = Event::new(None, "chain", "transfer", actor, "t");
        e.amount = Some(amount);
        e
    }

    #[test]
    fn consistent_amounts_score_low() {
        let logs = vec![ev("a", 10.0), ev("a", 10.0), ev("a", 10.0)];
        let scores = compute(&logs);
        assert!(scores["a"] < 0.05, "got {}", scores["a"]);
    }

    #[test]
    fn wildly_varying_amounts_score_high() {
        let logs = vec![ev("a", 1.0), ev("a", 1000.0), ev("a", 0.1)];
        let scores = compute(&logs);
        assert!(scores["a"] > 0.5, "got {}", scores["a"]);
    }

    #[test]
    fn single_amount_is_excluded() {
        let logs = vec![ev("a", 10.0)];
        assert!(compute(&logs).get("a").is_none());
    }
}
