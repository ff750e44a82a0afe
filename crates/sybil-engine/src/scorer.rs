//! Scorer (§4.7) — folds every upstream signal into one `Scorecard` per
//! actor, including the ordered, human-readable `reasons` list.

use sybil_types::{Scorecard, Settings};

use crate::behavioral::BehavioralProfile;
use crate::centrality::CentralityScores;
use crate::components::Components;
use crate::graph::Graph;
use crate::links;
use crate::profile::ProfileIndex;
use crate::temporal::TemporalResult;

#[allow(clippy::too_many_arguments)]
pub fn build(
    settings: &Settings,
    graph: &Graph,
    components: &Components,
    centrality: &CentralityScores,
    temporal: &TemporalResult,
    profiles: &ProfileIndex,
    behavioral: &std::collections::HashMap<String, BehavioralProfile>,
    total_actions_by_actor: &std::collections::HashMap<String, u64>,
) -> Vec<Scorecard> {
    let mut scorecards = Vec::with_capacity(graph.actor_order.len());

    for &node_idx in &graph.actor_order {
        let actor = graph.interner.id(node_idx).to_string();
        let total_actions = total_actions_by_actor.get(&actor).copied().unwrap_or(0);
        let behavior = behavioral.get(&actor).cloned().unwrap_or_default();
        let actor_profile = profiles.profile(&actor);

        let links_list = actor_profile.map(|p| p.links.clone()).unwrap_or_default();
        let suspicious_links: Vec<String> = links_list
            .iter()
            .filter(|l| links::is_suspicious_domain(l))
            .cloned()
            .collect();
        let shared_links = profiles
            .shared_links_by_actor
            .get(&actor)
            .cloned()
            .unwrap_or_default();
        let profile_anomaly_score = links::profile_anomaly_score(
            actor_profile.and_then(|p| p.follower_count),
            actor_profile.and_then(|p| p.following_count),
            &links_list,
        );
        let phishing_links: Vec<String> = links_list
            .iter()
            .filter(|l| links::is_likely_phishing_url(l))
            .cloned()
            .collect();
        let phishing_link_score = links::phishing_link_score(&links_list);
        let link_diversity = links::link_diversity(&links_list);

        let cluster_id = components.cluster_id_of(node_idx);
        let cluster_isolation_score = components.cluster_isolation_score(node_idx);

        let pagerank = centrality.pagerank.get(node_idx as usize).copied().unwrap_or(0.0);
        let eigen_centrality = centrality
            .eigenvector
            .get(node_idx as usize)
            .copied()
            .unwrap_or(0.0);
        let betweenness = centrality
            .betweenness
            .get(node_idx as usize)
            .copied()
            .unwrap_or(0.0);

        let burst_actions = temporal.burst_actions.get(&actor).copied().unwrap_or(0);
        let velocity = temporal.velocity.get(&actor).copied().unwrap_or_default();

        let coordination_score = if total_actions > 0 {
            (burst_actions as f64 / total_actions as f64).min(1.0)
        } else {
            0.0
        };

        let shared_wallet_score = if behavior.shared_wallets.is_empty() { 0.0 } else { 1.0 };
        let cross_app_score = if behavior.cross_app_platforms.len() > 1 { 0.5 } else { 0.0 };

        let low_entropy_contribution = if total_actions >= settings.entropy_min_total_actions as u64 {
            behavior.entropy.low_entropy_score
        } else {
            0.0
        };

        let base = 0.30 * coordination_score
            + 0.20 * (behavior.churn_score as f64 / 10.0).min(1.0)
            + 0.15 * cluster_isolation_score
            + 0.10 * behavior.new_account_score
            + 0.10 * behavior.entropy.low_diversity_score
            + 0.15 * profile_anomaly_score;

        let sybil_score = (base
            + 0.10 * velocity.rapid_action_score
            + 0.05 * low_entropy_contribution
            + 0.05 * velocity.velocity_score
            + 0.03 * behavior.ngram.action_sequence_repeat_score
            + 0.03 * behavior.entropy.circadian_score
            + 0.05 * shared_wallet_score
            + 0.05 * cross_app_score
            + 0.05 * behavior.sessions.botty_session_score
            + 0.05 * behavior.fraud_tx_score)
            .clamp(0.0, 1.0);

        let reasons = build_reasons(
            settings,
            sybil_score,
            coordination_score,
            behavior.churn_score,
            cluster_isolation_score,
            cluster_id,
            components,
            behavior.entropy.low_diversity_score,
            &suspicious_links,
            &phishing_links,
            &shared_links,
            behavior.bio_similarity_score,
            behavior.handle_pattern_score,
            behavior.new_account_score,
            pagerank,
            betweenness,
            velocity.rapid_action_score,
            velocity.max_actions_per_minute,
            velocity.velocity_score,
            behavior.ngram.action_sequence_repeat_score,
            behavior.entropy.circadian_score,
            total_actions,
            low_entropy_contribution,
            &behavior.shared_wallets,
            &behavior.cross_app_platforms,
            behavior.sessions.session_count,
            behavior.fraud_tx_score,
        );

        scorecards.push(Scorecard {
            actor,
            sybil_score,
            reasons,
            links: links_list,
            suspicious_links,
            shared_links,
            profile_anomaly_score,
            phishing_link_score,
            link_diversity,
            bio_similarity_score: behavior.bio_similarity_score,
            handle_pattern_score: behavior.handle_pattern_score,
            new_account_score: behavior.new_account_score,
            cluster_id,
            cluster_isolation_score,
            pagerank,
            eigen_centrality,
            betweenness,
            reciprocal_rate: behavior.reciprocity.reciprocal_rate,
            mutual_positive: behavior.reciprocity.mutual_positive,
            burst_actions,
            coordination_score,
            max_actions_per_minute: velocity.max_actions_per_minute,
            rapid_action_score: velocity.rapid_action_score,
            max_actions_per_velocity_window: velocity.max_actions_per_velocity_window,
            max_per_second: velocity.max_per_second,
            velocity_score: velocity.velocity_score,
            total_actions,
            unique_targets: behavior.entropy.unique_targets,
            low_diversity_score: behavior.entropy.low_diversity_score,
            target_entropy: behavior.entropy.target_entropy,
            low_entropy_score: behavior.entropy.low_entropy_score,
            hour_entropy: behavior.entropy.hour_entropy,
            active_hours: behavior.entropy.active_hours,
            circadian_score: behavior.entropy.circadian_score,
            top_action_ngram_count: behavior.ngram.top_action_ngram_count,
            action_sequence_repeat_score: behavior.ngram.action_sequence_repeat_score,
            session_count: behavior.sessions.session_count,
            avg_session_minutes: behavior.sessions.avg_session_minutes,
            avg_gap_minutes: behavior.sessions.avg_gap_minutes,
            max_gap_minutes: behavior.sessions.max_gap_minutes,
            botty_session_score: behavior.sessions.botty_session_score,
            churn_score: behavior.churn_score,
            shared_wallets: behavior.shared_wallets,
            shared_wallet_score,
            cross_app_platforms: behavior.cross_app_platforms,
            cross_app_score,
            fraud_tx_score: behavior.fraud_tx_score,
        });
    }

    scorecards
}

#[allow(clippy::too_many_arguments)]
fn build_reasons(
    settings: &Settings,
    sybil_score: f64,
    coordination_score: f64,
    churn_score: u64,
    cluster_isolation_score: f64,
    cluster_id: Option<u64>,
    components: &Components,
    low_diversity_score: f64,
    suspicious_links: &[String],
    phishing_links: &[String],
    shared_links: &[String],
    bio_similarity_score: f64,
    handle_pattern_score: f64,
    new_account_score: f64,
    pagerank: f64,
    betweenness: f64,
    rapid_action_score: f64,
    max_actions_per_minute: u64,
    velocity_score: f64,
    action_sequence_repeat_score: f64,
    circadian_score: f64,
    total_actions: u64,
    low_entropy_contribution: f64,
    shared_wallets: &[String],
    cross_app_platforms: &[String],
    session_count: u64,
    fraud_tx_score: f64,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if sybil_score >= settings.threshold {
        reasons.push(format!("Sybil score {sybil_score:.2} crosses threshold"));
    }
    if coordination_score >= 0.5 {
        reasons.push("High coordination with burst activity".to_string());
    }
    if churn_score >= 5 {
        reasons.push(format!("High churn ({churn_score} reversal actions)"));
    }
    let cluster_size = cluster_id
        .and_then(|id| components.clusters.iter().find(|c| c.id == id))
        .map(|c| c.members.len())
        .unwrap_or(0);
    if cluster_isolation_score >= 0.5 && cluster_size >= settings.min_cluster_size {
        reasons.push("Isolated within a dense cluster".to_string());
    }
    if low_diversity_score >= 0.7 {
        reasons.push("Low target diversity".to_string());
    }
    if !suspicious_links.is_empty() {
        reasons.push(format!("Suspicious link domains ({})", suspicious_links.len()));
    }
    if !phishing_links.is_empty() {
        reasons.push(format!("Phishing-like links ({})", phishing_links.len()));
    }
    if !shared_links.is_empty() {
        reasons.push(format!("Shared links with others ({})", shared_links.len()));
    }
    if bio_similarity_score >= 0.4 {
        reasons.push("Bio matches other actors".to_string());
    }
    if handle_pattern_score >= 0.4 {
        reasons.push("Handle follows a templated pattern".to_string());
    }
    if new_account_score > 0.0 {
        reasons.push("New account".to_string());
    }
    if pagerank > 0.01 {
        reasons.push("Elevated PageRank".to_string());
    }
    if betweenness > 0.05 {
        reasons.push("Elevated betweenness centrality".to_string());
    }
    if rapid_action_score >= settings.threshold {
        reasons.push(format!("Rapid actions ({max_actions_per_minute}/min)"));
    }
    if velocity_score >= 0.7 {
        reasons.push("High action velocity".to_string());
    }
    if action_sequence_repeat_score >= 0.7 {
        reasons.push("Repetitive action sequence".to_string());
    }
    if circadian_score >= 0.8 {
        reasons.push("Anomalous activity schedule".to_string());
    }
    if total_actions >= settings.entropy_min_total_actions as u64 && low_entropy_contribution >= 0.7 {
        reasons.push("Low target entropy".to_string());
    }
    if !shared_wallets.is_empty() {
        reasons.push(format!("Shared funders with other actors ({})", shared_wallets.len()));
    }
    if cross_app_platforms.len() > 1 {
        reasons.push(format!("Active across {} platforms", cross_app_platforms.len()));
    }
    if session_count > 5 {
        reasons.push(format!("Many distinct sessions ({session_count})"));
    }
    if fraud_tx_score > 0.5 {
        reasons.push("Erratic transaction amounts".to_string());
    }

    reasons
}
