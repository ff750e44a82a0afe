//! Terminal rendering for the `analyze` report. Color is only applied when
//! stdout is an interactive terminal, the same terminal-awareness the
//! teacher's session views gate on before calling into `owo_colors`.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::display_model::Report;

pub fn print_report(report: &Report, out: &mut impl Write, enable_color: bool) -> io::Result<()> {
    let header = format!(
        "Analyzed {} actors, {} flagged",
        report.total_actors, report.flagged_actors
    );
    writeln!(out, "{}", if enable_color { header.bold().to_string() } else { header })?;

    if !report.top_scorecards.is_empty() {
        writeln!(out, "\nTop scorecards:")?;
        for sc in &report.top_scorecards {
            let score_text = format!("{:.2}", sc.sybil_score);
            let score = if !enable_color {
                score_text
            } else if sc.sybil_score >= 0.6 {
                score_text.red().to_string()
            } else {
                score_text.green().to_string()
            };
            writeln!(out, "  {:<24} {score}", sc.actor)?;
            for reason in &sc.reasons {
                writeln!(out, "      - {reason}")?;
            }
        }
    }

    if !report.clusters.is_empty() {
        writeln!(out, "\nClusters:")?;
        for cluster in &report.clusters {
            writeln!(
                out,
                "  #{} members={} density={:.2} conductance={:.2} external_edges={}",
                cluster.id,
                cluster.members.len(),
                cluster.density,
                cluster.conductance,
                cluster.external_edges
            )?;
        }
    }

    if !report.waves.is_empty() {
        writeln!(out, "\nWaves:")?;
        for wave in &report.waves {
            writeln!(
                out,
                "  [{:?}] {} -> {} actors={} z={:.2}",
                wave.method,
                wave.action,
                wave.target,
                wave.actors.len(),
                wave.z_score
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sybil_types::Scorecard;

    #[test]
    fn prints_actor_rows_and_reasons() {
        let report = Report {
            total_actors: 1,
            flagged_actors: 1,
            top_scorecards: vec![Scorecard {
                actor: "alice".into(),
                sybil_score: 0.8,
                reasons: vec!["High coordination with burst activity".into()],
                ..Default::default()
            }],
            clusters: Vec::new(),
            waves: Vec::new(),
        };
        let mut buf = Vec::new();
        print_report(&report, &mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("alice"));
        assert!(text.contains("High coordination with burst activity"));
    }
}
