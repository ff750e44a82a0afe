use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use sybil_types::Stage;

use crate::args::{AnalyzeArgs, OutputFormat};
use crate::{config, display_model, render};

pub fn handle(args: AnalyzeArgs, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let resolved_config = config::resolve_path(config_path.map(Path::to_path_buf));
    let settings = config::load(resolved_config.as_deref())?;
    let events = sybil_ingest::read_events(&args.input)
        .with_context(|| format!("reading events from {}", args.input.display()))?;

    let enable_color = io::stdout().is_terminal();
    let mut progress = |stage: Stage, pct: u8| {
        if enable_color && format == OutputFormat::Text {
            eprintln!("{}", format!("[{pct:>3}%] {stage:?}").dimmed());
        }
    };

    let result = sybil_engine::analyze_with_progress(&events, &settings, Some(&mut progress));

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).context("serializing analysis result")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let report = display_model::build(&result, args.min_score, args.top);
            render::print_report(&report, &mut io::stdout(), enable_color)?;
        }
    }

    Ok(())
}
