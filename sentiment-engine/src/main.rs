use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use common::IndicatorInput;
use sentiment_engine::{create_config_template, OutputFormat, SentimentEngine, Settings};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "nifty-sentiment")]
#[command(about = "Nifty 50 pre-open sentiment from overnight and options-market indicators")]
struct Args {
    /// Indicator input file (TOML, or JSON with a .json extension)
    input: Option<PathBuf>,

    /// Settings file; defaults to ./nifty-sentiment.toml when present
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write a commented rule configuration template and exit
    #[arg(long)]
    write_template: Option<PathBuf>,
}

fn read_input(path: &Path) -> Result<IndicatorInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading input {}", path.display()))?;

    let input = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON input {}", path.display()))?,
        _ => toml::from_str(&content)
            .with_context(|| format!("parsing TOML input {}", path.display()))?,
    };
    Ok(input)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.settings.as_deref())?;

    // Logs go to stderr so JSON output on stdout stays clean
    let level = Level::from_str(&settings.log_level).unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.write_template {
        create_config_template(path)?;
        info!(path = %path.display(), "Rule configuration template written");
        return Ok(());
    }

    let rules = settings.rule_config()?;
    let engine = SentimentEngine::with_config(rules)?;

    let input = match &args.input {
        Some(path) => read_input(path)?,
        None => {
            warn!("No input file given, evaluating neutral defaults");
            IndicatorInput::default()
        }
    };

    let evaluation = engine.evaluate(&input);

    match settings.format {
        OutputFormat::Text => {
            println!("## Nifty 50 Pre-Open Sentiment");
            println!(
                "Rules: {} | Generated: {}",
                evaluation.rules,
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            println!();
            print!("{}", evaluation);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&evaluation)?;
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_accept_both_flag_forms() {
        let args =
            Args::try_parse_from(["nifty-sentiment", "--settings=foo.toml", "in.toml"]).unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("foo.toml")));
        assert_eq!(args.input, Some(PathBuf::from("in.toml")));

        let args =
            Args::try_parse_from(["nifty-sentiment", "--write-template", "rules.toml"]).unwrap();
        assert_eq!(args.write_template, Some(PathBuf::from("rules.toml")));
        assert_eq!(args.input, None);
    }

    #[test]
    fn test_args_reject_unknown_option() {
        assert!(Args::try_parse_from(["nifty-sentiment", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["nifty-sentiment", "a.toml", "b.toml"]).is_err());
    }
}
