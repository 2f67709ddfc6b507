use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use dunck_pgn::pgn::{GameBlock, PgnScanner, PgnToken, ScannerConfig};

/// Splits a PGN file into games and prints the tokens of each game
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PGN file to read
    file: PathBuf,

    /// Print one JSON array of tokens per game
    #[arg(long)]
    json: bool,

    /// Only print the number of tokens and tags of each game
    #[arg(long)]
    summary: bool,

    /// Consecutive blank lines that end a finished game
    #[arg(long)]
    blank_lines: Option<usize>,

    /// JSON file with scanner settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ScannerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path).with_context(|| format!("Could not read config {}", path.display()))?;
            serde_json::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ScannerConfig::default(),
    };

    if let Some(blank_lines) = args.blank_lines {
        config.blank_lines_to_end = blank_lines;
    }

    Ok(config)
}

fn print_game(out: &mut impl Write, index: usize, game: &GameBlock, args: &Args) -> Result<()> {
    let tokens = game.tokens();

    if args.summary {
        writeln!(out, "Game {}: {} tokens, {} tags", index, tokens.len(), game.tags().len())?;
    } else if args.json {
        writeln!(out, "{}", serde_json::to_string(&tokens)?)?;
    } else {
        writeln!(out, "Game {}:", index)?;
        for PgnToken { kind, text } in tokens {
            writeln!(out, "  {:<16} {}", kind.name(), text)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let file = File::open(&args.file).with_context(|| format!("Could not open {}", args.file.display()))?;
    let mut scanner = PgnScanner::with_config(std::io::BufReader::new(file), config);

    let mut out = std::io::stdout().lock();
    let mut index = 0;
    while scanner.has_next()? {
        let Some(game) = scanner.scan_game()? else {
            break;
        };
        index += 1;
        print_game(&mut out, index, &game, &args)?;
    }

    info!(games = index, file = %args.file.display(), "finished scanning");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("pgn_tokens").chain(args.iter().copied()))
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(&parse(&["games.pgn"])).unwrap();
        assert_eq!(config, ScannerConfig::default());
    }

    #[test]
    fn test_load_config_from_file_and_flag() {
        let path = std::env::temp_dir().join(format!("pgn_tokens_config_{}.json", std::process::id()));
        fs::write(&path, r#"{ "blank_lines_to_end": 3 }"#).unwrap();
        let path_arg = path.to_str().unwrap();

        let from_file = load_config(&parse(&["games.pgn", "--config", path_arg])).unwrap();
        assert_eq!(from_file.blank_lines_to_end, 3);

        let overridden = load_config(&parse(&["games.pgn", "--config", path_arg, "--blank-lines", "1"])).unwrap();
        assert_eq!(overridden.blank_lines_to_end, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_config_errors() {
        let missing = std::env::temp_dir().join("pgn_tokens_missing_config.json");
        let error = load_config(&parse(&["games.pgn", "--config", missing.to_str().unwrap()])).unwrap_err();
        assert!(error.to_string().starts_with("Could not read config"));

        let path = std::env::temp_dir().join(format!("pgn_tokens_bad_config_{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        let error = load_config(&parse(&["games.pgn", "--config", path.to_str().unwrap()])).unwrap_err();
        assert!(error.to_string().starts_with("Invalid config"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_print_game() {
        let game = GameBlock::new("[Event \"A\"]\n\n1. e4 1-0\n".to_string());

        let mut out = Vec::new();
        print_game(&mut out, 1, &game, &parse(&["games.pgn", "--summary"])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Game 1: 8 tokens, 1 tags\n");

        let mut out = Vec::new();
        print_game(&mut out, 1, &game, &parse(&["games.pgn", "--json"])).unwrap();
        let json = String::from_utf8(out).unwrap();
        assert!(json.starts_with(r#"[{"kind":"TAG_START","text":"["}"#));
        assert!(json.ends_with("{\"kind\":\"RESULT\",\"text\":\"1-0\"}]\n"));
    }
}
