use anyhow::{Context, Result};
use slack_mrkdwn_config::Config;
use slack_mrkdwn_engine::{MrkdwnConverter, OutputEncoding, split_chunks};
use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
    process,
};

struct Args {
    input_path: Option<PathBuf>,
    chunked: bool,
}

fn usage(program: &str) {
    eprintln!("Usage: {program} [--chunks] [markdown-file]");
    eprintln!("Reads Markdown from the file (or stdin) and prints Slack mrkdwn.");
    eprintln!("  --chunks  split output into Slack-sized messages");
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args {
        input_path: None,
        chunked: false,
    };

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--chunks" => parsed.chunked = true,
            flag if flag.starts_with('-') && flag != "-" => return None,
            "-" if parsed.input_path.is_none() => {}
            path if parsed.input_path.is_none() => parsed.input_path = Some(PathBuf::from(path)),
            _ => return None,
        }
    }

    Some(parsed)
}

fn read_input(input_path: Option<&PathBuf>) -> Result<String> {
    match input_path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("slack-mrkdwn");
    let Some(args) = parse_args(&args) else {
        usage(program);
        process::exit(1);
    };

    let config_path = Config::config_path();
    let config = match Config::load_or_default_from_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    log::debug!("Config from {}: {config:?}", config_path.display());

    let encoding = match OutputEncoding::for_label(&config.encoding) {
        Ok(encoding) => encoding,
        Err(e) => {
            eprintln!(
                "Error: Invalid encoding in config file '{}': {e}",
                config_path.display()
            );
            process::exit(1);
        }
    };
    let converter = MrkdwnConverter::with_encoding(encoding)?;

    let markdown = read_input(args.input_path.as_ref())?;
    let converted = converter.convert(&markdown);

    if !args.chunked {
        println!("{converted}");
        return Ok(());
    }

    let chunks = split_chunks(&converted, config.max_chunk_chars);
    log::debug!(
        "Split {} characters into {} chunks",
        converted.chars().count(),
        chunks.len()
    );
    for (i, chunk) in chunks.iter().enumerate() {
        println!("--- chunk {}/{} ---", i + 1, chunks.len());
        println!("{chunk}");
    }

    Ok(())
}
