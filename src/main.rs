mod logging;

use clap::{Parser, Subcommand};
use iban_check::{country, request, sample, Engine};
use logging::LogConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::create_dir_all;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "iban-check")]
#[command(about = "Validate, format and generate IBAN / BBAN values", long_about = None)]
struct Cli {
    /// Overrides IBAN_LOG_LEVEL / RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Overrides IBAN_LOG_DIR ("off" disables the log file)
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    ValidateBban(ValidateBbanArgs),
    ValidateIban(ValidateIbanArgs),
    FormatBban(FormatBbanArgs),
    FormatIban(FormatIbanArgs),
    Generate(GenerateArgs),
    Sample(SampleArgs),
    Batch(BatchArgs),
}

#[derive(Parser)]
struct ValidateBbanArgs {
    value: String,
    #[arg(long)]
    country: String,
}

#[derive(Parser)]
struct ValidateIbanArgs {
    value: String,
    /// Also check the BBAN against the country's structure
    #[arg(long, default_value_t = false)]
    check_bban: bool,
}

#[derive(Parser)]
struct FormatBbanArgs {
    value: String,
    #[arg(long)]
    country: String,
    #[arg(long, default_value = "-")]
    separator: String,
}

#[derive(Parser)]
struct FormatIbanArgs {
    value: String,
}

#[derive(Parser)]
struct GenerateArgs {
    /// Raw BBAN
    value: String,
    #[arg(long)]
    country: String,
    #[arg(long, default_value_t = false)]
    check_bban: bool,
    /// Print in groups of four
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser)]
struct SampleArgs {
    /// Country to sample; every supported country when omitted
    #[arg(long)]
    country: Option<String>,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser)]
struct BatchArgs {
    /// JSON lines, one request object per line
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "data/iban_results.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct BatchRow {
    line: usize,
    op: Option<String>,
    result: Option<String>,
    error: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config =
        LogConfig::from_env().with_overrides(cli.log_level.as_deref(), cli.log_dir.as_deref());
    logging::init_logging("iban-check", &config)?;

    let engine = Engine::new();
    match cli.command {
        Command::ValidateBban(args) => {
            let valid = engine
                .validate_bban(&args.value, &args.country)
                .map_err(|err| err.to_string())?;
            println!("{valid}");
            Ok(())
        }
        Command::ValidateIban(args) => {
            let valid = engine
                .validate_iban(&args.value, args.check_bban)
                .map_err(|err| err.to_string())?;
            println!("{valid}");
            Ok(())
        }
        Command::FormatBban(args) => {
            let formatted = engine
                .format_bban(&args.value, &args.country, &args.separator)
                .map_err(|err| err.to_string())?;
            println!("{formatted}");
            Ok(())
        }
        Command::FormatIban(args) => {
            println!("{}", engine.format_iban(&args.value));
            Ok(())
        }
        Command::Generate(args) => {
            let iban = engine
                .generate_iban(&args.value, &args.country, args.check_bban, args.pretty)
                .map_err(|err| err.to_string())?;
            println!("{iban}");
            Ok(())
        }
        Command::Sample(args) => run_sample(&engine, args),
        Command::Batch(args) => run_batch(&engine, args),
    }
}

fn run_sample(engine: &Engine, args: SampleArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let countries: Vec<String> = match args.country {
        Some(code) => {
            let code = code.trim().to_uppercase();
            if !country::is_supported(&code) {
                return Err(format!("no BBAN structure known for country code '{code}'"));
            }
            vec![code]
        }
        None => country::all()
            .iter()
            .map(|entry| entry.code.to_string())
            .collect(),
    };

    log::info!(
        "Sampling {} IBAN(s) for {} countr{} (seed {})",
        args.count,
        countries.len(),
        if countries.len() == 1 { "y" } else { "ies" },
        seed
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for code in &countries {
        for _ in 0..args.count {
            let iban = sample::random_iban(&mut rng, code)
                .ok_or_else(|| format!("no BBAN structure known for country code '{code}'"))?;
            if args.pretty {
                println!("{}", engine.format_iban(&iban));
            } else {
                println!("{iban}");
            }
        }
    }
    Ok(())
}

fn run_batch(engine: &Engine, args: BatchArgs) -> Result<(), String> {
    let start = Instant::now();
    let file = std::fs::File::open(&args.input)
        .map_err(|err| format!("cannot open {}: {}", args.input.display(), err))?;

    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|err| err.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(process_line(engine, idx + 1, &line));
    }

    write_csv(&args.output, &rows)?;

    let failed = rows.iter().filter(|row| row.error.is_some()).count();
    emit_info_line(&format!(
        "Batch: input={} output={} requests={} failed={}",
        args.input.display(),
        args.output.display(),
        rows.len(),
        failed
    ));
    emit_info_line(&format!("Batch time: {} ms", start.elapsed().as_millis()));
    Ok(())
}

fn process_line(engine: &Engine, line_no: usize, line: &str) -> BatchRow {
    let parsed: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("line {}: invalid JSON: {}", line_no, err);
            return BatchRow {
                line: line_no,
                op: None,
                result: None,
                error: Some(format!("invalid JSON: {err}")),
            };
        }
    };

    let op = parsed
        .get("op")
        .and_then(|value| value.as_str())
        .map(str::to_string);
    match request::execute(engine, &parsed) {
        Ok(outcome) => BatchRow {
            line: line_no,
            op,
            result: Some(outcome.to_string()),
            error: None,
        },
        Err(err) => {
            log::debug!("line {}: {}", line_no, err);
            BatchRow {
                line: line_no,
                op,
                result: None,
                error: Some(err.to_string()),
            }
        }
    }
}

fn write_csv(output: &Path, rows: &[BatchRow]) -> Result<(), String> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|err| err.to_string())?;
        }
    }
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    for row in rows {
        writer.serialize(row).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        eprintln!("{message}");
    }
}
