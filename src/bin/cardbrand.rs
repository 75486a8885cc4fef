//! CLI tool for card brand identification and validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate one or more card numbers
//! cardbrand validate 4532015112830366 "6011 1111 1111 1117"
//!
//! # Identify the brand only
//! cardbrand identify 378282246310005
//!
//! # Luhn check only
//! cardbrand luhn 4532015112830366
//!
//! # List registered brands, including those from a rule file
//! cardbrand --rules brands.json brands --output json
//!
//! # Walk through the built-in demo
//! cardbrand demo
//! ```

use cardbrand::{verify_checksum, BrandId, BrandRegistry, ValidationResult, Validator};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cardbrand")]
#[command(author, version, about = "Payment card brand identification and validation")]
struct Cli {
    /// JSON rule file with additional brands (may be repeated)
    #[arg(short, long, global = true)]
    rules: Vec<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate card numbers
    Validate {
        /// Card numbers to validate (spaces and dashes allowed)
        #[arg(required = true)]
        card_numbers: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Identify the brand of a card number
    Identify {
        /// Card number (spaces and dashes allowed)
        card_number: String,
    },

    /// Check if a card number passes the Luhn algorithm
    Luhn {
        /// Card number to check (spaces and dashes allowed)
        card_number: String,
    },

    /// List registered brands in match order
    Brands {
        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Validate sample cards, then register and use a new brand
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = Arc::new(BrandRegistry::new());
    for path in &cli.rules {
        if let Err(e) = registry.load_json_file(path) {
            eprintln!("Error: {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }
    let validator = Validator::with_registry(registry);

    match cli.command {
        Commands::Validate {
            card_numbers,
            output,
        } => cmd_validate(&validator, &card_numbers, output),
        Commands::Identify { card_number } => cmd_identify(&validator, &card_number),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Brands { output } => cmd_brands(&validator, output),
        Commands::Demo => cmd_demo(&validator),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Display name for a detected brand, as the presentation layer shows it.
fn brand_name(validator: &Validator, brand: Option<&BrandId>) -> String {
    brand
        .and_then(|id| validator.registry().get(id))
        .map_or_else(|| "Unknown".to_string(), |rule| rule.display_name().to_string())
}

fn cmd_validate(validator: &Validator, card_numbers: &[String], output: OutputFormat) -> ExitCode {
    let results: Vec<ValidationResult> = card_numbers
        .iter()
        .map(|n| validator.validate_card(n))
        .collect();

    match output {
        OutputFormat::Text => {
            for (input, result) in card_numbers.iter().zip(&results) {
                println!("Card: {}", input);
                println!("Brand: {}", brand_name(validator, result.brand()));
                println!("Valid: {}", if result.is_valid() { "yes" } else { "no" });
                if let Some(e) = result.error() {
                    println!("Error: {}", e);
                }
                println!("Digits: {}", result.length());
                println!();
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = results
                .iter()
                .map(|result| {
                    json!({
                        "number": result.number(),
                        "brand": result.brand().map(BrandId::as_str),
                        "brand_name": brand_name(validator, result.brand()),
                        "valid": result.is_valid(),
                        "error": result.error().map(|e| e.to_string()),
                    })
                })
                .collect();
            match serde_json::to_string_pretty(&entries) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    if results.iter().all(ValidationResult::is_valid) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_identify(validator: &Validator, card_number: &str) -> ExitCode {
    let brand = validator.identify_brand(card_number);
    match brand.as_ref().and_then(|id| validator.registry().get(id)) {
        Some(rule) => {
            println!("Detected Brand: {} ({})", rule.display_name(), rule.id());
            println!("Valid Lengths: {:?}", rule.allowed_lengths());
            ExitCode::SUCCESS
        }
        None => {
            println!("Detected Brand: Unknown");
            ExitCode::FAILURE
        }
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if verify_checksum(&cardbrand::normalize(card_number)) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_brands(validator: &Validator, output: OutputFormat) -> ExitCode {
    match output {
        OutputFormat::Text => {
            for rule in validator.registry().rules() {
                println!(
                    "{:<12} {:<18} {:?}",
                    rule.id(),
                    rule.display_name(),
                    rule.allowed_lengths()
                );
            }
            ExitCode::SUCCESS
        }
        OutputFormat::Json => match validator.registry().to_json() {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn cmd_demo(validator: &Validator) -> ExitCode {
    const SAMPLE_CARDS: [&str; 6] = [
        "4532015112830366", // Visa (16 digits)
        "5555555555554444", // Mastercard (16 digits)
        "378282246310005",  // American Express (15 digits)
        "6011111111111117", // Discover (16 digits)
        "3530111333300000", // JCB (16 digits)
        "4532015112830367", // Visa, bad check digit
    ];

    println!("=== CARD VALIDATION ===\n");
    for card in SAMPLE_CARDS {
        print_card(validator, card);
    }

    println!("=== REGISTERING A NEW BRAND ===\n");
    let future = match BrandId::new("future") {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = validator
        .registry()
        .register(future, r"^9[0-9]{15}$", "Future Brand", [16, 19])
    {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    println!("New brand registered.\n");
    print_card(validator, "9000 0000 0000 0001");

    ExitCode::SUCCESS
}

fn print_card(validator: &Validator, card: &str) {
    let result = validator.validate_card(card);
    println!("Card: {}", card);
    println!(
        "Brand: {} ({})",
        result.brand().map_or("unknown", BrandId::as_str),
        brand_name(validator, result.brand())
    );
    println!("Valid: {}", result.is_valid());
    println!("Digits: {}\n", result.length());
}
