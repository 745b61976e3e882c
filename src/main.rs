use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use promptqr::interfaces::csv::payload_writer::PayloadWriter;
use promptqr::interfaces::csv::target_reader::TargetReader;
use promptqr::{PayloadOptions, PayloadRecord, ZeroAmountPolicy, classify, format_for_display};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the PromptPay payload for a single payee
    Generate {
        /// Phone number, tax ID or e-wallet ID. Separators are ignored.
        target: String,

        /// Fixed amount in baht. Leave out for a flexible-amount code.
        #[arg(long, visible_alias = "amont", allow_negative_numbers = true)]
        amount: Option<Decimal>,

        /// How an amount of exactly zero is encoded
        #[arg(
            long,
            value_enum,
            env = "PROMPTQR_ZERO_AMOUNT",
            default_value_t = ZeroAmount::Flexible
        )]
        zero_amount: ZeroAmount,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also draw the QR code in the terminal
        #[arg(long)]
        qr: bool,
    },
    /// Print the category and display form of an identifier
    Classify { target: String },
    /// Generate payloads for every row of a `target,amount` CSV file
    Batch {
        /// Input CSV file
        input: PathBuf,

        #[arg(
            long,
            value_enum,
            env = "PROMPTQR_ZERO_AMOUNT",
            default_value_t = ZeroAmount::Flexible
        )]
        zero_amount: ZeroAmount,
    },
}

/// Command-line spelling of [`ZeroAmountPolicy`].
#[derive(Clone, Copy, ValueEnum)]
enum ZeroAmount {
    /// Zero means "no amount" (static code)
    Flexible,
    /// Zero is encoded as `0.00` (dynamic code)
    Fixed,
}

impl From<ZeroAmount> for ZeroAmountPolicy {
    fn from(value: ZeroAmount) -> Self {
        match value {
            ZeroAmount::Flexible => ZeroAmountPolicy::Flexible,
            ZeroAmount::Fixed => ZeroAmountPolicy::Fixed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            target,
            amount,
            zero_amount,
            format,
            qr,
        } => {
            let options = PayloadOptions {
                amount,
                zero_amount: zero_amount.into(),
            };
            let record = PayloadRecord::generate(&target, &options).into_diagnostic()?;

            match format {
                OutputFormat::Text => println!("{}", record.payload),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&record).into_diagnostic()?)
                }
            }

            if qr {
                let code = qr_code::QrCode::new(record.payload.as_bytes())
                    .map_err(|e| miette::miette!("Failed to render QR code: {e:?}"))?;
                println!("{}", code.to_string(false, 3));
            }
        }
        Command::Classify { target } => {
            println!("{}\t{}", classify(&target), format_for_display(&target));
        }
        Command::Batch { input, zero_amount } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = TargetReader::new(file);

            let stdout = io::stdout();
            let mut writer = PayloadWriter::new(stdout.lock());
            let mut written = 0usize;

            for row in reader.targets() {
                let row = match row {
                    Ok(row) => row,
                    Err(e) => {
                        eprintln!("Error reading target: {}", e);
                        continue;
                    }
                };

                let options = PayloadOptions {
                    amount: row.amount,
                    zero_amount: zero_amount.into(),
                };
                match PayloadRecord::generate(&row.target, &options) {
                    Ok(record) => {
                        writer.write_record(&record).into_diagnostic()?;
                        written += 1;
                    }
                    Err(e) => {
                        eprintln!("Error generating payload for {}: {}", row.target, e);
                    }
                }
            }

            writer.flush().into_diagnostic()?;
            debug!(written, "batch finished");
        }
    }

    Ok(())
}
