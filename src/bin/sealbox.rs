//! Sealbox CLI - NaCl secretbox file encryption
//!
//! Command-line interface for generating keys and nonces and for
//! encrypting and decrypting files with XSalsa20Poly1305.

use clap::{Parser, Subcommand};
use std::error::Error as StdError;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sealbox::error::{Result, SealboxError};
use sealbox::keyread::{ConstantKeyReader, KeyReader, ReaderKeyReader, TerminalKeyReader};
use sealbox::{encoding, file_ops, secretbox};

#[derive(Parser)]
#[command(name = "sealbox")]
#[command(version)]
#[command(about = "NaCl secretbox (XSalsa20Poly1305) file encryption.", long_about = None)]
struct Cli {
    /// Read the base64 key from stdin; takes precedence over --key and SEALBOX_KEY
    #[arg(long, global = true)]
    key_stdin: bool,

    /// Base64 key; prompted for on the terminal when not given
    #[arg(long, global = true, env = "SEALBOX_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a new random key (base64)
    Keygen,

    /// Print a new random nonce (base64)
    Noncegen,

    /// Encrypt a file
    #[command(alias = "e")]
    Encrypt {
        /// Path to the file whose contents is to be encrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the encrypted bytes to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Base64 nonce; a random one is generated and printed when omitted
        #[arg(short, long, value_name = "B64")]
        nonce: Option<String>,
    },

    /// Decrypt a file
    #[command(alias = "d")]
    Decrypt {
        /// Path to the file whose contents is to be decrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the decrypted bytes to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Base64 nonce the file was encrypted with
        #[arg(short, long, value_name = "B64")]
        nonce: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", error_chain(&e));
        process::exit(1);
    }
}

/// Render an error followed by each of its sources, colon separated.
fn error_chain(err: &SealboxError) -> String {
    let mut rendered = err.message().to_string();
    let mut source: Option<&dyn StdError> = err.source_error().map(|e| e as &dyn StdError);
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Keygen => {
            let key = secretbox::random_key()?;
            println!("{}", &*encoding::key_to_base64(&key));
        }
        Commands::Noncegen => {
            let nonce = secretbox::random_nonce()?;
            println!("{}", encoding::nonce_to_base64(&nonce));
        }
        Commands::Encrypt {
            input,
            output,
            nonce,
        } => {
            let (nonce, generated) = match nonce {
                Some(encoded) => (encoding::nonce_from_base64(encoded)?, false),
                None => (secretbox::random_nonce()?, true),
            };
            let mut reader = get_key_reader(cli)?;
            file_ops::encrypt_file(input, output, &nonce, &mut *reader)?;
            info!(output = %output.display(), "encrypted");
            // The nonce is needed for decryption and is not stored in the output.
            if generated {
                println!("{}", encoding::nonce_to_base64(&nonce));
            }
        }
        Commands::Decrypt {
            input,
            output,
            nonce,
        } => {
            let nonce = encoding::nonce_from_base64(nonce)?;
            let mut reader = get_key_reader(cli)?;
            file_ops::decrypt_file(input, output, &nonce, &mut *reader)?;
            info!(output = %output.display(), "decrypted");
        }
    }
    Ok(())
}

fn get_key_reader(cli: &Cli) -> Result<Box<dyn KeyReader>> {
    if cli.key_stdin {
        debug!("reading key from stdin");
        Ok(Box::new(ReaderKeyReader::new(Box::new(std::io::stdin()))))
    } else if let Some(encoded) = &cli.key {
        debug!("using key from command line or environment");
        Ok(Box::new(ConstantKeyReader::new(encoding::key_from_base64(
            encoded,
        )?)))
    } else {
        Ok(Box::new(TerminalKeyReader::new()))
    }
}
