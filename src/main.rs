#![warn(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use paperforge::document::DocumentContent;
use paperforge::error::ContextError;
use paperforge::pdf::export_to_pdf;
use paperforge::preview::preview;

#[derive(Parser)]
#[command(version, long_about = None)]
struct CliArguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a document to a PDF file
    Render {
        #[arg(help = "Path to the document file in the JSON format")]
        document_path: PathBuf,
        #[arg(
            short = 'o',
            long = "output-path",
            help = "Path of the PDF file to write, defaults to the export file name of the document"
        )]
        output_path: Option<PathBuf>,
    },
    /// Print the plain-text preview of a document
    Preview {
        #[arg(help = "Path to the document file in the JSON format")]
        document_path: PathBuf,
    },
}

fn main() {
    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), ContextError> {
    env_logger::init();

    let CliArguments { command } = CliArguments::parse();
    match command {
        Command::Render {
            document_path,
            output_path,
        } => {
            let content = DocumentContent::from_path(&document_path)?;
            let (file_name, bytes) = export_to_pdf(&content)?;
            let output_path = output_path.unwrap_or_else(|| PathBuf::from(&file_name));
            std::fs::write(&output_path, bytes).map_err(|error| {
                ContextError::with_error(
                    format!("Unable to write the PDF file {:?}", output_path.display()),
                    &error,
                )
            })?;
            log::info!("Wrote the document to {:?}", output_path.display());
        }
        Command::Preview { document_path } => {
            let content = DocumentContent::from_path(&document_path)?;
            println!("{}", preview(&content));
        }
    }

    Ok(())
}
