extern crate fdb_rs;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fdb_rs::constants::{BASE_URL, DEFAULT_LIMIT};
use fdb_rs::{
    ClassificationType, Credentials, DoseConceptType, Endpoint, Fdb, InteroperableType, Presenter,
    RxNormConceptType, SearchType, View,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXAMPLE_SEARCHES: &str = "Example searches:
  fdb-rs search clopidogrel
  fdb-rs search acetaminophen      (Tylenol)
  fdb-rs search ibuprofen          (Advil)
  fdb-rs search amoxicillin
  fdb-rs search lisinopril";

/// Command line client for the FDB Cloud Connector drug information API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// FDB client id
    #[arg(long, env = "FDB_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// FDB client secret
    #[arg(long, env = "FDB_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// API base URL
    #[arg(long, env = "FDB_BASE_URL", default_value = BASE_URL)]
    base_url: String,

    /// Which views of a successful response to print
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Print the full JSON of each listed drug
    #[arg(long)]
    details: bool,

    /// Log request and response diagnostics to stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search prescribable drugs by name
    #[command(after_help = EXAMPLE_SEARCHES)]
    Search {
        /// Drug name to search for
        text: String,
        #[arg(long, value_enum, default_value_t = SearchType::StartsWith)]
        search_type: SearchType,
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..=1000))]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Details of one prescribable drug
    Details { drug_id: String },
    /// Interactions of one prescribable drug
    Interactions { drug_id: String },
    /// Dose records for a drug concept
    Dosing {
        drug_id: String,
        #[arg(long, value_enum, default_value_t = DoseConceptType::PrescribableDrugs)]
        concept_type: DoseConceptType,
    },
    /// Contraindications of one prescribable drug
    Contraindications { drug_id: String },
    /// RxNorm concepts mapped to a drug concept
    RxNormConcepts {
        drug_id: String,
        #[arg(long, value_enum, default_value_t = RxNormConceptType::DispensableDrugs)]
        concept_type: RxNormConceptType,
    },
    /// RxNorm drugs linked to a classification
    InteroperableLinks {
        classification_id: String,
        #[arg(long, value_enum, default_value_t = ClassificationType::Etc)]
        classification_type: ClassificationType,
        #[arg(long, value_enum, default_value_t = InteroperableType::RxNormSemanticClinicalDrug)]
        interoperable_type: InteroperableType,
    },
    /// Routed dose form drugs, optionally filtered by text
    RoutedDoseFormDrugs {
        #[arg(long)]
        search_text: Option<String>,
        #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..=1000))]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

impl From<Command> for Endpoint {
    fn from(command: Command) -> Self {
        match command {
            Command::Search {
                text,
                search_type,
                limit,
                offset,
            } => Endpoint::Search {
                text,
                search_type,
                limit,
                offset,
            },
            Command::Details { drug_id } => Endpoint::Details { drug_id },
            Command::Interactions { drug_id } => Endpoint::Interactions { drug_id },
            Command::Dosing {
                drug_id,
                concept_type,
            } => Endpoint::Dosing {
                concept_type,
                drug_id,
            },
            Command::Contraindications { drug_id } => Endpoint::Contraindications { drug_id },
            Command::RxNormConcepts {
                drug_id,
                concept_type,
            } => Endpoint::RxNormConcepts {
                concept_type,
                drug_id,
            },
            Command::InteroperableLinks {
                classification_id,
                classification_type,
                interoperable_type,
            } => Endpoint::InteroperableLinks {
                classification_id,
                classification_type,
                interoperable_type,
            },
            Command::RoutedDoseFormDrugs {
                search_text,
                limit,
                offset,
            } => Endpoint::RoutedDoseFormDrugs {
                search_text,
                limit,
                offset,
            },
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fdb_rs=debug" } else { "fdb_rs=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let args = Arguments::parse();
    init_tracing(args.verbose);

    let credentials = Credentials::new(&args.client_id, &args.client_secret)
        .context("Please provide FDB credentials")?;
    let fdb = Fdb::new(&args.base_url)
        .with_context(|| format!("Invalid base URL {}", args.base_url))?;
    let endpoint = Endpoint::from(args.command);

    let result = fdb
        .call(&endpoint, &credentials)
        .await
        .with_context(|| format!("Invalid {} parameters", endpoint.label()))?;

    let presenter = Presenter::new().view(args.view).details(args.details);
    let mut stdout = io::stdout().lock();
    presenter.present(&result, &mut stdout)?;
    stdout.flush()?;

    Ok(if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
