mod commands;
mod read;

use clap::{Arg, ArgMatches, Command};
use datastore_provider::{DataStoreManifestDataSource, ProviderConfig};
use datastore_utils::setup_logging;
use log::{error, info};

use commands::manifest::{CommandError, OUTPUT_FORMATS};
use commands::schema::SCHEMA_FORMATS;
use read::read_config_from_file;

fn cli() -> Command {
    Command::new("datastore")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validates DataStore configurations and renders kamaji.clastix.io/v1alpha1 manifests")
        .subcommand_required(true)
        .arg(
            Arg::new("provider-type-name")
                .long("provider-type-name")
                .global(true)
                .help("Provider type name used as data source prefix, e.g. k8s (defaults to PROVIDER_TYPE_NAME)"),
        )
        .subcommand(Command::new("metadata").about("Print the data source type name"))
        .subcommand(
            Command::new("schema")
                .about("Print the data source schema")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(SCHEMA_FORMATS)
                        .default_value("json")
                        .help("Output format of the schema"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a configuration file against the schema")
                .arg(
                    Arg::new("file")
                        .help("Configuration file to validate, e.g. datastore.yaml")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("read")
                .about("Validate a configuration file and print the generated manifest")
                .arg(
                    Arg::new("file")
                        .help("Configuration file to read, e.g. datastore.yaml")
                        .required(true),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(OUTPUT_FORMATS)
                        .default_value("yaml")
                        .help("yaml prints the manifest, json the computed attributes, state the configuration with computed attributes"),
                ),
        )
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_default()
}

fn report(error: CommandError) -> ! {
    match error {
        CommandError::Rejected(diagnostics) => {
            for diagnostic in diagnostics.iter() {
                error!("{}", diagnostic);
            }
        }
        CommandError::Other(e) => {
            error!("{:#}", e);
        }
    }
    std::process::exit(1);
}

async fn load(matches: &ArgMatches) -> serde_json::Value {
    match read_config_from_file(arg(matches, "file")).await {
        Ok(config) => config,
        Err(e) => report(CommandError::Other(e)),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = setup_logging() {
        eprintln!("Failed to set up logging: {}", e);
    }

    let matches = cli().get_matches();

    let mut config = ProviderConfig::from_env();
    if let Some(name) = matches.get_one::<String>("provider-type-name") {
        config = config.with_provider_type_name(name);
    }
    let data_source = DataStoreManifestDataSource::new();

    match matches.subcommand() {
        Some(("metadata", _)) => {
            println!(
                "{}",
                commands::schema::render_metadata(&data_source, &config.provider_type_name)
            );
        }
        Some(("schema", run_matches)) => {
            match commands::schema::render_schema(
                &data_source,
                &config.provider_type_name,
                arg(run_matches, "format"),
            ) {
                Ok(rendered) => println!("{}", rendered),
                Err(e) => report(CommandError::Other(e)),
            }
        }
        Some(("validate", run_matches)) => {
            let file = arg(run_matches, "file");
            let input = load(run_matches).await;
            match commands::manifest::validate(&data_source, &input) {
                Ok(()) => info!("Configuration {} is valid", file),
                Err(e) => report(e),
            }
        }
        Some(("read", run_matches)) => {
            let input = load(run_matches).await;
            match commands::manifest::read(&data_source, &input, arg(run_matches, "output")) {
                Ok(rendered) => println!("{}", rendered.trim_end()),
                Err(e) => report(e),
            }
        }
        _ => {
            error!("Unknown command, see --help");
            std::process::exit(1);
        }
    }
}
