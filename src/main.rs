use clap::Parser;
use formview::adapters::harvester::ResultHarvester;
use formview::cli::{Cli, Command, QueryArgs};
use formview::config::forms::load_form;
use formview::config::Settings;
use formview::domain::{FormDefinition, Parameters};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_path(&cli.config)?;
    let assembler = formview::build_assembler(&settings);

    match cli.command {
        Command::Assemble { form, query } => {
            let mut definition = load_form(&form)?;
            apply_query(&mut definition, &query);

            let view = assembler.assemble_form(&definition);
            info!("Assembled form '{}' with {} sections", view.name, view.sections.len());
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Harvest {
            form,
            submitted,
            query,
        } => {
            let mut definition = load_form(&form)?;
            apply_query(&mut definition, &query);

            let mut view = assembler.assemble_form(&definition);
            let submitted: Parameters = submitted.into_iter().collect();
            let accepted = view.apply_submission(&submitted);
            info!("Applied {} of {} submitted values", accepted, submitted.len());

            let results = ResultHarvester::harvest(&view, &mut definition);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Types => {
            for id in assembler.registry().ids() {
                println!("{}", id);
            }
            for (alias, target) in assembler.registry().aliases() {
                println!("{} -> {}", alias, target);
            }
        }
    }

    Ok(())
}

fn apply_query(definition: &mut FormDefinition, query: &QueryArgs) {
    definition.query_parameters.extend(query.parameters());
    if query.read_query_string {
        definition.read_query_string = true;
    }
}
