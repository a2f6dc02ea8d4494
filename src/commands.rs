use crate::configuration::Settings;
use crate::database::configure_database_using_sqlx;

#[tracing::instrument(name = "Run custom command", skip(configuration))]
pub async fn run_custom_commands(
    args: Vec<String>,
    configuration: &Settings,
) -> Result<(), anyhow::Error> {
    let command = match args.get(1) {
        Some(command) => command.as_str(),
        None => {
            eprintln!("Invalid command. Please provide a valid command.");
            return Ok(());
        }
    };

    match command {
        "migrate" => {
            configure_database_using_sqlx(&configuration.database).await?;
            tracing::info!("Migrations applied to {}", &configuration.database.name);
        }
        _ => {
            eprintln!("Unknown command: {}. Please use a valid command.", command);
        }
    }

    Ok(())
}
