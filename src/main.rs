use marketplace_order_service::{
    commands::run_custom_commands,
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    let args: Vec<String> = std::env::args().collect();
    let configuration = get_configuration()?;
    let subscriber = get_subscriber(
        configuration.application.name.clone(),
        "info".into(),
        std::io::stdout,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );
    init_subscriber(subscriber)?;

    if args.len() > 1 {
        run_custom_commands(args, &configuration).await?;
    } else {
        let application = Application::build(configuration).await?;
        application.run_until_stopped().await?;
    }
    Ok(())
}
