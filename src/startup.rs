use crate::configuration::{PaymentSettings, SecretSetting, Settings, UserSettings};
use crate::database::get_connection_pool;
use crate::middleware::SaveRequestResponse;
use crate::routes::main_route;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
    db_pool: PgPool,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        tracing::info!("Listening on {}:{}", configuration.application.host, port);
        let server = run(
            listener,
            connection_pool.clone(),
            configuration.secret,
            configuration.user,
            configuration.payment,
            configuration.application.workers,
        )?;
        Ok(Self {
            port,
            server,
            db_pool: connection_pool,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db_pool(&self) -> PgPool {
        self.db_pool.clone()
    }

    // Only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn run(
    listener: TcpListener,
    db_pool: PgPool,
    secret: SecretSetting,
    user_setting: UserSettings,
    payment_setting: PaymentSettings,
    workers: usize,
) -> Result<Server, anyhow::Error> {
    let db_pool = web::Data::new(db_pool);
    let secret_obj = web::Data::new(secret);
    let user_setting_obj = web::Data::new(user_setting);
    let payment_setting_obj = web::Data::new(payment_setting);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(SaveRequestResponse)
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(db_pool.clone())
            .app_data(secret_obj.clone())
            .app_data(user_setting_obj.clone())
            .app_data(payment_setting_obj.clone())
            .configure(main_route)
    })
    .workers(workers.max(1))
    .listen(listener)?
    .run();

    Ok(server)
}
