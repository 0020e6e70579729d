use actix_web::{middleware::Logger, web, App, HttpServer};
use nuclear_war_server::{config::settings, game::SessionRegistry, http, metrics};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = settings();
    let registry = web::Data::new(SessionRegistry::new());
    let prometheus = metrics::build()?;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(registry.clone())
            .configure(http::routes::init_routes)
    });
    if let Some(workers) = settings.workers {
        server = server.workers(workers);
    }

    log::info!("Nuclear War server listening on {}", settings.server_addr);
    server.bind(&settings.server_addr)?.run().await?;
    Ok(())
}
