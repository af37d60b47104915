// main.rs
mod api_auth;
mod api_routes;
mod input_process;
mod interactive_mode;
mod response_table;
mod responses;
mod selector;
mod session_manager;

use std::env;
use std::fs;
use std::sync::Mutex;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::anyhow;
use dotenv::dotenv;
use log::{error, info};

use response_table::ResponseTable;
use session_manager::SessionManager;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // Create logs directory if it doesn't exist
    fs::create_dir_all("logs")?;
    // Configure log4rs
    log4rs::init_file("log4rs.yaml", Default::default())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, anyhow!(e)))?;

    info!("Starting Aimen chat assistant");

    // Refuse to start on a malformed table rather than ever serving an empty
    // reply.
    let table = match env::var("RESPONSES_PATH") {
        Ok(path) => ResponseTable::load(&path),
        Err(_) => responses::builtin_table(),
    }
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, anyhow!(e)))?;

    info!(
        "Response table ready: {} trigger phrases, {} fallback rules",
        table.trigger_count(),
        table.fallback_count()
    );

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    // Spawn a new thread for the interactive console mode
    let console_table = table.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            if let Err(e) = interactive_mode::run_interactive_mode(&console_table).await {
                error!("Error in interactive mode: {}", e);
            }
        });
    });

    let table_data = web::Data::new(table);
    let session_manager = web::Data::new(Mutex::new(SessionManager::new()));

    info!("Listening on {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(api_auth::ApiKey)
            .app_data(table_data.clone())
            .app_data(session_manager.clone())
            .configure(api_routes::configure)
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
