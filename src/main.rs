use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;

mod api;
mod cli;
mod metrics;
mod state;

use cli::CommandArgs;
use state::new_state;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse();
    let bind_address = format!("{}:{}", args.address, args.port);

    let state = new_state(args.registry_config(), args.presenter);
    log::info!("🔄 Process registry ready ({:?} presenter, {:?} colors)", args.presenter, args.color_selection);

    print_banner(&args);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(api::configure)
    })
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server stopped with an error")
}

fn print_banner(args: &CommandArgs) {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║      Process Log v0.1.1                                   ║");
    println!("║      Process lifecycle logging over HTTP                  ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🚀 Server starting on http://{}:{}", args.address, args.port);
    println!();
    println!("📋 Available endpoints:");
    println!("  POST   /api/process/start          - Start a process");
    println!("  POST   /api/process/{{name}}/log     - Log a message");
    println!("  PUT    /api/process/{{name}}/logging - Enable/disable logging");
    println!("  DELETE /api/process/{{name}}         - End a process");
    println!("  GET    /api/process/{{name}}         - Inspect a process");
    println!("  GET    /api/process/list           - List running processes");
    println!("  GET    /metrics                    - Prometheus metrics");
    println!("  GET    /health                     - Health check");
    println!();
    println!("💡 Features:");
    println!("  • Per-process colors and durations");
    println!("  • Toggle logging per process");
    println!("  • Prometheus metrics export");
    println!("═══════════════════════════════════════════════════════════");
}
