//! In-memory stand-in for the conference gateway, for running the desktop
//! client without the backend services.

mod routes;
mod store;

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::RwLock;
use warp::Filter;

#[derive(Parser, Debug)]
#[command(name = "mock-backend")]
#[command(about = "In-memory mock of the conference management REST API")]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8888)]
    port: u16,

    /// Start with a few sample keynotes and conferences
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let store = if args.seed {
        store::Store::seeded()
    } else {
        store::Store::new()
    };
    let db: routes::Db = Arc::new(RwLock::new(store));

    let api = routes::api(db).with(warp::log("mock_backend"));
    let addr = SocketAddr::new(args.host, args.port);

    let (bound, server) = warp::serve(api).bind_with_graceful_shutdown(addr, async {
        let _ = tokio::signal::ctrl_c().await;
        log::info!("shutting down");
    });

    log::info!("mock backend listening on http://{}", bound);
    server.await;
}
