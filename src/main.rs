//! burrow - a recursive DNS resolver.
//!
//! Accepts DNS queries over UDP, iteratively walks the hierarchy from the
//! root name servers, and caches successful answers. An HTTP endpoint
//! exposes the same pipeline as JSON.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use burrow::cache::{AnswerCache, MemoryStore};
use burrow::http;
use burrow::resolver::{Resolver, ResolverConfig};
use burrow::server::DnsServer;
use burrow::stats::Stats;
use burrow::transport::{UdpExchange, UdpTransport};

#[derive(Parser)]
#[command(name = "burrow")]
#[command(about = "Recursive DNS resolver", long_about = None)]
struct Args {
    /// UDP port to serve DNS on
    #[arg(short, long, default_value = "2053")]
    port: u16,

    /// Bind address (default: 127.0.0.1, or 0.0.0.0 inside a container)
    #[arg(short, long)]
    bind: Option<String>,

    /// TCP port for the HTTP forwarding endpoint
    #[arg(long, default_value = "8080")]
    http_port: u16,

    /// Number of worker threads (default: 2 per CPU core, minimum 2)
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("burrow=info")),
        )
        .init();

    // Environment overrides take precedence over flags so the container
    // entrypoint can reconfigure a fixed command line.
    let port = std::env::var("UDP_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(args.port);
    let default_bind = if std::env::var("DOCKER_ENV").is_ok() {
        "0.0.0.0"
    } else {
        "127.0.0.1"
    };
    let bind = std::env::var("UDP_BIND_ADDRESS")
        .ok()
        .or(args.bind)
        .unwrap_or_else(|| default_bind.to_string());

    let bind_addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .expect("invalid bind address");
    let http_addr: SocketAddr = format!("{bind}:{}", args.http_port)
        .parse()
        .expect("invalid bind address");

    let workers = args.workers.unwrap_or_else(|| {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        (cores * 2).max(2)
    });

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?
        .block_on(run(bind_addr, http_addr))
}

async fn run(bind_addr: SocketAddr, http_addr: SocketAddr) -> io::Result<()> {
    let transport: Arc<dyn UdpExchange> = Arc::new(UdpTransport);
    let stats = Arc::new(Stats::new());
    let resolver = Arc::new(Resolver::new(
        Arc::clone(&transport),
        AnswerCache::new(Arc::new(MemoryStore::new())),
        Arc::clone(&stats),
        ResolverConfig::default(),
    ));

    let state = http::AppState {
        resolver: Arc::clone(&resolver),
        transport,
        stats: Arc::clone(&stats),
    };
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    info!(addr = %http_addr, "HTTP endpoint listening");
    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, http::router(state)).await {
            warn!(%error, "http server exited");
        }
    });

    tokio::spawn(log_stats(stats));

    let server = DnsServer::bind(bind_addr).await?;
    server.run(resolver).await;
    Ok(())
}

async fn log_stats(stats: Arc<Stats>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    interval.tick().await;
    loop {
        interval.tick().await;
        let snapshot = stats.snapshot();
        info!(
            queries = snapshot.queries,
            cache_hits = snapshot.cache_hits,
            resolved = snapshot.resolved,
            failed = snapshot.failed,
            upstream_queries = snapshot.upstream_queries,
            avg_response_ms = snapshot.avg_response_ms,
            "resolver stats"
        );
    }
}
