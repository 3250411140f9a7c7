use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use podrelay::application::ports::{BlobStore, CrawlerClient};
use podrelay::application::services::{
    ArchiveBuckets, RetentionWorker, TranscriptArchiver, TranscriptionService,
};
use podrelay::infrastructure::asr::AsrEngineFactory;
use podrelay::infrastructure::crawler::HttpCrawlerClient;
use podrelay::infrastructure::observability::init_tracing;
use podrelay::infrastructure::storage::BlobStoreFactory;
use podrelay::presentation::config::CrawlerSettings;
use podrelay::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&settings.logging, environment);

    tracing::info!(
        environment = %environment,
        primary_engine = %settings.asr.primary,
        backup_engine = %settings.asr.backup,
        "Starting podcast transcription relay"
    );

    let (primary, backup) = AsrEngineFactory::create_pair(&settings.asr)
        .context("Failed to create transcription engines")?;

    let cancel = CancellationToken::new();
    let mut background = Vec::new();

    let archiver = match open_blob_store(&settings) {
        Some(store) => {
            let buckets = ArchiveBuckets {
                audio: settings.storage.audio_bucket.clone(),
                transcripts: settings.storage.transcript_bucket.clone(),
            };

            let worker = RetentionWorker::new(
                Arc::clone(&store),
                buckets.all(),
                settings.cleanup.interval(),
                settings.cleanup.retention(),
            );
            background.push(tokio::spawn(worker.run(cancel.clone())));

            Some(TranscriptArchiver::new(store, buckets))
        }
        None => None,
    };

    let transcription_service = Arc::new(TranscriptionService::new(primary, backup, archiver));

    let crawler = connect_crawler(&settings.crawler).await;

    let state = AppState::new(transcription_service, crawler, settings.clone());
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let shutdown = cancel.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await?;

    cancel.cancel();
    for handle in background {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Background task ended abnormally");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn open_blob_store(settings: &Settings) -> Option<Arc<dyn BlobStore>> {
    if !settings.storage.enabled {
        tracing::info!("Archival storage disabled");
        return None;
    }

    match BlobStoreFactory::create(&settings.storage) {
        Ok(store) => {
            tracing::info!(
                provider = ?settings.storage.provider,
                audio_bucket = %settings.storage.audio_bucket,
                transcript_bucket = %settings.storage.transcript_bucket,
                "Archival storage ready"
            );
            Some(store)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to initialize archival storage, continuing without archival"
            );
            None
        }
    }
}

async fn connect_crawler(settings: &CrawlerSettings) -> Option<Arc<dyn CrawlerClient>> {
    if !settings.enabled {
        tracing::info!("Crawler relay disabled");
        return None;
    }

    let client =
        match HttpCrawlerClient::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create crawler client, episode parsing disabled");
                return None;
            }
        };

    if let Err(e) = client.health_check().await {
        tracing::warn!(
            base_url = %client.base_url(),
            error = %e,
            "Crawler service health check failed, it may not be running"
        );
    }

    Some(Arc::new(client))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
