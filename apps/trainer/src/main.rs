use std::path::PathBuf;
use std::sync::Arc;

use gojuon_trainer::{FileStore, StudySession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gojuon-trainer")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Arc::new(FileStore::open(data_dir()).await?);
    let mut session = StudySession::load(store).await?;

    let progress = session.progress();
    session.start();

    println!("gojūon trainer");
    println!("  total:     {}", progress.total);
    println!("  new:       {}", progress.new);
    println!("  learning:  {}", progress.learning);
    println!("  review:    {}", progress.review);
    println!("  mastered:  {}", progress.mastered);
    println!("  due today: {}", progress.due_today);
    println!("  queued:    {}", session.total_queue_size());

    Ok(())
}
