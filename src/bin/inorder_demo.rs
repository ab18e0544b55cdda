/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Loads a batch of items with random latencies and logs every in-order flush.
//!
//! ```text
//! INORDER_TOTAL_ITEMS=20 RUST_LOG=info cargo run --features demo --bin inorder-demo
//! ```

use inorder_rs::{InOrderLoader, Sequencer, SequencerConfig};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = SequencerConfig::from_env()?;
    let mut sequencer = Sequencer::<usize>::with_config(config);
    sequencer.add_listener(|event| {
        info!(
            "loaded {} {} for a total of {}",
            event.start,
            event.end,
            event.loaded_total()
        );
    });
    let sequencer = Arc::new(sequencer);

    let mut rng = rand::rng();
    let delays: Vec<Duration> = (0..sequencer.total())
        .map(|_| Duration::from_millis(rng.random_range(100..=500)))
        .collect();

    let output = InOrderLoader::from_shared(sequencer.clone())
        .run(move |index| {
            let delay = delays[index];
            async move {
                tokio::time::sleep(delay).await;
                info!("{index} finished");
                Ok::<_, std::convert::Infallible>(index)
            }
        })
        .await?;

    let snapshot = sequencer.snapshot();
    info!(
        total = snapshot.total,
        flushes = snapshot.flushes,
        "all items loaded in order"
    );
    println!("{output:?}");

    Ok(())
}
