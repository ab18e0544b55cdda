use inorder_rs::{InOrderLoader, LoadError, Sequencer, SequencerStatus};
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_loader_with_random_latencies() {
        let sequencer = Arc::new(Sequencer::<String>::new(20));
        let receiver = sequencer.subscribe();
        let loader = InOrderLoader::from_shared(sequencer.clone())
            .with_item_timeout(Duration::from_secs(5));

        let delays: Vec<u64> = (0..20).map(|i| (i * 7919 % 40) as u64).collect();
        let output = loader
            .run(move |index| {
                let delay = Duration::from_millis(delays[index]);
                async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, std::io::Error>(format!("item {index}"))
                }
            })
            .await
            .unwrap();

        let expected: Vec<String> = (0..20).map(|i| format!("item {i}")).collect();
        assert_eq!(output, expected);
        assert_eq!(sequencer.status(), SequencerStatus::Drained);

        let flushed: usize = receiver.try_iter().map(|event| event.len()).sum();
        assert_eq!(flushed, 20);
    }

    #[tokio::test]
    async fn test_loader_error_names_the_item() {
        let loader = InOrderLoader::new(Sequencer::<usize>::new(3));

        let err = loader
            .run(|index| async move {
                if index == 1 {
                    Err(std::io::Error::other("connection reset"))
                } else {
                    Ok(index)
                }
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "item 1 failed: connection reset");
        assert!(matches!(err, LoadError::ItemFailed { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_loader_panicking_job() {
        let loader = InOrderLoader::new(Sequencer::<usize>::new(2));

        let err = loader
            .run(|index| async move {
                if index == 0 {
                    panic!("job exploded");
                }
                Ok::<_, String>(index)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Join(_)));
    }
}
