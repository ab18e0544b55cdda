use inorder_rs::{
    FlushEvent, Sequencer, SequencerConfig, SequencerError, SequencerResult, SequencerStatus,
};
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_batches(events: &[FlushEvent<usize>]) -> Vec<(usize, usize)> {
        events.iter().map(|event| (event.start, event.end)).collect()
    }

    // --- Public contract through the crate root ---

    #[test]
    fn test_identity_sequencer_end_to_end() {
        let sequencer = Sequencer::<usize>::new(3);
        let receiver = sequencer.subscribe();

        assert!(matches!(
            sequencer.on_item_completed(2),
            Ok(SequencerResult::Deferred { index: 2, .. })
        ));
        assert!(sequencer.output_so_far().is_empty());

        sequencer.on_item_completed(0).unwrap();
        assert_eq!(sequencer.output_so_far(), vec![0]);

        sequencer.on_item_completed(1).unwrap();
        assert_eq!(sequencer.output_so_far(), vec![0, 1, 2]);
        assert_eq!(sequencer.status(), SequencerStatus::Drained);

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(collect_batches(&events), vec![(0, 0), (1, 2)]);
    }

    // --- Item handles ---

    #[test]
    fn test_handles_cover_every_index() {
        let sequencer = Arc::new(Sequencer::<u32>::new(5));
        let handles = sequencer.handles();

        assert_eq!(handles.len(), 5);
        for (expected, handle) in handles.iter().enumerate() {
            assert_eq!(handle.index(), expected);
        }

        for handle in handles.into_iter().rev() {
            let value = handle.index() as u32 * 2;
            handle.complete(value).unwrap();
        }
        assert_eq!(sequencer.output_so_far(), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_handles_on_separate_threads() {
        let sequencer = Arc::new(Sequencer::<usize>::new(16));

        let threads: Vec<_> = sequencer
            .handles()
            .into_iter()
            .map(|handle| {
                std::thread::spawn(move || {
                    let index = handle.index();
                    std::thread::sleep(std::time::Duration::from_millis((16 - index) as u64));
                    handle.complete(index).unwrap()
                })
            })
            .collect();

        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(sequencer.output_so_far(), (0..16).collect::<Vec<_>>());
    }

    // --- Configuration ---

    #[test]
    fn test_sequencer_from_json_config() {
        let config =
            SequencerConfig::from_json(r#"{ "total_items": 2, "strict_duplicates": true }"#)
                .unwrap();
        let sequencer = Sequencer::<usize>::with_config(config);

        assert_eq!(sequencer.total(), 2);
        assert!(sequencer.config().strict_duplicates);

        sequencer.on_item_completed(0).unwrap();
        assert_eq!(
            sequencer.on_item_completed(0),
            Err(SequencerError::DuplicateCompletion { index: 0 })
        );
    }

    #[test]
    fn test_independent_sequencers_do_not_interact() {
        let first = Sequencer::<usize>::new(2);
        let second = Sequencer::<usize>::new(2);
        assert_ne!(first.id(), second.id());

        first.on_item_completed(0).unwrap();
        assert_eq!(first.next_expected(), 1);
        assert_eq!(second.next_expected(), 0);
        assert!(second.output_so_far().is_empty());
    }
}
