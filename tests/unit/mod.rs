mod loader_tests;
mod sequencer_tests;
