// Services module for the build helpers
pub mod archive_fetcher;
pub mod bower_command;
pub mod components_reset;
pub mod demo_analyzer;
pub mod html_extractor;
pub mod manifest_reader;
