pub mod header;
pub mod chat_screen;
pub mod transcript_view;
pub mod camera_screen;
pub mod processing_screen;
pub mod results_screen;
