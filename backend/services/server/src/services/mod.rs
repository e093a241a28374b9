pub mod bootstrap;
pub mod db_event_publisher;
pub mod db_loader;
pub mod db_writer;
