use tracing::Level;

pub fn init_logging(max_level: Level) {
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .with_max_level(max_level)
        .init();
}
