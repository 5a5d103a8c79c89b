use tracing_subscriber::EnvFilter;

use crate::main_view::MainView;

mod clipboard;
mod input_manager;
mod main_view;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = iced::application(MainView::new, MainView::update, MainView::view)
        .title("Matrixel")
        .window_size((1040.0, 720.0))
        .subscription(MainView::subscription)
        .run();

    if let Err(e) = result {
        log::error!("Application exited with an error: {}", e);
    }
}
