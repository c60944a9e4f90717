use crate::config::DrawSource;
use crate::events::AppEvent;
use crate::sys::loader;
use async_channel::Sender;
use sortition::source::SheetSource;
use std::thread;
use tokio::runtime::Runtime;

/// Spawns the one-shot roster fetch on its own thread and runtime. Fixed
/// pools have no background work, so nothing is started for them.
pub fn start_background_services(tx: Sender<AppEvent>, source: DrawSource) {
    let DrawSource::Sheet { url } = source else {
        return;
    };

    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async move {
            loader::run_loader(tx, SheetSource::new(url)).await;
        });
    });
}
