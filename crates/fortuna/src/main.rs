use fortuna::config::{self, DrawSource};
use fortuna::gui::app::AppModel;
use fortuna::gui::wheel::Presenter;
use fortuna::sys::runtime;
use relm4::prelude::*;
use sortition::pool::DrawPool;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let source = match config.draw_source() {
        Ok(source) => source,
        Err(e) => {
            log::error!("Draws disabled: {}", e);
            DrawSource::Numbers { count: 0 }
        }
    };

    let presenter = match &source {
        DrawSource::Numbers { count } => Presenter::with_pool(DrawPool::new(*count)),
        DrawSource::Sheet { .. } => Presenter::unloaded(),
    };

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx, source);

    let app = RelmApp::new("org.troia.fortuna");

    app.run::<AppModel>((presenter, rx));
}
