mod app;
mod logger;
mod manifest;
mod platform;

use std::rc::Rc;

use crate::app::{App, AppProps};

fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    match manifest::read_manifest() {
        Ok(setup) => {
            log::info!(
                "board {}: {} items",
                setup.content_set,
                setup.items.len()
            );
            yew::Renderer::<App>::with_props(AppProps {
                setup: Rc::new(setup),
            })
            .render();
        }
        Err(err) => log::error!("stickerboard not started: {err}"),
    }
}
