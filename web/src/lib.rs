use wasm_bindgen::prelude::*;

mod app;

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let _ = console_log::init_with_level(log::Level::Info);

    let root = gloo::utils::document()
        .get_element_by_id("game")
        .expect("could not find id=\"game\" element");

    log::debug!("app started");
    yew::Renderer::<app::GameView>::with_root(root).render();
}
