//! Rotating brain animation shown while a scan is analyzed.
//!
//! Drives the global `lottie` player loaded by `index.html`.

use leptos::*;
use wasm_bindgen::prelude::*;

use crate::controller::Loader;
use crate::{LOADER_ANIMATION_URL, LOADER_CONTAINER_ID};

#[wasm_bindgen]
extern "C" {
    /// Handle returned by `lottie.loadAnimation`.
    type AnimationItem;

    #[wasm_bindgen(js_namespace = lottie, js_name = loadAnimation, catch)]
    fn load_animation(params: &JsValue) -> Result<AnimationItem, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &AnimationItem);
}

/// [`Loader`] backed by lottie-web, rendering into [`LOADER_CONTAINER_ID`].
#[derive(Default)]
pub struct LottieLoader {
    animation: Option<AnimationItem>,
}

impl LottieLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn params(container: &web_sys::Element) -> Result<JsValue, JsValue> {
        let params = js_sys::Object::new();
        js_sys::Reflect::set(&params, &"container".into(), container)?;
        js_sys::Reflect::set(&params, &"renderer".into(), &"svg".into())?;
        js_sys::Reflect::set(&params, &"loop".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&params, &"autoplay".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&params, &"path".into(), &LOADER_ANIMATION_URL.into())?;
        Ok(params.into())
    }
}

impl Loader for LottieLoader {
    fn start(&mut self) {
        let Some(container) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(LOADER_CONTAINER_ID))
        else {
            log::warn!("Loader container #{} not found", LOADER_CONTAINER_ID);
            return;
        };
        container.set_inner_html("");

        match Self::params(&container).and_then(|params| load_animation(&params)) {
            Ok(animation) => self.animation = Some(animation),
            Err(e) => log::warn!("lottie unavailable: {:?}", e),
        }
    }

    fn destroy(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.destroy();
        }
    }
}

/// Host element for the animation.
#[component]
pub fn LoaderContainer(loading: Signal<bool>) -> impl IntoView {
    view! {
        <div
            id=LOADER_CONTAINER_ID
            class="loader-container"
            class:active=move || loading.get()
        ></div>
    }
}
