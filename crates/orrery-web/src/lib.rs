pub mod runner;

pub use runner::WebRunner;

// Re-exported for the export macro so demo crates need not depend on them.
#[doc(hidden)]
pub use console_error_panic_hook;
#[doc(hidden)]
pub use console_log;
#[doc(hidden)]
pub use js_sys;
#[doc(hidden)]
pub use log;
#[doc(hidden)]
pub use orrery_engine;

/// Generate all `#[wasm_bindgen]` exports for a star system.
///
/// Generates:
/// - `thread_local!` storage for the WebRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, frame, input handlers, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod bodies;
///
/// orrery_web::export_orrery!(bodies::solar_system, bodies::engine_config, "solar-system");
/// ```
///
/// # Arguments
///
/// - `$system_fn`: path to a `fn() -> orrery_engine::SystemConfig`
/// - `$config_fn`: path to a `fn() -> orrery_engine::EngineConfig`
/// - `$name`: a string literal used in log messages
#[macro_export]
macro_rules! export_orrery {
    ($system_fn:path, $config_fn:path, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WebRunner>> = RefCell::new(None);
        }

        /// `None` until `orrery_init` succeeds.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::WebRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        $crate::log::warn!("{}: not initialized, call orrery_init() first", $name);
                        None
                    }
                }
            })
        }

        fn install(orrery: $crate::orrery_engine::Orrery) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some($crate::WebRunner::new(orrery));
            });
            $crate::log::info!("{}: initialized", $name);
        }

        fn init_logging() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn orrery_init() -> Result<(), JsValue> {
            init_logging();
            let orrery = $crate::orrery_engine::Orrery::new($system_fn(), $config_fn())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            install(orrery);
            Ok(())
        }

        /// Load a system and engine config from JSON instead of the built-in tables.
        #[wasm_bindgen]
        pub fn orrery_init_json(system_json: &str, config_json: &str) -> Result<(), JsValue> {
            init_logging();
            let orrery = $crate::orrery_engine::Orrery::from_json(system_json, config_json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            install(orrery);
            Ok(())
        }

        /// Returns false once the loop should stop.
        #[wasm_bindgen]
        pub fn orrery_frame(now_ms: f64) -> bool {
            with_runner(|r| r.frame(now_ms)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_down(button: u32, x: f32, y: f32) {
            with_runner(|r| r.pointer_down(button, x, y));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_up(button: u32, x: f32, y: f32) {
            with_runner(|r| r.pointer_up(button, x, y));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.pointer_move(x, y));
        }

        #[wasm_bindgen]
        pub fn orrery_scroll(delta_y: f32) {
            with_runner(|r| r.scroll(delta_y));
        }

        #[wasm_bindgen]
        pub fn orrery_key_down(key_code: u32) {
            with_runner(|r| r.key_down(key_code));
        }

        #[wasm_bindgen]
        pub fn orrery_quit() {
            with_runner(|r| r.quit());
        }

        #[wasm_bindgen]
        pub fn orrery_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn orrery_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
        }

        /// Copy of the packed frame, for hosts without shared memory.
        #[wasm_bindgen]
        pub fn orrery_buffer_copy() -> $crate::js_sys::Float32Array {
            with_runner(|r| $crate::js_sys::Float32Array::from(r.buffer()))
                .unwrap_or_else(|| $crate::js_sys::Float32Array::new_with_length(0))
        }

        #[wasm_bindgen]
        pub fn orrery_draw_count() -> u32 {
            with_runner(|r| r.draw_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_star_count() -> u32 {
            with_runner(|r| r.star_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_labels_json() -> String {
            with_runner(|r| r.labels_json().to_string()).unwrap_or_else(|| "[]".to_string())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn orrery_max_draws() -> u32 {
            with_runner(|r| r.max_draws()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_max_stars() -> u32 {
            with_runner(|r| r.max_stars()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
