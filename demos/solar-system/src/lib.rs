use wasm_bindgen::prelude::*;

mod bodies;

orrery_web::export_orrery!(bodies::solar_system, bodies::engine_config, "solar-system");
