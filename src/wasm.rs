//! WebAssembly bindings for the query engine.
//!
//! The browser gets the `index` and `documentConfig` strings of the published
//! search node and wraps them in a `SiteSearch`:
//!
//! ```js
//! const search = new SiteSearch(node.index, node.documentConfig);
//! while (search.importNext()) await nextFrame();   // or search.importAll()
//! search.isReady();                                // true
//! search.search("toit");                           // [{id, title, path, excerpt}, ...]
//! ```

use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::engine::QueryEngine;
use crate::error::EngineError;

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-accessible query engine.
#[wasm_bindgen]
pub struct SiteSearch {
    engine: QueryEngine,
}

#[wasm_bindgen]
impl SiteSearch {
    /// Parse the snapshot and config. Chunks are imported separately.
    #[wasm_bindgen(constructor)]
    pub fn new(index: &str, document_config: &str) -> Result<SiteSearch, JsValue> {
        let engine = QueryEngine::prepare(index, document_config).map_err(to_js_error)?;
        Ok(SiteSearch { engine })
    }

    /// Import one chunk. Returns `false` once there is nothing left to do.
    #[wasm_bindgen(js_name = importNext)]
    pub fn import_next(&mut self) -> Result<bool, JsValue> {
        self.engine.import_next().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = importAll)]
    pub fn import_all(&mut self) -> Result<(), JsValue> {
        self.engine.import_all().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Number of indexed documents.
    #[wasm_bindgen(getter = documentCount)]
    pub fn document_count(&self) -> usize {
        self.engine.document_count()
    }

    /// Results as `[{id, title, path, excerpt}]`. Empty until ready.
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        to_value(&self.engine.search(query)).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = searchLimited)]
    pub fn search_limited(&self, query: &str, limit: usize) -> Result<JsValue, JsValue> {
        to_value(&self.engine.search_limited(query, limit))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
