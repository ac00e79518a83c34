//! Canopy - WASM Module
//!
//! This module provides the layout and animation engine for the Canopy
//! treemap visualization library. It is compiled to WebAssembly and exposes
//! a JavaScript-friendly API via wasm-bindgen; drawing is left to the host.
//!
//! # Architecture
//!
//! - `hierarchy`: input tree and its flattened, parent-indexed form
//! - `layout`: squarified, slice and dice partitioning
//! - `animation`: transition matching and per-frame approach
//! - `spatial`: point hit testing (linear scan and R-tree)
//! - `treemap`: the stateful engine tying the stages together
//!
//! # Pipeline
//!
//! ```text
//! HierarchyNode ─flatten─▶ [LayoutRect] ─layout─▶ targets
//!                                        ─match─▶ current (on replace)
//!                                        ─tick──▶ current → target
//! ```

use js_sys::Float32Array;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod layout;
pub mod spatial;
pub mod treemap;

use error::EngineError;
use geometry::{Point, Rect};
use hierarchy::HierarchyNode;
use treemap::{RECT_STRIDE, TreemapConfig, TreemapEngine};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the treemap engine.
///
/// This struct wraps the internal TreemapEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct CanopyWasm {
    engine: TreemapEngine,
}

#[wasm_bindgen]
impl CanopyWasm {
    /// Create an engine with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: TreemapEngine::with_defaults(),
        }
    }

    /// Create an engine from a (possibly partial) config object.
    ///
    /// Throws if the object does not describe a valid configuration.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<CanopyWasm, JsValue> {
        let config: TreemapConfig = decode(config, EngineError::InvalidConfig)?;
        Ok(Self {
            engine: TreemapEngine::new(config),
        })
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the configuration; targets animate to the new styling.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: TreemapConfig = decode(config, EngineError::InvalidConfig)?;
        self.engine.set_config(config);
        Ok(())
    }

    /// Get the active configuration as a plain object.
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.engine.config())?)
    }

    /// Lay out into a `width` x `height` area at the origin.
    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.engine.set_area(Rect::new(0.0, 0.0, width, height));
    }

    /// Lay out into an arbitrary area.
    #[wasm_bindgen(js_name = setArea)]
    pub fn set_area(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.engine.set_area(Rect::new(x, y, width, height));
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the hierarchy and show it immediately.
    ///
    /// The tree is `{ label, value?, color?, id?, children? }`, nested.
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&mut self, tree: JsValue) -> Result<(), JsValue> {
        let tree: HierarchyNode = decode(tree, EngineError::InvalidTree)?;
        self.engine.set_data(tree);
        Ok(())
    }

    /// Replace the hierarchy and animate from the current screen state.
    #[wasm_bindgen(js_name = setTargetData)]
    pub fn set_target_data(&mut self, tree: JsValue) -> Result<(), JsValue> {
        let tree: HierarchyNode = decode(tree, EngineError::InvalidTree)?;
        self.engine.set_target_data(tree);
        Ok(())
    }

    /// Overwrite a leaf's value by label path.
    ///
    /// Returns false (and changes nothing) if the path does not resolve to a
    /// leaf.
    #[wasm_bindgen(js_name = updateValue)]
    pub fn update_value(&mut self, path: Vec<String>, value: f64) -> bool {
        self.engine.update_value(&path, value)
    }

    /// Drop all data.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance the animation by `dt` seconds.
    ///
    /// Returns true while anything is still moving.
    pub fn update(&mut self, dt: f32) -> bool {
        self.engine.update(dt)
    }

    /// Check if any entry is still moving.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Number of entries in the flat list.
    #[wasm_bindgen(js_name = rectCount)]
    pub fn rect_count(&self) -> u32 {
        self.engine.len() as u32
    }

    /// Floats per entry in `getRectBuffer`.
    #[wasm_bindgen(js_name = rectStride)]
    pub fn rect_stride() -> u32 {
        RECT_STRIDE as u32
    }

    /// Get the current state packed as `[x, y, w, h, r, g, b, alpha, depth]`
    /// per entry, ready for GPU upload.
    #[wasm_bindgen(js_name = getRectBuffer)]
    pub fn get_rect_buffer(&self) -> Float32Array {
        Float32Array::from(&self.engine.rect_buffer()[..])
    }

    /// Get every entry as a plain object (label, depth, parent, value,
    /// current/target rect, colors and alpha).
    #[wasm_bindgen(js_name = getComputedRects)]
    pub fn get_computed_rects(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.engine.computed_rects())?)
    }

    /// Indices of the entries a renderer should draw.
    #[wasm_bindgen(js_name = getDrawableIndices)]
    pub fn get_drawable_indices(&self) -> Vec<u32> {
        self.engine
            .drawable_rects()
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Label path of an entry, for use with `updateValue`.
    ///
    /// Empty for the root and for unknown indices.
    #[wasm_bindgen(js_name = getNodePath)]
    pub fn get_node_path(&self, index: u32) -> Vec<String> {
        self.engine.node_path(index as usize).unwrap_or_default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Find the deepest entry under a point.
    #[wasm_bindgen(js_name = getNodeAtPoint)]
    pub fn get_node_at_point(&mut self, x: f32, y: f32) -> Option<u32> {
        self.engine
            .node_at_point(Point::new(x, y))
            .map(|i| i as u32)
    }

    /// All entries under a point, root first; the last is the deepest.
    #[wasm_bindgen(js_name = getNodesAtPoint)]
    pub fn get_nodes_at_point(&mut self, x: f32, y: f32) -> Vec<u32> {
        self.engine
            .nodes_at_point(Point::new(x, y))
            .into_iter()
            .map(|i| i as u32)
            .collect()
    }

    /// Store the highlighted entry (unvalidated; pass undefined to clear).
    #[wasm_bindgen(js_name = setHighlightedNode)]
    pub fn set_highlighted_node(&mut self, index: Option<u32>) {
        self.engine.set_highlighted_node(index.map(|i| i as usize));
    }

    /// Get the highlighted entry if it refers to an existing entry.
    #[wasm_bindgen(js_name = getHighlightedNode)]
    pub fn get_highlighted_node(&self) -> Option<u32> {
        self.engine
            .highlighted_rect()
            .and(self.engine.highlighted_node())
            .map(|i| i as u32)
    }
}

impl Default for CanopyWasm {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize a JS value, tagging failures with `kind`.
fn decode<T: DeserializeOwned>(
    value: JsValue,
    kind: fn(String) -> EngineError,
) -> Result<T, EngineError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| kind(e.to_string()))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::animation::AnimationConfig;
    use crate::layout::{LayoutAlgorithm, LayoutConfig};

    fn engine(algorithm: LayoutAlgorithm) -> TreemapEngine {
        let mut engine = TreemapEngine::new(TreemapConfig {
            layout: LayoutConfig::unpadded(algorithm),
            ..TreemapConfig::default()
        });
        engine.set_area(Rect::new(0.0, 0.0, 100.0, 100.0));
        engine
    }

    fn parse(json: &str) -> HierarchyNode {
        serde_json::from_str(json).unwrap()
    }

    /// Test the full pipeline: JSON → flatten → layout → snap → query,
    /// exactly what setData does minus the JS types.
    #[test]
    fn test_json_to_rects() {
        let mut engine = engine(LayoutAlgorithm::Slice);
        engine.set_data(parse(
            r#"{ "label": "root", "children": [
                { "label": "A", "value": 30 },
                { "label": "B", "value": 70 }
            ] }"#,
        ));

        let rects = engine.computed_rects();
        assert_eq!(rects[1].current, Rect::new(0.0, 0.0, 100.0, 30.0));
        assert_eq!(rects[2].current, Rect::new(0.0, 30.0, 100.0, 70.0));
        assert_eq!(engine.node_at_point(Point::new(1.0, 31.0)), Some(2));
    }

    /// Every entry converges to its target after a structural change,
    /// including nodes that moved between parents.
    #[test]
    fn test_restructure_converges() {
        let mut engine = engine(LayoutAlgorithm::Squarified);
        engine.set_data(parse(
            r#"{ "label": "root", "children": [
                { "label": "src", "children": [
                    { "label": "a.rs", "value": 10 },
                    { "label": "b.rs", "value": 20 }
                ] },
                { "label": "docs", "children": [ { "label": "c.md", "value": 5 } ] }
            ] }"#,
        ));
        engine.set_target_data(parse(
            r#"{ "label": "root", "children": [
                { "label": "src", "children": [ { "label": "b.rs", "value": 40 } ] },
                { "label": "docs", "children": [
                    { "label": "a.rs", "value": 10 },
                    { "label": "c.md", "value": 5 },
                    { "label": "d.md", "value": 15 }
                ] }
            ] }"#,
        ));
        assert!(engine.is_animating());

        let mut frames = 0;
        while engine.update(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 2_000, "animation never settled");
        }
        for r in engine.computed_rects() {
            assert_eq!(r.current, r.target, "{} did not converge", r.label);
            assert_eq!(r.current_alpha, 1.0);
        }
    }

    /// Matched nodes keep their old on-screen rectangle when the data is
    /// replaced mid-animation.
    #[test]
    fn test_interrupted_transition_continues_from_screen() {
        let mut engine = engine(LayoutAlgorithm::Slice);
        engine.set_data(parse(r#"{ "label": "r", "children": [
            { "label": "A", "value": 1 }, { "label": "B", "value": 1 } ] }"#));
        engine.set_target_data(parse(r#"{ "label": "r", "children": [
            { "label": "A", "value": 3 }, { "label": "B", "value": 1 } ] }"#));
        engine.update(0.05);
        let mid = engine.computed_rects()[1].current;
        assert!(mid.height > 50.0 && mid.height < 75.0, "mid-flight: {mid:?}");

        engine.set_target_data(parse(r#"{ "label": "r", "children": [
            { "label": "A", "value": 1 }, { "label": "B", "value": 3 } ] }"#));
        assert_eq!(engine.computed_rects()[1].current, mid);
        assert_eq!(engine.computed_rects()[1].target.height, 25.0);
    }

    #[test]
    fn test_rect_buffer_layout() {
        let mut engine = engine(LayoutAlgorithm::Dice);
        engine.set_data(parse(
            r##"{ "label": "root", "color": "#000000", "children": [
                { "label": "A", "value": 1, "color": [1.0, 0.0, 0.0, 0.5] }
            ] }"##,
        ));
        let buffer = engine.rect_buffer();
        assert_eq!(buffer.len(), 2 * RECT_STRIDE);

        let a = &buffer[RECT_STRIDE..];
        assert_eq!(&a[..4], &[0.0, 0.0, 100.0, 100.0]);
        assert_eq!(&a[4..7], &[1.0, 0.0, 0.0]);
        assert_eq!(a[7], 0.5, "opacity times color alpha");
        assert_eq!(a[8], 1.0, "depth");
    }

    #[test]
    fn test_snap_config_disables_animation() {
        let mut engine = TreemapEngine::new(TreemapConfig {
            animation: AnimationConfig::snap(),
            ..TreemapConfig::default()
        });
        engine.set_area(Rect::new(0.0, 0.0, 50.0, 50.0));
        engine.set_data(parse(r#"{ "label": "r", "children": [ { "label": "A", "value": 1 } ] }"#));
        engine.set_target_data(parse(
            r#"{ "label": "r", "children": [ { "label": "A", "value": 1 }, { "label": "B", "value": 1 } ] }"#,
        ));
        assert!(engine.is_animating());
        assert!(!engine.update(0.001));
        assert!(!engine.is_animating());
    }

    /// Thousands of nodes: one relayout plus a second of animation.
    #[test]
    fn test_large_hierarchy() {
        let children = (0..40)
            .map(|d| {
                HierarchyNode::branch(
                    format!("dir{d}"),
                    (0..50)
                        .map(|f| HierarchyNode::leaf(format!("f{f}"), f64::from((d * 7 + f * 3) % 97 + 1)))
                        .collect(),
                )
            })
            .collect();
        let tree = HierarchyNode::branch("root", children);

        let mut engine = TreemapEngine::with_defaults();
        engine.set_area(Rect::new(0.0, 0.0, 1920.0, 1080.0));
        engine.set_data(tree.clone());
        assert_eq!(engine.len(), 1 + 40 + 40 * 50);

        let mut changed = tree;
        changed.children.truncate(30);
        engine.set_target_data(changed);
        for _ in 0..60 {
            engine.update(1.0 / 60.0);
        }
        assert_eq!(engine.len(), 1 + 30 + 30 * 50);
        assert!(engine.drawable_rects().count() > 1_000);
    }
}
