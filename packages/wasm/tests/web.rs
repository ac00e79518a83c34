//! Browser tests for the JavaScript-facing API.
//!
//! Run with `wasm-pack test --headless --firefox packages/wasm`.

#![cfg(target_arch = "wasm32")]

use canopy_wasm::CanopyWasm;
use canopy_wasm::hierarchy::HierarchyNode;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn tree(a: f64, b: f64) -> JsValue {
    let root = HierarchyNode::branch(
        "root",
        vec![HierarchyNode::leaf("A", a), HierarchyNode::leaf("B", b)],
    );
    serde_wasm_bindgen::to_value(&root).unwrap()
}

fn slice_engine() -> CanopyWasm {
    let config = js_sys::JSON::parse(
        r#"{ "layout": { "algorithm": "slice", "innerPadding": 0 } }"#,
    )
    .unwrap();
    let mut canopy = CanopyWasm::with_config(config).unwrap();
    canopy.set_size(100.0, 100.0);
    canopy
}

#[wasm_bindgen_test]
fn test_set_data_and_buffer() {
    let mut canopy = slice_engine();
    canopy.set_data(tree(30.0, 70.0)).unwrap();

    assert_eq!(canopy.rect_count(), 3);
    let buffer = canopy.get_rect_buffer().to_vec();
    let stride = CanopyWasm::rect_stride() as usize;
    assert_eq!(buffer.len(), 3 * stride);
    assert_eq!(&buffer[stride..stride + 4], &[0.0, 0.0, 100.0, 30.0]);
    assert_eq!(&buffer[2 * stride..2 * stride + 4], &[0.0, 30.0, 100.0, 70.0]);
}

#[wasm_bindgen_test]
fn test_hit_and_highlight() {
    let mut canopy = slice_engine();
    canopy.set_data(tree(30.0, 70.0)).unwrap();

    assert_eq!(canopy.get_node_at_point(50.0, 10.0), Some(1));
    assert_eq!(canopy.get_node_at_point(50.0, 90.0), Some(2));
    assert_eq!(canopy.get_node_at_point(500.0, 10.0), None);
    assert_eq!(canopy.get_nodes_at_point(50.0, 90.0), vec![0, 2]);

    canopy.set_highlighted_node(Some(2));
    assert_eq!(canopy.get_highlighted_node(), Some(2));
    canopy.set_highlighted_node(Some(99));
    assert_eq!(canopy.get_highlighted_node(), None);
}

#[wasm_bindgen_test]
fn test_target_data_animates() {
    let mut canopy = slice_engine();
    canopy.set_data(tree(30.0, 70.0)).unwrap();
    canopy.set_target_data(tree(70.0, 30.0)).unwrap();
    assert!(canopy.is_animating());

    let mut frames = 0;
    while canopy.update(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 2_000);
    }
    let buffer = canopy.get_rect_buffer().to_vec();
    let stride = CanopyWasm::rect_stride() as usize;
    assert_eq!(buffer[stride + 3], 70.0);
}

#[wasm_bindgen_test]
fn test_update_value_by_path() {
    let mut canopy = slice_engine();
    canopy.set_data(tree(30.0, 70.0)).unwrap();

    assert!(canopy.update_value(vec!["A".into()], 0.0));
    assert!(!canopy.update_value(vec!["missing".into()], 1.0));
    assert_eq!(canopy.get_node_path(2), vec!["B".to_string()]);
}

#[wasm_bindgen_test]
fn test_invalid_input_throws() {
    let mut canopy = CanopyWasm::new();
    assert!(canopy.set_data(JsValue::from_f64(3.0)).is_err());

    let bad = js_sys::JSON::parse(r#"{ "layout": { "algorithm": "spiral" } }"#).unwrap();
    assert!(CanopyWasm::with_config(bad).is_err());
}

#[wasm_bindgen_test]
fn test_computed_rects_object() {
    let mut canopy = slice_engine();
    canopy.set_data(tree(1.0, 1.0)).unwrap();
    let rects = canopy.get_computed_rects().unwrap();
    let array = js_sys::Array::from(&rects);
    assert_eq!(array.length(), 3);
    let label = js_sys::Reflect::get(&array.get(1), &"label".into()).unwrap();
    assert_eq!(label.as_string().as_deref(), Some("A"));
}
