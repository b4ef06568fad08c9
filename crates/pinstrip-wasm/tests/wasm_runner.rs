#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use pinstrip_wasm::PinstripRunner;
use wasm_bindgen_test::wasm_bindgen_test;

const LAYOUT: &str = r#"{
    "viewport": { "width": 1000, "height": 800 },
    "document_height": 8000,
    "rects": {
        "home": { "x": 0, "y": 0, "width": 1000, "height": 800 },
        "features": { "x": 0, "y": 800, "width": 1000, "height": 800 },
        "colors": { "x": 0, "y": 1600, "width": 1000, "height": 4800 },
        "videos": { "x": 0, "y": 6400, "width": 1000, "height": 800 },
        "pricing": { "x": 0, "y": 7200, "width": 1000, "height": 800 },
        "nav-item": { "x": 0, "y": 0, "width": 96, "height": 40 }
    },
    "children": { "colors-strip": ["silver", "pink", "space-gray", "sky-blue", "green"] }
}"#;

fn mounted() -> PinstripRunner {
    let mut runner = PinstripRunner::new(None).expect("default config");
    runner.report_layout(LAYOUT).expect("layout should parse");
    assert!(runner.push_event(r#"{"type":"assets_settled"}"#));
    runner
}

#[wasm_bindgen_test]
fn wasm_runner_mounts_and_ticks() {
    let mut runner = mounted();
    assert_eq!(runner.phase(), "mounted");
    runner.scroll(3600.0);
    assert!(!runner.tick(16.0).is_null());
    assert_eq!(runner.frame_count(), 1.0);
    let cmds = runner.take_commands().expect("commands encode");
    assert!(cmds.contains("\"op\":\"apply_transform\""));
}

#[wasm_bindgen_test]
fn wasm_runner_rejects_bad_config() {
    assert!(PinstripRunner::new(Some("{\"cooldown_ms\":0}".into())).is_err());
}

#[wasm_bindgen_test]
fn wasm_runner_destroy_is_idempotent() {
    let mut runner = mounted();
    runner.destroy();
    runner.destroy();
    assert_eq!(runner.phase(), "torn_down");
    assert!(runner.tick(16.0).is_null());
}
