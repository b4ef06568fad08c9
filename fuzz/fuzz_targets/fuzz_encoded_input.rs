#![no_main]

use libfuzzer_sys::fuzz_target;
use pinstrip_runtime::ChoreoConfig;
use pinstrip_wasm::RunnerCore;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // First line is a layout report, the rest are encoded events.
    let mut lines = text.lines();
    let mut core = RunnerCore::new(ChoreoConfig::default());
    if let Some(layout) = lines.next() {
        let _ = core.report_layout(layout);
    }
    let _ = core.push_encoded_event(r#"{"type":"assets_settled"}"#);
    for line in lines.take(128) {
        let _ = core.push_encoded_event(line);
        let _ = core.advance_time_ms(16.0);
    }
    let _ = core.take_commands_json();
    let _ = RunnerCore::from_config_json(text);
});
