//! The prelude is enough to embed a page session.

use pinstrip::prelude::*;
use pinstrip::{MockDom, SessionPhase};
use std::time::Duration;

#[test]
fn prelude_drives_a_session() {
    let variants = VariantTable::builtin();
    let ids: Vec<&str> = variants.ids().collect();
    let dom = MockDom::product_page(Viewport::new(1000.0, 800.0), &ids);
    let mut session = PageSession::new(dom, ChoreoConfig::default());

    session.push(Event::AssetsSettled);
    assert_eq!(session.phase(), SessionPhase::Mounted);

    session.push(Event::Scroll { y: 2400.0 });
    let frame: FrameSnapshot = session
        .tick(Duration::from_millis(16))
        .expect("mounted session produces frames");
    assert!(matches!(frame.pin, PinState::Pinned { .. }));
    assert_eq!(frame.index, 1);
}

#[test]
fn facade_error_wraps_session_errors() -> Result<()> {
    let variants = VariantTable::builtin();
    let ids: Vec<&str> = variants.ids().collect();
    let mut session = PageSession::new(
        MockDom::product_page(Viewport::new(1000.0, 800.0), &ids),
        ChoreoConfig::default(),
    );
    session.select_currency("EUR")?;
    let err: Error = session.select_currency("XYZ").unwrap_err().into();
    assert_eq!(err.degradation(), pinstrip::Degradation::DropInput);
    Ok(())
}
