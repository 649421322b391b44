// autoplay-sync services
// Cookie decoding, reconciliation, message dispatch, tab broadcast, storage and settings.

pub mod cookie_decoder;
pub mod message_dispatcher;
pub mod settings_engine;
pub mod state_reconciler;
pub mod storage;
pub mod tab_broadcaster;
