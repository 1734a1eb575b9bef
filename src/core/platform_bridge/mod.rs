//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the hosting platform (NativeActivity via winit) with the
// external native engine.
//
// This module defines the contract between platform adapters, the
// engine's native entry points and the bridge logic, so the bridge can be
// driven and tested without any platform runtime present.
//
// Components:
// - `interface`: Seam traits, handles and error definitions (the contract)
// - `bridge`: The lifecycle-driven bridge itself
// - `testing`: Recording doubles for the seams (tests only)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bridge;
pub mod interface;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use bridge::{Phase, PlatformBridge};
pub use interface::{
    AssetHandle, AssetReceiver, AssetSource, BridgeError, DisplayApi, DisplayError,
    LibraryLoader, LifecycleCallbacks, LoadFailure,
};
