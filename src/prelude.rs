//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use quake_bsp_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Configuration
pub use crate::core::config::{BridgeConfig, BridgeConfigBuilder, ConfigError, LibrarySet};

// Display state
pub use crate::core::immersive::{DisplayFlags, DisplayMode};

// Bridge and its seams
pub use crate::core::platform_bridge::{
    AssetHandle, AssetReceiver, AssetSource, BridgeError, DisplayApi, DisplayError,
    LibraryLoader, LifecycleCallbacks, LoadFailure, PlatformBridge,
};

// Platform adapter
pub use crate::{NativeRuntime, Platform, PlatformError};
