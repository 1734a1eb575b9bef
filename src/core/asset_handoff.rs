//=========================================================================
// Asset Handoff
//=========================================================================
//
// One-time transfer of the platform asset archive to the native engine.
//
// `AssetHandoff` is consumed by `deliver`, so a second delivery cannot be
// written. `deliver` also demands the bootstrap's `Bootstrapped` proof,
// so it cannot run before the engine libraries are loaded.
//
// The handle is passed through untouched. Checking it is the engine's job.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::bootstrap::Bootstrapped;
use crate::core::platform_bridge::{AssetHandle, AssetReceiver, BridgeError};

//=== AssetHandoff ========================================================

/// Pending asset handoff to a named native entry point.
#[derive(Debug)]
pub struct AssetHandoff {
    entry_point: String,
}

impl AssetHandoff {
    pub fn new(entry_point: impl Into<String>) -> Self {
        Self {
            entry_point: entry_point.into(),
        }
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Hands `handle` to the engine. Consumes the handoff.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EntryPointMissing`] if the engine does not
    /// export the entry point.
    pub fn deliver<R>(
        self,
        _bootstrapped: &Bootstrapped,
        handle: AssetHandle,
        receiver: &mut R,
    ) -> Result<(), BridgeError>
    where
        R: AssetReceiver + ?Sized,
    {
        if handle.is_null() {
            // Not ours to reject; the engine reports it on first use.
            warn!(target: "bridge::assets", "Handing a null asset manager to the engine");
        }

        match receiver.init_asset_manager(&self.entry_point, handle) {
            Ok(()) => {
                info!(
                    target: "bridge::assets",
                    "Asset manager handed to native entry point '{}'",
                    self.entry_point
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    target: "bridge::assets",
                    "Asset handoff to '{}' failed: {}",
                    self.entry_point,
                    source
                );
                Err(BridgeError::EntryPointMissing {
                    symbol: self.entry_point,
                    source,
                })
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
