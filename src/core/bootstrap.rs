//=========================================================================
// Native Bootstrap
//=========================================================================
//
// Loads the engine's shared libraries in dependency order.
//
// Each library is loaded exactly once, strictly in declared order, and
// the first failure stops the bootstrap. There is no retry and no
// fallback: without the engine the process has nothing to do.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::config::LibrarySet;
use crate::core::platform_bridge::{BridgeError, LibraryLoader};

//=== Bootstrapped ========================================================

/// Proof that every declared library is loaded.
///
/// Only [`NativeBootstrap::run`] can produce one. The asset handoff
/// requires it, which pins the handoff after the bootstrap.
#[derive(Debug)]
pub struct Bootstrapped {
    loaded: usize,
}

impl Bootstrapped {
    /// Number of libraries loaded.
    pub fn loaded(&self) -> usize {
        self.loaded
    }
}

//=== NativeBootstrap =====================================================

pub struct NativeBootstrap;

impl NativeBootstrap {
    /// Loads `libraries` through `loader`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::LibraryLoad`] naming the first library that
    /// failed. Libraries after it are not attempted.
    pub fn run<L>(libraries: &LibrarySet, loader: &mut L) -> Result<Bootstrapped, BridgeError>
    where
        L: LibraryLoader + ?Sized,
    {
        let total = libraries.len();

        for (index, name) in libraries.iter().enumerate() {
            debug!(
                target: "bridge::bootstrap",
                "Loading native library {}/{}: {}",
                index + 1,
                total,
                name
            );

            if let Err(source) = loader.load_library(name) {
                error!(target: "bridge::bootstrap", "Cannot load '{}': {}", name, source);
                return Err(BridgeError::LibraryLoad {
                    library: name.to_owned(),
                    source,
                });
            }
        }

        info!(target: "bridge::bootstrap", "Loaded {} native libraries", total);
        Ok(Bootstrapped { loaded: total })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
