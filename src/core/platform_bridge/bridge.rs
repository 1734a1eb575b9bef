//=========================================================================
// PlatformBridge
//=========================================================================
//
// Lifecycle-driven glue between the host process and the native engine.
//
// Lifecycle:
// ```text
//   on_create ──> NativeBootstrap ──> AssetHandoff ──> ImmersiveController
//      │               (fatal)           (fatal)          (drift only)
//      │
//   on_focus_changed(gained) ──> ImmersiveController (re-assert)
//   on_focus_changed(lost)   ──> ImmersiveController (mark Default)
// ```
//
// Everything runs synchronously on the platform callback thread. A failed
// bootstrap or handoff leaves the bridge in `Failed`: no display request
// is made and later focus events are ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::interface::{
    AssetReceiver, AssetSource, BridgeError, DisplayApi, LibraryLoader, LifecycleCallbacks,
};
use crate::core::asset_handoff::AssetHandoff;
use crate::core::bootstrap::NativeBootstrap;
use crate::core::config::BridgeConfig;
use crate::core::immersive::{DisplayMode, ImmersiveController};

//=== Phase ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for `on_create`.
    Pending,
    /// Libraries loaded, assets handed off.
    Ready,
    /// Startup failed; the process is expected to terminate.
    Failed,
}

//=== PlatformBridge ======================================================

/// The host-integration bridge.
///
/// Generic over the native runtime `N` (dynamic linker + engine entry
/// point) and the host `H` (asset archive + display API), so the same
/// logic runs against the real platform and against test doubles.
///
/// # Examples
///
/// ```no_run
/// # use quake_bsp_bridge::core::config::BridgeConfig;
/// # use quake_bsp_bridge::core::platform_bridge::*;
/// # use quake_bsp_bridge::core::immersive::DisplayFlags;
/// # struct Native;
/// # impl LibraryLoader for Native {
/// #     fn load_library(&mut self, _: &str) -> Result<(), LoadFailure> { Ok(()) }
/// # }
/// # impl AssetReceiver for Native {
/// #     fn init_asset_manager(&mut self, _: &str, _: AssetHandle) -> Result<(), LoadFailure> { Ok(()) }
/// # }
/// # struct Host;
/// # impl AssetSource for Host { fn asset_handle(&self) -> AssetHandle { AssetHandle::null() } }
/// # impl DisplayApi for Host {
/// #     fn set_system_ui_visibility(&mut self, _: DisplayFlags) -> Result<(), DisplayError> { Ok(()) }
/// # }
/// let mut bridge = PlatformBridge::new(BridgeConfig::default(), Native, Host);
///
/// bridge.on_create()?;
/// bridge.on_focus_changed(false);
/// bridge.on_focus_changed(true); // immersive mode re-asserted
/// # Ok::<(), BridgeError>(())
/// ```
pub struct PlatformBridge<N, H> {
    config: BridgeConfig,
    native: N,
    host: H,
    phase: Phase,
    handoff: Option<AssetHandoff>,
    display: ImmersiveController,
}

impl<N, H> PlatformBridge<N, H>
where
    N: LibraryLoader + AssetReceiver,
    H: AssetSource + DisplayApi,
{
    //--- Construction -----------------------------------------------------

    pub fn new(config: BridgeConfig, native: N, host: H) -> Self {
        let handoff = AssetHandoff::new(config.asset_entry_point());
        let display = ImmersiveController::new(config.display_flags());

        Self {
            config,
            native,
            host,
            phase: Phase::Pending,
            handoff: Some(handoff),
            display,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display.mode()
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    //--- Internal Helpers -------------------------------------------------

    fn start(&mut self) -> Result<(), BridgeError> {
        let libraries = self.config.libraries();
        info!(
            target: "bridge",
            "Starting platform bridge ({} native libraries)",
            libraries.len()
        );

        let bootstrapped = NativeBootstrap::run(libraries, &mut self.native)?;

        let handoff = self.handoff.take().ok_or(BridgeError::AlreadyCreated)?;
        let handle = self.host.asset_handle();
        handoff.deliver(&bootstrapped, handle, &mut self.native)?;

        self.display.on_create(&mut self.host);
        Ok(())
    }
}

//=== Lifecycle ===========================================================

impl<N, H> LifecycleCallbacks for PlatformBridge<N, H>
where
    N: LibraryLoader + AssetReceiver,
    H: AssetSource + DisplayApi,
{
    fn on_create(&mut self) -> Result<(), BridgeError> {
        if self.phase != Phase::Pending {
            warn!(target: "bridge", "on_create called again (phase: {:?})", self.phase);
            return Err(BridgeError::AlreadyCreated);
        }

        match self.start() {
            Ok(()) => {
                self.phase = Phase::Ready;
                info!(target: "bridge", "Platform bridge ready");
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    fn on_focus_changed(&mut self, has_focus: bool) {
        if self.phase != Phase::Ready {
            warn!(
                target: "bridge",
                "Ignoring focus change ({}) while {:?}",
                has_focus,
                self.phase
            );
            return;
        }

        self.display.on_focus_changed(has_focus, &mut self.host);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
