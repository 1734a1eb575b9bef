//=========================================================================
// Platform Subsystem
//
// Drives the bridge from the winit event loop.
//
// Architecture:
// ```text
//  Host (NativeActivity)            Bridge
//  ┌──────────────────────────┐    ┌──────────────────────────┐
//  │  Winit Event Loop        │    │  PlatformBridge          │
//  │   ↓                      │    │                          │
//  │  new_events(Init) ───────┼───>│  on_create               │
//  │                          │    │   ├─ NativeBootstrap     │
//  │                          │    │   ├─ AssetHandoff        │
//  │                          │    │   └─ ImmersiveController │
//  │  WindowEvent::Focused ───┼───>│  on_focus_changed        │
//  │                          │    │   └─ ImmersiveController │
//  └──────────────────────────┘    └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **StartCause::Init = process creation**: delivered exactly once,
//   before any window exists, so the engine is loaded before it can be
//   asked to render
// - **Fatal startup exits the loop**: the error is kept and returned from
//   `run()`; callbacks never panic
// - **No window here**: the engine owns the surface, `resumed()` only logs
//
// Submodules:
// - `native`: dynamic-linker backed `LibraryLoader` / `AssetReceiver`
// - `android`: UI-thread display control, asset manager, `android_main`
//
//=========================================================================

//=== Submodules ==========================================================

pub mod native;

#[cfg(target_os = "android")]
pub mod android;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{BridgeError, LifecycleCallbacks};

//=== PlatformError =======================================================

/// Errors that end the platform event loop.
///
/// All of these are fatal: the process has nothing useful left to do.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),

    /// The bridge could not start the native engine.
    Startup(BridgeError),

    /// The host could not reach the Java side of the activity.
    Jni(jni::errors::Error),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::Startup(e) => write!(f, "Fatal startup failure: {}", e),
            Self::Jni(e) => write!(f, "Java host unavailable: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::Startup(e) => Some(e),
            Self::Jni(e) => Some(e),
        }
    }
}

//=== Platform ============================================================

/// Winit adapter that forwards host lifecycle events to a bridge.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(bridge)`
/// 2. **Execution**: `platform.run(event_loop)` blocks in the event loop
/// 3. **Create**: `StartCause::Init` → `on_create`
/// 4. **Focus**: `WindowEvent::Focused` → `on_focus_changed`
/// 5. **Shutdown**: loop exits on close, destroy, or a fatal startup error
///
/// # Thread Safety
///
/// Runs entirely on the thread that owns the event loop.
pub struct Platform<B> {
    bridge: B,
    created: bool,
    fatal: Option<BridgeError>,
}

impl<B: LifecycleCallbacks> Platform<B> {
    //--- Construction -----------------------------------------------------

    pub fn new(bridge: B) -> Self {
        info!(target: "platform", "Platform adapter initialized");
        Self {
            bridge,
            created: false,
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs `event_loop` until the host closes the app or startup fails.
    ///
    /// The loop is passed in because its construction is platform
    /// specific (on Android it must be bound to the `AndroidApp`).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Startup`] if `on_create` failed, or
    /// [`PlatformError::EventLoopExecution`] if winit itself failed.
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.fatal.take() {
            Some(e) => Err(PlatformError::Startup(e)),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Forwards process creation. Returns false if the loop must stop.
    fn handle_create(&mut self) -> bool {
        if self.created {
            debug!(target: "platform", "Create already forwarded");
            return true;
        }
        self.created = true;

        match self.bridge.on_create() {
            Ok(()) => true,
            Err(e) => {
                error!(target: "platform", "Bridge startup failed: {}", e);
                self.fatal = Some(e);
                false
            }
        }
    }

    fn handle_focus(&mut self, focused: bool) {
        trace!(target: "platform", "Focus changed: {}", focused);
        if self.fatal.is_some() {
            return;
        }
        self.bridge.on_focus_changed(focused);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn bridge(&self) -> &B {
        &self.bridge
    }
}

//=== Winit Integration ===================================================

impl<B: LifecycleCallbacks> ApplicationHandler for Platform<B> {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::Init = cause {
            if !self.handle_create() {
                event_loop.exit();
            }
        }
    }

    /// The engine creates its own surface; nothing to do here.
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Resumed");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Focused(focused) => self.handle_focus(focused),

            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!(target: "platform", "Window closed, leaving event loop");
                event_loop.exit();
            }

            _ => {
                // Ignore: input and rendering belong to the engine
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BridgeConfig;
    use crate::core::immersive::{DisplayFlags, DisplayMode};
    use crate::core::platform_bridge::testing::{FakeHost, FakeNative, Recorder};
    use crate::core::platform_bridge::{Phase, PlatformBridge};

    type TestBridge = PlatformBridge<FakeNative, FakeHost>;

    fn platform(recorder: &Recorder, native: FakeNative) -> Platform<TestBridge> {
        Platform::new(PlatformBridge::new(BridgeConfig::default(), native, recorder.host()))
    }

    //=====================================================================
    // Lifecycle Forwarding Tests
    //=====================================================================

    #[test]
    fn platform_creation_does_not_start_bridge() {
        let recorder = Recorder::new();
        let platform = platform(&recorder, recorder.native());

        assert_eq!(platform.bridge().phase(), Phase::Pending);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn create_is_forwarded_once() {
        let recorder = Recorder::new();
        let mut platform = platform(&recorder, recorder.native());

        assert!(platform.handle_create());
        assert!(platform.handle_create(), "Repeat create is a no-op");

        assert_eq!(platform.bridge().phase(), Phase::Ready);
        assert_eq!(recorder.handoffs(), 1);
        assert!(platform.fatal.is_none());
    }

    #[test]
    fn failed_create_stops_loop_and_keeps_error() {
        let recorder = Recorder::new();
        let mut platform = platform(&recorder, recorder.native().failing_on("native-lib"));

        assert!(!platform.handle_create());

        match &platform.fatal {
            Some(BridgeError::LibraryLoad { library, .. }) => assert_eq!(library, "native-lib"),
            other => panic!("Expected LibraryLoad, got {:?}", other),
        }
    }

    #[test]
    fn focus_is_forwarded_to_bridge() {
        let recorder = Recorder::new();
        let mut platform = platform(&recorder, recorder.native());
        platform.handle_create();

        platform.handle_focus(false);
        assert_eq!(platform.bridge().display_mode(), DisplayMode::Default);

        platform.handle_focus(true);
        assert_eq!(platform.bridge().display_mode(), DisplayMode::Immersive);
        assert_eq!(
            recorder.display_requests(),
            vec![DisplayFlags::IMMERSIVE, DisplayFlags::IMMERSIVE]
        );
    }

    #[test]
    fn focus_after_fatal_startup_is_dropped() {
        let recorder = Recorder::new();
        let mut platform = platform(&recorder, recorder.native().failing_on("SDL2"));
        platform.handle_create();

        platform.handle_focus(true);

        assert!(recorder.display_requests().is_empty());
    }

    #[test]
    fn java_host_posts_visibility_to_ui_thread() {
        let activity = include_str!(
            "../../android/src/main/java/pl/kondrak/quakebspviewer/MainActivity.java"
        );

        // Called over JNI as `applySystemUiVisibility(I)V` from the glue thread
        assert!(activity.contains("public void applySystemUiVisibility(final int flags)"));
        assert!(activity.contains("runOnUiThread("));
        assert!(activity.contains("getDecorView().setSystemUiVisibility(flags)"));
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn startup_error_display_format() {
        let err = PlatformError::Startup(BridgeError::AlreadyCreated);
        assert_eq!(
            err.to_string(),
            "Fatal startup failure: Platform bridge already created"
        );
    }

    #[test]
    fn jni_error_display_format() {
        let err = PlatformError::Jni(jni::errors::Error::NullPtr("getAssets"));
        let msg = err.to_string();

        assert!(msg.starts_with("Java host unavailable: "), "Unexpected message: {}", msg);
        assert!(msg.contains("getAssets"), "Message should carry the JNI cause: {}", msg);
        assert!(std::error::Error::source(&err).is_some());
    }
}
