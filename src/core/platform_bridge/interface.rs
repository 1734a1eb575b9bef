//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Host-to-bridge and bridge-to-engine contract (traits, handles, errors).
//
// The bridge only ever talks to the outside world through these seams:
//
//   LibraryLoader  ── dynamic linker (loadLibraries)
//   AssetReceiver  ── native engine  (initAssetManager)
//   AssetSource    ── platform       (getAssets)
//   DisplayApi     ── platform       (setSystemUiVisibility)
//
// Platform adapters drive the bridge through `LifecycleCallbacks`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ffi::c_void;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::immersive::DisplayFlags;

//=== AssetHandle =========================================================

/// Opaque reference to the platform's read-only asset archive.
///
/// On Android this wraps a JNI global reference to the activity's Java
/// `AssetManager`; the engine converts it with `AAssetManager_fromJava`.
/// The bridge never looks behind the pointer and never validates it: a
/// null handle is delivered as-is and the native side decides whether it
/// is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHandle(*mut c_void);

impl AssetHandle {
    /// Wraps a raw platform pointer.
    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    /// A handle that refers to nothing.
    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

//=== Seams ===============================================================

/// Dynamic-linker access, one library per call.
pub trait LibraryLoader {
    /// Loads the named library (platform short name, e.g. `"SDL2"`).
    fn load_library(&mut self, name: &str) -> Result<(), LoadFailure>;
}

/// Native side of the asset handoff.
pub trait AssetReceiver {
    /// Invokes the engine's `entry_point`, transferring `handle` to it.
    fn init_asset_manager(&mut self, entry_point: &str, handle: AssetHandle)
        -> Result<(), LoadFailure>;
}

/// Platform provider of the asset archive.
pub trait AssetSource {
    fn asset_handle(&self) -> AssetHandle;
}

/// Platform system-UI visibility control.
pub trait DisplayApi {
    /// Requests the given visibility flags on the application window.
    ///
    /// `Ok` means the platform accepted the request for its UI thread.
    /// Implementations must not read state back; the request is
    /// fire-and-forget from the bridge's point of view.
    fn set_system_ui_visibility(&mut self, flags: DisplayFlags) -> Result<(), DisplayError>;
}

/// Lifecycle hooks the platform adapter forwards to the bridge.
///
/// The hosting platform invokes `create` once per process, followed by
/// any number of focus changes, all on the same callback thread.
pub trait LifecycleCallbacks {
    /// Process creation. Any error is a fatal startup failure.
    fn on_create(&mut self) -> Result<(), BridgeError>;

    /// Window input focus changed.
    fn on_focus_changed(&mut self, has_focus: bool);
}

//=== LoadFailure =========================================================

/// Reason reported by the dynamic linker or symbol lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    reason: String,
}

impl LoadFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for LoadFailure {}

//=== DisplayError ========================================================

/// A display request the platform did not accept.
///
/// Never fatal. The next focus gain re-asserts the flags anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// A JNI call failed or raised a Java exception.
    Jni(String),

    /// The platform refused the request for another reason.
    Rejected(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jni(e) => write!(f, "JNI call failed: {}", e),
            Self::Rejected(e) => write!(f, "Display request rejected: {}", e),
        }
    }
}

impl std::error::Error for DisplayError {}

//=== BridgeError =========================================================

/// Fatal startup failures.
///
/// None of these are retried: a partially initialized engine has no
/// defined safe state, so the process is expected to terminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A declared native library could not be loaded.
    LibraryLoad { library: String, source: LoadFailure },

    /// The asset handoff entry point is not exported by the engine.
    EntryPointMissing { symbol: String, source: LoadFailure },

    /// `on_create` was invoked more than once.
    AlreadyCreated,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryLoad { library, source } => {
                write!(f, "Failed to load native library '{}': {}", library, source)
            }
            Self::EntryPointMissing { symbol, source } => {
                write!(f, "Native entry point '{}' unavailable: {}", symbol, source)
            }
            Self::AlreadyCreated => write!(f, "Platform bridge already created"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LibraryLoad { source, .. } | Self::EntryPointMissing { source, .. } => {
                Some(source)
            }
            Self::AlreadyCreated => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
