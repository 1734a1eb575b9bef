//=========================================================================
// Native Runtime
//=========================================================================
//
// Dynamic-linker backed implementation of `LibraryLoader` and
// `AssetReceiver`.
//
// Library names are mapped to file names the way the host's
// `System.loadLibrary` does (`"SDL2"` → `libSDL2.so`). Every library stays
// loaded until the runtime is dropped, which for the bridge means the
// end of the process.
//
// The asset entry point is looked up newest library first, so the
// application module wins over its dependencies. Its calling convention
// follows its name:
//
//   Java_*   → JNI:  void f(JNIEnv *env, jobject activity, jobject assetManager)
//   other    → C:    void f(void *handle)
//
// A JNI entry point needs the Java VM and the activity, supplied through
// `JniContext`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ffi::c_void;

use jni::sys::{jobject, JNIEnv};
use jni::JavaVM;
use libloading::{library_filename, Library, Symbol};
use log::{debug, error, trace};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{AssetHandle, AssetReceiver, LibraryLoader, LoadFailure};

//=== Entry Point Signatures ==============================================

type JniInitAssetManagerFn = unsafe extern "system" fn(*mut JNIEnv, jobject, jobject);
type CInitAssetManagerFn = unsafe extern "C" fn(*mut c_void);

/// Prefix the JNI specification reserves for native method symbols.
const JNI_SYMBOL_PREFIX: &str = "Java_";

//=== EntryPointAbi =======================================================

/// Calling convention of the engine's asset entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPointAbi {
    /// JNI native method: `(JNIEnv*, jobject activity, jobject assetManager)`.
    Jni,
    /// Plain C function taking the handle.
    C,
}

impl EntryPointAbi {
    pub fn for_symbol(symbol: &str) -> Self {
        if symbol.starts_with(JNI_SYMBOL_PREFIX) {
            Self::Jni
        } else {
            Self::C
        }
    }
}

//=== JniContext ==========================================================

/// Java VM and activity a JNI entry point is called with.
#[derive(Debug, Clone, Copy)]
pub struct JniContext {
    vm: *mut jni::sys::JavaVM,
    activity: jobject,
}

impl JniContext {
    /// # Safety
    ///
    /// `vm` must be the process's `JavaVM*` and `activity` a global
    /// reference to the activity, both valid for the life of the runtime.
    pub unsafe fn from_raw(vm: *mut c_void, activity: *mut c_void) -> Self {
        Self {
            vm: vm.cast(),
            activity: activity.cast(),
        }
    }
}

//=== NativeRuntime =======================================================

/// Loaded engine libraries, in load order.
#[derive(Debug, Default)]
pub struct NativeRuntime {
    libraries: Vec<(String, Library)>,
    jni: Option<JniContext>,
}

impl NativeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables JNI entry points.
    pub fn with_jni(mut self, context: JniContext) -> Self {
        self.jni = Some(context);
        self
    }

    /// Names of the libraries loaded so far, in load order.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.libraries.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.libraries.iter().any(|(loaded, _)| loaded == name)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Finds `symbol`, newest library first.
    fn find<T>(&self, symbol: &str) -> Option<(&str, Symbol<'_, T>)> {
        self.libraries.iter().rev().find_map(|(name, library)| {
            // SAFETY: obtaining the address is harmless; callers pick `T`
            // to match the exported signature before calling it.
            unsafe { library.get::<T>(symbol.as_bytes()) }
                .ok()
                .map(|found| (name.as_str(), found))
        })
    }

    fn missing(&self, symbol: &str) -> LoadFailure {
        LoadFailure::new(format!(
            "symbol '{}' not exported by any of {} loaded libraries",
            symbol,
            self.libraries.len()
        ))
    }

    fn call_jni(
        &self,
        entry_point: &str,
        init: Symbol<'_, JniInitAssetManagerFn>,
        handle: AssetHandle,
    ) -> Result<(), LoadFailure> {
        let context = self.jni.ok_or_else(|| {
            LoadFailure::new(format!("'{}' is a JNI entry point but no Java VM is attached", entry_point))
        })?;

        // SAFETY: guaranteed by `JniContext::from_raw`.
        let vm = unsafe { JavaVM::from_raw(context.vm) }
            .map_err(|e| LoadFailure::new(e.to_string()))?;
        let env = vm
            .attach_current_thread()
            .map_err(|e| LoadFailure::new(e.to_string()))?;

        // SAFETY: the engine exports the entry point as a JNI native
        // method; the handle is a Java `AssetManager` reference.
        unsafe { init(env.get_raw(), context.activity, handle.as_ptr().cast()) };

        if env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
            error!(target: "platform::native", "'{}' raised a Java exception", entry_point);
            return Err(LoadFailure::new(format!("'{}' raised a Java exception", entry_point)));
        }

        Ok(())
    }
}

impl LibraryLoader for NativeRuntime {
    fn load_library(&mut self, name: &str) -> Result<(), LoadFailure> {
        if self.is_loaded(name) {
            debug!(target: "platform::native", "'{}' already loaded", name);
            return Ok(());
        }

        let file_name = library_filename(name);
        trace!(target: "platform::native", "dlopen {:?}", file_name);

        // SAFETY: loading runs the library's initialisers. The libraries
        // are the application's own engine modules, shipped in the APK.
        let library = unsafe { Library::new(&file_name) }
            .map_err(|e| LoadFailure::new(e.to_string()))?;

        self.libraries.push((name.to_owned(), library));
        Ok(())
    }
}

impl AssetReceiver for NativeRuntime {
    fn init_asset_manager(
        &mut self,
        entry_point: &str,
        handle: AssetHandle,
    ) -> Result<(), LoadFailure> {
        match EntryPointAbi::for_symbol(entry_point) {
            EntryPointAbi::Jni => {
                let (library, init) = self
                    .find::<JniInitAssetManagerFn>(entry_point)
                    .ok_or_else(|| self.missing(entry_point))?;
                debug!(target: "platform::native", "Calling JNI '{}' in '{}'", entry_point, library);
                self.call_jni(entry_point, init, handle)
            }
            EntryPointAbi::C => {
                let (library, init) = self
                    .find::<CInitAssetManagerFn>(entry_point)
                    .ok_or_else(|| self.missing(entry_point))?;
                debug!(target: "platform::native", "Calling '{}' in '{}'", entry_point, library);
                // SAFETY: the engine exports the entry point with the
                // `CInitAssetManagerFn` signature; the handle is forwarded
                // unchanged.
                unsafe { init(handle.as_ptr()) };
                Ok(())
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
