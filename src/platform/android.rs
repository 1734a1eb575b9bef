//=========================================================================
// Android Host
//=========================================================================
//
// NativeActivity integration: the `android_main` entry point, the asset
// manager source and JNI-backed system UI control.
//
// The host owns the `AndroidApp`. `android_main` runs on the glue thread,
// but `View` methods may only be called on the activity's UI thread, so
// display requests go through `MainActivity.applySystemUiVisibility(int)`,
// which posts the change with `runOnUiThread`. Any Java exception is
// cleared and reported as `DisplayError::Jni`, which the bridge treats as
// drift.
//
//=========================================================================

//=== External Dependencies ===============================================

use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};
use log::{error, info, LevelFilter};
use winit::event_loop::EventLoop;
use winit::platform::android::activity::AndroidApp;
use winit::platform::android::EventLoopBuilderExtAndroid;

//=== Internal Dependencies ===============================================

use super::native::{JniContext, NativeRuntime};
use super::{Platform, PlatformError};
use crate::core::config::BridgeConfig;
use crate::core::immersive::DisplayFlags;
use crate::core::platform_bridge::{AssetHandle, AssetSource, DisplayApi, DisplayError, PlatformBridge};

//=== Constants ===========================================================

/// Activity method that applies visibility flags on the UI thread.
const UI_VISIBILITY_METHOD: &str = "applySystemUiVisibility";

/// Local references created per JNI call; one frame covers them all.
const LOCAL_FRAME_CAPACITY: i32 = 4;

//=== AndroidHost =========================================================

/// The running activity, seen through the bridge's host seams.
pub struct AndroidHost {
    app: AndroidApp,
    vm: JavaVM,
    assets: GlobalRef,
}

impl AndroidHost {
    /// Resolves the activity's Java `AssetManager` and pins it with a
    /// global reference for the life of the host.
    ///
    /// # Errors
    ///
    /// Fails if the VM cannot be reached or `getAssets()` throws.
    pub fn new(app: AndroidApp) -> Result<Self, jni::errors::Error> {
        // SAFETY: the VM pointer is valid for the life of the process.
        let vm = unsafe { JavaVM::from_raw(app.vm_as_ptr().cast()) }?;

        let assets = {
            let mut env = vm.attach_current_thread()?;
            let activity = activity(&app);
            let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
                let assets = env
                    .call_method(
                        &activity,
                        "getAssets",
                        "()Landroid/content/res/AssetManager;",
                        &[],
                    )?
                    .l()?;
                env.new_global_ref(assets)
            });
            clear_exception(&mut env);
            result?
        };

        Ok(Self { app, vm, assets })
    }
}

impl AssetSource for AndroidHost {
    fn asset_handle(&self) -> AssetHandle {
        AssetHandle::from_raw(self.assets.as_obj().as_raw().cast())
    }
}

impl DisplayApi for AndroidHost {
    fn set_system_ui_visibility(&mut self, flags: DisplayFlags) -> Result<(), DisplayError> {
        let mut env = self.vm.attach_current_thread().map_err(jni_error)?;
        let activity = activity(&self.app);

        // The glue thread stays attached for the whole process, so local
        // refs would only be freed with an enclosing frame.
        let result = env
            .with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
                env.call_method(
                    &activity,
                    UI_VISIBILITY_METHOD,
                    "(I)V",
                    &[JValue::Int(flags.bits())],
                )
                .map(|_| ())
            })
            .map_err(jni_error);

        clear_exception(&mut env);
        result
    }
}

//--- JNI Helpers ---------------------------------------------------------

fn activity(app: &AndroidApp) -> JObject<'static> {
    // SAFETY: the activity reference is a global ref held by the glue for
    // as long as the `AndroidApp` lives.
    unsafe { JObject::from_raw(app.activity_as_ptr().cast()) }
}

fn clear_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

fn jni_error(e: jni::errors::Error) -> DisplayError {
    DisplayError::Jni(e.to_string())
}

//=== Entry Point =========================================================

/// Builds the production bridge for `app` and runs it to completion.
///
/// # Errors
///
/// See [`PlatformError`].
pub fn run(app: AndroidApp, config: BridgeConfig) -> Result<(), PlatformError> {
    let event_loop = EventLoop::builder()
        .with_android_app(app.clone())
        .build()
        .map_err(PlatformError::EventLoopCreation)?;

    let host = AndroidHost::new(app.clone()).map_err(PlatformError::Jni)?;

    // SAFETY: both pointers stay valid while the `AndroidApp` lives, and
    // the runtime is dropped before `run` returns.
    let jni = unsafe { JniContext::from_raw(app.vm_as_ptr(), app.activity_as_ptr()) };
    let native = NativeRuntime::new().with_jni(jni);

    let bridge = PlatformBridge::new(config, native, host);
    Platform::new(bridge).run(event_loop)
}

#[no_mangle]
fn android_main(app: AndroidApp) {
    let config = BridgeConfig::default();

    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(LevelFilter::Info)
            .with_tag(config.log_tag()),
    );

    info!(target: "platform", "android_main entered");

    if let Err(e) = run(app, config) {
        error!(target: "platform", "{}", e);
        // Surfaces on the platform crash channel; nothing can recover here.
        panic!("{}", e);
    }

    info!(target: "platform", "android_main finished");
}
