//=========================================================================
// Quake BSP Viewer Bridge — Library Root
//
// Android host integration for the Quake BSP level viewer. The viewer's
// rendering and level parsing live in an external native engine; this
// crate only gets the process ready for it.
//
// Responsibilities:
// - Load the engine's shared libraries in dependency order
// - Hand the platform asset archive to the engine, once
// - Keep the display edge-to-edge (immersive) across focus changes
//
// Typical usage (on Android the `android_main` entry point does this):
// ```no_run
// use quake_bsp_bridge::core::config::BridgeConfig;
//
// let config = BridgeConfig::builder()
//     .with_libraries(["SDL2", "vulkan", "native-lib"])
//     .build()?;
// # Ok::<(), quake_bsp_bridge::core::config::ConfigError>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent bridge: configuration, bootstrap,
// asset handoff, immersive state machine, and the lifecycle glue tying
// them together. It can be driven and tested without a device.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit adapter, the dynamic-linker runtime and
// (on Android) the JNI host and `android_main`.
//
mod platform;

pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use platform::native::NativeRuntime;
pub use platform::{Platform, PlatformError};

#[cfg(target_os = "android")]
pub use platform::android::{run as run_android, AndroidHost};
