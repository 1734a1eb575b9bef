//=========================================================================
// Core Bridge Logic
//
// Platform-independent half of the host integration.
//
// Responsibilities:
// - Describe what to load and what to assert (`config`)
// - Load native libraries in dependency order (`bootstrap`)
// - Hand the asset archive to the engine exactly once (`asset_handoff`)
// - Keep the window immersive across focus changes (`immersive`)
// - Tie the three to the host lifecycle (`platform_bridge`)
//
// Notes:
// Nothing in here touches winit, JNI or the dynamic linker directly.
// Those live behind the traits in `platform_bridge::interface` and are
// implemented in the crate's `platform` module.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod asset_handoff;
pub mod bootstrap;
pub mod config;
pub mod immersive;
pub mod platform_bridge;
