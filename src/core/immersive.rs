//=========================================================================
// Immersive Display State Machine
//=========================================================================
//
// Keeps the window edge-to-edge for the whole life of the process.
//
// States:
// ```text
//              on_create / focus gained
//   Default ─────────────────────────────> Immersive
//      ^                                       │
//      └──────────── focus lost ───────────────┘
//                (platform may reset flags)
// ```
//
// There is no terminal state. Focus gain always re-asserts the full flag
// set; nothing is read back from the platform to decide whether that is
// needed. A failed request is drift, not an error: the mode stays
// `Default` until the next focus gain.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use bitflags::bitflags;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::DisplayApi;

//=== DisplayFlags ========================================================

bitflags! {
    /// System-UI visibility bits, using the platform's `View` values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: i32 {
        /// `SYSTEM_UI_FLAG_HIDE_NAVIGATION`
        const HIDE_NAVIGATION = 0x0000_0002;
        /// `SYSTEM_UI_FLAG_FULLSCREEN`
        const FULLSCREEN = 0x0000_0004;
        /// `SYSTEM_UI_FLAG_IMMERSIVE_STICKY`
        const IMMERSIVE_STICKY = 0x0000_1000;

        /// Full-screen, sticky-immersive and hidden navigation together.
        const IMMERSIVE = Self::HIDE_NAVIGATION.bits()
            | Self::FULLSCREEN.bits()
            | Self::IMMERSIVE_STICKY.bits();
    }
}

//=== DisplayMode =========================================================

/// What the bridge believes the window is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Platform default chrome (status and navigation bars visible).
    Default,
    /// The configured flag set was accepted by the platform.
    Immersive,
}

//=== Trigger =============================================================

/// Why a display assertion was issued. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Create,
    FocusGained,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::FocusGained => f.write_str("focus gained"),
        }
    }
}

//=== ImmersiveController =================================================

/// Drives the `Default` / `Immersive` state machine.
///
/// Holds no platform handle itself; every transition is applied through
/// the [`DisplayApi`] passed in by the caller.
#[derive(Debug)]
pub struct ImmersiveController {
    flags: DisplayFlags,
    mode: DisplayMode,
    assertions: u32,
}

impl ImmersiveController {
    pub fn new(flags: DisplayFlags) -> Self {
        Self {
            flags,
            mode: DisplayMode::Default,
            assertions: 0,
        }
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Number of display requests issued so far.
    pub fn assertions(&self) -> u32 {
        self.assertions
    }

    /// Requests immersive mode unconditionally at creation.
    pub fn on_create<D: DisplayApi + ?Sized>(&mut self, display: &mut D) {
        self.assert_flags(display, Trigger::Create);
    }

    /// Re-asserts on focus gain; on focus loss assumes the platform may
    /// have reverted the flags.
    pub fn on_focus_changed<D: DisplayApi + ?Sized>(&mut self, has_focus: bool, display: &mut D) {
        if has_focus {
            self.assert_flags(display, Trigger::FocusGained);
        } else {
            debug!(target: "bridge::display", "Focus lost, display flags may be reset");
            self.mode = DisplayMode::Default;
        }
    }

    fn assert_flags<D: DisplayApi + ?Sized>(&mut self, display: &mut D, trigger: Trigger) {
        self.assertions = self.assertions.saturating_add(1);
        debug!(
            target: "bridge::display",
            "Requesting system UI visibility {:#06x} ({})",
            self.flags.bits(),
            trigger
        );

        match display.set_system_ui_visibility(self.flags) {
            Ok(()) => {
                if self.mode != DisplayMode::Immersive {
                    info!(target: "bridge::display", "Immersive mode asserted ({})", trigger);
                }
                self.mode = DisplayMode::Immersive;
            }
            Err(e) => {
                warn!(
                    target: "bridge::display",
                    "Display request failed on {}, will retry on next focus gain: {}",
                    trigger,
                    e
                );
                self.mode = DisplayMode::Default;
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
