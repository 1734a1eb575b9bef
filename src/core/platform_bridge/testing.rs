//=========================================================================
// Recording Test Doubles
//=========================================================================
//
// Fake native runtime and fake host that log every call into one shared,
// ordered journal, so tests can assert cross-seam ordering
// (loads → handoff → display requests → first render).
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::rc::Rc;

use super::{
    AssetHandle, AssetReceiver, AssetSource, DisplayApi, DisplayError, LibraryLoader, LoadFailure,
};
use crate::core::config::DEFAULT_ASSET_ENTRY_POINT;
use crate::core::immersive::DisplayFlags;

//=== Call ================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    LoadLibrary(String),
    InitAssetManager {
        entry_point: String,
        handle: AssetHandle,
    },
    SetDisplayFlags(DisplayFlags),
    /// Simulated engine activity after startup.
    FirstRender,
}

/// Stable non-null handle for assertions. Never dereferenced.
pub(crate) fn test_handle() -> AssetHandle {
    AssetHandle::from_raw(0xA55E_7000usize as *mut c_void)
}

//=== Recorder ============================================================

#[derive(Debug, Clone)]
pub(crate) struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    display_failing: Rc<Cell<bool>>,
    entry_point: String,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            display_failing: Rc::new(Cell::new(false)),
            entry_point: DEFAULT_ASSET_ENTRY_POINT.to_owned(),
        }
    }

    /// Fakes created afterwards export `symbol` instead of the default.
    pub(crate) fn exporting(mut self, symbol: &str) -> Self {
        self.entry_point = symbol.to_owned();
        self
    }

    pub(crate) fn native(&self) -> FakeNative {
        FakeNative {
            recorder: self.clone(),
            failing_library: None,
            entry_point: Some(self.entry_point.clone()),
        }
    }

    pub(crate) fn host(&self) -> FakeHost {
        FakeHost {
            recorder: self.clone(),
            handle: test_handle(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn display_requests(&self) -> Vec<DisplayFlags> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SetDisplayFlags(flags) => Some(*flags),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn handoffs(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::InitAssetManager { .. }))
            .count()
    }

    pub(crate) fn set_display_failing(&self, failing: bool) {
        self.display_failing.set(failing);
    }

    pub(crate) fn render_first_frame(&self) {
        self.push(Call::FirstRender);
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

//=== FakeNative ==========================================================

#[derive(Debug)]
pub(crate) struct FakeNative {
    recorder: Recorder,
    failing_library: Option<String>,
    entry_point: Option<String>,
}

impl FakeNative {
    pub(crate) fn failing_on(mut self, name: &str) -> Self {
        self.failing_library = Some(name.to_owned());
        self
    }

    pub(crate) fn without_entry_point(mut self) -> Self {
        self.entry_point = None;
        self
    }
}

impl LibraryLoader for FakeNative {
    fn load_library(&mut self, name: &str) -> Result<(), LoadFailure> {
        self.recorder.push(Call::LoadLibrary(name.to_owned()));
        match &self.failing_library {
            Some(failing) if failing == name => Err(LoadFailure::new(format!(
                "dlopen failed: library \"lib{}.so\" not found",
                name
            ))),
            _ => Ok(()),
        }
    }
}

impl AssetReceiver for FakeNative {
    fn init_asset_manager(
        &mut self,
        entry_point: &str,
        handle: AssetHandle,
    ) -> Result<(), LoadFailure> {
        if self.entry_point.as_deref() != Some(entry_point) {
            return Err(LoadFailure::new(format!("undefined symbol: {}", entry_point)));
        }
        self.recorder.push(Call::InitAssetManager {
            entry_point: entry_point.to_owned(),
            handle,
        });
        Ok(())
    }
}

//=== FakeHost ============================================================

#[derive(Debug)]
pub(crate) struct FakeHost {
    recorder: Recorder,
    handle: AssetHandle,
}

impl FakeHost {
    pub(crate) fn with_handle(mut self, handle: AssetHandle) -> Self {
        self.handle = handle;
        self
    }
}

impl AssetSource for FakeHost {
    fn asset_handle(&self) -> AssetHandle {
        self.handle
    }
}

impl DisplayApi for FakeHost {
    fn set_system_ui_visibility(&mut self, flags: DisplayFlags) -> Result<(), DisplayError> {
        self.recorder.push(Call::SetDisplayFlags(flags));
        if self.recorder.display_failing.get() {
            return Err(DisplayError::Rejected("window not attached".into()));
        }
        Ok(())
    }
}
