//=========================================================================
// Bridge Configuration
//=========================================================================
//
// Everything platform- or product-specific the bridge needs: which
// libraries to load and in what order, which display flags to assert,
// the engine's asset entry point, and the log tag.
//
// Architecture:
// ```text
//     BridgeConfigBuilder ──build()──> BridgeConfig ──> PlatformBridge
//         │
//         ├─ with_libraries() / with_library()
//         ├─ with_display_flags()
//         ├─ with_asset_entry_point()
//         └─ with_log_tag()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::immersive::DisplayFlags;

//=== Defaults ============================================================

/// Platform shim, graphics loader, then the application module that
/// links against both.
pub const DEFAULT_LIBRARIES: [&str; 3] = ["SDL2", "vulkan", "native-lib"];

/// JNI native method the engine exports to receive the Java
/// `AssetManager`. Called as `(JNIEnv*, activity, assetManager)`.
pub const DEFAULT_ASSET_ENTRY_POINT: &str = "Java_pl_kondrak_quakebspviewer_initAssetManager";

pub const DEFAULT_LOG_TAG: &str = "QuakeBspViewer";

//=== ConfigError =========================================================

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No libraries declared. Falling back to an implicit entry library
    /// leaves the engine unreachable, so this is refused outright.
    EmptyLibrarySet,

    /// A library name was empty or whitespace.
    EmptyLibraryName,

    /// The same library was declared twice.
    DuplicateLibrary(String),

    /// No display flags to assert.
    EmptyDisplayFlags,

    /// The asset entry point symbol is empty.
    EmptyEntryPoint,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLibrarySet => write!(f, "Native library set must not be empty"),
            Self::EmptyLibraryName => write!(f, "Native library name must not be empty"),
            Self::DuplicateLibrary(name) => write!(f, "Native library '{}' declared twice", name),
            Self::EmptyDisplayFlags => write!(f, "Display flag set must not be empty"),
            Self::EmptyEntryPoint => write!(f, "Asset entry point must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

//=== LibrarySet ==========================================================

/// Ordered, duplicate-free list of native libraries.
///
/// A dependency must come before anything that links against it; the
/// bootstrap loads entries strictly in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySet {
    names: Vec<String>,
}

impl LibrarySet {
    /// Validates and builds a library set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the list is empty, contains an empty
    /// name, or names a library twice.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(ConfigError::EmptyLibrarySet);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyLibraryName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateLibrary(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Names in load order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated set.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The application's own module, loaded last.
    pub fn application_module(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }
}

impl Default for LibrarySet {
    fn default() -> Self {
        Self {
            names: DEFAULT_LIBRARIES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

//=== BridgeConfig ========================================================

/// Validated bridge configuration.
///
/// Build with [`BridgeConfig::builder`], or use [`Default`] for the
/// viewer's stock setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    libraries: LibrarySet,
    display_flags: DisplayFlags,
    asset_entry_point: String,
    log_tag: String,
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::new()
    }

    pub fn libraries(&self) -> &LibrarySet {
        &self.libraries
    }

    pub fn display_flags(&self) -> DisplayFlags {
        self.display_flags
    }

    pub fn asset_entry_point(&self) -> &str {
        &self.asset_entry_point
    }

    pub fn log_tag(&self) -> &str {
        &self.log_tag
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            libraries: LibrarySet::default(),
            display_flags: DisplayFlags::IMMERSIVE,
            asset_entry_point: DEFAULT_ASSET_ENTRY_POINT.to_owned(),
            log_tag: DEFAULT_LOG_TAG.to_owned(),
        }
    }
}

//=== BridgeConfigBuilder =================================================

/// Builder for [`BridgeConfig`].
///
/// Setters never fail; everything is validated once in [`build`].
///
/// # Default Values
///
/// - **Libraries**: `SDL2`, `vulkan`, `native-lib`
/// - **Display flags**: [`DisplayFlags::IMMERSIVE`]
/// - **Asset entry point**: `Java_pl_kondrak_quakebspviewer_initAssetManager`
/// - **Log tag**: `QuakeBspViewer`
///
/// # Examples
///
/// ```
/// use quake_bsp_bridge::core::config::BridgeConfig;
/// use quake_bsp_bridge::core::immersive::DisplayFlags;
///
/// let config = BridgeConfig::builder()
///     .with_libraries(["SDL2", "vulkan", "bsp-viewer"])
///     .with_display_flags(DisplayFlags::IMMERSIVE)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.libraries().application_module(), Some("bsp-viewer"));
/// ```
///
/// [`build`]: BridgeConfigBuilder::build
#[derive(Debug, Clone)]
pub struct BridgeConfigBuilder {
    libraries: Vec<String>,
    display_flags: DisplayFlags,
    asset_entry_point: String,
    log_tag: String,
}

impl BridgeConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            libraries: DEFAULT_LIBRARIES.iter().map(|s| (*s).to_owned()).collect(),
            display_flags: DisplayFlags::IMMERSIVE,
            asset_entry_point: DEFAULT_ASSET_ENTRY_POINT.to_owned(),
            log_tag: DEFAULT_LOG_TAG.to_owned(),
        }
    }

    /// Replaces the library list. Order is load order.
    pub fn with_libraries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries = names.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one library after those already declared.
    pub fn with_library(mut self, name: impl Into<String>) -> Self {
        self.libraries.push(name.into());
        self
    }

    pub fn with_display_flags(mut self, flags: DisplayFlags) -> Self {
        self.display_flags = flags;
        self
    }

    pub fn with_asset_entry_point(mut self, symbol: impl Into<String>) -> Self {
        self.asset_entry_point = symbol.into();
        self
    }

    pub fn with_log_tag(mut self, tag: impl Into<String>) -> Self {
        self.log_tag = tag.into();
        self
    }

    /// Validates and produces the configuration.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        let libraries = LibrarySet::new(self.libraries)?;

        if self.display_flags.is_empty() {
            return Err(ConfigError::EmptyDisplayFlags);
        }
        if self.asset_entry_point.trim().is_empty() {
            return Err(ConfigError::EmptyEntryPoint);
        }

        Ok(BridgeConfig {
            libraries,
            display_flags: self.display_flags,
            asset_entry_point: self.asset_entry_point,
            log_tag: self.log_tag,
        })
    }
}

impl Default for BridgeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // LibrarySet Tests
    //=====================================================================

    #[test]
    fn library_set_preserves_declared_order() {
        let set = LibrarySet::new(["hidapi", "SDL2", "main"]).unwrap();
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, vec!["hidapi", "SDL2", "main"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn library_set_rejects_empty() {
        let result = LibrarySet::new(Vec::<String>::new());
        assert_eq!(result, Err(ConfigError::EmptyLibrarySet));
    }

    #[test]
    fn library_set_rejects_blank_name() {
        let result = LibrarySet::new(["SDL2", "  "]);
        assert_eq!(result, Err(ConfigError::EmptyLibraryName));
    }

    #[test]
    fn library_set_rejects_duplicates() {
        let result = LibrarySet::new(["SDL2", "vulkan", "SDL2"]);
        assert_eq!(result, Err(ConfigError::DuplicateLibrary("SDL2".into())));
    }

    #[test]
    fn default_library_set_ends_with_application_module() {
        let set = LibrarySet::default();
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, DEFAULT_LIBRARIES.to_vec());
        assert_eq!(set.application_module(), Some("native-lib"));
    }

    //=====================================================================
    // Builder Tests
    //=====================================================================

    #[test]
    fn builder_defaults_match_default_config() {
        let built = BridgeConfig::builder().build().unwrap();
        assert_eq!(built, BridgeConfig::default());
        assert_eq!(built.display_flags(), DisplayFlags::IMMERSIVE);
        assert_eq!(
            built.asset_entry_point(),
            "Java_pl_kondrak_quakebspviewer_initAssetManager"
        );
        assert_eq!(built.log_tag(), "QuakeBspViewer");
    }

    #[test]
    fn builder_with_library_appends() {
        let config = BridgeConfig::builder()
            .with_libraries(["SDL2"])
            .with_library("native-lib")
            .build()
            .unwrap();

        let names: Vec<&str> = config.libraries().iter().collect();
        assert_eq!(names, vec!["SDL2", "native-lib"]);
    }

    #[test]
    fn builder_rejects_empty_library_list() {
        let result = BridgeConfig::builder()
            .with_libraries(Vec::<String>::new())
            .build();
        assert_eq!(result, Err(ConfigError::EmptyLibrarySet));
    }

    #[test]
    fn builder_rejects_empty_flags() {
        let result = BridgeConfig::builder()
            .with_display_flags(DisplayFlags::empty())
            .build();
        assert_eq!(result, Err(ConfigError::EmptyDisplayFlags));
    }

    #[test]
    fn builder_rejects_empty_entry_point() {
        let result = BridgeConfig::builder().with_asset_entry_point("").build();
        assert_eq!(result, Err(ConfigError::EmptyEntryPoint));
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let config = BridgeConfig::builder()
            .with_libraries(["SDL2", "vulkan", "viewer"])
            .with_display_flags(DisplayFlags::FULLSCREEN | DisplayFlags::HIDE_NAVIGATION)
            .with_asset_entry_point("viewer_init_assets")
            .with_log_tag("Viewer")
            .build()
            .unwrap();

        assert_eq!(config.libraries().len(), 3);
        assert!(!config.display_flags().contains(DisplayFlags::IMMERSIVE_STICKY));
        assert_eq!(config.asset_entry_point(), "viewer_init_assets");
        assert_eq!(config.log_tag(), "Viewer");
    }

    #[test]
    fn config_error_display_format() {
        let err = ConfigError::DuplicateLibrary("vulkan".into());
        assert_eq!(err.to_string(), "Native library 'vulkan' declared twice");
    }
}
