// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading plugins from shared libraries at startup.
//!
//! A plugin library exports a [`PluginDeclaration`] through
//! [`export_plugin!`](crate::export_plugin). The host checks the declaration
//! was built against the same ABI revision and core version before calling
//! its constructor. Loaded libraries are never unloaded.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use adminkit_config::PluginsConfig;
use libloading::{Library, Symbol};
use thiserror::Error;

use crate::plugin::Plugin;

/// Bumped whenever the layout of [`PluginDeclaration`] or the plugin trait changes.
pub const ABI_VERSION: u32 = 1;

/// Version of this crate; plugins must be built against the same one.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exported symbol name, NUL-terminated.
pub const DECLARATION_SYMBOL: &[u8] = b"adminkit_plugin_declaration\0";

/// What a plugin library exports.
pub struct PluginDeclaration {
    pub abi_version: u32,
    pub core_version: &'static str,
    pub create: fn() -> Box<dyn Plugin>,
}

/// Declares the plugin exported by this library.
///
/// ```ignore
/// adminkit_plugin::export_plugin!(FileManager::new);
/// ```
#[macro_export]
macro_rules! export_plugin {
    ($constructor:path) => {
        #[unsafe(no_mangle)]
        #[allow(non_upper_case_globals)]
        pub static adminkit_plugin_declaration: $crate::loader::PluginDeclaration =
            $crate::loader::PluginDeclaration {
                abi_version: $crate::loader::ABI_VERSION,
                core_version: $crate::loader::CORE_VERSION,
                create: {
                    fn __adminkit_create() -> ::std::boxed::Box<dyn $crate::Plugin> {
                        ::std::boxed::Box::new($constructor())
                    }
                    __adminkit_create
                },
            };
    };
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open plugin library {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("plugin library {} does not export a plugin declaration: {source}", .path.display())]
    MissingSymbol {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error(
        "plugin library {} targets core {found_core} (abi {found_abi}), host runs core {} (abi {})",
        .path.display(), CORE_VERSION, ABI_VERSION
    )]
    Incompatible {
        path: PathBuf,
        found_core: String,
        found_abi: u32,
    },

    #[error("plugin constructor in {} panicked: {message}", .path.display())]
    Panicked { path: PathBuf, message: String },

    #[error("cannot read plugin directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejects declarations built for another ABI revision or core version.
pub fn check_compatible(path: &Path, decl: &PluginDeclaration) -> Result<(), LoadError> {
    if decl.abi_version == ABI_VERSION && decl.core_version == CORE_VERSION {
        Ok(())
    } else {
        Err(LoadError::Incompatible {
            path: path.to_path_buf(),
            found_core: decl.core_version.to_string(),
            found_abi: decl.abi_version,
        })
    }
}

/// Opens the library at `path` and constructs its plugin.
pub fn try_load_from_plugin(path: impl AsRef<Path>) -> Result<Arc<dyn Plugin>, LoadError> {
    let path = path.as_ref();

    // SAFETY: loading runs the library's initializers; plugin libraries are
    // trusted operator-provided artifacts.
    let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let plugin = {
        // SAFETY: the symbol is the static emitted by `export_plugin!`.
        let symbol: Symbol<'_, *const PluginDeclaration> = unsafe {
            library.get(DECLARATION_SYMBOL)
        }
        .map_err(|source| LoadError::MissingSymbol {
            path: path.to_path_buf(),
            source,
        })?;
        // SAFETY: the pointer targets a static that lives as long as `library`.
        let decl = unsafe { &**symbol };
        check_compatible(path, decl)?;

        panic::catch_unwind(AssertUnwindSafe(decl.create)).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            LoadError::Panicked {
                path: path.to_path_buf(),
                message,
            }
        })?
    };

    // The plugin's code lives in the library; keep it mapped for the process lifetime.
    std::mem::forget(library);

    tracing::info!(plugin = %plugin.name(), path = %path.display(), "loaded plugin library");
    Ok(Arc::from(plugin))
}

/// Loads a plugin library; a library that cannot be used aborts startup.
///
/// # Panics
///
/// Panics when the library cannot be opened, lacks the declaration symbol,
/// was built for another core version, or its constructor panics.
pub fn load_from_plugin(path: impl AsRef<Path>) -> Arc<dyn Plugin> {
    let path = path.as_ref();
    match try_load_from_plugin(path) {
        Ok(plugin) => plugin,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load plugin library");
            panic!("{e}");
        }
    }
}

/// Shared-object files directly inside `dir`, sorted by file name.
///
/// Only files with the platform library extension (`so`, `dylib`, `dll`) count.
pub fn plugin_libraries(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoadError> {
    let dir = dir.as_ref();
    let read_err = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut libraries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let is_library = path
            .extension()
            .is_some_and(|ext| ext == std::env::consts::DLL_EXTENSION);
        if is_library && path.is_file() {
            libraries.push(path);
        }
    }
    libraries.sort();
    Ok(libraries)
}

/// Loads every plugin library in `dir`, stopping at the first failure.
pub fn try_load_from_dir(dir: impl AsRef<Path>) -> Result<Vec<Arc<dyn Plugin>>, LoadError> {
    plugin_libraries(dir)?
        .iter()
        .map(|path| try_load_from_plugin(path))
        .collect()
}

/// Loads the libraries found in `plugins.dir`; nothing when it is unset.
///
/// # Panics
///
/// Panics on the same failures as [`load_from_plugin`], and when the
/// directory cannot be read.
pub fn load_from_config(config: &PluginsConfig) -> Vec<Arc<dyn Plugin>> {
    let Some(dir) = config.dir.as_deref() else {
        return Vec::new();
    };
    match try_load_from_dir(dir) {
        Ok(plugins) => {
            tracing::debug!(dir, loaded = plugins.len(), "plugin directory scanned");
            plugins
        }
        Err(e) => {
            tracing::error!(dir, error = %e, "failed to load plugin directory");
            panic!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Base;
    use std::env::consts::DLL_EXTENSION;

    struct Demo {
        base: Base,
    }

    impl Plugin for Demo {
        fn base(&self) -> &Base {
            &self.base
        }
    }

    fn demo() -> Demo {
        Demo {
            base: Base::new("demo", "demo"),
        }
    }

    crate::export_plugin!(demo);

    #[test]
    fn exported_declaration_is_compatible() {
        let decl = &adminkit_plugin_declaration;
        assert!(check_compatible(Path::new("self"), decl).is_ok());
        assert_eq!((decl.create)().name(), "demo");
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let decl = PluginDeclaration {
            abi_version: ABI_VERSION,
            core_version: "0.0.0-other",
            create: adminkit_plugin_declaration.create,
        };
        let err = check_compatible(Path::new("libother.so"), &decl).unwrap_err();
        assert!(matches!(err, LoadError::Incompatible { ref found_core, .. } if found_core == "0.0.0-other"));
        assert!(err.to_string().contains("libother.so"));
    }

    #[test]
    fn missing_library_is_an_open_error() {
        let err = try_load_from_plugin("/nonexistent/libnothing.so").err().expect("expected Err");
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    #[should_panic(expected = "cannot open plugin library")]
    fn load_panics_on_missing_library() {
        let _ = load_from_plugin("/nonexistent/libnothing.so");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn library_without_declaration_is_missing_symbol() {
        let err = try_load_from_plugin("libc.so.6").err().expect("expected Err");
        assert!(matches!(err, LoadError::MissingSymbol { .. }));
        assert!(err.to_string().contains("does not export a plugin declaration"));
    }

    #[test]
    fn directory_scan_keeps_only_libraries_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.txt"), "notes").unwrap();
        std::fs::write(dir.path().join(format!("zeta.{DLL_EXTENSION}")), b"").unwrap();
        std::fs::write(dir.path().join(format!("alpha.{DLL_EXTENSION}")), b"").unwrap();
        std::fs::create_dir(dir.path().join(format!("nested.{DLL_EXTENSION}"))).unwrap();

        let names: Vec<String> = plugin_libraries(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![format!("alpha.{DLL_EXTENSION}"), format!("zeta.{DLL_EXTENSION}")]
        );
    }

    #[test]
    fn empty_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_load_from_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn unreadable_directory_is_a_read_error() {
        let err = try_load_from_dir("/nonexistent/plugins").err().expect("expected Err");
        assert!(matches!(err, LoadError::ReadDir { .. }));
    }

    #[test]
    fn corrupt_library_in_directory_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("broken.{DLL_EXTENSION}")), b"not a library").unwrap();
        let err = try_load_from_dir(dir.path()).err().expect("expected Err");
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn unset_plugin_dir_loads_nothing() {
        assert!(load_from_config(&PluginsConfig::default()).is_empty());

        let dir = tempfile::tempdir().unwrap();
        let config = PluginsConfig {
            dir: Some(dir.path().to_string_lossy().into_owned()),
            ..PluginsConfig::default()
        };
        assert!(load_from_config(&config).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot read plugin directory")]
    fn load_from_config_panics_on_missing_directory() {
        let config = PluginsConfig {
            dir: Some("/nonexistent/plugins".to_string()),
            ..PluginsConfig::default()
        };
        let _ = load_from_config(&config);
    }
}
