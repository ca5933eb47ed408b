//! Legacy stages backed by the sph shared libraries
//!
//! Each stage lives in its own library (`libsph_blake.so` and so on) that
//! exports the usual sph triple:
//!
//! ```text
//! void sph_<kind>512_init(void *ctx);
//! void sph_<kind>512(void *ctx, const void *data, size_t len);
//! void sph_<kind>512_close(void *ctx, void *out);
//! ```

use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, library_filename};
use tracing::{debug, warn};

use super::{Hash512, LegacyStage};
use crate::error::{Error, Result};

/// Context buffer handed to the sph functions, in 8-byte words
const SPH_CTX_WORDS: usize = 1024 / 8;

type InitFn = unsafe extern "C" fn(ctx: *mut c_void);
type UpdateFn = unsafe extern "C" fn(ctx: *mut c_void, data: *const c_void, len: usize);
type CloseFn = unsafe extern "C" fn(ctx: *mut c_void, out: *mut c_void);

/// One legacy stage resolved from an sph shared library
///
/// The symbols are looked up once at load time; hashing only calls through
/// the cached function pointers.
pub struct SphLibrary {
    stage: LegacyStage,
    init: InitFn,
    update: UpdateFn,
    close: CloseFn,
    // Owns the mapping the function pointers point into
    _library: Library,
}

impl SphLibrary {
    /// Load `stage` from an explicit library path
    pub fn load(stage: LegacyStage, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // SAFETY: loading runs the library's initializers; sph libraries
        // have none beyond the C runtime's.
        let library = unsafe { Library::new(path) }.map_err(|err| {
            warn!(stage = %stage, path = %path.display(), error = %err, "sph library load failed");
            Error::PrimitiveUnavailable(stage)
        })?;

        let this = Self::resolve(stage, library)?;
        debug!(stage = %stage, path = %path.display(), "loaded sph library");
        Ok(this)
    }

    /// Load `stage` from `dir` if it holds the library, else from the
    /// system library search path
    pub fn open(stage: LegacyStage, dir: Option<&Path>) -> Result<Self> {
        let filename = Self::filename(stage);

        if let Some(local) = dir.map(|dir| dir.join(&filename)) {
            if local.exists() {
                return Self::load(stage, local);
            }
        }

        Self::load(stage, filename)
    }

    /// Platform file name of the library for `stage`
    pub fn filename(stage: LegacyStage) -> PathBuf {
        PathBuf::from(library_filename(format!("sph_{}", stage.kind())))
    }

    fn resolve(stage: LegacyStage, library: Library) -> Result<Self> {
        let prefix = format!("sph_{}512", stage.kind());

        // SAFETY: the signatures match the sph C declarations above, and the
        // pointers are only used while `library` is owned by `Self`.
        let (init, update, close) = unsafe {
            (
                symbol::<InitFn>(&library, stage, &format!("{prefix}_init"))?,
                symbol::<UpdateFn>(&library, stage, &prefix)?,
                symbol::<CloseFn>(&library, stage, &format!("{prefix}_close"))?,
            )
        };

        Ok(Self {
            stage,
            init,
            update,
            close,
            _library: library,
        })
    }
}

unsafe fn symbol<T: Copy>(library: &Library, stage: LegacyStage, name: &str) -> Result<T> {
    match unsafe { library.get::<T>(name.as_bytes()) } {
        Ok(symbol) => Ok(*symbol),
        Err(err) => {
            warn!(stage = %stage, symbol = name, error = %err, "sph symbol missing");
            Err(Error::PrimitiveUnavailable(stage))
        }
    }
}

impl Hash512 for SphLibrary {
    fn name(&self) -> &str {
        self.stage.name()
    }

    fn hash(&self, data: &[u8]) -> [u8; 64] {
        let mut ctx = [0u64; SPH_CTX_WORDS];
        let mut out = [0u8; 64];
        let ctx_ptr = ctx.as_mut_ptr().cast::<c_void>();

        // SAFETY: `ctx` is larger than any sph 512-bit context and lives on
        // this stack frame; `out` holds the 64-byte digest.
        unsafe {
            (self.init)(ctx_ptr);
            (self.update)(ctx_ptr, data.as_ptr().cast(), data.len());
            (self.close)(ctx_ptr, out.as_mut_ptr().cast());
        }

        out
    }
}

impl fmt::Debug for SphLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SphLibrary")
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
