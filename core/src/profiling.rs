//! Profiling support via Tracy.
//!
//! Instrumentation is enabled with the `profiling` Cargo feature:
//!
//! ```bash
//! cargo bench --features profiling
//! ```
//!
//! Then connect the [Tracy profiler](https://github.com/wolfpld/tracy) to the
//! running process. Mesh generation and plane refreshes show up as spans.
//!
//! When profiling is disabled (the default), all macros compile to no-ops.

#[cfg(feature = "profiling")]
pub use tracy_client::{self, Client, plot as tracy_plot, span};

/// Create a profiling span for the current scope.
///
/// # Example
///
/// ```ignore
/// fn refresh() {
///     profile_scope!("rebuild_buffers");
///     // ...
/// }
/// ```
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the entire function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

/// Plot a value over time in Tracy.
///
/// # Example
///
/// ```ignore
/// profile_plot!("plane_vertices", buffers.vertex_count());
/// ```
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_plot {
    ($name:expr, $value:expr) => {
        $crate::profiling::tracy_plot!($name, $value as f64)
    };
}

/// Plot a value (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_plot {
    ($name:expr, $value:expr) => {
        let _ = &$value;
    };
}

/// Start the Tracy client if profiling is enabled.
///
/// Safe to call more than once.
pub fn init_profiling() {
    #[cfg(feature = "profiling")]
    {
        let _ = Client::start();
        log::info!("Tracy profiling initialized");
    }
}

/// Check whether profiling support is compiled in.
pub const fn is_profiling_enabled() -> bool {
    cfg!(feature = "profiling")
}
