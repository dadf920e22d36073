
pub use instrumentation_macro::*;

#[cfg(feature = "stats")]
pub use runtime_stats::*;

#[macro_export]
macro_rules! add_file_line {
    ($a:expr) => { concat!($a, " (", file!(), ":", line!() ,")") }
}

/// Starts collecting scope timings when the caller is built with the `stats` feature.
#[macro_export]
macro_rules! session_begin {
    ($a:expr) => {
        #[cfg(feature = "stats")]
        profiler::init_statistics($a);
    };
}

/// Logs the slowest scopes of the session and stops collecting.
#[macro_export]
macro_rules! session_end {
    () => {
        #[cfg(feature = "stats")]
        profiler::finish_statistics(20);
    };
}

#[macro_export(local_inner_macros)]
macro_rules! scope {
    ($a:expr) => {
        #[cfg(feature = "stats")]
        let _stat_guard = profiler::TimedScope::new(add_file_line!($a));
    };
}

#[macro_export]
macro_rules! call {
    ($($a:tt)*) => {
        {
            #[cfg(feature = "stats")]
            profiler::scope!(stringify!($($a)*));
            $($a)*
        }
    };
}
