// `log` macros measured as profiler scopes named after the call site text.
// Expand to a unit block so they can be used both as statements and as expressions.

#[macro_export]
macro_rules! profiled_log {
    ($level:ident, $($args:tt)*) => {{
        profiler::scope!(concat!(stringify!($level), "!(", stringify!($($args)*), ")"));
        ::log::$level!($($args)*)
    }};
}

#[macro_export(local_inner_macros)]
macro_rules! debug {
    ($($args:tt)*) => { profiled_log!(debug, $($args)*) };
}

#[macro_export(local_inner_macros)]
macro_rules! info {
    ($($args:tt)*) => { profiled_log!(info, $($args)*) };
}

#[macro_export(local_inner_macros)]
macro_rules! warn {
    ($($args:tt)*) => { profiled_log!(warn, $($args)*) };
}

#[macro_export(local_inner_macros)]
macro_rules! error {
    ($($args:tt)*) => { profiled_log!(error, $($args)*) };
}

#[cfg(test)]
mod tests {
    #[test]
    fn log_macros_are_expressions() {
        let level = |code: u8| -> &'static str {
            match code {
                0 => crate::debug!("code {}", code),
                1 => crate::info!("code {}", code),
                2 => crate::warn!("code {}", code),
                _ => crate::error!("code {}", code),
            }
            "logged"
        };
        assert_eq!((0..4).map(level).collect::<Vec<_>>(), vec!["logged"; 4]);
    }
}
