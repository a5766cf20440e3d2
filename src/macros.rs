//! Level-gated messages on stderr, see [`LogLevel`](crate::LogLevel).

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debug {
    ($l:literal$(,$a:expr)*$(,)?) => {
        eprintln!(concat!("[DEBUG {:>w$}] \t", $l), module_path!()$(,$a)*, w = 16)
    };
}
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debug {
    ($($_:expr),*$(,)?) => {};
}

#[macro_export]
macro_rules! error {
    ($l:literal$(,$a:expr)*$(,)?) => {
        if $crate::LogLevel::Error.enabled() {
            eprintln!(concat!("[\x1b[38;5;196mERROR\x1b[0m] ", $l)$(,$a)*);
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($l:literal$(,$a:expr)*$(,)?) => {
        if $crate::LogLevel::Warn.enabled() {
            eprintln!(concat!("[\x1b[38;5;208mWARNING\x1b[0m] ", $l)$(,$a)*);
        }
    };
}

#[macro_export]
macro_rules! info {
    ($l:literal$(,$a:expr)*$(,)?) => {
        if $crate::LogLevel::Info.enabled() {
            eprintln!(concat!("[\x1b[38;5;27mINFO\x1b[0m] ", $l)$(,$a)*);
        }
    };
}
