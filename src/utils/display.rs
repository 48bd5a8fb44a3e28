// utils/display.rs

//! # Display Utility Module
//!
//! Color-coded terminal messages for errors, successes and informational
//! output, built on the `colored` crate. Messages go to stderr so they never
//! mix with rendered output written to stdout.

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).blue())
    }};
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).red())
    }};
}

#[macro_export]
macro_rules! print_success {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).green())
    }};
}
