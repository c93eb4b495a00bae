// Macros for user-facing output.

macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        println!("✔ {}", format_args!($($arg)*));
    }};
}

macro_rules! ui_info {
    ($($arg:tt)*) => {{
        println!("ℹ {}", format_args!($($arg)*));
    }};
}

macro_rules! ui_err {
    ($($arg:tt)*) => {{
        eprintln!("✖ {}", format_args!($($arg)*));
    }};
}
