#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("invalid built-in regex"));
        &*RE
    }};
}

/// Build a `TimeZoneDescriptor` catalog entry.
#[macro_export]
macro_rules! zone {
    ($id:literal, $name:literal, $offset:expr $(,)?) => {
        $crate::TimeZoneDescriptor { id: $id, name: $name, offset: $offset }
    };
}
