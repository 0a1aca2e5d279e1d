/// Declares a lazily compiled `static` regex. Callers need `once_cell` and
/// `regex` in their own dependencies.
#[macro_export]
macro_rules! lazy_regex {
    ($name:ident = $pattern:expr) => {
        static $name: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($pattern).expect("invalid regex"));
    };
}
