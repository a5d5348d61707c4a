// ==========================================
// Class Assign - i18n
// ==========================================
// rust-i18n; Korean (default) and English
// The rust_i18n::i18n! macro is invoked in lib.rs
// ==========================================

pub const DEFAULT_LOCALE: &str = "ko";

/// Environment variable overriding the startup locale
pub const LOCALE_ENV: &str = "CLASS_ASSIGN_LOCALE";

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale ("ko" or "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Apply `CLASS_ASSIGN_LOCALE`, falling back to Korean
pub fn init_from_env() {
    let locale = std::env::var(LOCALE_ENV)
        .ok()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| matches!(v.as_str(), "ko" | "en"))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    set_locale(&locale);
}

/// Translate a key
///
/// ```no_run
/// use class_assign::i18n::t;
/// let label = t("report.transfer");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a key and fill `%{name}` placeholders
///
/// ```no_run
/// use class_assign::i18n::t_with_args;
/// let title = t_with_args("class.origin", &[("n", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
