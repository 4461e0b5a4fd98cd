//! Bean name derivation.

/// Decapitalizes a simple type name using JavaBeans rules.
///
/// The first character is lower-cased, unless the first two characters are
/// both upper-case, in which case the name is kept as is.
///
/// ```rust
/// use nexus_di::naming::decapitalize;
///
/// assert_eq!(decapitalize("Greeter"), "greeter");
/// assert_eq!(decapitalize("URLParser"), "URLParser");
/// assert_eq!(decapitalize("A"), "a");
/// assert_eq!(decapitalize(""), "");
/// ```
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if let Some(second) = chars.clone().next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }
    let mut out = String::with_capacity(name.len());
    out.extend(first.to_lowercase());
    out.push_str(chars.as_str());
    out
}

/// Strips module path, generic arguments, auto-trait bounds and `dyn` from a
/// `std::any::type_name` string.
///
/// ```rust
/// use nexus_di::naming::simple_name;
///
/// assert_eq!(simple_name("app::services::Greeter"), "Greeter");
/// assert_eq!(simple_name("app::Cache<alloc::string::String>"), "Cache");
/// assert_eq!(simple_name("dyn app::Service + Send + Sync"), "Service");
/// assert_eq!(simple_name("Widget"), "Widget");
/// ```
pub fn simple_name(type_name: &str) -> &str {
    let name = type_name.strip_prefix("dyn ").unwrap_or(type_name);
    let name = name.split(" + ").next().unwrap_or(name);
    let name = match name.find('<') {
        Some(idx) => &name[..idx],
        None => name,
    };
    name.rsplit("::").next().unwrap_or(name).trim()
}

/// Bean name for a type name: explicit names win, otherwise the decapitalized
/// simple name.
pub fn bean_name_for(explicit: Option<&str>, type_name: &str) -> String {
    match explicit {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => decapitalize(simple_name(type_name)),
    }
}
