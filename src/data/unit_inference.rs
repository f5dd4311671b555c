/// Infer the axis unit from a column name such as `wavelength_nm`,
/// `Raman shift (cm-1)` or `Energy [meV]`.
/// A unit written in parentheses or brackets takes precedence.
pub fn infer_unit(column_name: &str) -> Option<String> {
    if let Some(explicit) = bracketed(column_name) {
        if let Some(unit) = keyword_unit(&explicit.to_lowercase()) {
            return Some(unit.to_string());
        }
        return Some(explicit);
    }
    keyword_unit(&column_name.to_lowercase()).map(str::to_string)
}

/// Text inside the last `(...)` or `[...]` of a name.
fn bracketed(name: &str) -> Option<String> {
    let (open, close) = if name.trim_end().ends_with(']') { ('[', ']') } else { ('(', ')') };
    let end = name.rfind(close)?;
    let start = name[..end].rfind(open)?;
    let inner = name[start + 1..end].trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

fn keyword_unit(lower: &str) -> Option<&'static str> {
    if lower.contains("cm-1") || lower.contains("cm^-1") || lower.contains("wavenumber")
        || lower.contains("raman") {
        Some("cm\u{207B}\u{00B9}")
    } else if lower == "mev" || lower.ends_with("_mev") {
        Some("meV")
    } else if lower == "ev" || lower.ends_with("_ev") || lower.contains("energy") {
        Some("eV")
    } else if lower == "nm" || lower.ends_with("_nm") || lower.contains("wavelength")
        || lower.contains("lambda") {
        Some("nm")
    } else if lower.contains("thz") {
        Some("THz")
    } else if lower.contains("ghz") {
        Some("GHz")
    } else if lower.contains("mhz") {
        Some("MHz")
    } else if lower == "hz" || lower.ends_with("_hz") || lower.contains("freq") {
        Some("Hz")
    } else if lower.contains("2theta") || lower.contains("two_theta") || lower.contains("deg")
        || lower.contains("angle") {
        Some("\u{00B0}")
    } else if lower.contains("counts") || lower.contains("cps") {
        Some("counts")
    } else if lower.contains("abs") || lower.contains("a.u.") || lower == "au" {
        Some("a.u.")
    } else {
        None
    }
}
