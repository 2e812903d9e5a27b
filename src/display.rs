/// Human-readable area: whole square meters below one hectare, two decimals
/// in hectares above.
pub fn format_area(hectares: f64) -> String {
    if hectares == 0.0 || !hectares.is_finite() {
        return "0 ha".to_string();
    }
    if hectares < 1.0 {
        return format!("{:.0} m²", hectares * 10_000.0);
    }
    format!("{:.2} ha", hectares)
}
