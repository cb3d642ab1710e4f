/// Renders a fractional-second offset as `mm:ss`, truncating to whole
/// seconds. Minutes grow past two digits unbounded; seconds are always
/// zero-padded to two.
pub fn format_mmss(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
