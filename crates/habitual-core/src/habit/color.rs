/// Display color for a habit name, as `#RRGGBB`.
///
/// The same name always maps to the same color, so calendar markers and
/// legend entries stay consistent across runs. The hash walks UTF-16 code
/// units with 32-bit wrapping arithmetic (`h = c + (h << 5) - h`) and keeps
/// the low 24 bits.
pub fn habit_color(name: &str) -> String {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    format!("#{:06X}", hash & 0x00FF_FFFF)
}
