use std::ops::Range;

/// Split `rows` into at most `workers` contiguous bands, one per worker.
///
/// Every band is `rows.len() / bands` tall except the last, which always
/// extends to `rows.end` and absorbs the remainder. The band count is
/// clamped to `[1, rows.len()]` so no band is empty.
pub fn row_bands(rows: Range<u32>, workers: usize) -> Vec<Range<u32>> {
    let height = rows.len();
    if height == 0 {
        return Vec::new();
    }
    let bands = workers.clamp(1, height);
    let band_height = (height / bands) as u32;

    (0..bands as u32)
        .map(|i| {
            let start = rows.start + i * band_height;
            let end = if i as usize == bands - 1 {
                rows.end
            } else {
                start + band_height
            };
            start..end
        })
        .collect()
}
