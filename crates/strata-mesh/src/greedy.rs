/// Greedy rectangle sweep over a row-major `width * height` mask.
///
/// Cells with the same key merge: a run is grown along the row, then the whole run is grown
/// down the columns while every cell still matches. `emit(x, y, w, h, key)` is called once per
/// rectangle; returning `false` stops the sweep.
pub(crate) fn greedy_rects<K: Copy + Eq>(
    width: usize,
    height: usize,
    mask: &[Option<K>],
    mut emit: impl FnMut(usize, usize, usize, usize, K) -> bool,
) {
    let mut used = vec![false; width * height];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let Some(code) = mask[idx] else { continue };
            if used[idx] {
                continue;
            }
            let mut w = 1;
            while x + w < width
                && mask[y * width + (x + w)] == Some(code)
                && !used[y * width + (x + w)]
            {
                w += 1;
            }
            let mut h = 1;
            'expand: while y + h < height {
                for i in 0..w {
                    let j = (y + h) * width + (x + i);
                    if mask[j] != Some(code) || used[j] {
                        break 'expand;
                    }
                }
                h += 1;
            }
            for yy in 0..h {
                for xx in 0..w {
                    used[(y + yy) * width + (x + xx)] = true;
                }
            }
            if !emit(x, y, w, h, code) {
                return;
            }
        }
    }
}
