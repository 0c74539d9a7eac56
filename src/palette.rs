/// Per-iteration point color. Depends only on the iteration index.
pub fn iteration_color(iteration: usize) -> [f32; 4] {
    let k = iteration as u64 + 1;
    let channel = |mult: u64| (50 + (k.wrapping_mul(mult) % 256)).min(255) as f32 / 255.0;
    [channel(11909), channel(52973), channel(44111), 16.0 / 255.0]
}

pub fn frame_colors(iterations: usize, steps: usize) -> Vec<[f32; 4]> {
    let row = (0..iterations).map(iteration_color).collect::<Vec<_>>();
    let mut out = Vec::with_capacity(iterations.saturating_mul(steps));
    for _ in 0..steps {
        out.extend_from_slice(&row);
    }
    out
}
