use crate::models::{Decimation, DecimationAlgorithm};

/// Reduce a dense series before drawing
///
/// Series at or below the threshold (default `4 * plot_width`) are returned
/// unchanged. Points must be sorted by x.
pub fn decimate(points: &[(i64, f64)], decimation: &Decimation, plot_width: usize) -> Vec<(i64, f64)> {
    let threshold = decimation.threshold.unwrap_or(4 * plot_width);
    if !decimation.enabled || points.len() <= threshold.max(1) {
        return points.to_vec();
    }

    let decimated = match decimation.algorithm {
        DecimationAlgorithm::Lttb => lttb(points, plot_width * decimation.samples.max(1)),
        DecimationAlgorithm::MinMax => min_max(points, plot_width),
    };
    tracing::debug!(
        "Decimated {} points to {} ({:?})",
        points.len(),
        decimated.len(),
        decimation.algorithm
    );
    decimated
}

/// Largest-Triangle-Three-Buckets downsampling to `samples` points
///
/// First and last points are always kept.
pub fn lttb(data: &[(i64, f64)], samples: usize) -> Vec<(i64, f64)> {
    let count = data.len();
    let samples = samples.max(3);
    if samples >= count {
        return data.to_vec();
    }

    let bucket_width = (count - 2) as f64 / (samples - 2) as f64;
    let mut decimated = Vec::with_capacity(samples);
    let mut a = 0;
    decimated.push(data[a]);

    for i in 0..samples - 2 {
        // Average of the next bucket is the third triangle vertex
        let avg_start = ((i + 1) as f64 * bucket_width).floor() as usize + 1;
        let avg_end = (((i + 2) as f64 * bucket_width).floor() as usize + 1).min(count);
        let avg_len = (avg_end - avg_start).max(1) as f64;
        let (sum_x, sum_y) = data[avg_start..avg_end]
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + *x as f64, sy + y));
        let (avg_x, avg_y) = (sum_x / avg_len, sum_y / avg_len);

        let range_start = (i as f64 * bucket_width).floor() as usize + 1;
        let range_end = (((i + 1) as f64 * bucket_width).floor() as usize + 1).min(count);

        let (ax, ay) = (data[a].0 as f64, data[a].1);
        let mut max_area = -1.0;
        let mut next_a = range_start;
        for (j, (x, y)) in data.iter().enumerate().take(range_end).skip(range_start) {
            let area = 0.5 * ((ax - avg_x) * (y - ay) - (ax - *x as f64) * (avg_y - ay)).abs();
            if area > max_area {
                max_area = area;
                next_a = j;
            }
        }

        decimated.push(data[next_a]);
        a = next_a;
    }

    decimated.push(data[count - 1]);
    decimated
}

/// Keep first, minimum, maximum and last point of every pixel column
pub fn min_max(data: &[(i64, f64)], plot_width: usize) -> Vec<(i64, f64)> {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return Vec::new();
    };
    let span = last.0.saturating_sub(first.0).max(1) as f64;
    let width = plot_width.max(1) as f64;
    let column = |x: i64| (x.saturating_sub(first.0) as f64 / span * width).floor() as i64;

    let mut out = Vec::new();
    let mut start = 0;
    while start < data.len() {
        let col = column(data[start].0);
        let mut end = start;
        while end < data.len() && column(data[end].0) == col {
            end += 1;
        }

        let bucket = &data[start..end];
        let mut picks = vec![0, bucket.len() - 1];
        let finite = bucket.iter().enumerate().filter(|(_, p)| p.1.is_finite());
        if let Some((i, _)) = finite.clone().min_by(|a, b| a.1 .1.total_cmp(&b.1 .1)) {
            picks.push(i);
        }
        if let Some((i, _)) = finite.max_by(|a, b| a.1 .1.total_cmp(&b.1 .1)) {
            picks.push(i);
        }
        picks.sort_unstable();
        picks.dedup();
        out.extend(picks.into_iter().map(|i| bucket[i]));

        start = end;
    }
    out
}
