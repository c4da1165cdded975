use crate::errors::{RagError, Result};

/// `dot(a, b) / (norm(a) * norm(b))`
///
/// Zero-norm inputs are not special-cased: the result is then NaN or infinite
/// and [`arg_max`] treats it as unselectable.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RagError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    Ok(dot / (norm_a * norm_b))
}

/// Index of the largest finite score; the first index wins ties.
///
/// NaN and infinite scores are never selected over a finite one. When no score
/// is finite the first document is returned. `None` only for an empty slice.
pub fn arg_max(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }

    match best {
        Some((i, _)) => Some(i),
        None if scores.is_empty() => None,
        None => Some(0),
    }
}
