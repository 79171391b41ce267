use crate::detail::ImageCandidate;

/// Pick the best preview image: the candidate with the largest pixel area
/// among those whose coerced width and height are both strictly positive.
/// Ties keep the earliest candidate in input order. Returns `None` when no
/// candidate survives the size filter.
pub fn best_image(candidates: &[ImageCandidate]) -> Option<&ImageCandidate> {
    let mut best: Option<(&ImageCandidate, u64)> = None;
    for candidate in candidates {
        let (w, h) = candidate.parsed_dimensions();
        if w == 0 || h == 0 {
            continue;
        }
        let area = u64::from(w) * u64::from(h);
        // Strictly-greater replacement so the earliest candidate wins ties.
        if best.is_none_or(|(_, best_area)| area > best_area) {
            best = Some((candidate, area));
        }
    }
    best.map(|(candidate, _)| candidate)
}
