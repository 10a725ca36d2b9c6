use crate::models::courier::Courier;

/// Picks the courier with the fewest currently-active deliveries. Ties go to
/// the first courier encountered, so the pool's order decides between equals.
pub fn least_loaded<'a>(
    pool: &'a [Courier],
    load_of: impl Fn(&Courier) -> usize,
) -> Option<&'a Courier> {
    let mut best: Option<(&Courier, usize)> = None;

    for courier in pool {
        let load = load_of(courier);
        match best {
            Some((_, best_load)) if load >= best_load => {}
            _ => best = Some((courier, load)),
        }
    }

    best.map(|(courier, _)| courier)
}
