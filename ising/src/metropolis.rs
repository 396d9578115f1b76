use crate::lattice::{Interaction, Lattice};
use rand::seq::index;
use rand::Rng;

/// Probability of accepting a move that changes the energy by `delta_e`.
///
/// Temperatures are in units of J/k_B. At T <= 0 only moves with
/// ΔE <= 0 are accepted.
pub fn acceptance_probability(delta_e: f64, temperature: f64) -> f64 {
    if delta_e <= 0.0 {
        1.0
    } else if temperature <= 0.0 {
        0.0
    } else {
        (-delta_e / temperature).exp()
    }
}

/// Number of sites proposed per step: ceil(flip_prop * N^2), at least one
pub fn candidates_per_step(sites: usize, flip_prop: f64) -> usize {
    let wanted = (flip_prop * sites as f64).ceil();
    if wanted.is_nan() || wanted < 1.0 {
        1
    } else {
        (wanted as usize).min(sites)
    }
}

/// Single-spin-flip Metropolis update at a fixed temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metropolis {
    pub temperature: f64,
    pub interaction: Interaction,
    pub flip_prop: f64,
}

impl Metropolis {
    pub fn new(temperature: f64, interaction: Interaction, flip_prop: f64) -> Self {
        Self {
            temperature,
            interaction,
            flip_prop,
        }
    }

    /// Perform one Monte Carlo step and return the number of accepted flips.
    ///
    /// Candidate sites are drawn without replacement. Each accepted flip is
    /// applied before the next candidate is evaluated.
    pub fn step<R: Rng + ?Sized>(&self, lattice: &mut Lattice, rng: &mut R) -> usize {
        let size = lattice.size();
        let sites = lattice.sites();
        let amount = candidates_per_step(sites, self.flip_prop);
        let mut accepted = 0;

        for site in index::sample(&mut *rng, sites, amount).into_iter() {
            let (i, k) = (site / size, site % size);
            let delta_e = lattice.local_energy_delta(i, k, &self.interaction);

            if delta_e <= 0.0
                || rng.gen::<f64>() < acceptance_probability(delta_e, self.temperature)
            {
                lattice.flip(i, k);
                accepted += 1;
            }
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(-4.0, 1.0), 1.0);
        assert_eq!(acceptance_probability(0.0, 0.0), 1.0);
        assert_eq!(acceptance_probability(4.0, 0.0), 0.0);
        assert_eq!(acceptance_probability(4.0, -1.0), 0.0);
        assert_relative_eq!(acceptance_probability(4.0, 2.0), (-2.0f64).exp());
    }

    #[test]
    fn test_acceptance_monotonic_in_temperature() {
        for &delta_e in &[0.5, 4.0, 8.0, 16.0] {
            let mut previous = acceptance_probability(delta_e, 0.0);
            for step in 1..400 {
                let temperature = step as f64 * 0.05;
                let p = acceptance_probability(delta_e, temperature);
                assert!(p >= previous, "ΔE = {} T = {}", delta_e, temperature);
                assert!((0.0..=1.0).contains(&p));
                previous = p;
            }
        }
    }

    #[test]
    fn test_candidates_per_step() {
        assert_eq!(candidates_per_step(16, 1.0), 16);
        assert_eq!(candidates_per_step(16, 0.1), 2);
        assert_eq!(candidates_per_step(100, 0.1), 10);
        assert_eq!(candidates_per_step(100, 1e-9), 1);
        assert_eq!(candidates_per_step(4, 0.25), 1);
    }

    #[test]
    fn test_zero_temperature_never_raises_energy() {
        let mut rng = StdRng::seed_from_u64(1);
        let interaction = Interaction::default();
        let metropolis = Metropolis::new(0.0, interaction, 1.0);
        let mut lattice = Lattice::random(8, &mut rng).unwrap();

        let mut energy = lattice.total_energy(&interaction);
        for _ in 0..50 {
            metropolis.step(&mut lattice, &mut rng);
            let next = lattice.total_energy(&interaction);
            assert!(next <= energy);
            energy = next;
        }
    }

    #[test]
    fn test_ordered_lattice_is_stable_at_low_temperature() {
        let mut rng = StdRng::seed_from_u64(2);
        let metropolis = Metropolis::new(0.1, Interaction::default(), 1.0);
        let mut lattice = Lattice::ordered(6).unwrap();

        for _ in 0..100 {
            assert_eq!(metropolis.step(&mut lattice, &mut rng), 0);
        }
        assert_eq!(lattice.total_magnetization(), 36);
    }

    #[test]
    fn test_infinite_temperature_accepts_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let metropolis = Metropolis::new(f64::INFINITY, Interaction::default(), 0.5);
        let mut lattice = Lattice::ordered(4).unwrap();

        // Every proposal is accepted and no site is proposed twice in a step
        assert_eq!(metropolis.step(&mut lattice, &mut rng), 8);
        assert_eq!(lattice.total_magnetization(), 0);
    }

    #[test]
    fn test_seeded_steps_are_reproducible() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            let mut lattice = Lattice::random(10, &mut rng).unwrap();
            let metropolis = Metropolis::new(2.3, Interaction::new(1.0, 0.1), 0.3);
            for _ in 0..20 {
                metropolis.step(&mut lattice, &mut rng);
            }
            lattice
        };
        assert_eq!(run(), run());
    }
}
