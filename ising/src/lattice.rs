use crate::error::{Result, SimulationError};
use rand::Rng;

/// Nearest-neighbour coupling and external field of the Hamiltonian
///
/// H = -J Σ_<ij> s_i s_j - B Σ_i s_i
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Coupling constant J (positive for ferromagnetic order)
    pub coupling: f64,
    /// External magnetic field B
    pub field: f64,
}

impl Interaction {
    pub fn new(coupling: f64, field: f64) -> Self {
        Self { coupling, field }
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            coupling: 1.0,
            field: 0.0,
        }
    }
}

/// Square N x N lattice of Ising spins with periodic boundary conditions.
///
/// Every site holds +1 or -1 and the size never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: Vec<Vec<i8>>,
}

impl Lattice {
    /// Create a lattice with each spin drawn independently as +1 or -1
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        check_size(size)?;
        let mut spins = vec![vec![0i8; size]; size];

        for row in spins.iter_mut() {
            for spin in row.iter_mut() {
                *spin = if rng.gen_bool(0.5) { 1 } else { -1 };
            }
        }

        Ok(Self { size, spins })
    }

    /// Create a lattice with all spins up (ordered state)
    pub fn ordered(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            spins: vec![vec![1i8; size]; size],
        })
    }

    /// Build a lattice from an explicit square spin configuration
    pub fn from_spins(spins: Vec<Vec<i8>>) -> Result<Self> {
        let size = spins.len();
        check_size(size)?;

        for (row, values) in spins.iter().enumerate() {
            if values.len() != size {
                return Err(SimulationError::Configuration(format!(
                    "row {} has {} spins, expected {}",
                    row,
                    values.len(),
                    size
                )));
            }
            let invalid = values.iter().enumerate().find(|(_, s)| **s != 1 && **s != -1);
            if let Some((col, &value)) = invalid {
                return Err(SimulationError::InvalidSpin { row, col, value });
            }
        }

        Ok(Self { size, spins })
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites N^2
    pub fn sites(&self) -> usize {
        self.size * self.size
    }

    pub fn spins(&self) -> &[Vec<i8>] {
        &self.spins
    }

    /// Spin at (i, k), wrapping both indices modulo N
    pub fn spin_at(&self, i: isize, k: isize) -> i8 {
        let n = self.size as isize;
        self.spins[i.rem_euclid(n) as usize][k.rem_euclid(n) as usize]
    }

    /// Sum of the four periodic nearest neighbours of (i, k)
    pub fn neighbor_sum(&self, i: usize, k: usize) -> i32 {
        let n = self.size;
        let up = (i + n - 1) % n;
        let down = (i + 1) % n;
        let left = (k + n - 1) % n;
        let right = (k + 1) % n;

        self.spins[up][k] as i32
            + self.spins[down][k] as i32
            + self.spins[i][left] as i32
            + self.spins[i][right] as i32
    }

    /// Reverse the spin at (i, k)
    pub fn flip(&mut self, i: usize, k: usize) {
        self.spins[i][k] = -self.spins[i][k];
    }

    /// Energy change caused by flipping the spin at (i, k).
    ///
    /// Only the four neighbours of the site enter: ΔE = 2 s (J Σ_nn s + B).
    pub fn local_energy_delta(&self, i: usize, k: usize, interaction: &Interaction) -> f64 {
        let spin = self.spins[i][k] as f64;
        let neighbors = self.neighbor_sum(i, k) as f64;
        2.0 * spin * (interaction.coupling * neighbors + interaction.field)
    }

    /// Sum over bonds of s_i s_j, each bond counted once.
    ///
    /// Every site owns its right and down bond. For N = 2 the wrap-around bond
    /// and the direct bond between the same two sites are counted separately.
    pub fn bond_sum(&self) -> i64 {
        let n = self.size;
        let mut total = 0i64;

        for i in 0..n {
            for k in 0..n {
                let spin = self.spins[i][k] as i64;
                let right = self.spins[i][(k + 1) % n] as i64;
                let down = self.spins[(i + 1) % n][k] as i64;
                total += spin * (right + down);
            }
        }

        total
    }

    /// Total energy H = -J Σ_<ij> s_i s_j - B Σ_i s_i
    pub fn total_energy(&self, interaction: &Interaction) -> f64 {
        -interaction.coupling * self.bond_sum() as f64
            - interaction.field * self.total_magnetization() as f64
    }

    /// Total magnetization Σ_i s_i
    pub fn total_magnetization(&self) -> i64 {
        self.spins
            .iter()
            .flat_map(|row| row.iter())
            .map(|&s| s as i64)
            .sum()
    }

    pub fn energy_per_site(&self, interaction: &Interaction) -> f64 {
        self.total_energy(interaction) / self.sites() as f64
    }

    pub fn magnetization_per_site(&self) -> f64 {
        self.total_magnetization() as f64 / self.sites() as f64
    }
}

fn check_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(SimulationError::LatticeSize(size));
    }
    Ok(())
}
