//! A thread-safe cache of [PurifiedModes] keyed on the exact inputs that
//! produced them

use std::sync::{
    Arc, Mutex, OnceLock, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use molecule::Molecule;
use rustc_hash::FxHashMap;
use units::FreqUnit;

use crate::{Config, Hessian, NormalError, PurifiedModes, purify};

/// the bit patterns of every input to [purify]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Key {
    atomic_numbers: Vec<usize>,
    masses: Vec<u64>,
    coords: Vec<u64>,
    hessian: Vec<u64>,
    tols: [u64; 5],
    freq_unit: FreqUnit,
}

impl Key {
    fn new(mol: &Molecule, hess: &Hessian, config: &Config) -> Self {
        let bits = |v: &[f64]| -> Vec<u64> {
            v.iter().map(|x| x.to_bits()).collect()
        };
        Self {
            atomic_numbers: mol.atomic_numbers(),
            masses: bits(&mol.masses()),
            coords: bits(&mol.coords()),
            hessian: bits(hess.mat().as_slice()),
            tols: [
                config.zero_moment.to_bits(),
                config.equal_moment.to_bits(),
                config.orthonorm_tol.to_bits(),
                config.rank_tol.to_bits(),
                config.zero_eigval.to_bits(),
            ],
            freq_unit: config.freq_unit,
        }
    }
}

type Slot = Arc<OnceLock<Result<Arc<PurifiedModes>, NormalError>>>;

/// Each distinct set of inputs is purified at most once, even when several
/// threads ask for it at the same time. Errors are cached too
#[derive(Debug, Default)]
pub struct ModeCache {
    slots: Mutex<FxHashMap<Key, Slot>>,
    computed: AtomicUsize,
}

impl ModeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// return the cached result of [purify] for these inputs, computing it
    /// first if necessary
    pub fn get_or_compute(
        &self,
        mol: &Molecule,
        hess: &Hessian,
        config: &Config,
    ) -> Result<Arc<PurifiedModes>, NormalError> {
        let key = Key::new(mol, hess, config);
        let slot = {
            let mut slots =
                self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key).or_default())
        };
        // only the slot is held while computing, not the map
        slot.get_or_init(|| {
            self.computed.fetch_add(1, Ordering::Relaxed);
            purify(mol, hess, config).map(Arc::new)
        })
        .clone()
    }

    /// the number of times [purify] has actually run
    pub fn computed(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }

    /// the number of distinct keys seen so far
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
