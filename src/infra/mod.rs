//! Инфраструктурный слой вокруг покерного движка: RNG-реализации.

pub mod rng;

pub use rng::{DeterministicRng, StackedRng, SystemRng};
