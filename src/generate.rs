//! Random instance generation.

use rand::Rng;
use thiserror::Error;

use crate::models::{Instance, InstanceError, Node};

/// Reasons [`random_instance`] rejects a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("grid size must be finite and non-negative, got {0}")]
    InvalidGridSize(f64),
    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// Parameters for [`random_instance`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of customers (the depot is added on top).
    pub customers: usize,
    /// Vehicle capacity.
    pub capacity: u32,
    /// Largest customer demand; clamped to `capacity`.
    pub max_demand: u32,
    /// Side length of the square customers are placed in.
    pub grid_size: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customers: 30,
            capacity: 100,
            max_demand: 30,
            grid_size: 100.0,
        }
    }
}

/// Generates an instance with the depot at the center of the grid and
/// customers placed uniformly at random.
///
/// Demands are drawn from `1..=max_demand` (0 when the effective maximum is
/// 0), so every customer fits in an empty vehicle.
///
/// # Errors
///
/// [`GenerateError::InvalidGridSize`] if `grid_size` is negative or not
/// finite.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::generate::{random_instance, GeneratorConfig};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let config = GeneratorConfig { customers: 10, ..GeneratorConfig::default() };
/// let instance = random_instance(&config, &mut rng).unwrap();
/// assert_eq!(instance.num_customers(), 10);
/// assert_eq!(instance.depot(), 0);
/// ```
pub fn random_instance<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Instance, GenerateError> {
    let size = config.grid_size;
    if !size.is_finite() || size < 0.0 {
        return Err(GenerateError::InvalidGridSize(size));
    }
    let max_demand = config.max_demand.min(config.capacity);

    let mut nodes = Vec::with_capacity(config.customers + 1);
    nodes.push(Node::depot(size / 2.0, size / 2.0));
    for _ in 0..config.customers {
        let x = rng.random_range(0.0..=size);
        let y = rng.random_range(0.0..=size);
        let demand = if max_demand == 0 {
            0
        } else {
            rng.random_range(1..=max_demand)
        };
        nodes.push(Node::new(x, y, demand));
    }

    Ok(Instance::new(nodes, config.capacity, 0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_instance_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = GeneratorConfig {
            customers: 50,
            capacity: 20,
            max_demand: 40,
            grid_size: 10.0,
        };
        let inst = random_instance(&config, &mut rng).expect("valid");
        assert_eq!(inst.num_nodes(), 51);
        assert_eq!(inst.node(0).x(), 5.0);
        for i in inst.customers() {
            let node = inst.node(i);
            assert!((0.0..=10.0).contains(&node.x()));
            assert!((0.0..=10.0).contains(&node.y()));
            assert!((1..=20).contains(&node.demand()));
        }
    }

    #[test]
    fn test_same_seed_same_instance() {
        let config = GeneratorConfig::default();
        let a = random_instance(&config, &mut StdRng::seed_from_u64(1)).expect("valid");
        let b = random_instance(&config, &mut StdRng::seed_from_u64(1)).expect("valid");
        assert_eq!(a.nodes(), b.nodes());
    }

    #[test]
    fn test_zero_capacity_gives_zero_demand() {
        let config = GeneratorConfig {
            customers: 5,
            capacity: 0,
            ..GeneratorConfig::default()
        };
        let inst = random_instance(&config, &mut StdRng::seed_from_u64(3)).expect("valid");
        assert_eq!(inst.total_demand(), 0);
    }

    #[test]
    fn test_invalid_grid_size_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for grid_size in [-5.0, f64::NAN, f64::INFINITY] {
            let config = GeneratorConfig {
                grid_size,
                ..GeneratorConfig::default()
            };
            assert!(matches!(
                random_instance(&config, &mut rng),
                Err(GenerateError::InvalidGridSize(_))
            ));
        }
    }

    #[test]
    fn test_zero_grid_size_places_all_at_origin() {
        let config = GeneratorConfig {
            customers: 3,
            grid_size: 0.0,
            ..GeneratorConfig::default()
        };
        let inst = random_instance(&config, &mut StdRng::seed_from_u64(2)).expect("valid");
        assert!(inst.nodes().iter().all(|n| n.x() == 0.0 && n.y() == 0.0));
    }
}
