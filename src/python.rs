use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{GeneratorConfig, ScenarioConfig};
use crate::core::math::{Vec2, DIM};
use crate::core::scenario;
use crate::core::{CollisionSystem, Domain};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_array(rows: impl ExactSizeIterator<Item = Vec2>) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// Python-facing wrapper around the Rust collision engine.
///
/// The caller owns the animation loop: call `advance(dt)` once per frame, then draw
/// the discs from `get_positions()` and `get_radii()`.
#[pyclass]
pub struct CollisionSim {
    sim: CollisionSystem,
}

#[pymethods]
impl CollisionSim {
    /// Random "Brownian" scene in a `width` x `height` box.
    ///
    /// Parameters
    /// - count: number of small discs
    /// - radius: small disc radius (> 0)
    /// - speed: velocity components are uniform in [-speed, speed]
    /// - heavy_radius: optional radius of one extra disc placed at rest
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (width, height, count, radius=5.0, speed=3.0, heavy_radius=None, seed=None))]
    fn new(
        width: f64,
        height: f64,
        count: usize,
        radius: f64,
        speed: f64,
        heavy_radius: Option<f64>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let domain = Domain::new(width, height).map_err(py_err)?;
        let config = GeneratorConfig {
            count,
            radius,
            speed,
            heavy_radius,
            seed,
        };
        let particles = scenario::populate(&domain, &config, Vec::new()).map_err(py_err)?;
        let sim = CollisionSystem::new(particles, domain).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Build a simulation from a JSON scenario description.
    #[staticmethod]
    fn from_json(text: &str) -> PyResult<Self> {
        let config = ScenarioConfig::from_json_str(text).map_err(py_err)?;
        let sim = CollisionSystem::from_config(&config).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance simulation time by `dt` (releases the GIL during computation).
    fn advance(&mut self, py: Python<'_>, dt: f64) -> PyResult<()> {
        py.detach(|| self.sim.advance(dt)).map_err(py_err)
    }

    fn time(&self) -> f64 {
        self.sim.time()
    }

    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        let arr = to_array(self.sim.particles().iter().map(|p| p.position()));
        arr.into_pyarray(py).unbind()
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        let arr = to_array(self.sim.particles().iter().map(|p| p.velocity()));
        arr.into_pyarray(py).unbind()
    }

    /// Return radii as a NumPy array of shape (N,), dtype=float64.
    fn get_radii(&self, py: Python<'_>) -> Py<PyArray1<f64>> {
        let arr: Array1<f64> = self.sim.particles().iter().map(|p| p.radius()).collect();
        arr.into_pyarray(py).unbind()
    }
}

/// The brownsim Python module entry point.
#[pymodule]
fn brownsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CollisionSim>()?;
    Ok(())
}
