//! # Gravitational field model
//!
//! Field of a spherically symmetric [`Planet`](crate::planet::Planet), branching on the
//! distance d to the center:
//!
//! - **interior** (`d ≤ R`): only the enclosed shell mass `enclosed_mass(d)` attracts
//!   (shell theorem), integrated on demand;
//! - **exterior** (`d > R`): pure Kepler field of the total mass M.
//!
//! Both functions return exactly zero at the center instead of propagating the 0/0 of
//! the Newtonian expression.

use nalgebra::Vector2;

use crate::{constants::Meter, density::DensityFunction, flyby_errors::FlybyError, planet::Planet};

impl<D: DensityFunction> Planet<D> {
    /// Mass attracting a particle at distance `distance` from the center.
    fn attracting_mass(&self, distance: Meter) -> Result<f64, FlybyError> {
        if distance <= self.radius() {
            self.enclosed_mass(distance)
        } else {
            Ok(self.total_mass())
        }
    }

    /// Acceleration vector at `position`: −G·m(d)/d³ · position.
    ///
    /// Arguments
    /// -----------------
    /// * `position`: position relative to the planet center.
    ///
    /// Return
    /// ----------
    /// * The acceleration (zero at the center), or the accumulator error of the interior
    ///   branch.
    pub fn acceleration(&self, position: &Vector2<f64>) -> Result<Vector2<f64>, FlybyError> {
        let distance = position.norm();
        if distance == 0.0 {
            return Ok(Vector2::zeros());
        }

        let mass = self.attracting_mass(distance)?;
        Ok(position * (-self.gravitational_constant() * mass / distance.powi(3)))
    }

    /// Magnitude of the attraction per unit mass at `distance`: G·m(d)/d².
    ///
    /// Return
    /// ----------
    /// * `0.0` at `distance = 0`, [`FlybyError::InvalidArgument`] for a negative or
    ///   non-finite distance.
    pub fn force_magnitude(&self, distance: Meter) -> Result<f64, FlybyError> {
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "distance must be finite and >= 0, got {distance}"
            )));
        }
        if distance == 0.0 {
            return Ok(0.0);
        }

        let mass = self.attracting_mass(distance)?;
        Ok(self.gravitational_constant() * mass / (distance * distance))
    }
}
