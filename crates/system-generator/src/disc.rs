//! Accretion-disc mass budget.
//!
//! Disc surface density falls off linearly from the inner edge to zero at
//! `max`. Integrating `2πx(1 - x/max)` gives a mass proportional to
//! `x² - 2x³/(3·max)`; the constant factors cancel once density is normalised
//! against the whole disc, so they are left out.

use seeded_random::Random;
use star_system::{BodyType, StarSystem, SuperType, SystemBodyId};
use units::{Fixed, AU_EARTH_RADIUS, AU_SOL_RADIUS, SUN_MASS_TO_EARTH_MASS};

use crate::config::GeneratorConfig;

/// Relative mass contained between radii `a` and `b` of a disc ending at `max`.
///
/// `b` is clamped to `max`.
///
/// # Panics
///
/// Panics if `a` is negative or exceeds `b` or `max`.
pub fn mass_from_area(a: Fixed, b: Fixed, max: Fixed) -> Fixed {
    let b = b.min(max);
    assert!(
        a >= Fixed::ZERO && a <= b && a <= max,
        "inverted disc bounds: a={a} b={b} max={max}"
    );
    let k = Fixed::from_int(2) / (max * 3);
    let cumulative = |x: Fixed| x * x * (Fixed::ONE - k * x);
    cumulative(b) - cumulative(a)
}

/// Zone around a primary in which children may form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccretionDisc {
    /// Inner radius, AU.
    pub min: Fixed,
    /// Outer radius, AU.
    pub max: Fixed,
    /// Mass per unit of [`mass_from_area`], in Earth masses.
    pub density: Fixed,
}

impl AccretionDisc {
    /// Density spreading `fraction` of `primary_mass_earths` over `[min, max]`.
    pub fn density_for(
        primary_mass_earths: Fixed,
        min: Fixed,
        max: Fixed,
        fraction: Fixed,
    ) -> Fixed {
        let max = max.max(min);
        let total = mass_from_area(min, max, max);
        primary_mass_earths * fraction / total
    }

    /// Computes the disc around `primary`.
    ///
    /// Random draws, in order: for stars and grav-points the outer-radius
    /// narrowing (plus one more for white dwarfs) then the density scale; for
    /// planets the density scale only.
    pub fn around(
        system: &StarSystem,
        primary: SystemBodyId,
        num_stars: usize,
        config: &GeneratorConfig,
        rng: &mut Random,
    ) -> Self {
        let Some(body) = system.body(primary) else {
            return Self {
                min: Fixed::ZERO,
                max: Fixed::ZERO,
                density: Fixed::ZERO,
            };
        };
        let mut max = Fixed::from_f64(config.default_disc_max_au);

        if body.super_type() <= SuperType::Star {
            let mut min = if body.is_gravpoint() {
                let inner = body
                    .children
                    .first()
                    .and_then(|c| system.body(*c))
                    .map(|c| c.orb_max)
                    .unwrap_or(Fixed::ZERO);
                inner * Fixed::from_f64(config.safe_binary_distance)
            } else {
                4 * body.radius * AU_SOL_RADIUS
            };

            if body.body_type == BodyType::WhiteDwarf {
                // the progenitor was a much larger star
                min = 1000 * body.radius * AU_SOL_RADIUS;
                max = 100 * rng.n_fixed(2);
                max *= (Fixed::ratio(1, 2) + Fixed::from_int(8) * rng.fixed()).sqrt();
            } else {
                max = 100 * rng.n_fixed(2) * body.mass.sqrt();
            }

            let mass_earths = body.mass * SUN_MASS_TO_EARTH_MASS;
            let fraction = Fixed::from_f64(config.star_disc_mass_fraction);
            let density = rng.fixed() * Self::density_for(mass_earths, min, max, fraction);

            if body.is_star() && body.parent.is_some() {
                max = max.min(body.orb_min * Fixed::from_f64(config.companion_disc_fraction));
            }

            if num_stars >= 3 {
                let inner_pair = system
                    .root()
                    .and_then(|r| r.children.first())
                    .and_then(|c| system.body(*c))
                    .map(|c| c.orb_min);
                if let Some(orb_min) = inner_pair {
                    max = max.min(Fixed::from_f64(config.multiple_system_disc_clamp) * orb_min);
                }
            }

            Self { min, max, density }
        } else {
            let min = 4 * body.radius * AU_EARTH_RADIUS;
            let hill = Fixed::from_f64(system.hill_radius(primary).to_au());
            max = max.min(Fixed::from_f64(config.moon_disc_hill_fraction) * hill);

            let fraction = Fixed::from_f64(config.planet_disc_mass_fraction);
            let density = rng.fixed() * Self::density_for(body.mass, min, max, fraction);

            Self { min, max, density }
        }
    }

    /// Earth masses obtainable from the annulus `[inner, outer]` when only
    /// `share` of the disc's density is gathered. `None` on overflow.
    pub fn accretable_mass(&self, inner: Fixed, outer: Fixed, share: Fixed) -> Option<Fixed> {
        let inner = inner.clamp(Fixed::ZERO, self.max);
        mass_from_area(inner, outer.max(inner), self.max).checked_mul(share * self.density)
    }
}
