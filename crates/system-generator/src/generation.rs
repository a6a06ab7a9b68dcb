//! Star system generation pipeline
//!
//! A system is built in two stages. The star stage creates one to four stars,
//! pairing them under grav-points and giving each pair a binary orbit. The
//! planet stage fills an accretion disc around every star and every inner
//! grav-point, recursing once into each planet to form moons. Starports are
//! added last, then the arena is renumbered into pre-order.
//!
//! Every draw comes from one [`Random`] seeded from the system's path, the
//! universe seed and the system seed, passed by reference through the whole
//! call tree. The same [`SystemDescriptor`] always yields the same tree.

use serde::{Deserialize, Serialize};
use seeded_random::Random;
use star_system::{BodyType, StarSystem, SystemBodyId, SystemPath};
use tracing::debug;
use units::{Fixed, AU_SOL_RADIUS};

use crate::classify::{MassClassifier, PlanetClassifier};
use crate::config::GeneratorConfig;
use crate::planets::{make_planets_around, PlacementContext};
use crate::stars::{make_binary_pair, make_star_lighter_than, make_star_of_type};
use crate::stations::populate_stations;

/// What the galaxy knows about a system before it is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDescriptor {
    pub path: SystemPath,
    pub name: String,
    pub seed: u32,
    /// Star types, primary first. One to four entries.
    pub star_types: Vec<BodyType>,
}

/// Builds [`StarSystem`] trees from [`SystemDescriptor`]s.
///
/// # Examples
///
/// ```
/// use star_system::{BodyType, SystemPath};
/// use system_generator::{GeneratorConfig, StarSystemGenerator, SystemDescriptor};
///
/// let generator = StarSystemGenerator::new(GeneratorConfig::default());
/// let descriptor = SystemDescriptor {
///     path: SystemPath::system(0, 0, 0, 0),
///     name: "Sol".to_string(),
///     seed: 1,
///     star_types: vec![BodyType::StarG],
/// };
///
/// let a = generator.generate(&descriptor);
/// let b = generator.generate(&descriptor);
/// assert_eq!(a, b);
/// assert_eq!(a.root().unwrap().name, "Sol");
/// ```
#[derive(Debug, Clone)]
pub struct StarSystemGenerator<C = MassClassifier> {
    config: GeneratorConfig,
    classifier: C,
}

impl StarSystemGenerator<MassClassifier> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_classifier(config, MassClassifier)
    }
}

impl<C: PlanetClassifier> StarSystemGenerator<C> {
    pub fn with_classifier(config: GeneratorConfig, classifier: C) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Random source for a system: `(index, x, y, z, universe seed, seed)`.
    pub fn system_rng(&self, descriptor: &SystemDescriptor) -> Random {
        let path = descriptor.path;
        Random::new(&[
            path.system_index.unwrap_or(0),
            path.sector_x as u32,
            path.sector_y as u32,
            path.sector_z as u32,
            self.config.universe_seed,
            descriptor.seed,
        ])
    }

    /// Generates the full body tree for `descriptor`.
    ///
    /// # Panics
    ///
    /// Panics if the descriptor lists fewer than one or more than four stars,
    /// or any star type that is not a star.
    pub fn generate(&self, descriptor: &SystemDescriptor) -> StarSystem {
        let num_stars = descriptor.star_types.len();
        assert!(
            (1..=4).contains(&num_stars),
            "a system has 1 to 4 stars, got {num_stars}"
        );

        let mut rng = self.system_rng(descriptor);
        let mut system = StarSystem::new(descriptor.path, descriptor.name.clone(), descriptor.seed);

        let stars = self.add_stars(&mut system, descriptor, &mut rng);
        system.num_stars = num_stars;

        let ctx = PlacementContext {
            config: &self.config,
            classifier: &self.classifier,
            num_stars,
        };
        for star in &stars.stars {
            make_planets_around(&mut system, *star, &ctx, &mut rng);
        }
        if let Some(inner) = stars.inner_gravpoint {
            make_planets_around(&mut system, inner, &ctx, &mut rng);
        }
        if let Some(outer) = stars.outer_gravpoint {
            make_planets_around(&mut system, outer, &ctx, &mut rng);
        }

        populate_stations(&mut system, &self.config);
        system.finalize();

        debug!(
            system = %system.name,
            path = %system.path,
            stars = system.num_stars,
            bodies = system.len(),
            "generated star system"
        );
        system
    }

    fn add_stars(
        &self,
        system: &mut StarSystem,
        descriptor: &SystemDescriptor,
        rng: &mut Random,
    ) -> StarStage {
        let name = &descriptor.name;
        let types = &descriptor.star_types;

        if types.len() == 1 {
            let star = system.new_body(name.clone(), types[0]);
            if let Some(body) = system.body_mut(star) {
                make_star_of_type(body, types[0], rng);
            }
            system.set_root(star);
            return StarStage {
                stars: vec![star],
                inner_gravpoint: None,
                outer_gravpoint: None,
            };
        }

        let cg1 = system.new_body(format!("{name} A,B"), BodyType::Gravpoint);
        system.set_root(cg1);

        let a = system.new_body(format!("{name} A"), types[0]);
        if let Some(body) = system.body_mut(a) {
            make_star_of_type(body, types[0], rng);
        }
        let mass_a = star_mass(system, a);

        let b = system.new_body(format!("{name} B"), types[1]);
        if let Some(body) = system.body_mut(b) {
            make_star_lighter_than(body, types[1], mass_a, rng);
        }

        self.pair_under(system, cg1, a, b);
        let min_dist1 = self.pair_min_distance(system, a, b);
        make_binary_pair(system, a, b, min_dist1, rng);

        let mut stars = vec![a, b];
        if types.len() == 2 {
            return StarStage {
                stars,
                inner_gravpoint: Some(cg1),
                outer_gravpoint: None,
            };
        }

        let outer_limit = Fixed::from_f64(self.config.outer_pair_max_au);
        while system.body(a).map_or(false, |s| s.orb_max > outer_limit) {
            make_binary_pair(system, a, b, min_dist1, rng);
        }

        let (cg2, star_c) = if types.len() == 3 {
            let c = system.new_body(format!("{name} C"), types[2]);
            if let Some(body) = system.body_mut(c) {
                make_star_lighter_than(body, types[2], mass_a, rng);
            }
            stars.push(c);
            (c, c)
        } else {
            let cg2 = system.new_body(format!("{name} C,D"), BodyType::Gravpoint);

            let c = system.new_body(format!("{name} C"), types[2]);
            if let Some(body) = system.body_mut(c) {
                make_star_lighter_than(body, types[2], mass_a, rng);
            }
            let mass_c = star_mass(system, c);

            let d = system.new_body(format!("{name} D"), types[3]);
            if let Some(body) = system.body_mut(d) {
                make_star_lighter_than(body, types[3], mass_c, rng);
            }

            let min_dist2 = self.pair_min_distance(system, c, d);
            make_binary_pair(system, c, d, min_dist2, rng);
            self.pair_under(system, cg2, c, d);
            stars.push(c);
            stars.push(d);
            (cg2, c)
        };

        let root = system.new_body(name.clone(), BodyType::Gravpoint);
        system.attach(root, cg1);
        system.attach(root, cg2);
        system.set_root(root);
        let total_mass = star_mass(system, cg1) + star_mass(system, cg2);
        if let Some(body) = system.body_mut(root) {
            body.mass = total_mass;
        }
        let min_dist_super = star_orb_max(system, a) + star_orb_max(system, star_c);
        make_binary_pair(system, cg1, cg2, 4 * min_dist_super, rng);

        StarStage {
            stars,
            inner_gravpoint: Some(cg1),
            outer_gravpoint: (types.len() == 4).then_some(cg2),
        }
    }

    /// Attaches both stars to `gravpoint` and gives it their combined mass.
    fn pair_under(
        &self,
        system: &mut StarSystem,
        gravpoint: SystemBodyId,
        a: SystemBodyId,
        b: SystemBodyId,
    ) {
        let mass = star_mass(system, a) + star_mass(system, b);
        if let Some(body) = system.body_mut(gravpoint) {
            body.mass = mass;
        }
        system.attach(gravpoint, a);
        system.attach(gravpoint, b);
    }

    /// Closest safe separation between two stars, in AU.
    fn pair_min_distance(&self, system: &StarSystem, a: SystemBodyId, b: SystemBodyId) -> Fixed {
        let factor = Fixed::from_f64(self.config.star_pair_separation);
        let radius = |id| system.body(id).map_or(Fixed::ZERO, |s| s.radius);
        (factor * radius(a) + factor * radius(b)) * AU_SOL_RADIUS
    }
}

struct StarStage {
    stars: Vec<SystemBodyId>,
    inner_gravpoint: Option<SystemBodyId>,
    outer_gravpoint: Option<SystemBodyId>,
}

fn star_mass(system: &StarSystem, id: SystemBodyId) -> Fixed {
    system.body(id).map_or(Fixed::ZERO, |s| s.mass)
}

fn star_orb_max(system: &StarSystem, id: SystemBodyId) -> Fixed {
    system.body(id).map_or(Fixed::ZERO, |s| s.orb_max)
}
