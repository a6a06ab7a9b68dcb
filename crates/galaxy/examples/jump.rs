//! Survey the sectors around a starting point, then jump between two systems
//!
//! Usage: RUST_LOG=galaxy=debug cargo run -p galaxy --example jump [galaxy.toml]

use seeded_random::Random;
use space::{SmoothTerrainSource, Space, SpaceConfig};
use star_system::SystemPath;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use galaxy::{Galaxy, GalaxyConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GalaxyConfig::load(path)?,
        None => GalaxyConfig::default(),
    };
    let mut galaxy = Galaxy::new(config);

    let home = SystemPath::system(0, 0, 0, 0);
    let report = galaxy.refresh_around(&home);
    println!(
        "{} sectors and {} systems cached around {home}",
        report.sectors_generated, report.systems_generated
    );

    let sector = galaxy.sector(&home);
    for system in &sector.systems {
        println!(
            "  {:<16} {:?} at ({:.1}, {:.1}, {:.1}) ly",
            system.name, system.star_types, system.position.x, system.position.y, system.position.z
        );
    }

    let dest = SystemPath::system(1, 0, 0, 0);
    let (Some((source_pos, dest_pos)), Some(system)) =
        (galaxy.jump_vector(&home, &dest), galaxy.star_system(&dest))
    else {
        eprintln!("no system at {dest}");
        return Ok(());
    };
    if let Some(distance) = galaxy.distance_between(&home, &dest) {
        println!("jumping {:.2} ly to {}", distance.to_light_years(), system.name);
    }

    let space = Space::new(system, SpaceConfig::default(), &SmoothTerrainSource, 0.0);
    let mut rng = Random::new(&[dest.sector_x as u32, dest.sector_y as u32, dest.sector_z as u32]);
    match space.hyperspace_exit(&dest, &source_pos, &dest_pos, &mut rng) {
        Some(arrival) => println!(
            "arrived {:.3} AU from the primary at {:.1} km/s",
            arrival.position.norm() / units::AU,
            arrival.velocity.norm() / 1000.0
        ),
        None => println!("{} has nowhere to arrive", space.system().name),
    }

    let report = galaxy.refresh_around(&dest);
    println!(
        "after the jump: {} sectors evicted, {} generated, {} cached",
        report.sectors_evicted,
        report.sectors_generated,
        galaxy.cached_sectors()
    );
    Ok(())
}
