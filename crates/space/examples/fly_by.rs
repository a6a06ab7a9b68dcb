//! Drop a ship into a generated system, fly it past the primary and save the result
//!
//! Usage: RUST_LOG=space=trace cargo run -p space --example fly_by [space.toml]

use nalgebra::Vector3;
use seeded_random::Random;
use star_system::{BodyType, SystemPath};
use std::sync::Arc;
use space::{Body, BodyKind, SmoothTerrainSource, Space, SpaceConfig, SpaceEvent};
use system_generator::{GeneratorConfig, StarSystemGenerator, SystemDescriptor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> space::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SpaceConfig::load(path)?,
        None => SpaceConfig::default(),
    };

    let path = SystemPath::system(1, 0, -2, 0);
    let system = StarSystemGenerator::new(GeneratorConfig::default()).generate(&SystemDescriptor {
        path,
        name: "Achernar".to_string(),
        seed: 17,
        star_types: vec![BodyType::StarG, BodyType::StarM],
    });
    let mut space = Space::new(Arc::new(system), config, &SmoothTerrainSource, 0.0);

    let mut rng = Random::new(&[1, 2, 3]);
    let Some(arrival) =
        space.hyperspace_exit(&path, &Vector3::zeros(), &Vector3::new(3.0, 1.0, -2.0), &mut rng)
    else {
        eprintln!("{} has no star to arrive at", space.system().name);
        return Ok(());
    };
    let mut ship = Body::dynamic("Lucky Star", BodyKind::Ship, 20_000.0, 30.0, arrival.frame, arrival.position);
    ship.set_velocity(arrival.velocity);
    let ship = space.add_body(ship);
    println!(
        "arrived {:.3} AU from the primary at {:.1} km/s",
        arrival.position.norm() / units::AU,
        arrival.velocity.norm() / 1000.0
    );

    let mut events: Vec<SpaceEvent> = Vec::new();
    for _ in 0..(24 * 60) {
        space.time_step(60.0, &mut events);
    }
    for event in &events {
        println!("{event:?}");
    }

    if let Some(body) = space.body(ship) {
        let frame = body.frame.and_then(|f| space.frame(f)).map_or("nowhere", |f| f.label.as_str());
        println!("after one day: in {frame}, {:.0} m/s", body.velocity().norm());
    }
    if let Some(port) = space.find_nearest_to(ship, BodyKind::Starport).and_then(|id| space.body(id)) {
        println!("nearest starport: {}", port.label);
    }

    let save = space.to_json()?;
    println!("save: {} bytes", save.to_string().len());
    Ok(())
}
