//! Generate a batch of star systems and print one CSV row per body
//!
//! Usage: RUST_LOG=system_generator=debug cargo run -p system-generator --example generate_systems
//!
//! Pass a TOML file as the first argument to override the generator config.

use star_system::{BodyType, SystemPath};
use system_generator::{GeneratorConfig, StarSystemGenerator, SystemDescriptor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const STAR_MIXES: [&[BodyType]; 4] = [
    &[BodyType::StarG],
    &[BodyType::StarK, BodyType::StarM],
    &[BodyType::StarF, BodyType::StarG, BodyType::StarM],
    &[BodyType::StarA, BodyType::StarG, BodyType::StarK, BodyType::StarM],
];

fn main() -> system_generator::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    let generator = StarSystemGenerator::new(config);

    println!("system,body,type,parent,mass,radius,sma_au,ecc,temp_k");

    let n_systems = 100u32;
    for index in 0..n_systems {
        let descriptor = SystemDescriptor {
            path: SystemPath::system(0, 0, 0, index),
            name: format!("Gen-{index:03}"),
            seed: index.wrapping_mul(2_654_435_761),
            star_types: STAR_MIXES[index as usize % STAR_MIXES.len()].to_vec(),
        };
        let system = generator.generate(&descriptor);

        for body in system.bodies() {
            let parent = body
                .parent
                .and_then(|p| system.body(p))
                .map_or("", |p| p.name.as_str());
            println!(
                "{},\"{}\",{},\"{}\",{:.4},{:.4},{:.4},{:.4},{}",
                system.name,
                body.name,
                body.body_type,
                parent,
                body.mass.to_f64(),
                body.radius.to_f64(),
                body.semi_major_axis.to_f64(),
                body.eccentricity.to_f64(),
                body.average_temp,
            );
        }
    }

    eprintln!("Generated {n_systems} systems");
    Ok(())
}
