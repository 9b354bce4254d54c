//! Minimal driver: spawn a character, equip from the sample catalog, and
//! print the bus traffic.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p runtime --example equip_demo
//! ```

use std::path::Path;

use character_core::{Hand, ItemHandle, tag::vocab};
use runtime::{Runtime, Topic};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../character/content/data");
    let mut runtime = Runtime::builder().content_dir(data_dir)?.build()?;
    let mut events = runtime.subscribe(Topic::Equipment);

    let hero = runtime.spawn_character();
    runtime.equip(hero, ItemHandle(1), vocab::SLOT_RIGHT_WEAPON_1, true)?;
    runtime.equip(hero, ItemHandle(4), vocab::SLOT_LEFT_WEAPON_1, true)?;
    runtime.toggle_two_hand_stance(hero, Hand::Right)?;

    while let Ok(event) = events.try_recv() {
        println!("{:?}", event);
    }

    Ok(())
}
