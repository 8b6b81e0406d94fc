use cucumber::given;

use crate::cucumber::{logistics_world::LogisticsSystem, LogisticsWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut LogisticsWorld) {
    let system = LogisticsSystem::new().await;
    world.system = Some(system);
}
