use cellar_core::{
    models::{Readiness, WineColor, WineProfile},
    params::AddWine,
    Cellar, CellarBuilder, EngineConfig, Wine,
};
use tempfile::TempDir;

pub const OWNER: &str = "alice";

/// Helper function to create a test cellar
pub async fn create_test_cellar(config: EngineConfig) -> (TempDir, Cellar) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let cellar = CellarBuilder::new()
        .with_database_path(Some(&db_path))
        .with_config(config)
        .build()
        .await
        .expect("Failed to create cellar");
    (temp_dir, cellar)
}

/// Adds a ready red with a known profile.
pub async fn add_red(cellar: &Cellar, name: &str, quantity: u32, profile: WineProfile) -> Wine {
    let mut params = AddWine::new(OWNER, name, WineColor::Red);
    params.quantity = quantity;
    params.readiness = Readiness::Ready;
    params.profile = Some(profile);
    cellar.add_wine(&params).await.expect("Failed to add wine")
}
