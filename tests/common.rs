//! Test utilities & fixtures.
//! Builds throwaway server layouts: a world container plus a data directory.

use std::path::PathBuf;

use worldhub::world::WorldRegistry;

pub struct ServerFixture {
    pub root: tempfile::TempDir,
}

#[allow(dead_code)] // Not every test binary uses every helper.
impl ServerFixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join("worlds")).unwrap();
        Self { root }
    }

    pub fn world_container(&self) -> PathBuf {
        self.root.path().join("worlds")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    /// Create a folder that looks like world data (contains `level.dat`).
    pub fn add_world_folder(&self, name: &str) -> PathBuf {
        let dir = self.world_container().join(name);
        std::fs::create_dir_all(dir.join("region")).unwrap();
        std::fs::write(dir.join("level.dat"), b"\x0a\x00\x00").unwrap();
        dir
    }

    /// Create a folder without world data.
    pub fn add_plain_folder(&self, name: &str) -> PathBuf {
        let dir = self.world_container().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub async fn registry(&self, generators: &[&str]) -> WorldRegistry {
        WorldRegistry::open(
            self.world_container(),
            self.data_dir(),
            generators.iter().map(|g| g.to_string()),
        )
        .await
        .expect("open registry")
    }

    pub fn registry_file(&self) -> PathBuf {
        self.data_dir().join("worlds.json")
    }
}
