//! Opens a window with the hot-sauce shelf.
//!
//! Textures are read from `./assets/textures` unless `SHELF_NGIN_ASSETS` points
//! somewhere else. Set `RUST_LOG=info` to see which textures were loaded.

fn main() -> anyhow::Result<()> {
    shelf_ngin::flow::run(shelf_ngin::SceneConfig::from_env())
}
