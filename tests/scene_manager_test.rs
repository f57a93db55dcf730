use std::{cell::RefCell, collections::HashSet, rc::Rc};

use shelf_ngin::{
    Shape, SceneConfig, SceneManager,
    cgmath::Vector3,
    config::TextureSource,
    pipelines::uniforms,
    registry::TextureError,
    scene::{
        StepError, Surface, TextureTag,
        catalog::{self, Compound, SCENE},
    },
};

use crate::common::test_utils::{
    FakeDecoder, FakeTextures, RecordingMeshes, RecordingShader, TextureLog,
};

mod common;

type TestScene = SceneManager<RecordingShader, FakeTextures, RecordingMeshes>;

fn scene() -> (TestScene, Rc<RefCell<TextureLog>>) {
    let (backend, log) = FakeTextures::new();
    let manager = SceneManager::new(RecordingShader::default(), backend, RecordingMeshes::default());
    (manager, log)
}

fn full_decoder(config: &SceneConfig) -> FakeDecoder {
    FakeDecoder::serving(config.textures.iter().map(|source| source.path.as_path()))
}

#[test]
fn should_describe_the_shelf_scene() {
    assert_eq!(SCENE.len(), 20);
    let bottles = SCENE.iter().filter(|placement| placement.fill.is_some()).count();
    assert_eq!(bottles, 17);

    let parts: usize = SCENE
        .iter()
        .map(|placement| placement.compound.object().parts.len())
        .sum();
    assert_eq!(parts, 97);
}

#[test]
fn should_extend_bottle_one_with_a_ring() {
    let one = catalog::bottle_one();
    let two = catalog::bottle_two();

    assert_eq!(two.parts.len(), one.parts.len() + 1);
    assert_eq!(two.parts[..one.parts.len()], one.parts[..]);
    let ring = two.part("ring").unwrap();
    assert_eq!(ring.shape, Shape::Torus);
    assert_eq!(ring.rotation, [-67.0, 0.0, 13.0]);
}

#[test]
fn should_only_reference_known_textures_and_materials() {
    let config = SceneConfig::default();
    let tags: HashSet<&str> = config.texture_tags().collect();
    let materials: HashSet<&str> = catalog::MATERIALS.iter().map(|def| def.tag).collect();

    for placement in SCENE {
        if let Some(fill) = placement.fill {
            assert!(tags.contains(fill), "{fill} is not in the manifest");
        }
        for part in placement.compound.object().parts {
            assert!(materials.contains(part.material), "{}", part.material);
            if let Surface::Texture(TextureTag::Named(tag)) = part.surface {
                assert!(tags.contains(tag), "{tag} is not in the manifest");
            }
        }
    }
}

#[test]
fn should_prepare_textures_materials_lights_and_meshes() {
    let config = SceneConfig::default();
    let (mut manager, log) = scene();

    manager.prepare_scene(&full_decoder(&config), &config).unwrap();

    assert_eq!(manager.textures().len(), 9);
    assert_eq!(
        manager.textures().tags().collect::<Vec<_>>(),
        config.texture_tags().collect::<Vec<_>>()
    );
    assert_eq!(log.borrow().bound.len(), 9);
    assert_eq!(manager.materials().len(), 5);
    assert_eq!(manager.shader().bool(uniforms::USE_LIGHTING), Some(true));
    assert_eq!(manager.meshes().loaded.len(), Shape::ALL.len());
}

#[test]
fn should_render_the_whole_scene_without_errors() {
    let config = SceneConfig::default();
    let (mut manager, _) = scene();
    manager.prepare_scene(&full_decoder(&config), &config).unwrap();

    let errors = manager.render_scene();

    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(manager.meshes().draws.len(), 97);
}

#[test]
fn should_continue_preparing_after_a_texture_fails() {
    let mut config = SceneConfig::default();
    let decoder = full_decoder(&config);
    config.textures.insert(2, TextureSource::new("textures/missing.jpg", "missing"));
    config.textures.push(TextureSource::new("textures/missing2.jpg", "sauce1"));
    let (mut manager, _) = scene();

    manager.prepare_scene(&decoder, &config).unwrap();

    assert_eq!(manager.textures().len(), 9);
    assert!(manager.textures().find_slot("missing").is_err());
    assert_eq!(manager.textures().find_slot("sauce2").unwrap(), 2);
    assert_eq!(manager.materials().len(), 5);
    assert_eq!(manager.meshes().loaded.len(), Shape::ALL.len());
}

#[test]
fn should_draw_the_rest_of_the_scene_when_a_label_is_missing() {
    let config = SceneConfig::default();
    let decoder = full_decoder(&config);
    let mut without_sauce2 = config.clone();
    without_sauce2.textures.retain(|source| source.tag != "sauce2");
    let (mut manager, _) = scene();
    manager.prepare_scene(&decoder, &without_sauce2).unwrap();

    let errors = manager.render_scene();

    assert_eq!(errors.len(), 4);
    for error in &errors {
        assert_eq!(error.part, "sauce");
        assert!(matches!(
            &error.source,
            StepError::Texture(TextureError::UnknownTag(tag)) if tag == "sauce2"
        ));
    }
    assert_eq!(manager.meshes().draws.len(), 97 - 4);
}

#[test]
fn should_build_a_single_compound_on_demand() {
    let config = SceneConfig::default();
    let (mut manager, _) = scene();
    manager.prepare_scene(&full_decoder(&config), &config).unwrap();

    let errors = manager.build(&Compound::Shelf.object(), Vector3::new(0.0, 0.0, 0.0), 1.0, None);

    assert!(errors.is_empty());
    let draws = &manager.meshes().draws;
    assert_eq!(draws.len(), 9);
    assert!(draws.iter().all(|draw| draw.shape == Shape::Box));
}

#[test]
fn should_release_textures_once_when_dropped() {
    let config = SceneConfig::default();
    let (mut manager, log) = scene();
    manager.prepare_scene(&full_decoder(&config), &config).unwrap();

    drop(manager);

    let log = log.borrow();
    let released: HashSet<_> = log.released.iter().copied().collect();
    assert_eq!(log.released.len(), 9);
    assert_eq!(released.len(), 9);
    assert_eq!(log.created.len(), 9);
}

#[test]
fn should_not_release_twice_after_an_explicit_destroy() {
    let config = SceneConfig::default();
    let (mut manager, log) = scene();
    manager.prepare_scene(&full_decoder(&config), &config).unwrap();

    manager.destroy();
    assert!(manager.textures().is_empty());
    drop(manager);

    assert_eq!(log.borrow().released.len(), 9);
}

#[test]
fn should_release_nothing_when_nothing_was_loaded() {
    let (manager, log) = scene();

    drop(manager);

    let log = log.borrow();
    assert!(log.released.is_empty());
    assert!(log.created.is_empty());
}
