use shelf_ngin::{
    data_structures::texture::PixelLayout,
    registry::{TextureError, TextureRegistry, texture::MAX_TEXTURE_UNITS},
    resources::image::DecodeError,
};

use crate::common::test_utils::{
    FakeDecoder, FakeHandle, FakeTextures, capture_logs, image, logged_errors,
};

mod common;

fn decoder() -> FakeDecoder {
    FakeDecoder::default()
        .with("wood.jpg", 8, 8, 3)
        .with("sauce1.jpg", 4, 8, 3)
        .with("lid.png", 2, 2, 4)
        .with("gray.png", 4, 4, 1)
        .with("gray_alpha.png", 4, 4, 2)
}

#[test]
fn should_assign_slots_in_load_order() {
    let (mut backend, _) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();

    assert_eq!(registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap(), 0);
    assert_eq!(registry.load(&mut backend, &decoder, "sauce1.jpg", "sauce1").unwrap(), 1);
    assert_eq!(registry.load(&mut backend, &decoder, "lid.png", "lid").unwrap(), 2);

    assert_eq!(registry.find_slot("wood").unwrap(), 0);
    assert_eq!(registry.find_slot("sauce1").unwrap(), 1);
    assert_eq!(registry.find_slot("lid").unwrap(), 2);
    assert_eq!(registry.tags().collect::<Vec<_>>(), ["wood", "sauce1", "lid"]);
}

#[test]
fn should_keep_slots_stable_when_a_load_fails_in_between() {
    let (mut backend, _) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();

    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();
    assert!(registry.load(&mut backend, &decoder, "missing.jpg", "missing").is_err());
    registry.load(&mut backend, &decoder, "lid.png", "lid").unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.find_slot("wood").unwrap(), 0);
    assert_eq!(registry.find_slot("lid").unwrap(), 1);
    assert!(matches!(
        registry.find_slot("missing"),
        Err(TextureError::UnknownTag(tag)) if tag == "missing"
    ));
}

#[test]
fn should_bind_every_texture_to_the_unit_of_its_slot() {
    let (mut backend, log) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();
    registry.load(&mut backend, &decoder, "sauce1.jpg", "sauce1").unwrap();
    registry.load(&mut backend, &decoder, "lid.png", "lid").unwrap();

    assert_eq!(registry.bind_all(&mut backend), 3);

    let bound = &log.borrow().bound;
    assert_eq!(bound.len(), 3);
    for (unit, handle) in bound {
        let slot = registry.tags().position(|tag| {
            registry.find_handle(tag).unwrap() == handle
        });
        assert_eq!(slot, Some(*unit as usize));
    }
}

#[test]
fn should_pick_the_pixel_layout_from_the_channel_count() {
    let (mut backend, log) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();
    registry.load(&mut backend, &decoder, "lid.png", "lid").unwrap();

    let created = &log.borrow().created;
    assert_eq!(created[0], ("wood".to_string(), PixelLayout::Rgb8));
    assert_eq!(created[1], ("lid".to_string(), PixelLayout::Rgba8));
}

#[test]
fn should_reject_one_and_two_channel_images() {
    let (mut backend, log) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();

    let gray = registry.load(&mut backend, &decoder, "gray.png", "gray");
    let gray_alpha = registry.load(&mut backend, &decoder, "gray_alpha.png", "gray_alpha");

    assert!(matches!(
        gray,
        Err(TextureError::UnsupportedChannels { channels: 1, .. })
    ));
    assert!(matches!(
        gray_alpha,
        Err(TextureError::UnsupportedChannels { channels: 2, .. })
    ));
    assert_eq!(registry.len(), 1);
    assert_eq!(log.borrow().created.len(), 1, "no texture object was allocated");
    assert!(registry.find_slot("gray").is_err());
}

#[test]
fn should_log_each_rejected_image_once() {
    capture_logs();
    let (mut backend, _) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();

    let direct = registry.insert_decoded(&mut backend, "mask", &image(4, 4, 1));
    let loaded = registry.load(&mut backend, &decoder, "gray_alpha.png", "gray_alpha");

    assert!(matches!(
        direct,
        Err(TextureError::UnsupportedChannels { channels: 1, .. })
    ));
    assert!(matches!(
        loaded,
        Err(TextureError::UnsupportedChannels { channels: 2, .. })
    ));
    let errors = logged_errors();
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert!(errors[0].contains("`mask`"), "{}", errors[0]);
    assert!(errors[1].contains("`gray_alpha`"), "{}", errors[1]);
    assert!(registry.is_empty());
}

#[test]
fn should_report_missing_files_as_decode_errors() {
    let (mut backend, log) = FakeTextures::new();
    let mut registry = TextureRegistry::<FakeHandle>::new();

    let result = registry.load(&mut backend, &FakeDecoder::default(), "nowhere.jpg", "nowhere");

    assert!(matches!(
        result,
        Err(TextureError::Decode(DecodeError::NotFound(_)))
    ));
    assert!(registry.is_empty());
    assert!(log.borrow().created.is_empty());
}

#[test]
fn should_reject_a_duplicate_tag_and_keep_the_first_texture() {
    let (mut backend, log) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();
    let first = *registry.find_handle("wood").unwrap();

    let again = registry.load(&mut backend, &decoder, "sauce1.jpg", "wood");

    assert!(matches!(again, Err(TextureError::DuplicateTag(tag)) if tag == "wood"));
    assert_eq!(registry.len(), 1);
    assert_eq!(*registry.find_handle("wood").unwrap(), first);
    assert_eq!(log.borrow().created.len(), 1);
}

#[test]
fn should_refuse_textures_beyond_the_unit_limit() {
    let (mut backend, log) = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    for i in 0..MAX_TEXTURE_UNITS {
        registry
            .insert_decoded(&mut backend, &format!("t{i}"), &image(1, 1, 3))
            .unwrap();
    }

    let overflow = registry.insert_decoded(&mut backend, "one too many", &image(1, 1, 3));

    assert!(matches!(
        overflow,
        Err(TextureError::UnitsExhausted(max)) if max == MAX_TEXTURE_UNITS
    ));
    assert_eq!(registry.len(), MAX_TEXTURE_UNITS);
    assert_eq!(log.borrow().created.len(), MAX_TEXTURE_UNITS);
}

#[test]
fn should_honour_a_custom_unit_limit() {
    let (mut backend, _) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::with_max_units(1);
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();

    assert!(matches!(
        registry.load(&mut backend, &decoder, "lid.png", "lid"),
        Err(TextureError::UnitsExhausted(1))
    ));
}

#[test]
fn should_release_every_handle_exactly_once_on_destroy() {
    let (mut backend, log) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();
    registry.load(&mut backend, &decoder, "sauce1.jpg", "sauce1").unwrap();
    registry.load(&mut backend, &decoder, "lid.png", "lid").unwrap();
    let created = log.borrow().created.len();

    registry.destroy(&mut backend);
    registry.destroy(&mut backend);

    let log = log.borrow();
    let mut released = log.released.clone();
    released.sort_by_key(|handle| handle.0);
    assert_eq!(released, [FakeHandle(1), FakeHandle(2), FakeHandle(3)]);
    assert_eq!(log.created.len(), created, "teardown never allocates");
    assert!(registry.is_empty());
    assert!(registry.find_slot("wood").is_err());
}

#[test]
fn should_accept_a_tag_again_after_destroy() {
    let (mut backend, _) = FakeTextures::new();
    let decoder = decoder();
    let mut registry = TextureRegistry::new();
    registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap();
    registry.destroy(&mut backend);

    assert_eq!(registry.load(&mut backend, &decoder, "wood.jpg", "wood").unwrap(), 0);
}
