//! The objects, materials and layout of the hot-sauce shelf scene.

use crate::{
    data_structures::{material::MaterialDef, shapes::Shape},
    scene::compound::{CompoundObject, PrimitiveSpec, Surface, TextureTag},
};

pub const MATERIALS: [MaterialDef; 5] = [
    MaterialDef {
        tag: "glass",
        diffuse_color: [0.2, 0.2, 0.2],
        specular_color: [1.0, 1.0, 1.0],
        shininess: 95.0,
    },
    MaterialDef {
        tag: "plastic",
        diffuse_color: [0.1, 0.1, 0.1],
        specular_color: [0.1, 0.1, 0.1],
        shininess: 0.01,
    },
    MaterialDef {
        tag: "wood",
        diffuse_color: [0.3, 0.3, 0.3],
        specular_color: [0.7, 0.7, 0.7],
        shininess: 80.0,
    },
    MaterialDef {
        tag: "wall",
        diffuse_color: [0.3, 0.3, 0.3],
        specular_color: [0.6, 0.6, 0.6],
        shininess: 75.0,
    },
    MaterialDef {
        tag: "shelf",
        diffuse_color: [0.6, 0.6, 0.6],
        specular_color: [0.2, 0.2, 0.2],
        shininess: 0.2,
    },
];

/// Translucent flat colour of bottle glass.
pub const GLASS: Surface = Surface::Color([0.7, 0.7, 0.8, 0.3]);
/// Label texture scale of the sauce inside a bottle.
pub const SAUCE_UV: [f32; 2] = [50.0, 50.0];

const fn textured(tag: &'static str) -> Surface {
    Surface::Texture(TextureTag::Named(tag))
}

const SAUCE: Surface = Surface::Texture(TextureTag::Fill);

/// The most common bottle: sauce inside a glass body, a tapered glass shoulder, a glass
/// neck and a plastic lid.
pub fn bottle_one() -> CompoundObject {
    use Shape::{Cylinder, TaperedCylinder};
    CompoundObject::new(
        "bottle 1",
        vec![
            PrimitiveSpec::new("sauce", Cylinder, [0.7, 2.8, 0.7], [0.0, 0.2, 0.0], SAUCE, "glass")
                .uv(SAUCE_UV[0], SAUCE_UV[1]),
            PrimitiveSpec::new("body", Cylinder, [0.8, 3.0, 0.8], [0.0; 3], GLASS, "glass"),
            PrimitiveSpec::new("shoulder", TaperedCylinder, [0.8, 1.0, 0.8], [0.0, 3.0, 0.0], GLASS, "glass"),
            PrimitiveSpec::new("lid", Cylinder, [0.5, 0.7, 0.5], [0.0, 4.8, 0.0], textured("lid"), "plastic"),
            PrimitiveSpec::new("neck", Cylinder, [0.4, 1.0, 0.4], [0.0, 4.0, 0.0], GLASS, "glass"),
        ],
    )
}

/// Bottle 1 with a plastic ring tilted around its neck.
pub fn bottle_two() -> CompoundObject {
    let mut bottle = bottle_one();
    bottle.name = "bottle 2";
    bottle.parts.push(
        PrimitiveSpec::new(
            "ring",
            Shape::Torus,
            [0.6, 0.4, 0.6],
            [0.0, 4.2, 0.0],
            textured("lid"),
            "plastic",
        )
        .rotated(-67.0, 0.0, 13.0),
    );
    bottle
}

/// A squat bottle with a red plastic nozzle.
pub fn bottle_three() -> CompoundObject {
    use Shape::{Cylinder, TaperedCylinder};
    let red = textured("redplastic");
    CompoundObject::new(
        "bottle 3",
        vec![
            PrimitiveSpec::new("sauce", Cylinder, [1.0, 2.8, 1.0], [0.0, 0.2, 0.0], SAUCE, "glass")
                .uv(SAUCE_UV[0], SAUCE_UV[1]),
            PrimitiveSpec::new("body", Cylinder, [1.1, 3.0, 1.1], [0.0; 3], GLASS, "glass"),
            PrimitiveSpec::new("shoulder", TaperedCylinder, [1.0, 1.0, 1.0], [0.0, 3.0, 0.0], red, "plastic")
                .uv(SAUCE_UV[0], SAUCE_UV[1]),
            PrimitiveSpec::new("nozzle", TaperedCylinder, [0.4, 1.3, 0.4], [0.0, 4.0, 0.0], red, "plastic")
                .uv(SAUCE_UV[0], SAUCE_UV[1]),
            PrimitiveSpec::new("tip", TaperedCylinder, [0.1, 0.1, 0.1], [0.0, 5.33, 0.0], red, "plastic")
                .uv(SAUCE_UV[0], SAUCE_UV[1]),
        ],
    )
}

/// Three stepped boards with a side panel at each end of every board.
pub fn shelf() -> CompoundObject {
    let board = |name, size, offset| {
        PrimitiveSpec::new(name, Shape::Box, size, offset, textured("shelf"), "shelf")
    };
    CompoundObject::new(
        "shelf",
        vec![
            board("bottom board", [10.0, 1.0, 2.0], [0.0, 0.5, 3.0]),
            board("middle board", [10.0, 2.0, 2.0], [0.0, 1.0, 1.0]),
            board("top board", [10.0, 3.0, 2.0], [0.0, 1.5, -1.0]),
            board("bottom right side", [0.3, 1.3, 2.2], [5.0, 0.65, 3.0]),
            board("bottom left side", [0.3, 1.3, 2.2], [-5.0, 0.65, 3.0]),
            board("middle right side", [0.3, 2.3, 2.2], [5.0, 1.15, 1.0]),
            board("middle left side", [0.3, 2.3, 2.2], [-5.0, 1.15, 1.0]),
            board("top right side", [0.3, 3.3, 2.2], [5.0, 1.65, -1.0]),
            board("top left side", [0.3, 3.3, 2.2], [-5.0, 1.65, -1.0]),
        ],
    )
}

pub fn table() -> CompoundObject {
    CompoundObject::new(
        "table",
        vec![PrimitiveSpec::new(
            "top",
            Shape::Plane,
            [20.0, 1.0, 10.0],
            [0.0; 3],
            textured("wood"),
            "wood",
        )],
    )
}

/// The kitchen wall: the table plane stood upright behind the shelf.
pub fn wall() -> CompoundObject {
    CompoundObject::new(
        "wall",
        vec![
            PrimitiveSpec::new(
                "wall",
                Shape::Plane,
                [20.0, 1.0, 10.0],
                [0.0, 10.0, -5.0],
                textured("wall"),
                "wall",
            )
            .rotated(90.0, 0.0, 0.0),
        ],
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compound {
    Table,
    Wall,
    Shelf,
    BottleOne,
    BottleTwo,
    BottleThree,
}

impl Compound {
    pub fn object(self) -> CompoundObject {
        match self {
            Compound::Table => table(),
            Compound::Wall => wall(),
            Compound::Shelf => shelf(),
            Compound::BottleOne => bottle_one(),
            Compound::BottleTwo => bottle_two(),
            Compound::BottleThree => bottle_three(),
        }
    }
}

/// One compound of the scene. `y` is in units of the compound's own scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub compound: Compound,
    pub position: [f32; 3],
    pub scale: f32,
    pub fill: Option<&'static str>,
}

const fn fixture(compound: Compound) -> Placement {
    Placement {
        compound,
        position: [0.0; 3],
        scale: 1.0,
        fill: None,
    }
}

const fn bottle(compound: Compound, position: [f32; 3], scale: f32, sauce: &'static str) -> Placement {
    Placement {
        compound,
        position,
        scale,
        fill: Some(sauce),
    }
}

/// The whole scene in draw order.
pub const SCENE: [Placement; 20] = {
    use Compound::*;
    [
        fixture(Table),
        fixture(Wall),
        fixture(Shelf),
        // top shelf, left to right
        bottle(BottleOne, [-4.0, 10.0, -1.0], 0.3, "sauce4"),
        bottle(BottleOne, [-2.8, 5.0, -1.0], 0.6, "sauce1"),
        bottle(BottleOne, [-1.5, 5.0, -1.0], 0.6, "sauce4"),
        bottle(BottleOne, [3.0, 5.0, -1.0], 0.6, "sauce4"),
        // middle shelf
        bottle(BottleOne, [-4.0, 6.7, 1.0], 0.3, "sauce4"),
        bottle(BottleOne, [-3.0, 6.7, 1.0], 0.3, "sauce2"),
        bottle(BottleTwo, [2.0, 4.9, 1.0], 0.4, "sauce4"),
        bottle(BottleThree, [3.2, 4.9, 1.0], 0.4, "sauce2"),
        bottle(BottleOne, [4.1, 3.35, 1.0], 0.6, "sauce1"),
        // bottom shelf
        bottle(BottleOne, [-4.0, 3.4, 3.0], 0.3, "sauce1"),
        bottle(BottleOne, [-3.0, 3.4, 3.0], 0.3, "sauce2"),
        bottle(BottleOne, [-2.0, 3.4, 3.0], 0.3, "sauce3"),
        bottle(BottleOne, [-1.0, 3.4, 3.0], 0.3, "sauce1"),
        bottle(BottleOne, [2.5, 3.4, 3.0], 0.3, "sauce4"),
        bottle(BottleOne, [3.5, 3.4, 3.0], 0.3, "sauce2"),
        bottle(BottleOne, [4.5, 3.4, 3.0], 0.3, "sauce1"),
        // on the table, right of the shelf
        bottle(BottleOne, [6.3, 0.0, 3.9], 0.8, "sauce1"),
    ]
};
