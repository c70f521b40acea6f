//! The demonstration catalog: a village made of a plaza, streets and houses along them,
//! with decorations drawn from an aliased pool.

use glam::IVec3;

use mcjigsaw::pool::{PoolAliasBinding, PoolCatalog, PoolElement, Projection, TemplatePool, TemplateRegistry};
use mcjigsaw::template::{JigsawMarker, Template};
use mcjigsaw::world::LiquidSettings;
use mcjigsaw::geom::Face;
use mcjigsaw::ident::Ident;

use crate::DemoError;


pub const START_POOL: &str = "village:town_centers";

const STREET: &str = "village:street";
const ENTRANCE: &str = "village:building_entrance";


/// Describe a marker in a compact way.
fn marker(pos: [i32; 3], front: Face, name: &str, target: &str, pool: &str) -> JigsawMarker {
    let mut marker = JigsawMarker::new(IVec3::from_array(pos), front);
    marker.name = name.to_string();
    marker.target = target.to_string();
    marker.pool = pool.to_string();
    marker
}

/// A street connector, streets connect to each other on both ends.
fn street(pos: [i32; 3], front: Face) -> JigsawMarker {
    let mut marker = marker(pos, front, STREET, STREET, "village:streets");
    marker.final_state = "minecraft:dirt_path".to_string();
    marker
}

/// A connector on the side of a street, where houses attach.
fn side(pos: [i32; 3], front: Face) -> JigsawMarker {
    marker(pos, front, "village:street_side", ENTRANCE, "village:houses")
}

/// A connector on top of a street, where decorations attach.
fn decor(pos: [i32; 3]) -> JigsawMarker {
    let mut marker = marker(pos, Face::PosY, "village:decor", "minecraft:bottom", "village:decor");
    marker.placement_priority = -1;
    marker
}

/// The entrance of a building, its connector never expands.
fn entrance(pos: [i32; 3], front: Face) -> JigsawMarker {
    marker(pos, front, ENTRANCE, "village:street_side", "minecraft:empty")
}


/// Build the village catalog.
pub fn build() -> Result<PoolCatalog, DemoError> {

    let mut registry = TemplateRegistry::new();
    let mut template = |id: &str, size: [i32; 3], markers: Vec<JigsawMarker>| -> Result<_, DemoError> {
        Ok(registry.register(Template::new(Ident::parse(id)?, IVec3::from_array(size), markers)?)?)
    };

    let plaza = template("village:plaza", [9, 3, 9], vec![
        street([0, 0, 4], Face::NegX),
        street([8, 0, 4], Face::PosX),
        street([4, 0, 0], Face::NegZ),
        street([4, 0, 8], Face::PosZ),
    ])?;

    let mut straight_markers = vec![
        street([1, 0, 0], Face::NegZ),
        street([1, 0, 10], Face::PosZ),
        side([2, 0, 3], Face::PosX),
        side([0, 0, 7], Face::NegX),
        decor([1, 0, 5]),
    ];
    // The main connector is expanded before the sides.
    straight_markers[1].selection_priority = 1;
    let straight = template("village:streets/straight", [3, 1, 11], straight_markers)?;

    let crossing = template("village:streets/crossing", [5, 1, 5], vec![
        street([2, 0, 0], Face::NegZ),
        street([2, 0, 4], Face::PosZ),
        street([0, 0, 2], Face::NegX),
        street([4, 0, 2], Face::PosX),
    ])?;

    let end = template("village:streets/end", [3, 1, 1], vec![
        street([1, 0, 0], Face::NegZ),
    ])?;

    let small_house = template("village:houses/small", [5, 4, 5], vec![entrance([2, 0, 0], Face::NegZ)])?;
    let large_house = template("village:houses/large", [7, 5, 9], vec![entrance([3, 0, 0], Face::NegZ)])?;
    let farm = template("village:houses/farm", [9, 1, 7], vec![entrance([4, 0, 0], Face::NegZ)])?;
    let well = template("village:houses/well", [3, 3, 3], vec![entrance([1, 0, 0], Face::NegZ)])?;
    let lamp = template("village:houses/lamp", [1, 4, 1], vec![])?;

    let mut catalog = PoolCatalog::new();

    catalog.register(Ident::parse(START_POOL)?, TemplatePool::new(Ident::EMPTY_POOL, vec![
        (PoolElement::single(plaza), 1),
    ])?)?;

    catalog.register(Ident::parse("village:streets")?, TemplatePool::new(Ident::parse("village:terminators")?, vec![
        (PoolElement::single(straight).with_projection(Projection::TerrainMatching), 4),
        (PoolElement::single(crossing).with_projection(Projection::TerrainMatching), 1),
    ])?)?;

    catalog.register(Ident::parse("village:terminators")?, TemplatePool::new(Ident::EMPTY_POOL, vec![
        (PoolElement::legacy_single(end).with_projection(Projection::TerrainMatching), 1),
    ])?)?;

    catalog.register(Ident::parse("village:houses")?, TemplatePool::new(Ident::EMPTY_POOL, vec![
        (PoolElement::single(small_house), 4),
        (PoolElement::single(large_house).with_processors(Ident::parse("village:mossify")?), 2),
        (PoolElement::single(farm), 1),
        (PoolElement::list(vec![
            PoolElement::single(well).with_liquid_override(LiquidSettings::IgnoreWaterlogging),
            PoolElement::single(lamp),
        ])?, 1),
        (PoolElement::empty(), 2),
    ])?)?;

    catalog.register(Ident::parse("village:decor_plains")?, TemplatePool::new(Ident::EMPTY_POOL, vec![
        (PoolElement::feature(Ident::parse("village:flower_patch")?), 2),
        (PoolElement::feature(Ident::parse("village:oak")?), 1),
        (PoolElement::empty(), 3),
    ])?)?;

    catalog.register(Ident::parse("village:decor_sparse")?, TemplatePool::new(Ident::EMPTY_POOL, vec![
        (PoolElement::feature(Ident::parse("village:oak")?), 1),
        (PoolElement::empty(), 6),
    ])?)?;

    Ok(catalog)

}

/// The alias bindings of the village, the decoration pool depends on the location.
pub fn aliases() -> Result<Vec<PoolAliasBinding>, DemoError> {
    Ok(vec![
        PoolAliasBinding::Random {
            alias: Ident::parse("village:decor")?,
            targets: vec![
                (Ident::parse("village:decor_plains")?, 2),
                (Ident::parse("village:decor_sparse")?, 1),
            ],
        },
    ])
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn catalog() {
        let catalog = build().unwrap();
        assert!(catalog.contains(&Ident::parse(START_POOL).unwrap()));
        assert!(catalog.iter().all(|(_, pool)| catalog.contains(pool.fallback())));
        assert_eq!(aliases().unwrap().len(), 1);
    }

}
