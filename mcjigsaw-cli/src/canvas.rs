//! A top-down canvas where committed structures are drawn as characters.

use std::collections::HashMap;
use std::fmt::Write;

use glam::IVec3;
use tracing::trace;

use mcjigsaw::world::{StructureWorld, TemplatePlacement};
use mcjigsaw::template::Template;
use mcjigsaw::geom::BlockBox;
use mcjigsaw::util::JavaRandom;
use mcjigsaw::ident::Ident;


/// A world that only remembers, for each column, the glyph of the highest element
/// placed over it.
#[derive(Debug, Default)]
pub struct Canvas {
    columns: HashMap<(i32, i32), Column>,
    bounds: Option<BlockBox>,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    glyph: char,
    top: i32,
}

impl Canvas {

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn paint(&mut self, bb: BlockBox, glyph: char) {

        for x in bb.min.x..=bb.max.x {
            for z in bb.min.z..=bb.max.z {
                let column = self.columns.entry((x, z)).or_insert(Column { glyph, top: bb.max.y });
                if bb.max.y >= column.top {
                    *column = Column { glyph, top: bb.max.y };
                }
            }
        }

        match &mut self.bounds {
            Some(bounds) => *bounds = *bounds | bb,
            None => self.bounds = Some(bb),
        }

    }

    /// Render the canvas, one line per Z coordinate, with north at the top.
    pub fn render(&self) -> String {

        let Some(bounds) = self.bounds else {
            return String::new();
        };

        let mut out = String::new();
        for z in bounds.min.z..=bounds.max.z {
            for x in bounds.min.x..=bounds.max.x {
                out.push(self.columns.get(&(x, z)).map_or('.', |column| column.glyph));
            }
            out.push('\n');
        }

        let _ = write!(out, "{} columns from {} to {}", self.columns.len(), bounds.min, bounds.max);
        out

    }

}

impl StructureWorld for Canvas {

    fn place_template(&mut self, template: &Template, placement: &TemplatePlacement) -> bool {
        trace!("paint {} at {}", template.id(), placement.anchor);
        self.paint(template.bounding_box(placement.anchor, placement.rotation), glyph(template.id()));
        true
    }

    fn place_feature(&mut self, feature: &Ident, pos: IVec3, _rand: &mut JavaRandom) -> bool {
        trace!("feature {feature} at {pos}");
        self.paint(BlockBox::single(pos), '*');
        true
    }

}


/// Glyph of a template, the first letter of the last segment of its path.
fn glyph(id: &Ident) -> char {
    id.path()
        .rsplit('/')
        .next()
        .and_then(|name| name.chars().next())
        .unwrap_or('?')
}
