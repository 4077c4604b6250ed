//! Swept-AABB collision against the tile grid, one axis at a time.
//!
//! Each axis looks only at the tiles its leading edge sweeps into this frame:
//! the column past the left or right edge for X, the row past the top or
//! bottom edge for Y. Both passes start from the body's position at the start
//! of the frame.
//!
//!  - **X pass:** any overlap stops horizontal motion for the frame. The body
//!    is not snapped against the wall.
//!  - **Y pass:** the first overlapping tile snaps the body flush against it
//!    and stops vertical motion. Hitting a tile from below breaks it.
//!
//! Ground contact is not a by-product of the Y pass; [`probe_ground`] checks
//! for a tile directly beneath the body once the move has been applied.

use glam::Vec2;

use crate::body::Aabb;
use crate::tiles::{TileCell, TileSource};

/// How far below the body's bottom edge a tile top may sit and still count as ground.
pub const GROUND_PROBE_EPS: f32 = 0.001;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    /// Displacement left after collision; blocked axes are zero.
    pub displacement: Vec2,
    /// New bottom edge when the Y pass snapped the body against a tile.
    pub snap_y: Option<f32>,
    pub blocked_x: bool,
    /// Tile the body came down onto.
    pub landed_on: Option<TileCell>,
    /// Tile broken by an upward hit.
    pub destroyed: Option<TileCell>,
}

fn tile_coord(world: f32) -> i32 {
    world.floor() as i32
}

/// Resolve this frame's `displacement` for a body currently occupying `rect`.
///
/// An upward hit removes the struck tile from `grid`; nothing else is written.
pub fn resolve<T: TileSource>(rect: Aabb, displacement: Vec2, grid: &mut T) -> Resolution {
    let mut out = Resolution {
        displacement,
        ..Resolution::default()
    };

    // X pass
    let column = if displacement.x > 0.0 {
        tile_coord(rect.x + rect.width + displacement.x)
    } else {
        tile_coord(rect.x + displacement.x)
    };
    let swept = rect.translated(displacement.x, 0.0);
    out.blocked_x = grid
        .tiles_in(column, tile_coord(rect.y), column, tile_coord(rect.y + rect.height))
        .into_iter()
        .any(|tile| swept.overlaps(&Aabb::tile(tile)));
    if out.blocked_x {
        out.displacement.x = 0.0;
    }

    // Y pass, from the unshifted X position
    let moving_up = displacement.y > 0.0;
    let row = if moving_up {
        tile_coord(rect.y + rect.height + displacement.y)
    } else {
        tile_coord(rect.y + displacement.y)
    };
    let swept = rect.translated(0.0, displacement.y);
    let hit = grid
        .tiles_in(tile_coord(rect.x), row, tile_coord(rect.x + rect.width), row)
        .into_iter()
        .find(|tile| swept.overlaps(&Aabb::tile(*tile)));

    if let Some(tile) = hit {
        if moving_up {
            out.snap_y = Some(tile.bottom() - rect.height);
            if grid.destroy_tile(tile.x, tile.y) {
                log::debug!("Destroyed tile ({}, {}) with an upward hit", tile.x, tile.y);
                out.destroyed = Some(tile);
            }
        } else {
            out.snap_y = Some(tile.top());
            out.landed_on = Some(tile);
        }
        out.displacement.y = 0.0;
    }

    out
}

/// True when a solid tile's top is flush (within [`GROUND_PROBE_EPS`]) with
/// the bottom of `rect` somewhere across its width.
pub fn probe_ground<T: TileSource>(rect: Aabb, grid: &T) -> bool {
    let row = tile_coord(rect.y - GROUND_PROBE_EPS);
    let ground_top = row as f32 + TileCell::SIZE;
    if (rect.y - ground_top).abs() > GROUND_PROBE_EPS {
        return false;
    }

    grid.tiles_in(tile_coord(rect.x), row, tile_coord(rect.x + rect.width), row)
        .into_iter()
        .any(|tile| {
            let left = tile.left();
            left < rect.x + rect.width && left + TileCell::SIZE > rect.x
        })
}
