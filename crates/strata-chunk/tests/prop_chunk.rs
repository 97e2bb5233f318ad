use proptest::prelude::*;
use strata_blocks::types::Block;
use strata_chunk::{ChunkBuf, ChunkCoord, ChunkNeighborhood, NeighborSampler};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

fn coord() -> impl Strategy<Value = ChunkCoord> {
    (small_i32(), -4i32..=4, small_i32()).prop_map(ChunkCoord::from)
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(c in coord(), sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx*sy*sz;
        let buf = ChunkBuf::from_blocks_local(c, sx, sy, sz, vec![Block::AIR; expect]);

        let mut seen = vec![false; expect];
        for y in 0..sy { for z in 0..sz { for x in 0..sx {
            let i = buf.idx(x,y,z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    #[test]
    fn contains_world_and_get_world_agree(c in coord(), sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx*sy*sz;
        let blocks = (0..expect).map(|i| Block { id: (i % 65535) as u16, state: (i * 31 % 256) as u8 }).collect();
        let buf = ChunkBuf::from_blocks_local(c, sx, sy, sz, blocks);
        let (x0, y0, z0) = buf.origin();

        let candidates = vec![
            (x0,               y0,                z0),
            (x0 + sx as i32-1, y0 + sy as i32-1,  z0 + sz as i32-1),
            (x0 - 1,           y0,                z0),
            (x0 + sx as i32,   y0,                z0),
            (x0,               y0 - 1,            z0),
            (x0,               y0 + sy as i32,    z0),
            (x0,               y0,                z0 - 1),
            (x0,               y0,                z0 + sz as i32),
        ];

        for (wx,wy,wz) in candidates {
            let inside = wy >= y0 && wy < y0 + sy as i32 && wx >= x0 && wx < x0 + sx as i32 && wz >= z0 && wz < z0 + sz as i32;
            prop_assert_eq!(buf.contains_world(wx,wy,wz), inside);
            match buf.get_world(wx,wy,wz) {
                None => prop_assert!(!inside),
                Some(b) => {
                    prop_assert!(inside);
                    let lx = (wx - x0) as usize; let ly = (wy - y0) as usize; let lz = (wz - z0) as usize;
                    prop_assert_eq!(b, buf.get_local(lx, ly, lz));
                }
            }
        }
    }

    #[test]
    fn from_blocks_local_resizes(c in coord(), sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx*sy*sz;
        let buf_ok = ChunkBuf::from_blocks_local(c, sx, sy, sz, vec![Block::AIR; expect]);
        prop_assert_eq!(buf_ok.blocks.len(), expect);
        let buf_resized = ChunkBuf::from_blocks_local(c, sx, sy, sz, vec![Block::AIR; expect.saturating_sub(1)]);
        prop_assert_eq!(buf_resized.blocks.len(), expect);
        prop_assert_eq!(buf_resized.heights().len(), sx * sz);
    }

    // Incremental height updates agree with a full recompute
    #[test]
    fn set_local_matches_recompute(
        edits in prop::collection::vec((0usize..4, 0usize..6, 0usize..4, 0u16..3), 0..40)
    ) {
        let mut buf = ChunkBuf::new_air(ChunkCoord::new(0, 0, 0), 4, 6, 4);
        for (x, y, z, id) in edits {
            buf.set_local(x, y, z, Block::new(id, 0));
        }
        let incremental = buf.heights().to_vec();
        buf.recompute_heights();
        prop_assert_eq!(incremental, buf.heights().to_vec());
    }

    // Every loaded voxel is reachable through the neighborhood sampler
    #[test]
    fn neighborhood_resolves_loaded_voxels(wx in -20i32..20, wy in -8i32..8, wz in -20i32..20) {
        let mut hood = ChunkNeighborhood::new(4, 4, 4);
        for cx in -5..5 { for cy in -2..2 { for cz in -5..5 {
            let coord = ChunkCoord::new(cx, cy, cz);
            let mut buf = ChunkBuf::new_air(coord, 4, 4, 4);
            let (ox, oy, oz) = buf.origin();
            for y in 0..4 { for z in 0..4 { for x in 0..4 {
                let id = ((ox + x as i32) * 7 + (oy + y as i32) * 13 + (oz + z as i32) * 17).rem_euclid(50) as u16;
                buf.set_local(x, y, z, Block::new(id, 0));
            }}}
            prop_assert!(hood.insert(buf).is_ok());
        }}}
        let want = (wx * 7 + wy * 13 + wz * 17).rem_euclid(50) as u16;
        prop_assert_eq!(hood.block_at_world(wx, wy, wz).map(|b| b.id), Some(want));
    }
}

#[test]
fn neighborhood_returns_none_for_unloaded_and_refuses_mismatched_sizes() {
    let mut hood = ChunkNeighborhood::new(4, 4, 4);
    assert!(hood.insert(ChunkBuf::new_air(ChunkCoord::new(0, 0, 0), 4, 4, 4)).is_ok());
    assert!(hood.insert(ChunkBuf::new_air(ChunkCoord::new(1, 0, 0), 8, 4, 4)).is_err());
    assert_eq!(hood.len(), 1);
    assert_eq!(hood.block_at_world(3, 3, 3), Some(Block::AIR));
    assert_eq!(hood.block_at_world(4, 0, 0), None);
    assert_eq!(hood.block_at_world(-1, 0, 0), None);

    let view = hood.view(ChunkCoord::new(0, 0, 0)).unwrap();
    assert_eq!(view.block(4, 0, 0), Block::AIR);
    assert!(hood.view(ChunkCoord::new(2, 0, 0)).is_none());
}

#[test]
fn direct_block_writes_need_a_height_recompute() {
    let mut buf = ChunkBuf::new_air(ChunkCoord::new(0, 0, 0), 2, 8, 2);
    buf.set_local(0, 1, 0, Block::new(1, 0));
    assert_eq!(buf.y_limit(), 2);
    let i = buf.idx(1, 6, 1);
    buf.blocks[i] = Block::new(1, 0);
    assert_eq!(buf.y_limit(), 2);
    buf.recompute_heights();
    assert_eq!(buf.y_limit(), 7);
    assert_eq!(buf.height_at(1, 1), 6);
    assert_eq!(buf.heights(), &[1, -1, -1, 6]);
}
