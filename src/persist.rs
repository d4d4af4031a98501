//! Adjacency export/import (A5, §6).
//!
//! # Wire format
//!
//! Per node, in id order: `u32 degree`, then `degree` entries of `u32 id`.
//! GeoGraph additionally emits, per edge right after its id: `u8 m` (the
//! interval count) then `m` `(f32 lo, f32 hi)` pairs. Everything is written
//! host-endian with no version header, matching the driver's existing dump
//! format exactly so a round-tripped graph needs no translation layer.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::index::geograph::interval::IntervalSet;
use crate::index::geograph::store::{GeoEdge, GeoNodeStore};
use crate::index::node::{NodeId, NodeStore};
use crate::util::checked_u32;

fn write_u32(writer: &mut impl Write, value: u32) -> Result<()> {
    writer
        .write_all(&value.to_ne_bytes())
        .map_err(Error::Io)
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(u32::from_ne_bytes(buf))
}

fn write_f32(writer: &mut impl Write, value: f32) -> Result<()> {
    writer
        .write_all(&value.to_ne_bytes())
        .map_err(Error::Io)
}

fn read_f32(reader: &mut impl Read) -> Result<f32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(f32::from_ne_bytes(buf))
}

/// Writes `store`'s adjacency at `layer` for every registered id.
///
/// # Errors
///
/// Returns [`Error::Io`] on a write failure, or [`Error::Serialization`] if
/// a neighbor id does not fit in `u32`.
pub fn export_node_store(store: &NodeStore, layer: usize, writer: &mut impl Write) -> Result<()> {
    for id in 0..store.len() {
        let neighbors = store.neighbors(id, layer);
        let degree = checked_degree(neighbors.len())?;
        write_u32(writer, degree)?;
        for n in neighbors {
            write_u32(writer, checked_u32!(n as u64, "neighbor id"))?;
        }
    }
    Ok(())
}

/// Reads back an adjacency dump produced by [`export_node_store`] into a
/// fresh [`NodeStore`] of `n` ids, all registered at `layer` 0.
///
/// # Errors
///
/// Returns [`Error::Io`] if the stream ends early or is malformed.
pub fn import_node_store(reader: &mut impl Read, n: usize, layer: usize) -> Result<NodeStore> {
    let store = NodeStore::new(n);
    for id in 0..n {
        store.register(id, layer);
        let degree = read_u32(reader)? as usize;
        let mut neighbors = Vec::with_capacity(degree);
        for _ in 0..degree {
            neighbors.push(read_u32(reader)? as NodeId);
        }
        store.set_neighbors(id, layer, neighbors);
    }
    Ok(store)
}

/// Writes a [`GeoNodeStore`]'s adjacency, including each edge's
/// α-usability intervals.
///
/// # Errors
///
/// Returns [`Error::Io`] on a write failure, or [`Error::Serialization`] if
/// a neighbor id or interval count does not fit its wire width.
pub fn export_geo_store(store: &GeoNodeStore, writer: &mut impl Write) -> Result<()> {
    for id in 0..store.len() {
        let edges = store.edges(id);
        let degree = checked_degree(edges.len())?;
        write_u32(writer, degree)?;
        for edge in edges {
            write_u32(writer, checked_u32!(edge.id as u64, "neighbor id"))?;
            let intervals = edge.usability.intervals();
            if intervals.len() > u8::MAX as usize {
                return Err(Error::Serialization(format!(
                    "edge to {} has {} intervals, exceeds u8::MAX",
                    edge.id,
                    intervals.len()
                )));
            }
            writer
                .write_all(&[intervals.len() as u8])
                .map_err(Error::Io)?;
            for &(lo, hi) in intervals {
                write_f32(writer, lo)?;
                write_f32(writer, hi)?;
            }
        }
    }
    Ok(())
}

/// Reads back a GeoGraph adjacency dump produced by [`export_geo_store`]
/// into a fresh [`GeoNodeStore`] of `n` ids.
///
/// # Errors
///
/// Returns [`Error::Io`] if the stream ends early or is malformed.
pub fn import_geo_store(reader: &mut impl Read, n: usize) -> Result<GeoNodeStore> {
    let store = GeoNodeStore::new(n);
    for id in 0..n {
        let degree = read_u32(reader)? as usize;
        let mut edges = Vec::with_capacity(degree);
        for _ in 0..degree {
            let neighbor = read_u32(reader)? as NodeId;
            let mut m_buf = [0u8; 1];
            reader.read_exact(&mut m_buf).map_err(Error::Io)?;
            let m = m_buf[0] as usize;
            let mut raw = Vec::with_capacity(m);
            for _ in 0..m {
                let lo = read_f32(reader)?;
                let hi = read_f32(reader)?;
                raw.push((lo, hi));
            }
            edges.push(GeoEdge {
                id: neighbor,
                e: 0.0,
                s: 0.0,
                usability: IntervalSet::from_raw(raw),
            });
        }
        if id == 0 {
            store.ensure_entry_point(0);
        }
        store.set_edges(id, edges);
    }
    Ok(store)
}

fn checked_degree(degree: usize) -> Result<u32> {
    if degree > u32::MAX as usize {
        return Err(Error::Serialization(format!(
            "degree {degree} exceeds u32::MAX"
        )));
    }
    Ok(degree as u32)
}

#[cfg(test)]
mod persist_tests;
