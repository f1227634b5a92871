//! Vertex lattice built from the grid dimensions.
//!
//! The graph owns every vertex in a dense, row-major store and links each vertex to its up to
//! eight in-bounds neighbors by index. Topology is fixed at construction; the only mutable state
//! is the wall flag of each vertex. Search bookkeeping (distances, predecessors, visited flags)
//! is kept out of the graph entirely and lives in the search engine.

use log::debug;

use crate::{
    coordinate::Coordinate,
    error::{Error, Result},
};

/// Offsets to the eight neighbors of a cell, orthogonal ones first.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// A single grid cell as a node of the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    /// Position of the vertex on the grid.
    coordinate: Coordinate,
    /// Whether the vertex is excluded from traversal.
    wall: bool,
    /// Dense indices of the adjacent vertices, clipped at the grid edges.
    neighbors: Vec<usize>,
}

impl Vertex {
    /// Position of the vertex on the grid.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Whether the vertex is a wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        self.wall
    }

    /// Dense indices of the adjacent vertices.
    #[must_use]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }
}

/// Fixed-size 2D lattice of vertices with 8-directional adjacency.
///
/// Vertex `i` sits at column `i % width` and row `i / width`. Adjacency is symmetric: if `b` is in
/// the neighbor list of `a`, then `a` is in the neighbor list of `b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major vertex store of length `width * height`.
    vertices: Vec<Vertex>,
}

impl Graph {
    /// Builds a `width` by `height` lattice with every vertex linked to its in-bounds neighbors.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero, if a dimension cannot be
    ///   addressed with an `i32` coordinate, or if the vertex count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = Error::InvalidDimensions { width, height };

        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let columns = i32::try_from(width).map_err(|_err| invalid.clone())?;
        let rows = i32::try_from(height).map_err(|_err| invalid.clone())?;
        let len = width.checked_mul(height).ok_or(invalid)?;

        let mut vertices = Vec::with_capacity(len);
        for y in 0..rows {
            for x in 0..columns {
                let coordinate = Coordinate::new(x, y);
                let neighbors = NEIGHBOR_OFFSETS
                    .iter()
                    .filter_map(|&(dx, dy)| coordinate.offset(dx, dy))
                    .filter(|neighbor| {
                        (0..columns).contains(&neighbor.x) && (0..rows).contains(&neighbor.y)
                    })
                    .filter_map(|neighbor| Self::dense_index(neighbor, width))
                    .collect();

                vertices.push(Vertex {
                    coordinate,
                    wall: false,
                    neighbors,
                });
            }
        }

        debug!("built {width}x{height} graph with {len} vertices");

        Ok(Self {
            width,
            height,
            vertices,
        })
    }

    /// Row-major index of an already bounds-checked coordinate.
    fn dense_index(coordinate: Coordinate, width: usize) -> Option<usize> {
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;

        y.checked_mul(width)?.checked_add(x)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of vertices, always `width * height`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`, since construction rejects empty grids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.index_of(coordinate).is_ok()
    }

    /// Dense index of the vertex at the given coordinate.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCoordinate`] if the coordinate lies outside the grid.
    pub fn index_of(&self, coordinate: Coordinate) -> Result<usize> {
        let invalid = || Error::InvalidCoordinate {
            x: coordinate.x,
            y: coordinate.y,
            width: self.width,
            height: self.height,
        };

        let x = usize::try_from(coordinate.x).map_err(|_err| invalid())?;
        let y = usize::try_from(coordinate.y).map_err(|_err| invalid())?;
        if x >= self.width || y >= self.height {
            return Err(invalid());
        }

        Ok(y * self.width + x)
    }

    /// Vertex stored at the given dense index.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfRange`] if the index is not below [`Graph::len`].
    pub fn vertex(&self, index: usize) -> Result<&Vertex> {
        self.vertices.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.vertices.len(),
        })
    }

    /// Vertex located at the given coordinate.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCoordinate`] if the coordinate lies outside the grid.
    pub fn vertex_at(&self, coordinate: Coordinate) -> Result<&Vertex> {
        let index = self.index_of(coordinate)?;
        self.vertex(index)
    }

    /// Iterator over all vertices in row-major order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Marks or unmarks the vertex at the given coordinate as a wall.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCoordinate`] if the coordinate lies outside the grid.
    pub fn set_wall(&mut self, coordinate: Coordinate, wall: bool) -> Result<()> {
        let index = self.index_of(coordinate)?;
        let len = self.vertices.len();
        let vertex = self
            .vertices
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        vertex.wall = wall;

        Ok(())
    }

    /// Marks every given coordinate as a wall.
    ///
    /// All coordinates are validated before any flag is changed, so a failing call leaves the
    /// graph untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCoordinate`] if any coordinate lies outside the grid.
    pub fn apply_walls(&mut self, walls: &[Coordinate]) -> Result<()> {
        let indices = walls
            .iter()
            .map(|&wall| self.index_of(wall))
            .collect::<Result<Vec<_>>>()?;

        for index in indices {
            if let Some(vertex) = self.vertices.get_mut(index) {
                vertex.wall = true;
            }
        }

        Ok(())
    }

    /// Clears the wall flag of every vertex.
    pub fn clear_walls(&mut self) {
        for vertex in &mut self.vertices {
            vertex.wall = false;
        }
    }

    /// Coordinates of every vertex currently flagged as a wall, in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.vertices
            .iter()
            .filter(|vertex| vertex.wall)
            .map(Vertex::coordinate)
    }
}
